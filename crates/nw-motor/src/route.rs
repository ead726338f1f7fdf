//! Looping patrol routes.

use nw_core::{SimTime, Vec3};

use crate::{MotorError, MotorResult};

/// Waypoints visited in order, wrapping around, with a dwell at each.
#[derive(Clone, Debug, Default)]
pub struct PatrolRoute {
    waypoints:     Vec<Vec3>,
    index:         usize,
    waiting_until: Option<SimTime>,
}

impl PatrolRoute {
    /// # Errors
    ///
    /// [`MotorError::NonFiniteWaypoint`] if any waypoint has a NaN or
    /// infinite component.
    pub fn new(waypoints: Vec<Vec3>) -> MotorResult<Self> {
        if let Some(index) = waypoints.iter().position(|w| !w.is_finite()) {
            return Err(MotorError::NonFiniteWaypoint { index });
        }
        Ok(Self { waypoints, index: 0, waiting_until: None })
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// The waypoint currently being walked to (or dwelt at).
    pub fn current(&self) -> Option<Vec3> {
        self.waypoints.get(self.index).copied()
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.waiting_until.is_some()
    }

    /// Start dwelling at the current waypoint until `until`.
    pub fn begin_wait(&mut self, until: SimTime) {
        self.waiting_until = Some(until);
    }

    /// Cancel a dwell without advancing.
    pub fn cancel_wait(&mut self) {
        self.waiting_until = None;
    }

    /// If a dwell is running, end it once `now` reaches its end and move on
    /// to the next waypoint.  Returns `true` while still dwelling.
    pub fn poll_wait(&mut self, now: SimTime) -> bool {
        match self.waiting_until {
            Some(until) if !now.reached(until) => true,
            Some(_) => {
                self.waiting_until = None;
                if !self.waypoints.is_empty() {
                    self.index = (self.index + 1) % self.waypoints.len();
                }
                false
            }
            None => false,
        }
    }
}
