//! Behavior states.

use std::fmt;

use nw_core::{SimTime, Vec3};

/// Payload of the `Stunned` state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StunState {
    pub ends_at:           SimTime,
    /// Flattened unit knockback direction, world space.
    pub direction:         Vec3,
    /// How far behind the knockback to investigate afterwards.  Only used
    /// when there was no target at stun start.
    pub redirect_distance: f32,
    pub had_target:        bool,
    /// Knockback goes out on the first update after entry, exactly once.
    pub knockback_applied: bool,
}

/// The active state of one enemy.  Exactly one at a time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BehaviorState {
    Patrol,
    Pursue,
    Investigate,
    Stunned(StunState),
}

impl BehaviorState {
    #[inline]
    pub fn kind(&self) -> StateKind {
        match self {
            BehaviorState::Patrol => StateKind::Patrol,
            BehaviorState::Pursue => StateKind::Pursue,
            BehaviorState::Investigate => StateKind::Investigate,
            BehaviorState::Stunned(_) => StateKind::Stunned,
        }
    }
}

/// Payload-free state tag for logs, events and output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateKind {
    Patrol,
    Pursue,
    Investigate,
    Stunned,
}

impl StateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StateKind::Patrol => "patrol",
            StateKind::Pursue => "pursue",
            StateKind::Investigate => "investigate",
            StateKind::Stunned => "stunned",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
