//! `KinematicMotor`: straight-line ground movement without physics.

use nw_agent::TargetRegistry;
use nw_core::error::ensure_finite;
use nw_core::{SimTime, TargetId, Transform, Vec3};

use crate::{Motor, MotorError, MotorResult, PatrolRoute};

/// Slack on arrival checks so a body parked exactly at the stopping
/// distance counts as arrived despite rounding.
const ARRIVAL_SLACK: f32 = 1e-3;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KinematicConfig {
    /// Walking speed, m/s.
    pub max_speed: f32,
    /// Speed factor applied while on the patrol route.
    pub patrol_speed_multiplier: f32,
    /// Arrival tolerance for waypoints, points and targets.
    pub stopping_distance: f32,
    /// Dwell at each patrol waypoint.
    pub patrol_stop_secs: f32,
    /// Exponential decay rate of knockback velocity, 1/s.
    pub drag: f32,
}

impl Default for KinematicConfig {
    fn default() -> Self {
        Self {
            max_speed:               5.0,
            patrol_speed_multiplier: 1.0,
            stopping_distance:       1.0,
            patrol_stop_secs:        1.5,
            drag:                    2.0,
        }
    }
}

impl KinematicConfig {
    pub fn validate(&self) -> MotorResult<()> {
        for (what, v) in [
            ("max_speed", self.max_speed),
            ("patrol_speed_multiplier", self.patrol_speed_multiplier),
            ("stopping_distance", self.stopping_distance),
            ("patrol_stop_secs", self.patrol_stop_secs),
            ("drag", self.drag),
        ] {
            ensure_finite(what, v).map_err(|e| MotorError::Config(e.to_string()))?;
            if v < 0.0 {
                return Err(MotorError::Config(format!("{what} must be non-negative, got {v}")));
            }
        }
        Ok(())
    }
}

/// What the motor is steering towards outside of patrol.
#[derive(Copy, Clone, Debug, PartialEq)]
enum Goal {
    None,
    Point(Vec3),
    Target(TargetId),
}

/// Reference motor used by the headless simulation.
#[derive(Clone, Debug)]
pub struct KinematicMotor {
    config:        KinematicConfig,
    body:          Transform,
    velocity:      Vec3,
    goal:          Goal,
    route:         PatrolRoute,
    follow_patrol: bool,
    locked_until:  SimTime,
}

impl KinematicMotor {
    pub fn new(body: Transform, config: KinematicConfig) -> Self {
        Self {
            config,
            body,
            velocity:      Vec3::ZERO,
            goal:          Goal::None,
            route:         PatrolRoute::default(),
            follow_patrol: false,
            locked_until:  SimTime(f64::NEG_INFINITY),
        }
    }

    /// Attach a patrol route and start following it.
    pub fn with_route(mut self, route: PatrolRoute) -> Self {
        self.follow_patrol = !route.is_empty();
        self.route = route;
        self
    }

    #[inline]
    pub fn route(&self) -> &PatrolRoute {
        &self.route
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn is_locked(&self, now: SimTime) -> bool {
        !now.reached(self.locked_until)
    }

    /// Teleport the body (spawn, respawn, scripted moves).
    pub fn place(&mut self, body: Transform) {
        self.body = body;
    }

    /// The point steering aims at this step, plus the speed to use.
    ///
    /// Updates patrol dwell state as a side effect.
    fn steering_goal(&mut self, now: SimTime, targets: &TargetRegistry) -> Option<(Vec3, f32)> {
        if self.follow_patrol {
            if let Some(waypoint) = self.route.current() {
                if self.route.poll_wait(now) {
                    return None;
                }
                // poll_wait may have advanced the route.
                let waypoint = self.route.current().unwrap_or(waypoint);
                if self.body.position.flatten().distance(waypoint.flatten())
                    <= self.config.stopping_distance + ARRIVAL_SLACK
                {
                    tracing::trace!(%waypoint, "patrol waypoint reached");
                    self.route.begin_wait(now.after(self.config.patrol_stop_secs));
                    return None;
                }
                let speed = self.config.max_speed * self.config.patrol_speed_multiplier.max(0.0);
                return Some((waypoint, speed));
            }
        }

        let point = match self.goal {
            Goal::None => return None,
            Goal::Point(p) => p,
            Goal::Target(id) => targets.position(id)?,
        };
        Some((point, self.config.max_speed))
    }
}

impl Motor for KinematicMotor {
    fn set_destination(&mut self, point: Vec3) {
        self.follow_patrol = false;
        self.route.cancel_wait();
        self.goal = Goal::Point(point);
    }

    fn set_target(&mut self, target: TargetId, override_patrol: bool) {
        if override_patrol {
            self.follow_patrol = false;
        }
        if self.goal == Goal::Target(target) {
            return;
        }
        self.route.cancel_wait();
        self.goal = Goal::Target(target);
    }

    fn clear_target(&mut self) {
        self.goal = Goal::None;
        self.route.cancel_wait();
    }

    fn lock_movement_until(&mut self, until: SimTime) {
        if until > self.locked_until {
            self.locked_until = until;
        }
    }

    fn zero_horizontal_velocity(&mut self) {
        self.velocity = Vec3::new(0.0, self.velocity.y, 0.0);
    }

    fn add_velocity_change(&mut self, delta: Vec3) {
        self.velocity += delta;
    }

    fn follows_patrol_route(&self) -> bool {
        self.follow_patrol
    }

    fn set_follows_patrol_route(&mut self, follow: bool) {
        self.follow_patrol = follow;
    }

    fn transform(&self) -> Transform {
        self.body
    }

    fn advance(&mut self, now: SimTime, dt: f32, targets: &TargetRegistry) {
        if dt <= 0.0 {
            return;
        }

        // Residual (knockback) velocity always integrates and decays.
        self.body.position += self.velocity * dt;
        let decay = (-self.config.drag * dt).exp();
        // Ground-bound: vertical velocity is discarded.
        self.velocity = Vec3::new(self.velocity.x * decay, 0.0, self.velocity.z * decay);

        if self.is_locked(now) {
            return;
        }

        let Some((goal, speed)) = self.steering_goal(now, targets) else {
            return;
        };
        let to_goal = (goal - self.body.position).flatten();
        let remaining = to_goal.length() - self.config.stopping_distance;
        if remaining <= 0.0 {
            return;
        }
        let Some(dir) = to_goal.try_normalize() else {
            return;
        };
        self.body.forward = dir;
        self.body.position += dir * (speed * dt).min(remaining);
    }
}
