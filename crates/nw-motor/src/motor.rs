//! The actuator interface consumed by the behavior state machine.

use nw_agent::TargetRegistry;
use nw_core::{SimTime, TargetId, Transform, Vec3};

/// Locomotion for one agent.
///
/// The command methods are what the decision core calls.  `transform` and
/// `advance` belong to the simulation loop, which moves bodies between
/// decision steps.
pub trait Motor {
    /// Walk to `point`, abandoning the patrol route.
    fn set_destination(&mut self, point: Vec3);

    /// Follow a live target.  With `override_patrol` the patrol route is
    /// abandoned; otherwise the route flag is left as it is.
    fn set_target(&mut self, target: TargetId, override_patrol: bool);

    /// Forget any destination or followed target.
    fn clear_target(&mut self);

    /// Suspend steering until `until`.  An existing later lock wins.
    fn lock_movement_until(&mut self, until: SimTime);

    fn zero_horizontal_velocity(&mut self);

    /// Instantaneous velocity change (knockback).
    fn add_velocity_change(&mut self, delta: Vec3);

    fn follows_patrol_route(&self) -> bool;

    fn set_follows_patrol_route(&mut self, follow: bool);

    /// Current body transform.
    fn transform(&self) -> Transform;

    /// Integrate one step of `dt` seconds ending at `now`.
    fn advance(&mut self, now: SimTime, dt: f32, targets: &TargetRegistry);
}
