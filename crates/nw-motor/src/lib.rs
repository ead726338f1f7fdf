//! `nw-motor`: the locomotion collaborator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`motor`]     | `Motor` trait: the narrow actuator interface decisions use    |
//! | [`route`]     | `PatrolRoute`: looping waypoints with a dwell at each         |
//! | [`kinematic`] | `KinematicMotor`, `KinematicConfig`: straight-line mover      |
//! | [`recording`] | `RecordingMotor`, `MotorCommand`: command log for tests       |
//! | [`error`]     | `MotorError`, `MotorResult<T>`                                |
//!
//! # Movement model
//!
//! The decision core never asks a motor *how* it moves.  It only issues
//! commands (go here, follow that target, stop, get knocked back) and reads
//! the body transform.  `KinematicMotor` implements those commands with
//! straight-line steering on the ground plane, no pathfinding:
//!
//! 1. While movement is locked, steering is off and residual velocity decays
//!    with `drag`.
//! 2. Otherwise, if following the patrol route, the motor walks to the
//!    current waypoint, dwells `patrol_stop_secs`, then moves on.
//! 3. Otherwise it walks towards the destination point or the followed
//!    target, stopping `stopping_distance` short.
//!
//! Knockback impulses add to a velocity that decays with `drag` and is
//! integrated on top of steering.

pub mod error;
pub mod kinematic;
pub mod motor;
pub mod recording;
pub mod route;

#[cfg(test)]
mod tests;

pub use error::{MotorError, MotorResult};
pub use kinematic::{KinematicConfig, KinematicMotor};
pub use motor::Motor;
pub use recording::{MotorCommand, RecordingMotor};
pub use route::PatrolRoute;
