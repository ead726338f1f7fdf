//! `nw-sim`: the authoritative fixed-step loop for the nightwatch enemy AI.
//!
//! # Two-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Decide: Enemy::update for every enemy, ascending AgentId, each
//!             borrowing the shared TrustModel through a DecisionContext.
//!   ② Move: Motor::advance(now, fixed_dt) for every enemy.
//!   ③ Report: buffered BehaviorEvents, a TickSummary and (at the snapshot
//!             interval) per-agent snapshots go to the SimObserver.
//! ```
//!
//! Noise, stuns and target movement arrive between ticks through `Sim`
//! methods and are decided on immediately; their events are reported with
//! the next tick.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nw_behavior::EnemyConfig;
//! use nw_core::{SimConfig, Transform, Vec3};
//! use nw_motor::{KinematicConfig, KinematicMotor};
//! use nw_sim::{NoopObserver, SimBuilder};
//! use nw_spatial::OpenField;
//!
//! let motor = KinematicMotor::new(Transform::at(Vec3::ZERO), KinematicConfig::default());
//! let mut sim = SimBuilder::new(SimConfig::default(), OpenField)
//!     .enemy(motor, EnemyConfig::default())
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{AgentSnapshot, EventLog, NoopObserver, SimObserver, TickSummary};
pub use sim::Sim;
