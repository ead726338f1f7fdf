//! `nw-core`: foundational types for the `nightwatch` enemy-AI core.
//!
//! This crate is a dependency of every other `nw-*` crate.  It intentionally
//! has no `nw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `TargetId`, `SourceId`                     |
//! | [`math`]        | `Vec3`, `Transform`                                   |
//! | [`time`]        | `Tick`, `SimTime`, `SimClock`, `SimConfig`            |
//! | [`rng`]         | `SimRng` (deterministic, seeded from `SimConfig`)     |
//! | [`error`]       | `NwError`, `NwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod math;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{NwError, NwResult};
pub use ids::{AgentId, SourceId, TargetId};
pub use math::{Transform, Vec3};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, SimTime, Tick};
