//! `nw-hearing`: from a thrown bottle hitting the floor to "go check that".
//!
//! # Pipeline
//!
//! ```text
//! ImpactNoiseEmitter ──► NoiseEvent ──► NoiseRouter::broadcast
//!                                             │  (registration order)
//!                                             ▼
//!                          HearingConfig::hear  (distance falloff → suspicion)
//!                                             │
//!                                             ▼
//!                          NoiseArbiter::consider (× bias × trust, strict >)
//! ```
//!
//! The router knows nothing about agents beyond their ids; the simulation
//! supplies a [`NoiseSink`] that resolves each id to an agent and runs the
//! last two stages.
//!
//! | Module      | Contents                                             |
//! |-------------|------------------------------------------------------|
//! | [`event`]   | `NoiseEvent`                                         |
//! | [`router`]  | `NoiseRouter`, `NoiseSink`                           |
//! | [`filter`]  | `HearingConfig` (per-listener falloff)               |
//! | [`arbiter`] | `NoiseArbiter`, `NoiseCandidate`, `Arbitration`      |
//! | [`impact`]  | `ImpactNoiseEmitter`, `ImpactNoiseConfig`            |

pub mod arbiter;
pub mod event;
pub mod filter;
pub mod impact;
pub mod router;

#[cfg(test)]
mod tests;

pub use arbiter::{Arbitration, NoiseArbiter, NoiseCandidate, score};
pub use event::NoiseEvent;
pub use filter::HearingConfig;
pub use impact::{ImpactNoiseConfig, ImpactNoiseEmitter};
pub use router::{NoiseRouter, NoiseSink};
