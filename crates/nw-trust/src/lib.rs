//! `nw-trust`: learning which noises are worth investigating.
//!
//! Every finished investigation is judged by an [`EvaluationTracker`]: did
//! the agent find a target, walk towards where the targets were, or walk
//! away from them?  The resulting [`InvestigationOutcome`] is fed to the
//! [`TrustModel`], whose unreliability accumulator turns into a multiplier
//! on future noise scores.
//!
//! A single `TrustModel` is shared by every agent in a simulation: one
//! agent's wasted trip makes all of them more sceptical.
//!
//! | Module         | Contents                                          |
//! |----------------|---------------------------------------------------|
//! | [`config`]     | `TrustConfig`                                     |
//! | [`model`]      | `TrustModel`, `InvestigationOutcome`              |
//! | [`evaluation`] | `EvaluationTracker`, `EvaluationSnapshot`         |

pub mod config;
pub mod evaluation;
pub mod model;


pub use config::TrustConfig;
pub use evaluation::{EvaluationSnapshot, EvaluationTracker};
pub use model::{InvestigationOutcome, TrustModel};
