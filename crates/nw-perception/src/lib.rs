//! `nw-perception`: "can I see / can I still see a target?".
//!
//! # Hysteresis
//!
//! Acquisition and retention use different thresholds.  A target is acquired
//! inside a narrow cone and a short range, but once chased it is retained
//! within a wider cone and a longer range, and even after those checks fail
//! it stays tracked for a grace period.  A single threshold would acquire and
//! lose a target every frame while it hovers on the cone's edge.
//!
//! | Module      | Contents                                      |
//! |-------------|-----------------------------------------------|
//! | [`config`]  | `PerceptionConfig` and its defaults           |
//! | [`cone`]    | `in_view_cone` angular test                   |
//! | [`service`] | `PerceptionService` (per-agent)               |

pub mod cone;
pub mod config;
pub mod service;


pub use cone::in_view_cone;
pub use config::PerceptionConfig;
pub use service::PerceptionService;
