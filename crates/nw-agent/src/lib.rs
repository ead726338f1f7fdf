//! `nw-agent`: the target registry the decision core reads from.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`registry`]  | `TargetRegistry`, `TargetEntry`                           |
//!
//! Targets (players) are owned by the world: they are added when they spawn
//! and removed when they despawn.  Agents never hold a target directly, only
//! a [`TargetId`][nw_core::TargetId] that is resolved here on every use, so
//! a despawned target simply stops resolving instead of dangling.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `TargetEntry`.         |

pub mod registry;


pub use registry::{TargetEntry, TargetRegistry};
