//! `nw-spatial`: line-of-sight queries and obstacle indexing.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`los`]      | `LineOfSight` trait, `OpenField`                            |
//! | [`obstacle`] | `ObstacleField` (R-tree of boxes), `ObstacleFieldBuilder`   |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod los;
pub mod obstacle;


pub use error::{SpatialError, SpatialResult};
pub use los::{LineOfSight, OpenField};
pub use obstacle::{ObstacleBox, ObstacleField, ObstacleFieldBuilder};
