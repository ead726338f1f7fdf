//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `nw-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("obstacle {index} has invalid extents: {reason}")]
    InvalidObstacle { index: usize, reason: &'static str },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
