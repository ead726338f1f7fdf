//! The broadcast payload.

use nw_core::{SourceId, Vec3};

/// An immutable noise stimulus.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseEvent {
    pub position: Vec3,
    /// How far the noise carries before listener sensitivity is applied.
    pub radius:   f32,
    /// Normalized loudness in `[0, 1]`.
    pub loudness: f32,
    pub source:   SourceId,
}

impl NoiseEvent {
    /// Construct an event, clamping loudness into `[0, 1]` and radius to ≥ 0.
    pub fn new(position: Vec3, radius: f32, loudness: f32, source: SourceId) -> Self {
        Self {
            position,
            radius: radius.max(0.0),
            loudness: loudness.clamp(0.0, 1.0),
            source,
        }
    }
}
