//! The line-of-sight collaborator consumed by perception.
//!
//! # Pluggability
//!
//! Perception calls visibility via the [`LineOfSight`] trait, so a game can
//! back it with its physics engine's raycasts while tests and headless runs
//! use [`OpenField`] or an [`ObstacleField`][crate::ObstacleField].

use nw_core::Vec3;

/// Answers "is the straight segment `from → to` unobstructed?".
///
/// Targets themselves never block their own line of sight; implementations
/// only consider world geometry.
pub trait LineOfSight: Send + Sync {
    fn is_clear(&self, from: Vec3, to: Vec3) -> bool;
}

/// A world with no occluders: every segment is clear.
pub struct OpenField;

impl LineOfSight for OpenField {
    #[inline]
    fn is_clear(&self, _from: Vec3, _to: Vec3) -> bool {
        true
    }
}

impl<T: LineOfSight + ?Sized> LineOfSight for &T {
    #[inline]
    fn is_clear(&self, from: Vec3, to: Vec3) -> bool {
        (**self).is_clear(from, to)
    }
}
