//! Static occluders and segment queries.
//!
//! # Spatial index
//!
//! Obstacles are axis-aligned boxes stored in an R-tree (via `rstar`).  A
//! line-of-sight query fetches only the boxes whose envelope intersects the
//! segment's bounding box, then runs an exact slab test against each.  Level
//! geometry is static, so the tree is bulk-loaded once at build time.

use rstar::{RTree, RTreeObject, AABB};

use nw_core::Vec3;

use crate::{LineOfSight, SpatialError, SpatialResult};

/// Segments shorter than this are always clear (eye on top of the target).
const MIN_RAY_LENGTH: f32 = 0.001;

// ── ObstacleBox ───────────────────────────────────────────────────────────────

/// An axis-aligned solid box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl ObstacleBox {
    /// Box from a center point and non-negative half extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self { min: center - half_extents, max: center + half_extents }
    }

    /// Exact segment-vs-box slab test over the parameter range `[0, 1]`.
    pub fn intersects_segment(&self, from: Vec3, to: Vec3) -> bool {
        let dir = to - from;
        let mut t_enter = 0.0_f32;
        let mut t_exit = 1.0_f32;

        for (o, d, lo, hi) in [
            (from.x, dir.x, self.min.x, self.max.x),
            (from.y, dir.y, self.min.y, self.max.y),
            (from.z, dir.z, self.min.z, self.max.z),
        ] {
            if d.abs() < f32::EPSILON {
                // Parallel to this slab: must already be inside it.
                if o < lo || o > hi {
                    return false;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t1 = (lo - o) * inv;
            let mut t2 = (hi - o) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_enter = t_enter.max(t1);
            t_exit = t_exit.min(t2);
            if t_enter > t_exit {
                return false;
            }
        }
        true
    }
}

impl RTreeObject for ObstacleBox {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(to_array(self.min), to_array(self.max))
    }
}

#[inline]
fn to_array(v: Vec3) -> [f32; 3] {
    [v.x, v.y, v.z]
}

// ── ObstacleField ─────────────────────────────────────────────────────────────

/// Static level geometry answering line-of-sight queries.
///
/// Do not construct directly; use [`ObstacleFieldBuilder`].
pub struct ObstacleField {
    tree: RTree<ObstacleBox>,
}

impl ObstacleField {
    /// A field with no obstacles (equivalent to [`OpenField`][crate::OpenField]).
    pub fn empty() -> Self {
        Self { tree: RTree::new() }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Iterator over every obstacle (arbitrary order).
    pub fn iter(&self) -> impl Iterator<Item = &ObstacleBox> + '_ {
        self.tree.iter()
    }
}

impl LineOfSight for ObstacleField {
    fn is_clear(&self, from: Vec3, to: Vec3) -> bool {
        if from.distance_squared(to) <= MIN_RAY_LENGTH * MIN_RAY_LENGTH {
            return true;
        }
        let query = AABB::from_corners(to_array(from), to_array(to));
        !self
            .tree
            .locate_in_envelope_intersecting(&query)
            .any(|b| b.intersects_segment(from, to))
    }
}

// ── ObstacleFieldBuilder ──────────────────────────────────────────────────────

/// Collects obstacle boxes, validates them, and bulk-loads the R-tree.
#[derive(Default)]
pub struct ObstacleFieldBuilder {
    boxes: Vec<ObstacleBox>,
}

impl ObstacleFieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a box centered on `center` with the given half extents.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidObstacle`] for non-finite values or
    /// negative extents.
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3) -> SpatialResult<&mut Self> {
        let index = self.boxes.len();
        if !center.is_finite() || !half_extents.is_finite() {
            return Err(SpatialError::InvalidObstacle { index, reason: "non-finite value" });
        }
        if half_extents.x < 0.0 || half_extents.y < 0.0 || half_extents.z < 0.0 {
            return Err(SpatialError::InvalidObstacle { index, reason: "negative half extent" });
        }
        self.boxes.push(ObstacleBox::from_center(center, half_extents));
        Ok(self)
    }

    pub fn build(self) -> ObstacleField {
        ObstacleField { tree: RTree::bulk_load(self.boxes) }
    }
}
