//! World-space vector type and agent transforms.
//!
//! `Vec3` uses `f32` components with a Y-up convention: the horizontal plane
//! is X/Z, and "flattening" a vector means zeroing its Y component.  That is
//! all the geometry the decision core needs (distances, cone tests, knockback
//! directions), so no linear-algebra dependency is pulled in.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Squared length under which a vector is treated as degenerate.
pub const DEGENERATE_SQR: f32 = 1e-6;

/// A three-component world-space vector (Y is up).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const FORWARD: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };
    pub const RIGHT: Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        (self - other).length()
    }

    #[inline]
    pub fn distance_squared(self, other: Vec3) -> f32 {
        (self - other).length_squared()
    }

    /// Project onto the horizontal plane (zero the Y component).
    #[inline]
    pub fn flatten(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }

    /// `true` if the squared length is below [`DEGENERATE_SQR`] or any
    /// component is NaN or infinite.  Such a vector has no usable direction.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        // Written so a NaN length fails the comparison.
        !(self.is_finite() && self.length_squared() >= DEGENERATE_SQR)
    }

    /// Unit vector in the same direction, or `None` for a degenerate vector.
    pub fn try_normalize(self) -> Option<Vec3> {
        if self.is_degenerate() {
            return None;
        }
        Some(self * (1.0 / self.length()))
    }

    /// Unit vector in the same direction, or `fallback` for a degenerate vector.
    #[inline]
    pub fn normalize_or(self, fallback: Vec3) -> Vec3 {
        self.try_normalize().unwrap_or(fallback)
    }

    /// `true` if every component is finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ── Transform ─────────────────────────────────────────────────────────────────

/// Position plus facing of an agent's body.
///
/// `forward` is expected to be unit length but is re-normalized wherever the
/// math depends on it, so a slightly denormalized value from a physics step
/// is harmless.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec3,
    pub forward:  Vec3,
}

impl Transform {
    #[inline]
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    /// A transform at `position` facing +Z.
    #[inline]
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::FORWARD)
    }

    /// Unit right vector (`up × forward`), flattened.
    ///
    /// Falls back to world +X when the forward vector is vertical.
    pub fn right(&self) -> Vec3 {
        Vec3::UP.cross(self.forward).flatten().normalize_or(Vec3::RIGHT)
    }

    /// Convert a facing-relative `(right, forward)` pair on the horizontal
    /// plane into a world-space direction.
    pub fn local_planar_to_world(&self, right: f32, forward: f32) -> Vec3 {
        let fwd = self.forward.flatten().normalize_or(Vec3::FORWARD);
        self.right() * right + fwd * forward
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}
