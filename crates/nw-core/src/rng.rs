//! Deterministic simulation-level RNG wrapper.
//!
//! The decision core itself is fully deterministic and draws no random
//! numbers.  `SimRng` exists for the things that drive it: scenario scripts
//! that scatter noise stimuli, move targets around, or throw props.  Seeding
//! it from `SimConfig::seed` makes an entire run reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation-level RNG for scenario drivers.
///
/// Used only in single-threaded contexts.  Derive independent streams with
/// [`child`](Self::child) rather than sharing one instance between drivers.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, useful for
    /// giving each scenario driver its own reproducible stream.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// A random point on the horizontal plane within the axis-aligned square
    /// `[-half_extent, half_extent]²` around `center`.
    pub fn planar_point(&mut self, center: crate::Vec3, half_extent: f32) -> crate::Vec3 {
        if half_extent <= 0.0 {
            return center;
        }
        let dx = self.gen_range(-half_extent..=half_extent);
        let dz = self.gen_range(-half_extent..=half_extent);
        crate::Vec3::new(center.x + dx, center.y, center.z + dz)
    }
}
