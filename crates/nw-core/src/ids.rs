//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The simulation keeps its enemies
//! sorted by `AgentId` and finds them by binary search.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID", equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identity of an enemy, allocated by the simulation in spawn order.
    pub struct AgentId(u32);
}

typed_id! {
    /// Identity of a pursuable target (a player) in the target registry.
    ///
    /// Agents hold a `TargetId` as a weak reference: the registry owns the
    /// transform and the id simply stops resolving once the target despawns.
    pub struct TargetId(u32);
}

typed_id! {
    /// Identity of whatever produced a noise (a thrown prop, a footstep, …).
    pub struct SourceId(u32);
}
