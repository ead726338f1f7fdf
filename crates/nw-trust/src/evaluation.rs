//! Before/after measurement of a single investigation.

use nw_agent::TargetRegistry;
use nw_core::Vec3;

use crate::InvestigationOutcome;

/// Where the nearest target was when an investigation began.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationSnapshot {
    pub target_position: Vec3,
    pub start_distance:  f32,
}

/// Per-agent evaluation of the current Investigate excursion.
///
/// `begin` arms the tracker; the first `finish` after it produces an outcome
/// and disarms it, so any later `finish` (from a second exit path in the same
/// lifecycle) is a no-op.
#[derive(Clone, Debug, Default)]
pub struct EvaluationTracker {
    /// `Some(snapshot)` while armed; the inner `None` means "no target
    /// existed when the investigation started".
    pending: Option<Option<EvaluationSnapshot>>,
}

impl EvaluationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the snapshot for an investigation starting at `position`.
    ///
    /// Re-arming while already armed discards the previous snapshot.
    pub fn begin(&mut self, position: Vec3, targets: &TargetRegistry) {
        let snapshot = targets.nearest_to(position).map(|entry| EvaluationSnapshot {
            target_position: entry.position,
            start_distance:  position.distance(entry.position),
        });
        self.pending = Some(snapshot);
    }

    /// `true` between `begin` and the first `finish`.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// The snapshot taken by the pending `begin`, if any.
    pub fn snapshot(&self) -> Option<EvaluationSnapshot> {
        self.pending.flatten()
    }

    /// Judge the investigation that just ended with the agent at `position`.
    ///
    /// Returns `None` if nothing is armed.
    pub fn finish(&mut self, position: Vec3, acquired: bool) -> Option<InvestigationOutcome> {
        let snapshot = self.pending.take()?;
        let outcome = if acquired {
            InvestigationOutcome::TargetAcquired
        } else {
            match snapshot {
                None => InvestigationOutcome::NoSnapshot,
                Some(snap) => InvestigationOutcome::Moved {
                    distance_improvement: snap.start_distance
                        - position.distance(snap.target_position),
                },
            }
        };
        Some(outcome)
    }
}
