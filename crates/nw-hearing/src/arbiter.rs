//! `NoiseArbiter`: which pending noise is worth investigating.
//!
//! Each agent keeps at most one candidate.  A new stimulus is scored as
//! `suspicion × bias × trust` and replaces the candidate only when its score
//! is strictly greater, so among equal stimuli the first one heard wins.

use nw_core::{SimTime, Vec3};

/// Smallest bias accepted.  Keeps a zero or negative bias from collapsing
/// every score to zero.
pub const MIN_BIAS: f32 = 0.001;

/// The noise an agent currently intends to check.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseCandidate {
    pub position:  Vec3,
    pub heard_at:  SimTime,
    pub suspicion: f32,
    pub score:     f32,
}

/// Result of [`NoiseArbiter::consider`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Arbitration {
    /// The stimulus is now the pending candidate.
    Accepted { score: f32 },
    /// An existing candidate scored at least as high.
    Rejected { score: f32, incumbent: f32 },
}

impl Arbitration {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Arbitration::Accepted { .. })
    }
}

/// Resolved score of a stimulus, with suspicion and bias clamped to their
/// safe minimums.
#[inline]
pub fn score(suspicion: f32, bias: f32, trust: f32) -> f32 {
    suspicion.max(0.0) * bias.max(MIN_BIAS) * trust
}

/// Per-agent candidate slot.
#[derive(Clone, Debug, Default)]
pub struct NoiseArbiter {
    candidate: Option<NoiseCandidate>,
}

impl NoiseArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn candidate(&self) -> Option<&NoiseCandidate> {
        self.candidate.as_ref()
    }

    #[inline]
    pub fn has_candidate(&self) -> bool {
        self.candidate.is_some()
    }

    /// Score a stimulus and install it if it beats the pending candidate.
    pub fn consider(
        &mut self,
        position:  Vec3,
        suspicion: f32,
        bias:      f32,
        trust:     f32,
        now:       SimTime,
    ) -> Arbitration {
        let suspicion = suspicion.max(0.0);
        let score = score(suspicion, bias, trust);

        if let Some(incumbent) = &self.candidate {
            if score <= incumbent.score {
                return Arbitration::Rejected { score, incumbent: incumbent.score };
            }
        }

        self.candidate = Some(NoiseCandidate { position, heard_at: now, suspicion, score });
        Arbitration::Accepted { score }
    }

    /// Drop the pending candidate, returning it.
    pub fn clear(&mut self) -> Option<NoiseCandidate> {
        self.candidate.take()
    }
}
