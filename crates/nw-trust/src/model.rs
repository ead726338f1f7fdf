//! `TrustModel`: unreliability accumulator and trust multiplier.

use crate::TrustConfig;

/// How a finished investigation turned out.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvestigationOutcome {
    /// The agent found a target before (or by) leaving Investigate.
    TargetAcquired,
    /// No target existed when the investigation began; nothing to judge.
    NoSnapshot,
    /// Net change in distance to the snapshot target position.  Positive
    /// means the agent ended up closer.
    Moved { distance_improvement: f32 },
}

/// Shared trust state.
///
/// `trust = max(min_trust, exp(-unreliability * decay_rate))`, so trust is 1
/// with no recorded failures and decays towards `min_trust` as they pile up.
/// `unreliability` never goes negative.
#[derive(Clone, Debug)]
pub struct TrustModel {
    config:        TrustConfig,
    unreliability: f32,
    records:       u64,
}

impl Default for TrustModel {
    fn default() -> Self {
        Self::new(TrustConfig::default())
    }
}

impl TrustModel {
    pub fn new(config: TrustConfig) -> Self {
        Self { config, unreliability: 0.0, records: 0 }
    }

    #[inline]
    pub fn config(&self) -> &TrustConfig {
        &self.config
    }

    /// Multiplier applied to every noise score, in `[min_trust, 1]`.
    pub fn trust(&self) -> f32 {
        let raw = (-self.unreliability * self.config.decay_rate).exp();
        raw.max(self.config.min_trust).min(1.0)
    }

    #[inline]
    pub fn unreliability(&self) -> f32 {
        self.unreliability
    }

    /// Overwrite the accumulator.  Negative values clamp to zero.
    pub fn set_unreliability(&mut self, value: f32) {
        self.unreliability = if value.is_finite() { value.max(0.0) } else { 0.0 };
    }

    /// Number of outcomes recorded since construction or the last reset.
    #[inline]
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Fold one investigation outcome into the accumulator and return the
    /// change actually applied (after clamping at zero).
    pub fn record(&mut self, outcome: InvestigationOutcome) -> f32 {
        self.records += 1;
        let cfg = &self.config;
        let delta = match outcome {
            InvestigationOutcome::TargetAcquired => -cfg.good_decrement,
            InvestigationOutcome::NoSnapshot => 0.0,
            InvestigationOutcome::Moved { distance_improvement } => {
                if distance_improvement < -cfg.progress_threshold {
                    cfg.bad_increment
                } else if distance_improvement > cfg.progress_threshold {
                    -cfg.good_decrement * 0.5
                } else {
                    0.0
                }
            }
        };

        let before = self.unreliability;
        self.unreliability = (before + delta).max(0.0);
        let applied = self.unreliability - before;
        tracing::debug!(
            ?outcome,
            applied,
            unreliability = self.unreliability,
            trust = self.trust(),
            "noise trust updated"
        );
        applied
    }

    /// Forget everything learned.  Call at session or round boundaries.
    pub fn reset(&mut self) {
        self.unreliability = 0.0;
        self.records = 0;
    }
}
