//! Trust tuning.

use nw_core::error::ensure_finite;
use nw_core::{NwError, NwResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrustConfig {
    /// Exponential decay of trust per unit of unreliability.
    pub decay_rate: f32,

    /// Floor on the trust multiplier.  Noise is never ignored outright.
    pub min_trust: f32,

    /// Unreliability added when an investigation led away from the targets.
    pub bad_increment: f32,

    /// Unreliability removed when an investigation found a target.  Half of
    /// it is removed for one that merely led towards them.
    pub good_decrement: f32,

    /// Dead-zone half-width on distance improvement.  Moves smaller than
    /// this in either direction are not judged.
    pub progress_threshold: f32,
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            decay_rate:         0.2,
            min_trust:          0.15,
            bad_increment:      1.0,
            good_decrement:     0.75,
            progress_threshold: 0.75,
        }
    }
}

impl TrustConfig {
    pub fn validate(&self) -> NwResult<()> {
        ensure_finite("decay_rate", self.decay_rate)?;
        ensure_finite("min_trust", self.min_trust)?;
        ensure_finite("bad_increment", self.bad_increment)?;
        ensure_finite("good_decrement", self.good_decrement)?;
        ensure_finite("progress_threshold", self.progress_threshold)?;
        if !(0.0..=1.0).contains(&self.min_trust) {
            return Err(NwError::Config(format!(
                "min_trust must lie in [0, 1], got {}",
                self.min_trust
            )));
        }
        Ok(())
    }

    /// Negative rates and increments become zero.
    pub fn clamped(mut self) -> Self {
        let before = self.clone();
        self.decay_rate = self.decay_rate.max(0.0);
        self.min_trust = self.min_trust.clamp(0.0, 1.0);
        self.bad_increment = self.bad_increment.max(0.0);
        self.good_decrement = self.good_decrement.max(0.0);
        self.progress_threshold = self.progress_threshold.max(0.0);
        if self != before {
            tracing::warn!(?before, after = ?self, "trust config clamped");
        }
        self
    }
}
