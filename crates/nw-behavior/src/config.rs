//! Per-enemy tuning.

use nw_core::NwResult;
use nw_core::error::ensure_finite;
use nw_hearing::HearingConfig;
use nw_perception::PerceptionConfig;

/// State-machine tuning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    /// Give up on a noise this long after hearing it.
    pub investigate_duration_secs: f32,
    /// A noise counts as searched once the agent is this close.
    pub investigate_reach_radius:  f32,
    /// Bias of the stimulus synthesized after a stun, so it beats ordinary
    /// bounce and footstep noise.
    pub stun_direction_bias:       f32,
    /// Velocity change applied on the first stunned tick.
    pub knockback_impulse:         f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            investigate_duration_secs: 4.0,
            investigate_reach_radius:  1.5,
            stun_direction_bias:       10.0,
            knockback_impulse:         4.0,
        }
    }
}

impl BehaviorConfig {
    pub fn validate(&self) -> NwResult<()> {
        ensure_finite("investigate_duration_secs", self.investigate_duration_secs)?;
        ensure_finite("investigate_reach_radius", self.investigate_reach_radius)?;
        ensure_finite("stun_direction_bias", self.stun_direction_bias)?;
        ensure_finite("knockback_impulse", self.knockback_impulse)
    }

    pub fn clamped(mut self) -> Self {
        let before = self.clone();
        self.investigate_duration_secs = self.investigate_duration_secs.max(0.0);
        self.investigate_reach_radius = self.investigate_reach_radius.max(0.0);
        self.stun_direction_bias = self.stun_direction_bias.max(0.0);
        self.knockback_impulse = self.knockback_impulse.max(0.0);
        if self != before {
            tracing::warn!(?before, after = ?self, "behavior config clamped");
        }
        self
    }
}

/// Everything needed to build one enemy.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyConfig {
    pub perception: PerceptionConfig,
    pub hearing:    HearingConfig,
    pub behavior:   BehaviorConfig,
}

impl EnemyConfig {
    pub fn validate(&self) -> NwResult<()> {
        self.perception.validate()?;
        self.hearing.validate()?;
        self.behavior.validate()
    }

    pub fn clamped(self) -> Self {
        Self {
            perception: self.perception.clamped(),
            hearing:    self.hearing.clamped(),
            behavior:   self.behavior.clamped(),
        }
    }
}
