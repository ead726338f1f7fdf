//! Per-listener hearing falloff.

use nw_core::error::ensure_finite;
use nw_core::{NwResult, Vec3};

use crate::NoiseEvent;

/// How well one agent hears.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HearingConfig {
    /// Multiplier on every event's radius.
    pub sensitivity: f32,

    /// Hard cap on the effective radius, whatever the event claims.
    pub max_radius: f32,

    /// Suspicion below this is ignored.
    pub min_suspicion: f32,
}

impl Default for HearingConfig {
    fn default() -> Self {
        Self { sensitivity: 1.0, max_radius: 30.0, min_suspicion: 0.25 }
    }
}

impl HearingConfig {
    pub fn validate(&self) -> NwResult<()> {
        ensure_finite("sensitivity", self.sensitivity)?;
        ensure_finite("max_radius", self.max_radius)?;
        ensure_finite("min_suspicion", self.min_suspicion)
    }

    pub fn clamped(mut self) -> Self {
        let before = self.clone();
        self.sensitivity = self.sensitivity.max(0.0);
        self.max_radius = self.max_radius.max(0.0);
        self.min_suspicion = self.min_suspicion.clamp(0.0, 1.0);
        if self != before {
            tracing::warn!(?before, after = ?self, "hearing config clamped");
        }
        self
    }

    /// Radius within which this listener hears `event`.
    #[inline]
    pub fn effective_radius(&self, event: &NoiseEvent) -> f32 {
        (event.radius * self.sensitivity).min(self.max_radius)
    }

    /// Suspicion raised in a listener at `listener` by `event`, or `None` if
    /// the event is out of earshot or too faint to matter.
    ///
    /// Suspicion falls off linearly from `loudness` at the source to zero at
    /// the effective radius.
    pub fn hear(&self, listener: Vec3, event: &NoiseEvent) -> Option<f32> {
        let radius = self.effective_radius(event);
        if radius <= 0.0 {
            return None;
        }
        let dist = listener.distance(event.position);
        if dist > radius {
            return None;
        }
        let suspicion = event.loudness * (1.0 - (dist / radius).clamp(0.0, 1.0));
        if suspicion < self.min_suspicion {
            tracing::trace!(suspicion, min = self.min_suspicion, "noise too faint");
            return None;
        }
        Some(suspicion)
    }
}
