//! Turning physical impacts into noise events.

use nw_core::error::ensure_finite;
use nw_core::{NwError, NwResult, SimTime, SourceId, Vec3};

use crate::NoiseEvent;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpactNoiseConfig {
    /// Impacts slower than this make no noise.
    pub min_speed: f32,
    /// Impacts at or above this speed are at full loudness and radius.
    pub max_speed: f32,
    /// Radius at `min_speed`.
    pub base_radius: f32,
    /// Radius at `max_speed`.
    pub max_radius: f32,
    /// Quiet period after an emission, swallowing bounce cascades.
    pub cooldown_secs: f32,
}

impl Default for ImpactNoiseConfig {
    fn default() -> Self {
        Self {
            min_speed:     1.0,
            max_speed:     20.0,
            base_radius:   10.0,
            max_radius:    30.0,
            cooldown_secs: 0.25,
        }
    }
}

impl ImpactNoiseConfig {
    pub fn validate(&self) -> NwResult<()> {
        ensure_finite("min_speed", self.min_speed)?;
        ensure_finite("max_speed", self.max_speed)?;
        ensure_finite("base_radius", self.base_radius)?;
        ensure_finite("max_radius", self.max_radius)?;
        ensure_finite("cooldown_secs", self.cooldown_secs)?;
        if self.max_speed < self.min_speed {
            return Err(NwError::Config(format!(
                "max_speed ({}) is below min_speed ({})",
                self.max_speed, self.min_speed
            )));
        }
        Ok(())
    }

    /// Normalized impact strength: 0 at `min_speed`, 1 at `max_speed`.
    /// An empty speed range has no gradient and yields 0 everywhere.
    pub fn strength(&self, speed: f32) -> f32 {
        let span = self.max_speed - self.min_speed;
        if span.abs() < f32::EPSILON {
            return 0.0;
        }
        ((speed - self.min_speed) / span).clamp(0.0, 1.0)
    }
}

/// One noisy object: a thrown prop, a door, a falling crate.
#[derive(Clone, Debug)]
pub struct ImpactNoiseEmitter {
    config:    ImpactNoiseConfig,
    source:    SourceId,
    last_emit: Option<SimTime>,
}

impl ImpactNoiseEmitter {
    pub fn new(source: SourceId, config: ImpactNoiseConfig) -> Self {
        Self { config, source, last_emit: None }
    }

    #[inline]
    pub fn source(&self) -> SourceId {
        self.source
    }

    #[inline]
    pub fn config(&self) -> &ImpactNoiseConfig {
        &self.config
    }

    /// The event produced by an impact at `contact` with relative `speed`,
    /// or `None` while cooling down or if the impact was too soft.
    pub fn on_impact(&mut self, contact: Vec3, speed: f32, now: SimTime) -> Option<NoiseEvent> {
        let cooling = self
            .last_emit
            .is_some_and(|last| !now.has_elapsed(last, self.config.cooldown_secs));
        if cooling {
            return None;
        }
        if !(speed >= self.config.min_speed) {
            return None;
        }

        let t = self.config.strength(speed);
        let radius = self.config.base_radius + (self.config.max_radius - self.config.base_radius) * t;
        self.last_emit = Some(now);
        tracing::debug!(source = %self.source, speed, loudness = t, radius, "impact noise");
        Some(NoiseEvent::new(contact, radius, t, self.source))
    }
}
