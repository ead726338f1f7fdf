//! Fluent builder for constructing a [`Sim`].

use nw_agent::TargetRegistry;
use nw_behavior::EnemyConfig;
use nw_core::SimConfig;
use nw_hearing::NoiseRouter;
use nw_motor::Motor;
use nw_spatial::LineOfSight;
use nw_trust::{TrustConfig, TrustModel};

use crate::{Sim, SimResult};

/// Fluent builder for [`Sim<M, L>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: fixed step, total ticks, seed, snapshot interval
/// - `L: LineOfSight`: the occlusion query (e.g. [`nw_spatial::OpenField`])
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                     |
/// |---------------------|-----------------------------|
/// | `.targets(r)`       | empty `TargetRegistry`      |
/// | `.trust(cfg)`       | `TrustConfig::default()`    |
/// | `.enemy(m, cfg)`    | no enemies                  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, OpenField)
///     .targets(targets)
///     .enemy(motor, EnemyConfig::default())
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: Motor, L: LineOfSight> {
    config:  SimConfig,
    los:     L,
    targets: Option<TargetRegistry>,
    trust:   TrustConfig,
    enemies: Vec<(M, EnemyConfig)>,
}

impl<M: Motor, L: LineOfSight> SimBuilder<M, L> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, los: L) -> Self {
        Self {
            config,
            los,
            targets: None,
            trust:   TrustConfig::default(),
            enemies: Vec::new(),
        }
    }

    /// Supply the initial target registry.
    pub fn targets(mut self, targets: TargetRegistry) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Tuning for the shared trust model.
    pub fn trust(mut self, config: TrustConfig) -> Self {
        self.trust = config;
        self
    }

    /// Queue an enemy.  Ids are assigned in call order, starting at 0.
    pub fn enemy(mut self, motor: M, config: EnemyConfig) -> Self {
        self.enemies.push((motor, config));
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    ///
    /// Hard errors (non-finite values, inverted ranges) fail the build;
    /// soft ones (negative durations, oversized angles) are clamped.
    pub fn build(self) -> SimResult<Sim<M, L>> {
        self.config.validate()?;
        self.trust.validate()?;

        let mut sim = Sim {
            clock:      self.config.make_clock(),
            config:     self.config,
            enemies:    Vec::with_capacity(self.enemies.len()),
            targets:    self.targets.unwrap_or_default(),
            trust:      TrustModel::new(self.trust.clamped()),
            router:     NoiseRouter::new(),
            los:        self.los,
            pending:    Vec::new(),
            next_agent: 0,
        };
        for (motor, config) in self.enemies {
            sim.add_enemy(motor, config)?;
        }
        Ok(sim)
    }
}
