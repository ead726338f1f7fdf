//! Scripted world events: targets wander, props clatter, throwables fly.
//!
//! The director only talks to the `Sim` through its public stimulus API,
//! exactly as a game would.

use anyhow::Result;
use nw_agent::TargetRegistry;
use nw_behavior::{ImpactHit, StunOnHit, StunOnHitConfig};
use nw_core::{SimRng, SourceId, TargetId, Vec3};
use nw_hearing::{ImpactNoiseConfig, ImpactNoiseEmitter};
use nw_motor::KinematicMotor;
use nw_sim::Sim;
use nw_spatial::ObstacleField;

/// Props are numbered from here; throwables from `THROWABLE_SOURCE_BASE`.
const PROP_SOURCE_BASE:      u32 = 0;
const THROWABLE_SOURCE_BASE: u32 = 1_000;
const PROP_COUNT:            u32 = 6;
const WAYPOINT_REACHED:      f32 = 0.5;

pub type SkirmishSim = Sim<KinematicMotor, ObstacleField>;

struct Wanderer {
    id:       TargetId,
    waypoint: Vec3,
}

#[derive(Clone, Debug, Default)]
pub struct DirectorStats {
    pub impacts_heard: usize,
    pub impacts_muted: usize,
    pub throws:        usize,
    pub stuns:         usize,
}

pub struct DirectorSettings {
    pub half_extent:          f32,
    pub target_speed:         f32,
    pub impact_interval_secs: f32,
    pub throw_interval_secs:  f32,
    pub impact:               ImpactNoiseConfig,
    pub stun:                 StunOnHitConfig,
}

pub struct Director {
    settings:   DirectorSettings,
    rng:        SimRng,
    wanderers:  Vec<Wanderer>,
    props:      Vec<(Vec3, ImpactNoiseEmitter)>,
    throwables: u32,
    pub stats:  DirectorStats,
}

impl Director {
    /// Spawns `targets` wanderers into `registry`.
    pub fn new(
        settings: DirectorSettings,
        mut rng:  SimRng,
        registry: &mut TargetRegistry,
        targets:  usize,
    ) -> Result<Self> {
        let h = settings.half_extent;
        let mut wanderers = Vec::with_capacity(targets);
        for _ in 0..targets {
            let id = registry.spawn(rng.planar_point(Vec3::ZERO, h))?;
            wanderers.push(Wanderer { id, waypoint: rng.planar_point(Vec3::ZERO, h) });
        }
        let props = (0..PROP_COUNT)
            .map(|i| {
                let at = rng.planar_point(Vec3::ZERO, h * 0.9);
                let emitter = ImpactNoiseEmitter::new(SourceId(PROP_SOURCE_BASE + i), settings.impact.clone());
                (at, emitter)
            })
            .collect();
        Ok(Self {
            settings,
            rng,
            wanderers,
            props,
            throwables: 0,
            stats: DirectorStats::default(),
        })
    }

    /// Stage this tick's events.  Call before `Sim::step`.
    pub fn direct(&mut self, sim: &mut SkirmishSim) -> Result<()> {
        let dt = sim.config.fixed_dt_secs;
        self.walk_targets(sim.targets_mut(), dt);

        if self.roll(self.settings.impact_interval_secs, dt) {
            self.drop_prop(sim);
        }
        if self.roll(self.settings.throw_interval_secs, dt) {
            self.throw(sim)?;
        }
        Ok(())
    }

    /// Poisson-ish: on average one success per `interval` seconds.
    fn roll(&mut self, interval: f32, dt: f32) -> bool {
        interval > 0.0 && self.rng.gen_bool(f64::from((dt / interval).min(1.0)))
    }

    fn walk_targets(&mut self, registry: &mut TargetRegistry, dt: f32) {
        let step = self.settings.target_speed * dt;
        for w in &mut self.wanderers {
            let Some(pos) = registry.position(w.id) else { continue };
            let to_goal = w.waypoint - pos;
            if to_goal.length() <= WAYPOINT_REACHED.max(step) {
                registry.set_position(w.id, w.waypoint);
                w.waypoint = self.rng.planar_point(Vec3::ZERO, self.settings.half_extent);
            } else {
                registry.set_position(w.id, pos + to_goal.normalize_or(Vec3::FORWARD) * step);
            }
        }
    }

    fn drop_prop(&mut self, sim: &mut SkirmishSim) {
        let index = self.rng.gen_range(0..self.props.len());
        let speed = self.rng.gen_range(0.0..12.0_f32);
        let (at, emitter) = &mut self.props[index];
        match sim.emit_impact(emitter, *at, speed) {
            Some(reached) => {
                self.stats.impacts_heard += 1;
                tracing::debug!(prop = index, speed, reached, "prop impact");
            }
            None => self.stats.impacts_muted += 1,
        }
    }

    /// A target lobs a fresh throwable at a random enemy.
    fn throw(&mut self, sim: &mut SkirmishSim) -> Result<()> {
        let throwers: Vec<_> = self.wanderers.iter().map(|w| w.id).collect();
        let Some(&thrower) = self.rng.choose(&throwers) else { return Ok(()) };
        let ids: Vec<_> = sim.enemies().iter().map(|e| e.id()).collect();
        let Some(&victim) = self.rng.choose(&ids) else { return Ok(()) };
        let (Some(from), Some(enemy)) = (sim.targets().position(thrower), sim.enemy(victim)) else {
            return Ok(());
        };
        let at = enemy.body().position;

        let source = SourceId(THROWABLE_SOURCE_BASE + self.throwables);
        self.throwables += 1;
        let mut gate = StunOnHit::new(self.settings.stun.clone());
        let mut sound = ImpactNoiseEmitter::new(source, self.settings.impact.clone());

        let speed = self.rng.gen_range(3.0..15.0_f32);
        let velocity = (at - from).flatten().normalize_or(Vec3::FORWARD) * speed;
        let hit = ImpactHit {
            relative_velocity: velocity,
            object_position:   at - velocity.normalize_or(Vec3::FORWARD) * 0.3,
            object_velocity:   velocity,
            contact_point:     at + Vec3::UP,
        };

        self.stats.throws += 1;
        if sim.hit_enemy(victim, &mut gate, &hit)? {
            self.stats.stuns += 1;
            tracing::info!(%victim, %thrower, speed, "enemy stunned");
        }
        sim.emit_impact(&mut sound, at, speed);
        Ok(())
    }
}
