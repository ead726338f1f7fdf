//! skirmish: a small arena run of the nightwatch decision core.
//!
//! A handful of enemies patrol a walled courtyard while unarmed targets
//! wander through it.  Props fall over and targets throw things, so the
//! enemies chase, investigate, get stunned, and slowly learn which noises
//! are worth walking to.
//!
//! ```text
//! skirmish [scenario.json]
//! ```
//!
//! Without an argument the built-in scenario runs.  Every field of the
//! JSON file is optional.  Set `RUST_LOG=debug` to watch individual
//! decisions.

mod arena;
mod director;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use nw_agent::TargetRegistry;
use nw_behavior::{BehaviorEvent, EnemyConfig, StunOnHitConfig};
use nw_core::{SimConfig, SimRng, SimTime, Tick, Transform};
use nw_hearing::ImpactNoiseConfig;
use nw_motor::{KinematicConfig, KinematicMotor};
use nw_output::{CsvWriter, SimOutputObserver};
use nw_sim::{AgentSnapshot, SimBuilder, SimObserver, TickSummary};
use nw_trust::TrustConfig;

use director::{Director, DirectorSettings};

// ── Scenario ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct Scenario {
    sim:                  SimConfig,
    enemies:              usize,
    targets:              usize,
    enemy:                EnemyConfig,
    motor:                KinematicConfig,
    trust:                TrustConfig,
    impact:               ImpactNoiseConfig,
    stun:                 StunOnHitConfig,
    arena_half_extent:    f32,
    target_speed:         f32,
    impact_interval_secs: f32,
    throw_interval_secs:  f32,
    /// Trust is forgotten at every round boundary; 0 disables rounds.
    round_secs:           f32,
    output_dir:           PathBuf,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            sim:                  SimConfig { total_ticks: 9_000, ..SimConfig::default() },
            enemies:              4,
            targets:              2,
            enemy:                EnemyConfig::default(),
            motor:                KinematicConfig::default(),
            trust:                TrustConfig::default(),
            impact:               ImpactNoiseConfig::default(),
            stun:                 StunOnHitConfig::default(),
            arena_half_extent:    24.0,
            target_speed:         2.5,
            impact_interval_secs: 4.0,
            throw_interval_secs:  15.0,
            round_secs:           60.0,
            output_dir:           PathBuf::from("output/skirmish"),
        }
    }
}

impl Scenario {
    fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else { return Ok(Self::default()) };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Forwards to the CSV observer and keeps a few totals for the summary.
struct Tally<O> {
    inner:       O,
    transitions: usize,
    evaluations: usize,
    accepted:    usize,
    rejected:    usize,
    last:        TickSummary,
}

impl<O: SimObserver> Tally<O> {
    fn new(inner: O) -> Self {
        Self {
            inner,
            transitions: 0,
            evaluations: 0,
            accepted: 0,
            rejected: 0,
            last: TickSummary::default(),
        }
    }
}

impl<O: SimObserver> SimObserver for Tally<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_event(&mut self, tick: Tick, event: &BehaviorEvent) {
        match event {
            BehaviorEvent::Transition { .. } => self.transitions += 1,
            BehaviorEvent::EvaluationFinished { .. } => self.evaluations += 1,
            BehaviorEvent::NoiseAccepted { .. } => self.accepted += 1,
            BehaviorEvent::NoiseRejected { .. } => self.rejected += 1,
        }
        self.inner.on_event(tick, event);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.last = *summary;
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, time: SimTime, agents: &[AgentSnapshot]) {
        self.inner.on_snapshot(tick, time, agents);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let arg = std::env::args_os().nth(1).map(PathBuf::from);
    let scenario = Scenario::load(arg.as_deref())?;
    scenario.sim.validate()?;
    scenario.motor.validate()?;
    scenario.impact.validate()?;

    let t0 = Instant::now();
    tracing::info!(
        enemies = scenario.enemies,
        targets = scenario.targets,
        ticks = scenario.sim.total_ticks,
        seed = scenario.sim.seed,
        "starting skirmish"
    );

    // ── 1. World ──────────────────────────────────────────────────────────
    let half = scenario.arena_half_extent;
    let obstacles = arena::build_obstacles(half)?;
    let mut rng = SimRng::new(scenario.sim.seed);
    let mut registry = TargetRegistry::new();
    let mut director = Director::new(
        DirectorSettings {
            half_extent:          half,
            target_speed:         scenario.target_speed,
            impact_interval_secs: scenario.impact_interval_secs,
            throw_interval_secs:  scenario.throw_interval_secs,
            impact:               scenario.impact.clone(),
            stun:                 scenario.stun.clone(),
        },
        rng.child(1),
        &mut registry,
        scenario.targets,
    )?;

    // ── 2. Enemies ────────────────────────────────────────────────────────
    let mut builder = SimBuilder::new(scenario.sim.clone(), obstacles)
        .targets(registry)
        .trust(scenario.trust.clone());
    for i in 0..scenario.enemies {
        let (spawn, route) = arena::patrol_for(i, half)?;
        let motor = KinematicMotor::new(Transform::at(spawn), scenario.motor.clone()).with_route(route);
        builder = builder.enemy(motor, scenario.enemy.clone());
    }
    let mut sim = builder.build()?;

    // ── 3. Output ─────────────────────────────────────────────────────────
    let writer = CsvWriter::new(&scenario.output_dir)?;
    let mut observer = Tally::new(SimOutputObserver::new(writer));

    // ── 4. Run ────────────────────────────────────────────────────────────
    let round_ticks = sim.clock.ticks_for_secs(scenario.round_secs);
    let end = scenario.sim.end_tick();
    while sim.clock.current_tick < end {
        let tick = sim.clock.current_tick;
        if round_ticks > 0 && tick.0 > 0 && tick.0.is_multiple_of(round_ticks) {
            tracing::info!(%tick, trust = sim.trust().trust(), "round over");
            sim.reset_round();
        }
        director.direct(&mut sim)?;
        sim.step(&mut observer);
    }
    observer.on_sim_end(sim.clock.current_tick);

    if let Some(err) = observer.inner.take_error() {
        return Err(err).context("writing CSV output");
    }

    // ── 5. Report ─────────────────────────────────────────────────────────
    let stats = &director.stats;
    tracing::info!(
        elapsed_ms = t0.elapsed().as_millis() as u64,
        transitions = observer.transitions,
        evaluations = observer.evaluations,
        noises_accepted = observer.accepted,
        noises_rejected = observer.rejected,
        impacts_heard = stats.impacts_heard,
        impacts_muted = stats.impacts_muted,
        throws = stats.throws,
        stuns = stats.stuns,
        "skirmish finished"
    );

    println!();
    println!("{:<10} {:<12} {:>8} {:>8} {:>6}", "enemy", "state", "x", "z", "evals");
    println!("{}", "─".repeat(48));
    for enemy in sim.enemies() {
        let at = enemy.body().position;
        println!(
            "{:<10} {:<12} {:>8.2} {:>8.2} {:>6}",
            enemy.id().0,
            enemy.state_kind().as_str(),
            at.x,
            at.z,
            enemy.evaluations_finished(),
        );
    }
    let last = observer.last;
    println!();
    println!(
        "final tick {}: {} patrolling, {} pursuing, {} investigating, {} stunned",
        last.tick.0, last.patrolling, last.pursuing, last.investigating, last.stunned,
    );
    println!(
        "trust {:.3} (unreliability {:.3})",
        sim.trust().trust(),
        sim.trust().unreliability()
    );
    println!("output written to {}", scenario.output_dir.display());
    Ok(())
}
