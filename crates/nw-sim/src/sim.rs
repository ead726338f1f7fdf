//! The `Sim` struct and its tick loop.

use nw_agent::TargetRegistry;
use nw_behavior::{
    BehaviorEvent, DecisionContext, Enemy, EnemyConfig, ImpactHit, StunOnHit, StunRequest,
};
use nw_core::{AgentId, SimClock, SimConfig, SimTime, Tick, Vec3};
use nw_hearing::{Arbitration, ImpactNoiseEmitter, NoiseCandidate, NoiseEvent, NoiseRouter};
use nw_motor::Motor;
use nw_spatial::LineOfSight;
use nw_trust::TrustModel;

use crate::{AgentSnapshot, SimError, SimObserver, SimResult, TickSummary};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The authoritative simulation.
///
/// `Sim<M, L>` owns every enemy, the target registry, the noise router and
/// the one [`TrustModel`] all enemies share.  Each tick runs two phases:
///
/// 1. **Decide**: every enemy updates once, in ascending `AgentId` order,
///    against a [`DecisionContext`] that lends it the shared trust.
/// 2. **Move**: every motor advances by the fixed step.
///
/// Stimuli that arrive between ticks ([`emit_noise`](Self::emit_noise),
/// [`apply_stun`](Self::apply_stun)) are handled immediately, timestamped
/// with the current tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: Motor, L: LineOfSight> {
    /// Global configuration (fixed step, total ticks, seed, …).
    pub config: SimConfig,

    /// Simulation clock: the current tick and its timestamp.
    pub clock: SimClock,

    /// Enemies sorted by id.
    pub(crate) enemies: Vec<Enemy<M>>,

    /// Externally owned targets.  Enemies only read positions.
    pub(crate) targets: TargetRegistry,

    /// Shared across all enemies; never persisted.
    pub(crate) trust: TrustModel,

    pub(crate) router: NoiseRouter,

    pub(crate) los: L,

    /// Events raised since the last flush to an observer.
    pub(crate) pending: Vec<BehaviorEvent>,

    pub(crate) next_agent: u32,
}

impl<M: Motor, L: LineOfSight> Sim<M, L> {
    // ── Accessors ─────────────────────────────────────────────────────────

    /// Timestamp of the current tick.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn enemies(&self) -> &[Enemy<M>] {
        &self.enemies
    }

    pub fn enemy(&self, id: AgentId) -> Option<&Enemy<M>> {
        self.index_of(id).ok().map(|i| &self.enemies[i])
    }

    /// Direct access, e.g. to place a motor.  Decisions should go through
    /// the `Sim` methods so they see the shared trust.
    pub fn enemy_mut(&mut self, id: AgentId) -> Option<&mut Enemy<M>> {
        match self.index_of(id) {
            Ok(i) => Some(&mut self.enemies[i]),
            Err(_) => None,
        }
    }

    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    /// Targets are owned by the world; move, spawn and despawn them here.
    pub fn targets_mut(&mut self) -> &mut TargetRegistry {
        &mut self.targets
    }

    pub fn trust(&self) -> &TrustModel {
        &self.trust
    }

    pub fn router(&self) -> &NoiseRouter {
        &self.router
    }

    pub fn los(&self) -> &L {
        &self.los
    }

    /// Events raised since the last tick flushed them.
    pub fn pending_events(&self) -> &[BehaviorEvent] {
        &self.pending
    }

    // ── Membership ────────────────────────────────────────────────────────

    /// Spawn an enemy in Patrol and register it as a noise listener.
    pub fn add_enemy(&mut self, motor: M, config: EnemyConfig) -> SimResult<AgentId> {
        config.validate()?;
        let id = AgentId(self.next_agent);
        self.next_agent += 1;
        self.router.register(id);
        self.enemies.push(Enemy::new(id, motor, config.clamped()));
        tracing::debug!(agent = %id, "enemy added");
        Ok(id)
    }

    /// Despawn an enemy.  Its current state is exited first, so an open
    /// investigation is still scored.
    pub fn remove_enemy(&mut self, id: AgentId) -> SimResult<Enemy<M>> {
        let index = self.index_of(id).map_err(|_| SimError::UnknownAgent(id))?;
        let now = self.now();
        let mut enemy = self.enemies.remove(index);
        let mut ctx =
            DecisionContext::new(now, &self.targets, &self.los, &mut self.trust, &mut self.pending);
        enemy.shut_down(&mut ctx);
        self.router.unregister(id);
        tracing::debug!(agent = %id, "enemy removed");
        Ok(enemy)
    }

    // ── Stimuli ───────────────────────────────────────────────────────────

    /// Broadcast a noise to every listening enemy.  Returns the number of
    /// listeners reached (not the number that reacted).
    pub fn emit_noise(&mut self, event: &NoiseEvent) -> usize {
        let now = self.now();
        // Explicit field borrows so the borrow checker sees disjoint access.
        let router  = &self.router;
        let enemies = &mut self.enemies;
        let mut ctx =
            DecisionContext::new(now, &self.targets, &self.los, &mut self.trust, &mut self.pending);

        router.broadcast(event, &mut |listener: AgentId, ev: &NoiseEvent| {
            if let Ok(i) = enemies.binary_search_by_key(&listener, |e| e.id()) {
                enemies[i].on_noise_heard(ev, &mut ctx);
            }
        })
    }

    /// Run an impact through `emitter` and broadcast the result, if any.
    pub fn emit_impact(
        &mut self,
        emitter: &mut ImpactNoiseEmitter,
        contact: Vec3,
        speed:   f32,
    ) -> Option<usize> {
        let event = emitter.on_impact(contact, speed, self.now())?;
        Some(self.emit_noise(&event))
    }

    /// Offer a stimulus to one enemy directly, bypassing the hearing filter.
    pub fn notify_noise(
        &mut self,
        id:        AgentId,
        position:  Vec3,
        suspicion: f32,
        bias:      f32,
    ) -> SimResult<Option<Arbitration>> {
        self.with_enemy(id, |enemy, ctx| enemy.notify_heard_noise(position, suspicion, bias, ctx))
    }

    /// Drop an enemy's pending noise.  An ongoing investigation ends on the
    /// next tick.
    pub fn clear_noise(&mut self, id: AgentId) -> SimResult<Option<NoiseCandidate>> {
        let index = self.index_of(id).map_err(|_| SimError::UnknownAgent(id))?;
        Ok(self.enemies[index].clear_noise())
    }

    pub fn apply_stun(&mut self, id: AgentId, request: &StunRequest) -> SimResult<()> {
        self.with_enemy(id, |enemy, ctx| enemy.apply_stun(request, ctx))
    }

    /// Stun with a direction relative to the enemy's facing.
    pub fn apply_stun_local(
        &mut self,
        id:       AgentId,
        right:    f32,
        forward:  f32,
        duration: f32,
        redirect: f32,
    ) -> SimResult<()> {
        self.with_enemy(id, |enemy, ctx| {
            enemy.apply_stun_local(right, forward, duration, redirect, ctx)
        })
    }

    /// A throwable struck enemy `id`.  Returns whether it stunned.
    pub fn hit_enemy(&mut self, id: AgentId, gate: &mut StunOnHit, hit: &ImpactHit) -> SimResult<bool> {
        let now = self.now();
        self.with_enemy(id, |enemy, ctx| {
            let body = enemy.body();
            match gate.try_stun(hit, &body, now) {
                Some(request) => {
                    enemy.apply_stun(&request, ctx);
                    true
                }
                None => false,
            }
        })
    }

    /// Session or round boundary: forget everything learned about noise.
    pub fn reset_round(&mut self) {
        tracing::debug!(unreliability = self.trust.unreliability(), "trust reset");
        self.trust.reset();
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer);
        }
        Ok(())
    }

    /// Process the current tick and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) {
        let tick = self.clock.current_tick;
        observer.on_tick_start(tick);

        let summary = self.process_tick(tick);
        for event in self.pending.drain(..) {
            observer.on_event(tick, &event);
        }
        observer.on_tick_end(&summary);

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && tick.0.is_multiple_of(interval) {
            observer.on_snapshot(tick, summary.time, &self.snapshot());
        }

        self.clock.advance();
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, tick: Tick) -> TickSummary {
        let now = self.clock.time_of(tick);
        let dt = self.config.fixed_dt_secs;

        // Events raised between ticks are flushed with this tick.
        let carried = self.pending.len();

        // ── Phase 1: decide ───────────────────────────────────────────────
        {
            let mut ctx = DecisionContext::new(
                now,
                &self.targets,
                &self.los,
                &mut self.trust,
                &mut self.pending,
            );
            for enemy in &mut self.enemies {
                enemy.update(&mut ctx);
            }
        }

        // ── Phase 2: move ─────────────────────────────────────────────────
        for enemy in &mut self.enemies {
            enemy.motor_mut().advance(now, dt, &self.targets);
        }

        let mut summary = TickSummary {
            tick,
            time: now,
            events: self.pending.len(),
            trust: self.trust.trust(),
            unreliability: self.trust.unreliability(),
            ..TickSummary::default()
        };
        for enemy in &self.enemies {
            summary.count(enemy.state_kind());
        }
        tracing::trace!(%tick, carried, events = summary.events, "tick processed");
        summary
    }

    pub fn snapshot(&self) -> Vec<AgentSnapshot> {
        self.enemies
            .iter()
            .map(|e| {
                let body = e.body();
                AgentSnapshot {
                    agent:     e.id(),
                    state:     e.state_kind(),
                    position:  body.position,
                    forward:   body.forward,
                    target:    e.target(),
                    candidate: e.candidate().map(|c| c.position),
                    evaluations_finished: e.evaluations_finished(),
                }
            })
            .collect()
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn index_of(&self, id: AgentId) -> Result<usize, usize> {
        self.enemies.binary_search_by_key(&id, |e| e.id())
    }

    /// Run `f` on one enemy with a decision context for the current tick.
    fn with_enemy<T>(
        &mut self,
        id: AgentId,
        f:  impl FnOnce(&mut Enemy<M>, &mut DecisionContext<'_>) -> T,
    ) -> SimResult<T> {
        let index = self.index_of(id).map_err(|_| SimError::UnknownAgent(id))?;
        let now = self.now();
        let mut ctx =
            DecisionContext::new(now, &self.targets, &self.los, &mut self.trust, &mut self.pending);
        Ok(f(&mut self.enemies[index], &mut ctx))
    }
}
