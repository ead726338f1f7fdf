//! `Enemy`: one agent's decision loop.
//!
//! # Transition table
//!
//! | From        | Trigger                                         | To          |
//! |-------------|-------------------------------------------------|-------------|
//! | Patrol      | a target is acquired                            | Pursue      |
//! | Patrol      | a noise candidate is accepted                   | Investigate |
//! | Pursue      | perception releases the target                  | Patrol      |
//! | Investigate | a target is acquired                            | Pursue      |
//! | Investigate | candidate cleared, timed out, or reached        | Patrol      |
//! | any         | stun request                                    | Stunned     |
//! | Stunned     | ended, had a target and can still see one       | Pursue      |
//! | Stunned     | ended, no target, usable redirect               | Investigate |
//! | Stunned     | ended, otherwise                                | Patrol      |
//!
//! Within each update, target acquisition is checked before any
//! investigation bookkeeping.

use nw_core::{AgentId, SimTime, TargetId, Transform, Vec3};
use nw_hearing::{Arbitration, HearingConfig, NoiseArbiter, NoiseCandidate, NoiseEvent};
use nw_motor::Motor;
use nw_perception::PerceptionService;
use nw_trust::EvaluationTracker;

use crate::{
    BehaviorConfig, BehaviorEvent, BehaviorState, DecisionContext, EnemyConfig, StateKind,
    StunRequest, StunState,
};

/// Bias of ordinary heard noise.
const HEARD_NOISE_BIAS: f32 = 1.0;
/// Stun durations are floored here so a stun always lasts at least a tick.
const MIN_STUN_SECS: f32 = 0.01;
/// Redirect distances at or below this skip the post-stun investigation.
const MIN_REDIRECT: f32 = 0.01;

/// One enemy: its state, its senses and its motor.
pub struct Enemy<M: Motor> {
    id:         AgentId,
    motor:      M,
    state:      BehaviorState,
    target:     Option<TargetId>,
    perception: PerceptionService,
    hearing:    HearingConfig,
    arbiter:    NoiseArbiter,
    evaluation: EvaluationTracker,
    config:     BehaviorConfig,
    evaluations_finished: u64,
}

impl<M: Motor> Enemy<M> {
    /// Spawn in Patrol: no target, following the patrol route.
    pub fn new(id: AgentId, mut motor: M, config: EnemyConfig) -> Self {
        motor.set_follows_patrol_route(true);
        motor.clear_target();
        Self {
            id,
            motor,
            state: BehaviorState::Patrol,
            target: None,
            perception: PerceptionService::new(config.perception),
            hearing: config.hearing,
            arbiter: NoiseArbiter::new(),
            evaluation: EvaluationTracker::new(),
            config: config.behavior,
            evaluations_finished: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> AgentId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> &BehaviorState {
        &self.state
    }

    #[inline]
    pub fn state_kind(&self) -> StateKind {
        self.state.kind()
    }

    #[inline]
    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    #[inline]
    pub fn candidate(&self) -> Option<&NoiseCandidate> {
        self.arbiter.candidate()
    }

    #[inline]
    pub fn body(&self) -> Transform {
        self.motor.transform()
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    pub fn motor_mut(&mut self) -> &mut M {
        &mut self.motor
    }

    pub fn perception(&self) -> &PerceptionService {
        &self.perception
    }

    pub fn hearing(&self) -> &HearingConfig {
        &self.hearing
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    /// How many investigations this enemy has scored.
    #[inline]
    pub fn evaluations_finished(&self) -> u64 {
        self.evaluations_finished
    }

    // ── Per-tick update ───────────────────────────────────────────────────

    /// Run the active state's transition checks for one authoritative tick.
    pub fn update(&mut self, ctx: &mut DecisionContext<'_>) {
        match self.state {
            BehaviorState::Patrol => {
                if self.try_acquire(ctx) {
                    self.switch_state(BehaviorState::Pursue, ctx);
                }
            }
            BehaviorState::Pursue => {
                if let Some(target) = self.target {
                    self.motor.set_target(target, true);
                }
                if self.should_release(ctx) {
                    self.switch_state(BehaviorState::Patrol, ctx);
                }
            }
            BehaviorState::Investigate => self.update_investigate(ctx),
            BehaviorState::Stunned(mut stun) => {
                if !stun.knockback_applied {
                    stun.knockback_applied = true;
                    self.state = BehaviorState::Stunned(stun);
                    self.motor.add_velocity_change(stun.direction * self.config.knockback_impulse);
                }
                if ctx.now.reached(stun.ends_at) {
                    self.finish_stun(stun, ctx);
                }
            }
        }
    }

    fn update_investigate(&mut self, ctx: &mut DecisionContext<'_>) {
        if self.try_acquire(ctx) {
            self.switch_state(BehaviorState::Pursue, ctx);
            return;
        }
        let Some(candidate) = self.arbiter.candidate().copied() else {
            self.switch_state(BehaviorState::Patrol, ctx);
            return;
        };
        if ctx.now.is_past(candidate.heard_at.after(self.config.investigate_duration_secs)) {
            tracing::debug!(agent = %self.id, "investigation timed out");
            self.arbiter.clear();
            self.switch_state(BehaviorState::Patrol, ctx);
            return;
        }
        let reach = self.config.investigate_reach_radius;
        if self.body().position.distance_squared(candidate.position) <= reach * reach {
            tracing::debug!(agent = %self.id, "investigation point reached");
            self.arbiter.clear();
            self.switch_state(BehaviorState::Patrol, ctx);
            return;
        }
        // The candidate may have been replaced by a better noise.
        self.motor.set_destination(candidate.position);
    }

    fn finish_stun(&mut self, stun: StunState, ctx: &mut DecisionContext<'_>) {
        if stun.had_target {
            let resume = (self.target.is_some() && !self.should_release(ctx)) || self.try_acquire(ctx);
            let next = if resume { BehaviorState::Pursue } else { BehaviorState::Patrol };
            self.switch_state(next, ctx);
            return;
        }

        if stun.redirect_distance > MIN_REDIRECT {
            if let Some(dir) = stun.direction.try_normalize() {
                let point = self.body().position - dir * stun.redirect_distance;
                let bias = self.config.stun_direction_bias;
                self.notify_heard_noise(point, 1.0, bias, ctx);
                self.switch_state(BehaviorState::Investigate, ctx);
                return;
            }
        }
        self.switch_state(BehaviorState::Patrol, ctx);
    }

    // ── Perception helpers ────────────────────────────────────────────────

    /// Look for a target; on success store it.  On failure the stored
    /// target is cleared.
    fn try_acquire(&mut self, ctx: &DecisionContext<'_>) -> bool {
        let body = self.body();
        self.target = self.perception.try_acquire_target(&body, ctx.targets, ctx.los);
        self.target.is_some()
    }

    fn should_release(&mut self, ctx: &DecisionContext<'_>) -> bool {
        let body = self.body();
        self.perception.should_release(&body, self.target, ctx.targets, ctx.los, ctx.now)
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Leave the current state and enter `next`.
    ///
    /// Switching to the state already active is a no-op, except for
    /// `Stunned`: a fresh stun exits and re-enters, restarting the lock and
    /// the knockback.
    pub fn switch_state(&mut self, next: BehaviorState, ctx: &mut DecisionContext<'_>) {
        let from = self.state.kind();
        let to = next.kind();
        if from == to && to != StateKind::Stunned {
            return;
        }

        self.exit(to, ctx);
        self.state = next;
        self.enter(ctx);

        tracing::debug!(agent = %self.id, %from, %to, at = %ctx.now, "state transition");
        ctx.events.push(BehaviorEvent::Transition { agent: self.id, at: ctx.now, from, to });
    }

    fn enter(&mut self, ctx: &mut DecisionContext<'_>) {
        match self.state {
            BehaviorState::Patrol => {
                self.target = None;
                self.motor.set_follows_patrol_route(true);
                self.motor.clear_target();
            }
            BehaviorState::Pursue => {
                // A fresh chase must not time out on its first check.
                self.perception.mark_confirmed(ctx.now);
                self.motor.set_follows_patrol_route(false);
                if let Some(target) = self.target {
                    self.motor.set_target(target, true);
                }
            }
            BehaviorState::Investigate => {
                self.motor.set_follows_patrol_route(false);
                let position = self.body().position;
                self.evaluation.begin(position, ctx.targets);
                if let Some(candidate) = self.arbiter.candidate() {
                    self.motor.set_destination(candidate.position);
                }
            }
            BehaviorState::Stunned(stun) => {
                self.motor.set_follows_patrol_route(false);
                self.motor.clear_target();
                self.motor.lock_movement_until(stun.ends_at);
                self.motor.zero_horizontal_velocity();
            }
        }
    }

    fn exit(&mut self, next: StateKind, ctx: &mut DecisionContext<'_>) {
        match self.state {
            // Patrol introduces no locomotion target of its own.
            BehaviorState::Patrol => {}
            BehaviorState::Pursue | BehaviorState::Stunned(_) => self.motor.clear_target(),
            BehaviorState::Investigate => {
                self.finish_evaluation(next == StateKind::Pursue, ctx);
                self.motor.clear_target();
            }
        }
    }

    /// Score the investigation that is ending and feed the shared trust.
    /// Runs at most once per Investigate lifecycle.
    fn finish_evaluation(&mut self, acquired: bool, ctx: &mut DecisionContext<'_>) {
        let position = self.body().position;
        let Some(outcome) = self.evaluation.finish(position, acquired) else {
            return;
        };
        let delta = ctx.trust.record(outcome);
        self.evaluations_finished += 1;
        ctx.events.push(BehaviorEvent::EvaluationFinished {
            agent: self.id,
            at: ctx.now,
            outcome,
            delta,
            trust: ctx.trust.trust(),
        });
    }

    /// Run the current state's exit without entering another state.  Call
    /// before despawning so an open investigation is still scored.
    pub fn shut_down(&mut self, ctx: &mut DecisionContext<'_>) {
        self.exit(StateKind::Patrol, ctx);
    }

    // ── Noise ─────────────────────────────────────────────────────────────

    /// Offer a stimulus to the arbiter.
    ///
    /// Ignored entirely while pursuing.  If accepted while patrolling, the
    /// enemy starts investigating.
    pub fn notify_heard_noise(
        &mut self,
        position:  Vec3,
        suspicion: f32,
        bias:      f32,
        ctx:       &mut DecisionContext<'_>,
    ) -> Option<Arbitration> {
        if self.state.kind() == StateKind::Pursue {
            return None;
        }

        let arbitration =
            self.arbiter.consider(position, suspicion, bias, ctx.trust.trust(), ctx.now);
        match arbitration {
            Arbitration::Accepted { score } => {
                tracing::debug!(agent = %self.id, %position, score, "noise candidate accepted");
                ctx.events.push(BehaviorEvent::NoiseAccepted {
                    agent: self.id,
                    at: ctx.now,
                    position,
                    score,
                });
                if self.state.kind() == StateKind::Patrol {
                    self.switch_state(BehaviorState::Investigate, ctx);
                }
            }
            Arbitration::Rejected { score, incumbent } => {
                tracing::debug!(agent = %self.id, score, incumbent, "noise candidate rejected");
                ctx.events.push(BehaviorEvent::NoiseRejected {
                    agent: self.id,
                    at: ctx.now,
                    position,
                    score,
                    incumbent,
                });
            }
        }
        Some(arbitration)
    }

    /// Hearing entry point for a broadcast event: distance falloff, then
    /// arbitration with unit bias.
    pub fn on_noise_heard(
        &mut self,
        event: &NoiseEvent,
        ctx:   &mut DecisionContext<'_>,
    ) -> Option<Arbitration> {
        let suspicion = self.hearing.hear(self.body().position, event)?;
        if self.state.kind() == StateKind::Pursue {
            return None;
        }
        self.notify_heard_noise(event.position, suspicion, HEARD_NOISE_BIAS, ctx)
    }

    /// Drop the pending noise from outside.  An ongoing investigation ends
    /// on the next update.
    pub fn clear_noise(&mut self) -> Option<NoiseCandidate> {
        self.arbiter.clear()
    }

    // ── Stun ──────────────────────────────────────────────────────────────

    /// Knock the enemy down, whatever it was doing.
    ///
    /// `direction` is flattened; if that leaves nothing, the enemy's own
    /// forward is used.  `duration` is floored at 0.01 s and `redirect`
    /// at zero.
    pub fn apply_stun_world(
        &mut self,
        direction: Vec3,
        duration:  f32,
        redirect:  f32,
        ctx:       &mut DecisionContext<'_>,
    ) {
        let body = self.body();
        let direction = direction
            .flatten()
            .try_normalize()
            .unwrap_or_else(|| body.forward.flatten().normalize_or(Vec3::FORWARD));
        let stun = StunState {
            ends_at: ctx.now.after(duration.max(MIN_STUN_SECS)),
            direction,
            redirect_distance: redirect.max(0.0),
            had_target: self.target.is_some(),
            knockback_applied: false,
        };
        tracing::debug!(agent = %self.id, %direction, duration, redirect, "stunned");
        self.switch_state(BehaviorState::Stunned(stun), ctx);
    }

    /// [`apply_stun_world`](Self::apply_stun_world) with a direction given
    /// relative to the enemy's facing: `right` and `forward` on the ground
    /// plane.
    pub fn apply_stun_local(
        &mut self,
        right:    f32,
        forward:  f32,
        duration: f32,
        redirect: f32,
        ctx:      &mut DecisionContext<'_>,
    ) {
        let world = self.body().local_planar_to_world(right, forward);
        self.apply_stun_world(world, duration, redirect, ctx);
    }

    pub fn apply_stun(&mut self, request: &StunRequest, ctx: &mut DecisionContext<'_>) {
        self.apply_stun_world(request.direction, request.duration_secs, request.redirect_distance, ctx);
    }

    /// When the current stun ends, if stunned.
    pub fn stunned_until(&self) -> Option<SimTime> {
        match self.state {
            BehaviorState::Stunned(stun) => Some(stun.ends_at),
            _ => None,
        }
    }
}
