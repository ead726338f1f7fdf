//! Unit tests for nw-sim.

use nw_behavior::{BehaviorEvent, EnemyConfig, StateKind};
use nw_core::{AgentId, SimConfig, SimTime, SourceId, Tick, Transform, Vec3};
use nw_hearing::NoiseEvent;
use nw_motor::RecordingMotor;
use nw_spatial::OpenField;

use crate::{AgentSnapshot, EventLog, NoopObserver, Sim, SimBuilder, SimError, SimObserver, TickSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        fixed_dt_secs:           0.02,
        total_ticks,
        seed:                    42,
        snapshot_interval_ticks: 0,
    }
}

fn motor_at(x: f32, z: f32) -> RecordingMotor {
    RecordingMotor::new(Transform::at(Vec3::new(x, 0.0, z)))
}

/// `n` enemies in a row along X, all facing +Z.
fn sim_with(n: usize, total_ticks: u64) -> Sim<RecordingMotor, OpenField> {
    let mut builder = SimBuilder::new(test_config(total_ticks), OpenField);
    for i in 0..n {
        builder = builder.enemy(motor_at(i as f32 * 2.0, 0.0), EnemyConfig::default());
    }
    builder.build().unwrap()
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use nw_trust::TrustConfig;

    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim: Sim<RecordingMotor, OpenField> =
            SimBuilder::new(test_config(10), OpenField).build().unwrap();
        assert!(sim.enemies().is_empty());
        assert!(sim.targets().is_empty());
        assert_eq!(sim.trust().trust(), 1.0);
        assert_eq!(sim.clock.current_tick, Tick(0));
    }

    #[test]
    fn ids_assigned_in_order_and_registered() {
        let sim = sim_with(3, 10);
        let ids: Vec<_> = sim.enemies().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2)]);
        assert_eq!(sim.router().listeners(), &ids[..]);
        assert!(sim.enemies().iter().all(|e| e.state_kind() == StateKind::Patrol));
    }

    #[test]
    fn zero_step_errors() {
        let mut config = test_config(10);
        config.fixed_dt_secs = 0.0;
        let result = SimBuilder::<RecordingMotor, _>::new(config, OpenField).build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn inverted_ranges_error() {
        let mut enemy = EnemyConfig::default();
        enemy.perception.deaggro_range = 5.0;
        let result = SimBuilder::new(test_config(10), OpenField)
            .enemy(motor_at(0.0, 0.0), enemy)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn bad_trust_config_errors() {
        let trust = TrustConfig { min_trust: 2.0, ..Default::default() };
        let result = SimBuilder::<RecordingMotor, _>::new(test_config(10), OpenField)
            .trust(trust)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn soft_config_errors_are_clamped() {
        let mut enemy = EnemyConfig::default();
        enemy.perception.view_half_angle_deg = 400.0;
        enemy.behavior.investigate_duration_secs = -1.0;
        let sim = SimBuilder::new(test_config(10), OpenField)
            .enemy(motor_at(0.0, 0.0), enemy)
            .build()
            .unwrap();
        let e = &sim.enemies()[0];
        assert!(e.perception().config().view_half_angle_deg < 180.0);
        assert_eq!(e.config().investigate_duration_secs, 0.0);
    }
}

// ── Sim::run / run_ticks ──────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn noop_runs_to_end_tick() {
        let mut sim = sim_with(2, 10);
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(10));
        assert_eq!(sim.now(), SimTime(10.0 * f64::from(0.02f32)));
    }

    #[test]
    fn run_ticks_advances_clock() {
        let mut sim = sim_with(1, 100);
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(5));
        sim.run_ticks(3, &mut NoopObserver).unwrap();
        assert_eq!(sim.clock.current_tick, Tick(8));
    }

    #[derive(Default)]
    struct Counter {
        starts:    usize,
        ends:      usize,
        snapshots: Vec<(Tick, usize)>,
        finished:  Option<Tick>,
    }

    impl SimObserver for Counter {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }
        fn on_tick_end(&mut self, _summary: &TickSummary) {
            self.ends += 1;
        }
        fn on_snapshot(&mut self, tick: Tick, _time: SimTime, agents: &[AgentSnapshot]) {
            self.snapshots.push((tick, agents.len()));
        }
        fn on_sim_end(&mut self, final_tick: Tick) {
            self.finished = Some(final_tick);
        }
    }

    #[test]
    fn observer_called_correct_number_of_times() {
        let mut config = test_config(10);
        config.snapshot_interval_ticks = 5;
        let mut sim = SimBuilder::new(config, OpenField)
            .enemy(motor_at(0.0, 0.0), EnemyConfig::default())
            .enemy(motor_at(3.0, 0.0), EnemyConfig::default())
            .build()
            .unwrap();
        let mut obs = Counter::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.starts, 10);
        assert_eq!(obs.ends, 10);
        assert_eq!(obs.snapshots, vec![(Tick(0), 2), (Tick(5), 2)]);
        assert_eq!(obs.finished, Some(Tick(10)));
    }

    #[test]
    fn summary_counts_states() {
        let mut sim = sim_with(3, 10);
        sim.targets_mut().spawn(Vec3::new(0.0, 0.0, 5.0)).unwrap();
        let mut log = EventLog::new();
        sim.run_ticks(1, &mut log).unwrap();

        // All three see the target 5 m ahead.
        let s = log.summaries[0];
        assert_eq!(s.tick, Tick(0));
        assert_eq!(s.pursuing, 3);
        assert_eq!(s.patrolling, 0);
        assert_eq!(s.events, 3);
        assert_eq!(s.trust, 1.0);
    }

    #[test]
    fn enemies_decide_in_id_order() {
        let mut sim = sim_with(3, 10);
        sim.targets_mut().spawn(Vec3::new(2.0, 0.0, 5.0)).unwrap();
        let mut log = EventLog::new();
        sim.run_ticks(1, &mut log).unwrap();
        let agents: Vec<_> = log.transitions().iter().map(|t| t.0).collect();
        assert_eq!(agents, vec![AgentId(0), AgentId(1), AgentId(2)]);
    }
}

// ── Stimuli and membership ────────────────────────────────────────────────────

#[cfg(test)]
mod stimulus_tests {
    use nw_behavior::{ImpactHit, StunOnHit, StunOnHitConfig, StunRequest};
    use nw_hearing::{ImpactNoiseConfig, ImpactNoiseEmitter};

    use super::*;

    #[test]
    fn broadcast_reaches_every_listener() {
        let mut sim = sim_with(2, 10);
        let event = NoiseEvent::new(Vec3::new(1.0, 0.0, 6.0), 20.0, 1.0, SourceId(0));
        assert_eq!(sim.emit_noise(&event), 2);
        assert!(sim.enemies().iter().all(|e| e.state_kind() == StateKind::Investigate));
    }

    #[test]
    fn events_between_ticks_flush_with_next_tick() {
        let mut sim = sim_with(1, 10);
        sim.notify_noise(AgentId(0), Vec3::new(0.0, 0.0, 10.0), 0.5, 1.0).unwrap();
        assert_eq!(sim.pending_events().len(), 2);

        let mut log = EventLog::new();
        sim.run_ticks(1, &mut log).unwrap();
        assert!(sim.pending_events().is_empty());
        assert!(matches!(log.events[0], (Tick(0), BehaviorEvent::NoiseAccepted { .. })));
        assert_eq!(
            log.transitions(),
            vec![(AgentId(0), StateKind::Patrol, StateKind::Investigate)]
        );
    }

    #[test]
    fn unknown_agent_errors() {
        let mut sim = sim_with(1, 10);
        let stun = StunRequest {
            direction:         Vec3::new(1.0, 0.0, 0.0),
            duration_secs:     0.5,
            redirect_distance: 0.0,
        };
        assert!(matches!(
            sim.apply_stun(AgentId(7), &stun),
            Err(SimError::UnknownAgent(AgentId(7)))
        ));
        assert!(sim.clear_noise(AgentId(7)).is_err());
        assert!(sim.remove_enemy(AgentId(7)).is_err());
    }

    #[test]
    fn removal_scores_open_investigation_and_unregisters() {
        let mut sim = sim_with(2, 10);
        sim.notify_noise(AgentId(1), Vec3::new(2.0, 0.0, 10.0), 0.5, 1.0).unwrap();
        let removed = sim.remove_enemy(AgentId(1)).unwrap();
        assert_eq!(removed.evaluations_finished(), 1);
        assert_eq!(sim.trust().records(), 1);
        assert!(!sim.router().is_registered(AgentId(1)));

        let event = NoiseEvent::new(Vec3::ZERO, 20.0, 1.0, SourceId(0));
        assert_eq!(sim.emit_noise(&event), 1);
        assert!(sim.enemy(AgentId(1)).is_none());
    }

    #[test]
    fn added_enemies_keep_counting_up() {
        let mut sim = sim_with(2, 10);
        sim.remove_enemy(AgentId(0)).unwrap();
        let id = sim.add_enemy(motor_at(9.0, 0.0), EnemyConfig::default()).unwrap();
        assert_eq!(id, AgentId(2));
        assert!(sim.enemy(AgentId(2)).is_some());
    }

    #[test]
    fn impact_noise_respects_emitter_cooldown() {
        let mut sim = sim_with(1, 100);
        let mut emitter = ImpactNoiseEmitter::new(SourceId(3), ImpactNoiseConfig::default());
        assert_eq!(sim.emit_impact(&mut emitter, Vec3::new(0.0, 0.0, 4.0), 20.0), Some(1));
        assert_eq!(sim.enemies()[0].state_kind(), StateKind::Investigate);
        sim.run_ticks(2, &mut NoopObserver).unwrap();
        assert_eq!(sim.emit_impact(&mut emitter, Vec3::new(0.0, 0.0, 4.0), 20.0), None);
        assert_eq!(sim.emit_impact(&mut emitter, Vec3::ZERO, 0.5), None);
    }

    #[test]
    fn thrown_object_stuns_through_gate() {
        let mut sim = sim_with(1, 100);
        let mut gate = StunOnHit::new(StunOnHitConfig::default());
        let hit = ImpactHit {
            relative_velocity: Vec3::new(6.0, 0.0, 0.0),
            object_position:   Vec3::new(-0.5, 1.0, 0.0),
            object_velocity:   Vec3::new(6.0, 0.0, 0.0),
            contact_point:     Vec3::new(-0.3, 1.0, 0.0),
        };
        assert!(sim.hit_enemy(AgentId(0), &mut gate, &hit).unwrap());
        assert_eq!(sim.enemies()[0].state_kind(), StateKind::Stunned);
        // Same instant: still cooling down.
        assert!(!sim.hit_enemy(AgentId(0), &mut gate, &hit).unwrap());
    }

    #[test]
    fn local_stun_reaches_enemy() {
        let mut sim = sim_with(1, 100);
        sim.apply_stun_local(AgentId(0), 1.0, 0.0, 0.5, 0.0).unwrap();
        let until = sim.enemies()[0].stunned_until();
        assert_eq!(until, Some(SimTime::ZERO.after(0.5)));
    }

    #[test]
    fn stun_ends_on_the_tick_its_duration_lands() {
        let mut sim = sim_with(1, 100);
        let stun = StunRequest {
            direction:         Vec3::new(1.0, 0.0, 0.0),
            duration_secs:     0.6,
            redirect_distance: 0.0,
        };
        sim.apply_stun(AgentId(0), &stun).unwrap();

        // Ticks 0..=29 all fall short of 0.6 s.
        sim.run_ticks(30, &mut NoopObserver).unwrap();
        assert_eq!(sim.enemies()[0].state_kind(), StateKind::Stunned);

        // Tick 30 sits at 0.6 s even though the f32 step and duration widen differently.
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.enemies()[0].state_kind(), StateKind::Patrol);
    }

    #[test]
    fn reset_round_restores_full_trust() {
        let mut sim = sim_with(1, 100);
        sim.targets_mut().spawn(Vec3::new(0.0, 0.0, -40.0)).unwrap();
        sim.notify_noise(AgentId(0), Vec3::new(0.0, 0.0, 20.0), 0.5, 1.0).unwrap();
        if let Some(enemy) = sim.enemy_mut(AgentId(0)) {
            enemy.motor_mut().place(Transform::at(Vec3::new(0.0, 0.0, 20.0)));
        }
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.trust().unreliability(), 1.0);
        assert!(sim.trust().trust() < 1.0);

        sim.reset_round();
        assert_eq!(sim.trust().unreliability(), 0.0);
        assert_eq!(sim.trust().trust(), 1.0);
    }

    #[test]
    fn snapshot_reports_candidate() {
        let mut sim = sim_with(1, 10);
        let point = Vec3::new(0.0, 0.0, 10.0);
        sim.notify_noise(AgentId(0), point, 0.5, 1.0).unwrap();
        let snap = sim.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].state, StateKind::Investigate);
        assert_eq!(snap[0].candidate, Some(point));
        assert_eq!(snap[0].target, None);
    }
}
