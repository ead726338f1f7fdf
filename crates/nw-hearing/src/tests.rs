//! Unit tests for nw-hearing.

#[cfg(test)]
mod router {
    use nw_core::{AgentId, SourceId, Vec3};

    use crate::{NoiseEvent, NoiseRouter};

    fn event() -> NoiseEvent {
        NoiseEvent::new(Vec3::ZERO, 10.0, 1.0, SourceId(0))
    }

    #[test]
    fn delivers_in_registration_order() {
        let mut router = NoiseRouter::new();
        router.register(AgentId(2));
        router.register(AgentId(0));
        router.register(AgentId(1));

        let mut seen = Vec::new();
        let n = router.broadcast(&event(), &mut |id: AgentId, _: &NoiseEvent| seen.push(id));
        assert_eq!(n, 3);
        assert_eq!(seen, vec![AgentId(2), AgentId(0), AgentId(1)]);
    }

    #[test]
    fn duplicate_registration_is_noop() {
        let mut router = NoiseRouter::new();
        assert!(router.register(AgentId(1)));
        assert!(router.register(AgentId(2)));
        assert!(!router.register(AgentId(1)));
        assert_eq!(router.listeners(), &[AgentId(1), AgentId(2)]);
    }

    #[test]
    fn unregister_stops_delivery() {
        let mut router = NoiseRouter::new();
        router.register(AgentId(1));
        router.register(AgentId(2));
        assert!(router.unregister(AgentId(1)));
        assert!(!router.unregister(AgentId(1)));

        let mut seen = Vec::new();
        router.broadcast(&event(), &mut |id: AgentId, _: &NoiseEvent| seen.push(id));
        assert_eq!(seen, vec![AgentId(2)]);
    }

    #[test]
    fn empty_router_is_silent() {
        let router = NoiseRouter::new();
        let mut calls = 0;
        assert_eq!(router.broadcast(&event(), &mut |_: AgentId, _: &NoiseEvent| calls += 1), 0);
        assert_eq!(calls, 0);
        assert!(router.is_empty());
    }

    #[test]
    fn event_constructor_clamps() {
        let e = NoiseEvent::new(Vec3::ZERO, -1.0, 3.0, SourceId(9));
        assert_eq!(e.radius, 0.0);
        assert_eq!(e.loudness, 1.0);
    }
}

#[cfg(test)]
mod filter {
    use nw_core::{SourceId, Vec3};

    use crate::{HearingConfig, NoiseEvent};

    fn at(x: f32) -> Vec3 {
        Vec3::new(x, 0.0, 0.0)
    }

    #[test]
    fn linear_falloff() {
        let cfg = HearingConfig::default();
        let e = NoiseEvent::new(Vec3::ZERO, 10.0, 1.0, SourceId(0));
        assert_eq!(cfg.hear(at(0.0), &e), Some(1.0));
        let s = cfg.hear(at(5.0), &e).unwrap();
        assert!((s - 0.5).abs() < 1e-6);
    }

    #[test]
    fn out_of_earshot() {
        let cfg = HearingConfig::default();
        let e = NoiseEvent::new(Vec3::ZERO, 10.0, 1.0, SourceId(0));
        assert_eq!(cfg.hear(at(10.5), &e), None);
    }

    #[test]
    fn too_faint() {
        let cfg = HearingConfig::default();
        // 0.4 * (1 - 0.5) = 0.2 < 0.25
        let e = NoiseEvent::new(Vec3::ZERO, 10.0, 0.4, SourceId(0));
        assert_eq!(cfg.hear(at(5.0), &e), None);
        assert!(cfg.hear(at(1.0), &e).is_some());
    }

    #[test]
    fn max_radius_caps_sensitivity() {
        let cfg = HearingConfig { sensitivity: 10.0, max_radius: 30.0, min_suspicion: 0.0 };
        let e = NoiseEvent::new(Vec3::ZERO, 10.0, 1.0, SourceId(0));
        assert_eq!(cfg.effective_radius(&e), 30.0);
        assert!(cfg.hear(at(29.0), &e).is_some());
        assert_eq!(cfg.hear(at(31.0), &e), None);
    }

    #[test]
    fn zero_radius_is_inaudible() {
        let cfg = HearingConfig { min_suspicion: 0.0, ..Default::default() };
        let e = NoiseEvent::new(Vec3::ZERO, 0.0, 1.0, SourceId(0));
        assert_eq!(cfg.hear(Vec3::ZERO, &e), None);
    }
}

#[cfg(test)]
mod arbiter {
    use nw_core::{SimTime, Vec3};

    use crate::{Arbitration, NoiseArbiter, score};

    const P1: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    const P2: Vec3 = Vec3::new(2.0, 0.0, 0.0);

    #[test]
    fn first_stimulus_accepted_then_weaker_rejected() {
        let mut arb = NoiseArbiter::new();
        let a = arb.consider(P1, 0.5, 1.0, 1.0, SimTime(1.0));
        assert_eq!(a, Arbitration::Accepted { score: 0.5 });

        let b = arb.consider(P2, 0.4, 1.0, 1.0, SimTime(2.0));
        assert!(!b.is_accepted());
        let cand = arb.candidate().unwrap();
        assert_eq!(cand.position, P1);
        assert_eq!(cand.heard_at, SimTime(1.0));
    }

    #[test]
    fn tie_keeps_incumbent() {
        let mut arb = NoiseArbiter::new();
        arb.consider(P1, 0.5, 1.0, 1.0, SimTime(1.0));
        assert_eq!(
            arb.consider(P2, 0.5, 1.0, 1.0, SimTime(2.0)),
            Arbitration::Rejected { score: 0.5, incumbent: 0.5 }
        );
        assert_eq!(arb.candidate().unwrap().position, P1);
    }

    #[test]
    fn stronger_replaces() {
        let mut arb = NoiseArbiter::new();
        arb.consider(P1, 0.5, 1.0, 1.0, SimTime(1.0));
        assert!(arb.consider(P2, 0.51, 1.0, 1.0, SimTime(2.0)).is_accepted());
        assert_eq!(arb.candidate().unwrap().position, P2);
        assert_eq!(arb.candidate().unwrap().heard_at, SimTime(2.0));
    }

    #[test]
    fn trust_scales_score() {
        let mut arb = NoiseArbiter::new();
        arb.consider(P1, 1.0, 1.0, 0.15, SimTime(0.0));
        assert!((arb.candidate().unwrap().score - 0.15).abs() < 1e-6);
        // A high-bias stimulus still wins at low trust.
        assert!(arb.consider(P2, 1.0, 10.0, 0.15, SimTime(0.0)).is_accepted());
    }

    #[test]
    fn negative_inputs_clamped() {
        assert_eq!(score(-1.0, 1.0, 1.0), 0.0);
        assert!((score(1.0, -5.0, 1.0) - 0.001).abs() < 1e-9);
        let mut arb = NoiseArbiter::new();
        arb.consider(P1, -3.0, 1.0, 1.0, SimTime(0.0));
        assert_eq!(arb.candidate().unwrap().suspicion, 0.0);
    }

    #[test]
    fn score_monotone_in_each_argument() {
        let grid = [0.0f32, 0.1, 0.25, 0.5, 1.0, 2.0, 10.0];
        for &a in &grid {
            for &b in &grid {
                for w in grid.windows(2) {
                    assert!(score(w[0], a, b) <= score(w[1], a, b));
                    assert!(score(a, w[0], b) <= score(a, w[1], b));
                    assert!(score(a, b, w[0]) <= score(a, b, w[1]));
                }
            }
        }
    }

    #[test]
    fn clear_empties_slot() {
        let mut arb = NoiseArbiter::new();
        assert!(arb.clear().is_none());
        arb.consider(P1, 0.5, 1.0, 1.0, SimTime(0.0));
        assert!(arb.clear().is_some());
        assert!(!arb.has_candidate());
        // After clearing, any stimulus is accepted again.
        assert!(arb.consider(P2, 0.0, 1.0, 1.0, SimTime(0.0)).is_accepted());
    }
}

#[cfg(test)]
mod impact {
    use nw_core::{SimTime, SourceId, Vec3};

    use crate::{ImpactNoiseConfig, ImpactNoiseEmitter};

    fn emitter() -> ImpactNoiseEmitter {
        ImpactNoiseEmitter::new(SourceId(3), ImpactNoiseConfig::default())
    }

    #[test]
    fn soft_impact_is_silent() {
        assert!(emitter().on_impact(Vec3::ZERO, 0.5, SimTime(0.0)).is_none());
    }

    #[test]
    fn speed_maps_to_loudness_and_radius() {
        let e = emitter().on_impact(Vec3::ZERO, 20.0, SimTime(0.0)).unwrap();
        assert_eq!(e.loudness, 1.0);
        assert_eq!(e.radius, 30.0);
        assert_eq!(e.source, SourceId(3));

        let mid = emitter().on_impact(Vec3::ZERO, 10.5, SimTime(0.0)).unwrap();
        assert!((mid.loudness - 0.5).abs() < 1e-6);
        assert!((mid.radius - 20.0).abs() < 1e-4);

        let over = emitter().on_impact(Vec3::ZERO, 100.0, SimTime(0.0)).unwrap();
        assert_eq!(over.loudness, 1.0);
    }

    #[test]
    fn cooldown_swallows_bounces() {
        let mut em = emitter();
        assert!(em.on_impact(Vec3::ZERO, 10.0, SimTime(1.0)).is_some());
        assert!(em.on_impact(Vec3::ZERO, 10.0, SimTime(1.1)).is_none());
        assert!(em.on_impact(Vec3::ZERO, 10.0, SimTime(1.25)).is_some());
    }

    #[test]
    fn soft_impact_does_not_arm_cooldown() {
        let mut em = emitter();
        assert!(em.on_impact(Vec3::ZERO, 0.1, SimTime(1.0)).is_none());
        assert!(em.on_impact(Vec3::ZERO, 10.0, SimTime(1.05)).is_some());
    }

    #[test]
    fn empty_speed_range_is_silent_but_audible() {
        let cfg = ImpactNoiseConfig { min_speed: 4.0, max_speed: 4.0, ..Default::default() };
        assert_eq!(cfg.strength(4.0), 0.0);
        assert_eq!(cfg.strength(50.0), 0.0);

        let mut em = ImpactNoiseEmitter::new(SourceId(1), cfg);
        assert!(em.on_impact(Vec3::ZERO, 3.9, SimTime(0.0)).is_none());
        let e = em.on_impact(Vec3::ZERO, 9.0, SimTime(0.0)).unwrap();
        assert_eq!(e.loudness, 0.0);
        assert_eq!(e.radius, 10.0);
    }

    #[test]
    fn nan_speed_is_silent() {
        assert!(emitter().on_impact(Vec3::ZERO, f32::NAN, SimTime(0.0)).is_none());
    }

    #[test]
    fn inverted_speeds_rejected() {
        let cfg = ImpactNoiseConfig { min_speed: 5.0, max_speed: 2.0, ..Default::default() };
        assert!(cfg.validate().is_err());
        assert!(ImpactNoiseConfig::default().validate().is_ok());
    }
}
