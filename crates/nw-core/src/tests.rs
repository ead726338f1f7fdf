//! Unit tests for nw-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, SourceId, TargetId};

    #[test]
    fn ids_order_by_value() {
        assert!(AgentId(3) < AgentId(4));
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(TargetId::INVALID.0, u32::MAX);
        assert_eq!(SourceId::default(), SourceId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(TargetId(7).to_string(), "TargetId(7)");
    }
}

#[cfg(test)]
mod math {
    use crate::{Transform, Vec3};

    #[test]
    fn distance_and_flatten() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 10.0, 4.0);
        assert!((a.distance(b.flatten()) - 5.0).abs() < 1e-6);
        assert_eq!(b.flatten().y, 0.0);
    }

    #[test]
    fn normalize_degenerate_falls_back() {
        let v = Vec3::new(1e-4, 0.0, 0.0);
        assert!(v.is_degenerate());
        assert_eq!(v.normalize_or(Vec3::FORWARD), Vec3::FORWARD);
        assert!(v.try_normalize().is_none());
    }

    #[test]
    fn non_finite_vectors_are_degenerate() {
        for v in [
            Vec3::new(f32::NAN, f32::NAN, f32::NAN),
            Vec3::new(1.0, 0.0, f32::NAN),
            Vec3::new(f32::INFINITY, 0.0, 0.0),
            Vec3::new(0.0, f32::NEG_INFINITY, 1.0),
        ] {
            assert!(v.is_degenerate(), "{v:?}");
            assert!(v.try_normalize().is_none(), "{v:?}");
            assert_eq!(v.normalize_or(Vec3::FORWARD), Vec3::FORWARD);
        }
        assert!(!Vec3::new(0.0, 0.0, 2.0).is_degenerate());
    }

    #[test]
    fn normalize_unit_length() {
        let v = Vec3::new(3.0, 0.0, 4.0).normalize_or(Vec3::ZERO);
        assert!((v.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cross_up_forward_is_right() {
        assert_eq!(Vec3::UP.cross(Vec3::FORWARD), Vec3::RIGHT);
    }

    #[test]
    fn local_planar_to_world_follows_facing() {
        // Facing +X: local "forward" is world +X, local "right" is world -Z.
        let t = Transform::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let fwd = t.local_planar_to_world(0.0, 1.0);
        assert!((fwd - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
        let right = t.local_planar_to_world(1.0, 0.0);
        assert!((right - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, SimTime, Tick};

    #[test]
    fn tick_display() {
        assert_eq!(Tick(15).to_string(), "T15");
    }

    #[test]
    fn clock_now_tracks_ticks() {
        let mut clock = SimClock::new(0.5);
        assert_eq!(clock.now(), SimTime::ZERO);
        clock.advance();
        clock.advance();
        assert_eq!(clock.now(), SimTime(1.0));
    }

    #[test]
    fn ticks_for_secs_rounds_up() {
        let clock = SimClock::new(0.25);
        assert_eq!(clock.ticks_for_secs(1.0), 4);
        assert_eq!(clock.ticks_for_secs(1.1), 5);
    }

    #[test]
    fn has_elapsed_is_inclusive() {
        let t0 = SimTime(2.0);
        assert!(!SimTime(4.9).has_elapsed(t0, 3.0));
        assert!(SimTime(5.0).has_elapsed(t0, 3.0));
    }

    #[test]
    fn widened_step_reaches_widened_deadline() {
        // 30 steps of 0.02 s sit just below 0.6 s once both are widened.
        let clock = SimClock::new(0.02);
        let deadline = SimTime::ZERO.after(0.6);
        assert!(clock.time_of(Tick(30)).0 < deadline.0);
        assert!(clock.time_of(Tick(30)).reached(deadline));
        assert!(!clock.time_of(Tick(29)).reached(deadline));
        assert!(clock.time_of(Tick(30)).has_elapsed(SimTime::ZERO, 0.6));
    }

    #[test]
    fn is_past_is_strict() {
        let deadline = SimTime::ZERO.after(4.0);
        assert!(!SimTime(4.0).is_past(deadline));
        assert!(!SimTime(3.999_999_9).is_past(deadline));
        assert!(SimTime(4.02).is_past(deadline));
        assert!(SimTime::ZERO.reached(SimTime(f64::NEG_INFINITY)));
    }

    #[test]
    fn sim_config_validation() {
        let mut cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.end_tick(), Tick(cfg.total_ticks));
        cfg.fixed_dt_secs = 0.0;
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{SimRng, Vec3};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f32 = r1.gen_range(0.0..1.0);
            let b: f32 = r2.gen_range(0.0..1.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn planar_point_in_bounds() {
        let mut rng = SimRng::new(0);
        let center = Vec3::new(5.0, 1.0, -5.0);
        for _ in 0..1000 {
            let p = rng.planar_point(center, 2.0);
            assert!((p.x - center.x).abs() <= 2.0);
            assert!((p.z - center.z).abs() <= 2.0);
            assert_eq!(p.y, center.y);
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}
