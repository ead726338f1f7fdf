//! Unit tests for nw-motor.

use nw_agent::TargetRegistry;
use nw_core::{SimTime, Transform, Vec3};

use crate::{KinematicConfig, KinematicMotor, Motor, PatrolRoute};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f32 = 0.1;

/// Step `motor` from `start` for `steps` ticks of `DT`, returning the end time.
fn run(motor: &mut KinematicMotor, targets: &TargetRegistry, start: f64, steps: u32) -> SimTime {
    let mut now = SimTime(start);
    for _ in 0..steps {
        now = now.after(DT);
        motor.advance(now, DT, targets);
    }
    now
}

fn motor_at_origin() -> KinematicMotor {
    KinematicMotor::new(Transform::at(Vec3::ZERO), KinematicConfig::default())
}

// ── PatrolRoute ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use super::*;
    use crate::MotorError;

    #[test]
    fn rejects_non_finite() {
        let err = PatrolRoute::new(vec![Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)]).err();
        assert!(matches!(err, Some(MotorError::NonFiniteWaypoint { index: 1 })));
    }

    #[test]
    fn wait_then_advance_wraps() {
        let mut r = PatrolRoute::new(vec![Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0)]).unwrap();
        assert_eq!(r.current_index(), 0);
        r.begin_wait(SimTime(2.0));
        assert!(r.poll_wait(SimTime(1.0)));
        assert!(!r.poll_wait(SimTime(2.0)));
        assert_eq!(r.current_index(), 1);
        r.begin_wait(SimTime(3.0));
        assert!(!r.poll_wait(SimTime(3.0)));
        assert_eq!(r.current_index(), 0);
    }

    #[test]
    fn poll_without_wait_is_noop() {
        let mut r = PatrolRoute::new(vec![Vec3::ZERO]).unwrap();
        assert!(!r.poll_wait(SimTime(10.0)));
        assert_eq!(r.current_index(), 0);
    }
}

// ── KinematicMotor ────────────────────────────────────────────────────────────

#[cfg(test)]
mod kinematic {
    use super::*;

    #[test]
    fn walks_to_destination_and_stops_short() {
        let targets = TargetRegistry::new();
        let mut m = motor_at_origin();
        m.set_destination(Vec3::new(0.0, 0.0, 10.0));
        run(&mut m, &targets, 0.0, 100);
        let z = m.transform().position.z;
        assert!((z - 9.0).abs() < 1e-3, "stopped at {z}");
        assert!(!m.follows_patrol_route());
    }

    #[test]
    fn speed_is_bounded() {
        let targets = TargetRegistry::new();
        let mut m = motor_at_origin();
        m.set_destination(Vec3::new(100.0, 0.0, 0.0));
        run(&mut m, &targets, 0.0, 10);
        // 1 s at 5 m/s.
        assert!((m.transform().position.x - 5.0).abs() < 1e-3);
        assert!((m.transform().forward - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn follows_moving_target() {
        let mut targets = TargetRegistry::new();
        let id = targets.spawn(Vec3::new(0.0, 0.0, 3.0)).unwrap();
        let mut m = motor_at_origin();
        m.set_target(id, true);
        run(&mut m, &targets, 0.0, 20);
        assert!((m.transform().position.z - 2.0).abs() < 1e-3);

        targets.set_position(id, Vec3::new(0.0, 0.0, -10.0));
        run(&mut m, &targets, 2.0, 40);
        assert!((m.transform().position.z + 9.0).abs() < 1e-3);
    }

    #[test]
    fn despawned_target_stops_steering() {
        let mut targets = TargetRegistry::new();
        let id = targets.spawn(Vec3::new(0.0, 0.0, 30.0)).unwrap();
        let mut m = motor_at_origin();
        m.set_target(id, true);
        targets.remove(id);
        run(&mut m, &targets, 0.0, 10);
        assert_eq!(m.transform().position, Vec3::ZERO);
    }

    #[test]
    fn lock_suspends_steering_and_keeps_latest() {
        let targets = TargetRegistry::new();
        let mut m = motor_at_origin();
        m.set_destination(Vec3::new(0.0, 0.0, 50.0));
        m.lock_movement_until(SimTime(1.0));
        m.lock_movement_until(SimTime(0.5));
        assert!(m.is_locked(SimTime(0.9)));

        run(&mut m, &targets, 0.0, 9);
        assert_eq!(m.transform().position, Vec3::ZERO);
        run(&mut m, &targets, 0.9, 2);
        assert!(m.transform().position.z > 0.0);
    }

    #[test]
    fn knockback_decays_with_drag() {
        let targets = TargetRegistry::new();
        let mut m = motor_at_origin();
        m.lock_movement_until(SimTime(5.0));
        m.add_velocity_change(Vec3::new(4.0, 0.0, 0.0));
        run(&mut m, &targets, 0.0, 30);
        let x = m.transform().position.x;
        // Geometric series bounded by v0 / (1 - e^{-drag·dt}) · dt ≈ 2.2.
        assert!(x > 1.5 && x < 2.3, "slid {x}");
        assert!(m.velocity().length() < 0.02);

        m.add_velocity_change(Vec3::new(4.0, 0.0, 0.0));
        m.zero_horizontal_velocity();
        assert_eq!(m.velocity(), Vec3::ZERO);
    }

    #[test]
    fn patrols_with_dwell() {
        let targets = TargetRegistry::new();
        let route = PatrolRoute::new(vec![Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO]).unwrap();
        let mut m = motor_at_origin().with_route(route);
        assert!(m.follows_patrol_route());

        // 0.8 s to cover 4 m, then dwell.
        let now = run(&mut m, &targets, 0.0, 10);
        assert!(m.route().is_waiting());
        assert!((m.transform().position.z - 4.0).abs() < 1e-3);

        // Dwell lasts 1.5 s, then head back.
        run(&mut m, &targets, now.as_secs(), 25);
        assert_eq!(m.route().current_index(), 1);
        assert!(m.transform().position.z < 4.0);
    }

    #[test]
    fn target_without_override_keeps_patrol() {
        let mut targets = TargetRegistry::new();
        let id = targets.spawn(Vec3::new(10.0, 0.0, 0.0)).unwrap();
        let route = PatrolRoute::new(vec![Vec3::new(0.0, 0.0, 5.0)]).unwrap();
        let mut m = motor_at_origin().with_route(route);
        m.set_target(id, false);
        assert!(m.follows_patrol_route());
        run(&mut m, &targets, 0.0, 2);
        // Still walking the route (+Z), not towards the target (+X).
        assert_eq!(m.transform().position.x, 0.0);
        assert!(m.transform().position.z > 0.0);
    }

    #[test]
    fn config_validation() {
        assert!(KinematicConfig::default().validate().is_ok());
        let bad = KinematicConfig { drag: -1.0, ..Default::default() };
        assert!(bad.validate().is_err());
        let bad = KinematicConfig { max_speed: f32::NAN, ..Default::default() };
        assert!(bad.validate().is_err());
    }
}

// ── RecordingMotor ────────────────────────────────────────────────────────────

#[cfg(test)]
mod recording {
    use nw_core::TargetId;

    use super::*;
    use crate::{MotorCommand, RecordingMotor};

    #[test]
    fn records_in_order() {
        let mut m = RecordingMotor::new(Transform::default());
        assert!(m.follows_patrol_route());
        m.set_target(TargetId(1), true);
        m.clear_target();
        m.set_destination(Vec3::ZERO);
        m.lock_movement_until(SimTime(2.0));

        assert!(!m.follows_patrol_route());
        assert_eq!(m.last_route_command(), Some(MotorCommand::SetDestination(Vec3::ZERO)));
        assert_eq!(
            m.take_commands(),
            vec![
                MotorCommand::SetTarget { target: TargetId(1), override_patrol: true },
                MotorCommand::ClearTarget,
                MotorCommand::SetDestination(Vec3::ZERO),
                MotorCommand::LockMovementUntil(SimTime(2.0)),
            ]
        );
        assert!(m.commands().is_empty());
    }
}
