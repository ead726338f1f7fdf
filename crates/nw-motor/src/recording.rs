//! A motor that records commands instead of moving.

use nw_agent::TargetRegistry;
use nw_core::{SimTime, TargetId, Transform, Vec3};

use crate::Motor;

/// One call made on a [`Motor`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MotorCommand {
    SetDestination(Vec3),
    SetTarget { target: TargetId, override_patrol: bool },
    ClearTarget,
    LockMovementUntil(SimTime),
    ZeroHorizontalVelocity,
    AddVelocityChange(Vec3),
    SetFollowsPatrolRoute(bool),
}

/// Test double: logs every command, keeps the patrol flag, never moves.
///
/// The body stays wherever [`place`](Self::place) last put it, which lets
/// tests script an agent's position independently of its decisions.
#[derive(Clone, Debug, Default)]
pub struct RecordingMotor {
    body:          Transform,
    follow_patrol: bool,
    commands:      Vec<MotorCommand>,
}

impl RecordingMotor {
    pub fn new(body: Transform) -> Self {
        Self { body, follow_patrol: true, commands: Vec::new() }
    }

    pub fn place(&mut self, body: Transform) {
        self.body = body;
    }

    pub fn commands(&self) -> &[MotorCommand] {
        &self.commands
    }

    /// Drain the log, returning what was recorded.
    pub fn take_commands(&mut self) -> Vec<MotorCommand> {
        std::mem::take(&mut self.commands)
    }

    /// The most recent routing command (destination, target or clear).
    pub fn last_route_command(&self) -> Option<MotorCommand> {
        self.commands.iter().rev().copied().find(|c| {
            matches!(
                c,
                MotorCommand::SetDestination(_)
                    | MotorCommand::SetTarget { .. }
                    | MotorCommand::ClearTarget
            )
        })
    }
}

impl Motor for RecordingMotor {
    fn set_destination(&mut self, point: Vec3) {
        self.follow_patrol = false;
        self.commands.push(MotorCommand::SetDestination(point));
    }

    fn set_target(&mut self, target: TargetId, override_patrol: bool) {
        if override_patrol {
            self.follow_patrol = false;
        }
        self.commands.push(MotorCommand::SetTarget { target, override_patrol });
    }

    fn clear_target(&mut self) {
        self.commands.push(MotorCommand::ClearTarget);
    }

    fn lock_movement_until(&mut self, until: SimTime) {
        self.commands.push(MotorCommand::LockMovementUntil(until));
    }

    fn zero_horizontal_velocity(&mut self) {
        self.commands.push(MotorCommand::ZeroHorizontalVelocity);
    }

    fn add_velocity_change(&mut self, delta: Vec3) {
        self.commands.push(MotorCommand::AddVelocityChange(delta));
    }

    fn follows_patrol_route(&self) -> bool {
        self.follow_patrol
    }

    fn set_follows_patrol_route(&mut self, follow: bool) {
        self.follow_patrol = follow;
        self.commands.push(MotorCommand::SetFollowsPatrolRoute(follow));
    }

    fn transform(&self) -> Transform {
        self.body
    }

    fn advance(&mut self, _now: SimTime, _dt: f32, _targets: &TargetRegistry) {}
}
