//! Observable decision events.

use nw_core::{AgentId, SimTime, Vec3};
use nw_trust::InvestigationOutcome;

use crate::StateKind;

/// Something an enemy decided.  Collected per tick by the simulation and
/// forwarded to observers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BehaviorEvent {
    Transition {
        agent: AgentId,
        at:    SimTime,
        from:  StateKind,
        to:    StateKind,
    },
    /// An investigation ended and was scored.
    EvaluationFinished {
        agent:   AgentId,
        at:      SimTime,
        outcome: InvestigationOutcome,
        /// Change applied to the shared unreliability.
        delta:   f32,
        /// Trust after the update.
        trust:   f32,
    },
    NoiseAccepted {
        agent:    AgentId,
        at:       SimTime,
        position: Vec3,
        score:    f32,
    },
    /// A stimulus lost to the pending candidate.
    NoiseRejected {
        agent:     AgentId,
        at:        SimTime,
        position:  Vec3,
        score:     f32,
        incumbent: f32,
    },
}

impl BehaviorEvent {
    pub fn agent(&self) -> AgentId {
        match *self {
            BehaviorEvent::Transition { agent, .. }
            | BehaviorEvent::EvaluationFinished { agent, .. }
            | BehaviorEvent::NoiseAccepted { agent, .. }
            | BehaviorEvent::NoiseRejected { agent, .. } => agent,
        }
    }

    pub fn at(&self) -> SimTime {
        match *self {
            BehaviorEvent::Transition { at, .. }
            | BehaviorEvent::EvaluationFinished { at, .. }
            | BehaviorEvent::NoiseAccepted { at, .. }
            | BehaviorEvent::NoiseRejected { at, .. } => at,
        }
    }
}
