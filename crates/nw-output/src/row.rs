//! Plain data row types written by output backends.

use nw_behavior::BehaviorEvent;
use nw_core::{SimTime, Tick};
use nw_sim::{AgentSnapshot, TickSummary};
use nw_trust::InvestigationOutcome;

/// One enemy at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:    u32,
    pub tick:        u64,
    pub time_secs:   f64,
    pub state:       &'static str,
    pub x:           f32,
    pub z:           f32,
    /// Compass heading on the ground plane: 0° is +Z, 90° is +X.
    pub heading_deg: f32,
    pub target_id:   Option<u32>,
    pub candidate_x: Option<f32>,
    pub candidate_z: Option<f32>,
    pub evaluations: u64,
}

impl AgentSnapshotRow {
    pub fn new(tick: Tick, time: SimTime, snap: &AgentSnapshot) -> Self {
        Self {
            agent_id:    snap.agent.0,
            tick:        tick.0,
            time_secs:   time.as_secs(),
            state:       snap.state.as_str(),
            x:           snap.position.x,
            z:           snap.position.z,
            heading_deg: snap.forward.x.atan2(snap.forward.z).to_degrees(),
            target_id:   snap.target.map(|t| t.0),
            candidate_x: snap.candidate.map(|c| c.x),
            candidate_z: snap.candidate.map(|c| c.z),
            evaluations: snap.evaluations_finished,
        }
    }
}

/// One decision event.  Columns that do not apply to the event kind are
/// left empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRow {
    pub tick:       u64,
    pub time_secs:  f64,
    pub agent_id:   u32,
    pub kind:       &'static str,
    pub from_state: Option<&'static str>,
    pub to_state:   Option<&'static str>,
    pub outcome:    Option<&'static str>,
    /// Score for noise events, applied unreliability delta for evaluations.
    pub value:      Option<f32>,
    /// Incumbent score for rejected noise, trust after an evaluation.
    pub reference:  Option<f32>,
    pub x:          Option<f32>,
    pub z:          Option<f32>,
}

impl EventRow {
    pub fn new(tick: Tick, event: &BehaviorEvent) -> Self {
        let base = Self {
            tick:       tick.0,
            time_secs:  event.at().as_secs(),
            agent_id:   event.agent().0,
            kind:       "",
            from_state: None,
            to_state:   None,
            outcome:    None,
            value:      None,
            reference:  None,
            x:          None,
            z:          None,
        };
        match *event {
            BehaviorEvent::Transition { from, to, .. } => Self {
                kind: "transition",
                from_state: Some(from.as_str()),
                to_state: Some(to.as_str()),
                ..base
            },
            BehaviorEvent::EvaluationFinished { outcome, delta, trust, .. } => Self {
                kind: "evaluation",
                outcome: Some(outcome_name(outcome)),
                value: Some(delta),
                reference: Some(trust),
                ..base
            },
            BehaviorEvent::NoiseAccepted { position, score, .. } => Self {
                kind: "noise_accepted",
                value: Some(score),
                x: Some(position.x),
                z: Some(position.z),
                ..base
            },
            BehaviorEvent::NoiseRejected { position, score, incumbent, .. } => Self {
                kind: "noise_rejected",
                value: Some(score),
                reference: Some(incumbent),
                x: Some(position.x),
                z: Some(position.z),
                ..base
            },
        }
    }
}

fn outcome_name(outcome: InvestigationOutcome) -> &'static str {
    match outcome {
        InvestigationOutcome::TargetAcquired => "acquired",
        InvestigationOutcome::NoSnapshot => "no_snapshot",
        InvestigationOutcome::Moved { distance_improvement } if distance_improvement >= 0.0 => {
            "moved_closer"
        }
        InvestigationOutcome::Moved { .. } => "moved_away",
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub time_secs:     f64,
    pub patrolling:    u32,
    pub pursuing:      u32,
    pub investigating: u32,
    pub stunned:       u32,
    pub events:        u32,
    pub trust:         f32,
    pub unreliability: f32,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:          s.tick.0,
            time_secs:     s.time.as_secs(),
            patrolling:    s.patrolling as u32,
            pursuing:      s.pursuing as u32,
            investigating: s.investigating as u32,
            stunned:       s.stunned as u32,
            events:        s.events as u32,
            trust:         s.trust,
            unreliability: s.unreliability,
        }
    }
}
