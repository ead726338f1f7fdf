//! Borrowed world state for one decision step.

use nw_agent::TargetRegistry;
use nw_core::SimTime;
use nw_spatial::LineOfSight;
use nw_trust::TrustModel;

use crate::BehaviorEvent;

/// What an enemy may see and touch while deciding.
///
/// Built by the simulation for each agent in turn.  Targets and geometry
/// are read-only; the trust model is the one piece of shared state the
/// decision path mutates, and `events` collects what happened.
pub struct DecisionContext<'a> {
    pub now:     SimTime,
    pub targets: &'a TargetRegistry,
    pub los:     &'a dyn LineOfSight,
    pub trust:   &'a mut TrustModel,
    pub events:  &'a mut Vec<BehaviorEvent>,
}

impl<'a> DecisionContext<'a> {
    #[inline]
    pub fn new(
        now:     SimTime,
        targets: &'a TargetRegistry,
        los:     &'a dyn LineOfSight,
        trust:   &'a mut TrustModel,
        events:  &'a mut Vec<BehaviorEvent>,
    ) -> Self {
        Self { now, targets, los, trust, events }
    }
}
