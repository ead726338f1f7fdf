//! Simulation observer trait for progress reporting and data collection.

use nw_behavior::{BehaviorEvent, StateKind};
use nw_core::{AgentId, SimTime, TargetId, Tick, Vec3};

/// Aggregate state at the end of one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSummary {
    pub tick:          Tick,
    pub time:          SimTime,
    pub patrolling:    usize,
    pub pursuing:      usize,
    pub investigating: usize,
    pub stunned:       usize,
    /// Events emitted during this tick.
    pub events:        usize,
    pub trust:         f32,
    pub unreliability: f32,
}

impl TickSummary {
    pub(crate) fn count(&mut self, kind: StateKind) {
        match kind {
            StateKind::Patrol => self.patrolling += 1,
            StateKind::Pursue => self.pursuing += 1,
            StateKind::Investigate => self.investigating += 1,
            StateKind::Stunned => self.stunned += 1,
        }
    }
}

/// One enemy as seen at a snapshot tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub agent:     AgentId,
    pub state:     StateKind,
    pub position:  Vec3,
    pub forward:   Vec3,
    pub target:    Option<TargetId>,
    /// Position of the pending noise candidate.
    pub candidate: Option<Vec3>,
    pub evaluations_finished: u64,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: transition printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_event(&mut self, _tick: Tick, event: &BehaviorEvent) {
///         if let BehaviorEvent::Transition { agent, from, to, .. } = event {
///             println!("{agent}: {from} -> {to}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any decision.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per decision event, in emission order, after all enemies
    /// have decided for the tick.
    ///
    /// Events raised between ticks (noise, stuns, removals) are delivered with
    /// the next tick.
    fn on_event(&mut self, _tick: Tick, _event: &BehaviorEvent) {}

    /// Called at the end of each tick, after locomotion.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`).
    fn on_snapshot(&mut self, _tick: Tick, _time: SimTime, _agents: &[AgentSnapshot]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Keeps every event it is shown.  Handy in tests and short scripted runs.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events:    Vec<(Tick, BehaviorEvent)>,
    pub summaries: Vec<TickSummary>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(agent, from, to)` for every transition seen so far.
    pub fn transitions(&self) -> Vec<(AgentId, StateKind, StateKind)> {
        self.events
            .iter()
            .filter_map(|(_, e)| match *e {
                BehaviorEvent::Transition { agent, from, to, .. } => Some((agent, from, to)),
                _ => None,
            })
            .collect()
    }
}

impl SimObserver for EventLog {
    fn on_event(&mut self, tick: Tick, event: &BehaviorEvent) {
        self.events.push((tick, *event));
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summaries.push(*summary);
    }
}
