//! Simulation time model.
//!
//! # Design
//!
//! The authoritative decision step runs at a fixed rate.  Each step is a
//! `Tick`; the monotonic timestamp every time-based decision compares
//! against (investigation timeout, retention grace period, stun duration) is
//! derived from it:
//!
//!   now = tick * fixed_dt_secs
//!
//! Deriving `SimTime` from an integer tick keeps the clock monotonic and
//! free of accumulated floating-point drift, and makes runs reproducible.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimTime ───────────────────────────────────────────────────────────────────

/// A monotonic timestamp in simulated seconds since tick 0.
///
/// Stored as `f64` so long sessions keep sub-millisecond resolution; the
/// durations configured on agents stay `f32` and are widened on comparison.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn from_secs(secs: f64) -> Self {
        SimTime(secs)
    }

    #[inline]
    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// The timestamp `secs` seconds after `self`.
    #[inline]
    pub fn after(self, secs: f32) -> SimTime {
        SimTime(self.0 + f64::from(secs))
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn secs_since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }

    /// `true` once at least `secs` have elapsed since `earlier`.
    #[inline]
    pub fn has_elapsed(self, earlier: SimTime, secs: f32) -> bool {
        self.reached(earlier.after(secs))
    }

    /// `true` once `self` is at or after `deadline`, within [`slack`].
    ///
    /// Tick timestamps and `f32` durations are both widened from `f32`, so
    /// a 0.6 s stun at a 0.02 s step lands a hair after tick 30.  The slack
    /// absorbs that and the deadline still fires on tick 30.
    #[inline]
    pub fn reached(self, deadline: SimTime) -> bool {
        self.0 + slack(deadline.0) >= deadline.0
    }

    /// `true` once `self` is strictly after `deadline`, beyond [`slack`].
    #[inline]
    pub fn is_past(self, deadline: SimTime) -> bool {
        self.0 > deadline.0 + slack(deadline.0)
    }
}

/// Relative tolerance for deadline comparisons.  Far above `f32` widening
/// error, far below any step length.
const TIME_TOLERANCE: f64 = 1e-6;

/// Comparison slack around timestamp `at`.
#[inline]
pub fn slack(at: f64) -> f64 {
    TIME_TOLERANCE * at.abs().max(1.0)
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Fixed-step clock for the authoritative decision loop.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Seconds per fixed step.  Default: 0.02 (50 Hz).
    pub fixed_dt_secs: f32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(fixed_dt_secs: f32) -> Self {
        Self { fixed_dt_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Monotonic timestamp of `current_tick`.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.time_of(self.current_tick)
    }

    /// Monotonic timestamp of an arbitrary tick.
    #[inline]
    pub fn time_of(&self, tick: Tick) -> SimTime {
        SimTime(tick.0 as f64 * f64::from(self.fixed_dt_secs))
    }

    /// How many ticks span `secs` seconds? (rounds up; timers never fire early)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        (f64::from(secs) / f64::from(self.fixed_dt_secs)).ceil().max(0.0) as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.now())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Seconds per authoritative step.  Default: 0.02 (50 Hz).
    pub fixed_dt_secs: f32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Report a snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_dt_secs:           0.02,
            total_ticks:             3_000,
            seed:                    42,
            snapshot_interval_ticks: 50,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.fixed_dt_secs)
    }

    /// Reject a step size the clock cannot work with.
    pub fn validate(&self) -> crate::NwResult<()> {
        crate::error::ensure_finite("fixed_dt_secs", self.fixed_dt_secs)?;
        if self.fixed_dt_secs <= 0.0 {
            return Err(crate::NwError::Config(format!(
                "fixed_dt_secs must be positive, got {}",
                self.fixed_dt_secs
            )));
        }
        Ok(())
    }
}
