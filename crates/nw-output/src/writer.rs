//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, EventRow, OutputResult, TickSummaryRow};

/// Sink for the three row kinds a run produces.
///
/// Errors are stored by the observer and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
