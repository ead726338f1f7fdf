//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `events.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, EventRow, OutputResult, TickSummaryRow};

/// Empty cell for `None`.
fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    events:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record([
            "agent_id", "tick", "time_secs", "state", "x", "z", "heading_deg",
            "target_id", "candidate_x", "candidate_z", "evaluations",
        ])?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record([
            "tick", "time_secs", "agent_id", "kind", "from_state", "to_state",
            "outcome", "value", "reference", "x", "z",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick", "time_secs", "patrolling", "pursuing", "investigating", "stunned",
            "events", "trust", "unreliability",
        ])?;

        Ok(Self {
            snapshots,
            events,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.time_secs.to_string(),
                row.state.to_owned(),
                row.x.to_string(),
                row.z.to_string(),
                row.heading_deg.to_string(),
                opt(row.target_id),
                opt(row.candidate_x),
                opt(row.candidate_z),
                row.evaluations.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.agent_id.to_string(),
            row.kind.to_owned(),
            opt(row.from_state),
            opt(row.to_state),
            opt(row.outcome),
            opt(row.value),
            opt(row.reference),
            opt(row.x),
            opt(row.z),
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.patrolling.to_string(),
            row.pursuing.to_string(),
            row.investigating.to_string(),
            row.stunned.to_string(),
            row.events.to_string(),
            row.trust.to_string(),
            row.unreliability.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
