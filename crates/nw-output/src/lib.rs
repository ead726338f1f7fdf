//! `nw-output`: simulation output writers for the nightwatch enemy AI.
//!
//! The CSV backend creates three files in the output directory:
//!
//! | File                  | One row per                                     |
//! |-----------------------|-------------------------------------------------|
//! | `agent_snapshots.csv` | enemy per snapshot tick                         |
//! | `events.csv`          | decision event (transition, evaluation, noise)  |
//! | `tick_summaries.csv`  | tick: state counts, shared trust                |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `nw_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use nw_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, EventRow, TickSummaryRow};
pub use writer::OutputWriter;
