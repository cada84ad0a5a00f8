//! `pibt-output`: plan writers for the PIBT planner.
//!
//! Two backends are provided:
//!
//! | Backend     | Files created                                   |
//! |-------------|-------------------------------------------------|
//! | Visualizer  | one text file, `t:(x,y),(x,y),` per timestep    |
//! | CSV         | `agent_positions.csv`, `step_summaries.csv`     |
//!
//! Both implement [`PlanWriter`] and are driven by [`PlanOutputObserver`],
//! which implements `pibt_solver::PlanObserver`.  Visualizer files can be
//! read back with [`read_plan`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use pibt_output::{PlanOutputObserver, VisualizerWriter};
//!
//! let writer = VisualizerWriter::create(Path::new("output.txt"))?;
//! let mut obs = PlanOutputObserver::new(writer);
//! let plan = pibt.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod visualizer;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::PlanOutputObserver;
pub use row::{AgentPositionRow, StepSummaryRow};
pub use visualizer::{VisualizerWriter, parse_plan, read_plan, write_plan};
pub use writer::PlanWriter;
