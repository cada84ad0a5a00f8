//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_positions.csv`
//! - `step_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use pibt_core::Coord;

use crate::writer::PlanWriter;
use crate::{AgentPositionRow, OutputResult, StepSummaryRow};

/// Writes a plan to two CSV files.
pub struct CsvWriter {
    positions: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut positions = Writer::from_path(dir.join("agent_positions.csv"))?;
        positions.write_record(["timestep", "agent_id", "x", "y"])?;

        let mut summaries = Writer::from_path(dir.join("step_summaries.csv"))?;
        summaries.write_record(["timestep", "moved_agents", "agents_at_goal"])?;

        Ok(Self {
            positions,
            summaries,
            finished: false,
        })
    }

    pub fn write_positions(&mut self, rows: &[AgentPositionRow]) -> OutputResult<()> {
        for row in rows {
            self.positions.write_record(&[
                row.timestep.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
            ])?;
        }
        Ok(())
    }
}

impl PlanWriter for CsvWriter {
    fn write_configuration(&mut self, timestep: usize, config: &[Coord]) -> OutputResult<()> {
        self.write_positions(&AgentPositionRow::from_configuration(timestep, config))
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.timestep.to_string(),
            row.moved_agents.to_string(),
            row.agents_at_goal.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.positions.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
