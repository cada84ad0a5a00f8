//! `PlanOutputObserver<W>`: bridges `PlanObserver` to a `PlanWriter`.

use pibt_core::{Coord, Plan};
use pibt_solver::{PlanObserver, StepReport};

use crate::row::StepSummaryRow;
use crate::writer::PlanWriter;
use crate::OutputError;

/// A [`PlanObserver`] that streams every configuration and step summary to
/// any [`PlanWriter`] backend.
///
/// Errors from the writer are stored internally because `PlanObserver`
/// methods have no return value.  After `pibt.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct PlanOutputObserver<W: PlanWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: PlanWriter> PlanOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `pibt.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect its buffer after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: PlanWriter> PlanObserver for PlanOutputObserver<W> {
    fn on_plan_start(&mut self, start: &[Coord]) {
        let result = self.writer.write_configuration(0, start);
        self.store_err(result);
    }

    fn on_step_end(&mut self, report: &StepReport, config: &[Coord]) {
        let result = self.writer.write_configuration(report.timestep, config);
        self.store_err(result);

        let row = StepSummaryRow {
            timestep:       report.timestep as u64,
            moved_agents:   report.moved as u64,
            agents_at_goal: report.at_goal as u64,
        };
        let result = self.writer.write_step_summary(&row);
        self.store_err(result);
    }

    fn on_plan_end(&mut self, _plan: &Plan, _solved: bool) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
