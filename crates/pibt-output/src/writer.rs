//! The `PlanWriter` trait implemented by all backend writers.

use pibt_core::Coord;

use crate::{OutputResult, StepSummaryRow};

/// Trait implemented by the visualizer and CSV writers.
///
/// Errors surfaced while driven by [`PlanOutputObserver`][crate::PlanOutputObserver]
/// are stored there and retrieved with `take_error`.
pub trait PlanWriter {
    /// Write the configuration reached at `timestep` (0 is the start).
    fn write_configuration(&mut self, timestep: usize, config: &[Coord]) -> OutputResult<()>;

    /// Write one step summary row.  Backends without a summary table ignore
    /// it.
    fn write_step_summary(&mut self, _row: &StepSummaryRow) -> OutputResult<()> {
        Ok(())
    }

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
