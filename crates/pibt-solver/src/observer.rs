//! Planner observer trait for progress reporting and data collection.

use pibt_core::{Coord, Plan};

use crate::StepReport;

/// Callbacks invoked by [`Pibt::run`][crate::Pibt::run] at key points in the
/// plan loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: usize }
///
/// impl PlanObserver for ProgressPrinter {
///     fn on_step_end(&mut self, report: &StepReport, _config: &[Coord]) {
///         if report.timestep % self.interval == 0 {
///             println!("t={}: {} agents at goal", report.timestep, report.at_goal);
///         }
///     }
/// }
/// ```
pub trait PlanObserver {
    /// Called once with the start configuration (timestep 0).
    fn on_plan_start(&mut self, _start: &[Coord]) {}

    /// Called before the step producing configuration `timestep` begins.
    fn on_step_start(&mut self, _timestep: usize) {}

    /// Called after each step with its summary and the new configuration.
    fn on_step_end(&mut self, _report: &StepReport, _config: &[Coord]) {}

    /// Called once after the final step.  `solved` is `true` if every agent
    /// ended on its goal.
    fn on_plan_end(&mut self, _plan: &Plan, _solved: bool) {}
}

/// A [`PlanObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl PlanObserver for NoopObserver {}
