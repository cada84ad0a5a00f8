//! The `Pibt` planner: step driver and plan driver.

use tracing::{debug, error, info};

use pibt_core::{AgentId, Configuration, Coord, Plan, PlanConfig, SolverRng};
use pibt_grid::{DistTable, DistanceOracle, Grid};

use crate::error::InvariantViolation;
use crate::occupancy::OccupancyCache;
use crate::resolver::{Resolver, StepStats};
use crate::{NoopObserver, PlanObserver, Priorities, SolverError, SolverResult};

// ── StepReport ────────────────────────────────────────────────────────────────

/// Summary of one completed timestep, handed to observers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Index of the configuration this step produced (1 for the first step).
    pub timestep: usize,
    /// Agents whose cell changed during the step.
    pub moved:    usize,
    /// Agents standing on their goal after the step.
    pub at_goal:  usize,
    pub stats:    StepStats,
}

// ── Pibt ──────────────────────────────────────────────────────────────────────

/// Priority Inheritance with Backtracking planner.
///
/// Holds the grid, the start / goal configurations, one distance oracle per
/// agent, and the seeded tie-breaking RNG.  Priorities are owned by a single
/// [`run`](Self::run) call.
///
/// Create via [`PibtBuilder`][crate::PibtBuilder].
pub struct Pibt<O: DistanceOracle = DistTable> {
    pub(crate) grid:      Grid,
    pub(crate) starts:    Configuration,
    pub(crate) goals:     Configuration,
    pub(crate) oracles:   Vec<O>,
    pub(crate) rng:       SolverRng,
    pub(crate) config:    PlanConfig,
    pub(crate) last_step: StepStats,
}

impl<O: DistanceOracle> Pibt<O> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn starts(&self) -> &[Coord] {
        &self.starts
    }

    pub fn goals(&self) -> &[Coord] {
        &self.goals
    }

    pub fn agent_count(&self) -> usize {
        self.starts.len()
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Resolution counters from the most recent [`step`](Self::step).
    pub fn last_step_stats(&self) -> StepStats {
        self.last_step
    }

    /// Goal distance of `cell` for `agent`.
    pub fn distance(&mut self, agent: AgentId, cell: Coord) -> u32 {
        self.oracles[agent.index()].distance(&self.grid, cell)
    }

    /// Initial priorities for this instance.
    pub fn initial_priorities(&mut self) -> Priorities {
        Priorities::initial(&self.grid, &self.starts, &mut self.oracles)
    }

    // ── Plan driver ───────────────────────────────────────────────────────

    /// Plan with the configured step budget and no observer.
    pub fn solve(&mut self) -> SolverResult<Plan> {
        self.run(&mut NoopObserver)
    }

    /// Plan from the start configuration until every agent is at its goal or
    /// `config.max_timestep` steps have been taken.
    ///
    /// The tie-breaking stream restarts from `config.seed` on every call, so
    /// repeated runs on one planner return the same plan.  The returned plan
    /// begins with the start configuration.  It may be partial; check
    /// [`Plan::is_solved`].  The only error is an internal invariant
    /// violation.
    pub fn run<Obs: PlanObserver>(&mut self, observer: &mut Obs) -> SolverResult<Plan> {
        let max_timestep = self.config.max_timestep;
        self.rng = SolverRng::new(self.config.seed);
        let mut priorities = self.initial_priorities();
        let mut plan = Plan::new(self.starts.clone());
        let mut current = self.starts.clone();

        observer.on_plan_start(&current);

        while plan.len() <= max_timestep {
            let timestep = plan.len();
            observer.on_step_start(timestep);

            let next = match self.step(&current, &priorities) {
                Ok(next) => next,
                Err(e) => {
                    error!(timestep, error = %e, "aborting plan");
                    return Err(e);
                }
            };
            let all_arrived = priorities.update(&next, &self.goals);

            let report = StepReport {
                timestep,
                moved:   current.iter().zip(&next).filter(|(a, b)| a != b).count(),
                at_goal: next.iter().zip(&self.goals).filter(|(a, g)| a == g).count(),
                stats:   self.last_step,
            };
            debug!(
                timestep,
                moved = report.moved,
                at_goal = report.at_goal,
                inheritances = report.stats.inheritances,
                backtracks = report.stats.backtracks,
                "step complete"
            );
            observer.on_step_end(&report, &next);

            plan.push(next.clone());
            current = next;

            if all_arrived {
                break;
            }
        }

        let solved = plan.is_solved(&self.goals);
        info!(
            agents = self.agent_count(),
            makespan = plan.makespan(),
            sum_of_loss = plan.sum_of_loss(),
            solved,
            "planning finished"
        );
        observer.on_plan_end(&plan, solved);
        Ok(plan)
    }

    // ── Step driver ───────────────────────────────────────────────────────

    /// Advance `from` by one timestep.
    ///
    /// Every agent receives a next cell.  Agents are resolved in descending
    /// priority order; an agent already decided through priority inheritance
    /// is skipped.  Fails if `from` or `priorities` does not cover exactly
    /// this planner's agents, or if the occupancy caches are not clean once
    /// the step's reservations have been released.
    pub fn step(&mut self, from: &[Coord], priorities: &Priorities) -> SolverResult<Configuration> {
        let expected = self.agent_count();
        if from.len() != expected {
            return Err(SolverError::StepInputMismatch { what: "cells", expected, got: from.len() });
        }
        if priorities.len() != expected {
            return Err(SolverError::StepInputMismatch {
                what: "priorities",
                expected,
                got: priorities.len(),
            });
        }

        let mut now  = OccupancyCache::new(&self.grid);
        let mut next = OccupancyCache::new(&self.grid);
        let mut to: Vec<Option<Coord>> = vec![None; from.len()];

        for (agent, &cell) in AgentId::range(from.len()).zip(from) {
            now.claim(cell, agent);
        }

        let mut resolver = Resolver::new(
            &self.grid,
            &mut self.oracles,
            &mut self.rng,
            from,
            &mut to,
            &now,
            &mut next,
        );
        for agent in priorities.order() {
            if !resolver.is_decided(agent) {
                resolver.resolve(agent);
            }
        }
        self.last_step = resolver.stats();

        for (&cell, decided) in from.iter().zip(&to) {
            now.release(cell);
            if let Some(cell) = decided {
                next.release(*cell);
            }
        }

        let all_decided = to.iter().all(Option::is_some);
        if !now.is_clear() || !next.is_clear() || !all_decided {
            return Err(SolverError::InvariantViolation(Box::new(InvariantViolation {
                from:       from.to_vec(),
                to,
                priorities: priorities.as_slice().to_vec(),
                stray_now:  now.entries(),
                stray_next: next.entries(),
            })));
        }

        Ok(to.into_iter().flatten().collect())
    }
}

// ── Convenience entry point ───────────────────────────────────────────────────

/// Plan `starts` → `goals` on `grid` with the default distance tables.
///
/// Equivalent to building a [`Pibt`] with
/// [`PibtBuilder`][crate::PibtBuilder] and calling [`Pibt::solve`].
pub fn solve(
    grid:         Grid,
    starts:       Configuration,
    goals:        Configuration,
    seed:         u64,
    max_timestep: usize,
) -> SolverResult<Plan> {
    crate::PibtBuilder::new(grid, starts, goals)
        .config(PlanConfig::new(seed, max_timestep))
        .build()?
        .solve()
}
