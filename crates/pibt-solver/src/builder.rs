//! Fluent builder for constructing a [`Pibt`].

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use pibt_core::{AgentId, Configuration, Coord, PlanConfig, SolverRng};
use pibt_grid::{DistTable, DistanceOracle, Grid};

use crate::resolver::StepStats;
use crate::{Pibt, SolverError, SolverResult};

/// Fluent builder for [`Pibt<O>`].
///
/// # Required inputs
///
/// - [`Grid`]: the static map
/// - start and goal [`Configuration`]s of equal length
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                  |
/// |--------------------|------------------------------------------|
/// | `.seed(s)`         | `0`                                      |
/// | `.max_timestep(n)` | `1000`                                   |
/// | `.config(c)`       | `PlanConfig::default()`                  |
/// | `.oracles(v)`      | one lazy [`DistTable`] per goal          |
///
/// # Example
///
/// ```
/// use pibt_core::Coord;
/// use pibt_grid::Grid;
/// use pibt_solver::PibtBuilder;
///
/// let grid = Grid::open(4, 1);
/// let mut pibt = PibtBuilder::new(grid, vec![Coord::new(0, 0)], vec![Coord::new(3, 0)])
///     .seed(7)
///     .build()?;
/// let plan = pibt.solve()?;
/// assert_eq!(plan.makespan(), 3);
/// # Ok::<(), pibt_solver::SolverError>(())
/// ```
pub struct PibtBuilder<O: DistanceOracle = DistTable> {
    grid:    Grid,
    starts:  Configuration,
    goals:   Configuration,
    config:  PlanConfig,
    oracles: Vec<O>,
}

impl PibtBuilder<DistTable> {
    /// Create a builder with all required inputs and lazy BFS distance
    /// tables.
    pub fn new(grid: Grid, starts: Configuration, goals: Configuration) -> Self {
        let oracles = goals.iter().map(|&g| DistTable::new(&grid, g)).collect();
        Self {
            grid,
            starts,
            goals,
            config: PlanConfig::default(),
            oracles,
        }
    }
}

impl<O: DistanceOracle> PibtBuilder<O> {
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn max_timestep(mut self, max_timestep: usize) -> Self {
        self.config.max_timestep = max_timestep;
        self
    }

    pub fn config(mut self, config: PlanConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the distance oracles (must be one per agent, in agent order).
    pub fn oracles<O2: DistanceOracle>(self, oracles: Vec<O2>) -> PibtBuilder<O2> {
        PibtBuilder {
            grid:   self.grid,
            starts: self.starts,
            goals:  self.goals,
            config: self.config,
            oracles,
        }
    }

    /// Validate the instance and return a ready-to-run [`Pibt`].
    ///
    /// Rejects mismatched lengths, start or goal cells that are blocked or
    /// outside the grid, and configurations with repeated cells.  A goal
    /// that cannot be reached from its start is only logged: PIBT still
    /// produces a (never solved) plan for it.
    pub fn build(mut self) -> SolverResult<Pibt<O>> {
        if self.starts.len() != self.goals.len() {
            return Err(SolverError::AgentCountMismatch {
                starts: self.starts.len(),
                goals:  self.goals.len(),
            });
        }
        if self.oracles.len() != self.goals.len() {
            return Err(SolverError::OracleCountMismatch {
                expected: self.goals.len(),
                got:      self.oracles.len(),
            });
        }

        check_cells(&self.grid, &self.starts, "start")?;
        check_cells(&self.grid, &self.goals, "goal")?;

        for ((agent, oracle), &goal) in AgentId::range(self.goals.len())
            .zip(&self.oracles)
            .zip(&self.goals)
        {
            if oracle.goal() != goal {
                return Err(SolverError::OracleGoalMismatch {
                    agent,
                    expected: goal,
                    got:      oracle.goal(),
                });
            }
        }

        warm_oracles(&self.grid, &mut self.oracles);

        let unreachable = self.grid.cell_count() as u32;
        for ((agent, oracle), &start) in AgentId::range(self.starts.len())
            .zip(self.oracles.iter_mut())
            .zip(&self.starts)
        {
            if oracle.distance(&self.grid, start) >= unreachable {
                warn!(%agent, %start, goal = %oracle.goal(), "goal is unreachable from start");
            }
        }

        debug!(
            agents = self.starts.len(),
            width = self.grid.width(),
            height = self.grid.height(),
            seed = self.config.seed,
            max_timestep = self.config.max_timestep,
            "planner built"
        );

        Ok(Pibt {
            rng:       SolverRng::new(self.config.seed),
            grid:      self.grid,
            starts:    self.starts,
            goals:     self.goals,
            oracles:   self.oracles,
            config:    self.config,
            last_step: StepStats::default(),
        })
    }
}

/// Every cell must be passable and used by at most one agent.
fn check_cells(grid: &Grid, cells: &[Coord], what: &'static str) -> SolverResult<()> {
    let mut seen: FxHashMap<Coord, AgentId> = FxHashMap::default();
    for (agent, &cell) in AgentId::range(cells.len()).zip(cells) {
        if !grid.is_free(cell) {
            return Err(SolverError::ImpassableCell { agent, cell, what });
        }
        if let Some(&first) = seen.get(&cell) {
            return Err(SolverError::DuplicateCell { first, second: agent, cell, what });
        }
        seen.insert(cell, agent);
    }
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn warm_oracles<O: DistanceOracle>(_grid: &Grid, _oracles: &mut [O]) {
    // Oracles evaluate lazily during planning.
}

#[cfg(feature = "parallel")]
fn warm_oracles<O: DistanceOracle>(grid: &Grid, oracles: &mut [O]) {
    use rayon::prelude::*;

    oracles.par_iter_mut().for_each(|oracle| oracle.warm(grid));
}
