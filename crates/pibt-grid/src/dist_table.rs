//! Distance-oracle trait and default lazy BFS implementation.
//!
//! # Pluggability
//!
//! `pibt-solver` queries goal distances through the [`DistanceOracle`] trait,
//! so applications can swap in precomputed tables, heuristics, or cached
//! oracles without touching the planner core.  The default [`DistTable`] is
//! an exact breadth-first search from the goal, evaluated lazily.
//!
//! # Units
//!
//! Distances are move counts (`u32`).  A cell that is blocked, out of range,
//! or disconnected from the goal answers [`Grid::cell_count`], which is
//! larger than any real distance, so such cells always sort last.

use std::collections::VecDeque;

use pibt_core::Coord;

use crate::Grid;

// ── DistanceOracle trait ──────────────────────────────────────────────────────

/// Shortest-path distance to one fixed goal cell.
///
/// The planner builds one oracle per agent.  `distance` takes `&mut self` so
/// implementations may evaluate lazily; it must be deterministic and must be
/// queried with the same grid every time.
///
/// # Thread safety
///
/// Implementations must be `Send` so tables can be warmed on Rayon worker
/// threads (the `parallel` feature of `pibt-solver`).
pub trait DistanceOracle: Send {
    /// The goal cell this oracle measures towards.
    fn goal(&self) -> Coord;

    /// Shortest-path move count from `cell` to [`goal`](Self::goal).
    fn distance(&mut self, grid: &Grid, cell: Coord) -> u32;

    /// Evaluate everything up-front.  The default does nothing, which is
    /// correct for oracles that are already complete.
    fn warm(&mut self, _grid: &Grid) {}
}

// ── DistTable ─────────────────────────────────────────────────────────────────

/// Exact BFS distance table with lazy evaluation.
///
/// The search frontier is kept between queries: a lookup for a cell whose
/// distance is already known is O(1); otherwise the BFS resumes until that
/// cell is settled (or the frontier is exhausted).  Every cell is expanded at
/// most once over the table's lifetime.
#[derive(Clone, Debug)]
pub struct DistTable {
    goal:        Coord,
    /// Best known distance per cell; `unreachable` until discovered.
    table:       Vec<u32>,
    /// BFS frontier, resumed on demand.
    queue:       VecDeque<Coord>,
    unreachable: u32,
}

impl DistTable {
    /// Start a BFS rooted at `goal`.  No cells are expanded yet.
    ///
    /// A blocked or out-of-range goal produces a table in which every cell
    /// is unreachable.
    pub fn new(grid: &Grid, goal: Coord) -> Self {
        let unreachable = grid.cell_count() as u32;
        let mut table = vec![unreachable; grid.cell_count()];
        let mut queue = VecDeque::new();

        if let Some(i) = grid.index(goal).filter(|_| grid.is_free(goal)) {
            table[i] = 0;
            queue.push_back(goal);
        }

        Self { goal, table, queue, unreachable }
    }

    /// Distance from `target` to the goal, resuming the BFS if needed.
    pub fn get(&mut self, grid: &Grid, target: Coord) -> u32 {
        if !grid.is_free(target) {
            return self.unreachable;
        }
        let Some(ti) = grid.index(target) else {
            return self.unreachable;
        };
        if self.table[ti] < self.unreachable {
            return self.table[ti];
        }

        while let Some(u) = self.queue.pop_front() {
            let d = self.expand(grid, u);
            if u == target {
                return d;
            }
        }
        self.unreachable
    }

    /// Run the BFS to completion.
    pub fn warm(&mut self, grid: &Grid) {
        while let Some(u) = self.queue.pop_front() {
            self.expand(grid, u);
        }
    }

    /// `true` once every reachable cell has been settled.
    pub fn is_complete(&self) -> bool {
        self.queue.is_empty()
    }

    /// Value returned for cells that cannot reach the goal.
    pub fn unreachable(&self) -> u32 {
        self.unreachable
    }

    /// Relax the neighbours of `u` and return `u`'s own distance.
    fn expand(&mut self, grid: &Grid, u: Coord) -> u32 {
        let Some(ui) = grid.index(u) else {
            return self.unreachable;
        };
        let d = self.table[ui];
        for v in grid.neighbors(u) {
            if let Some(vi) = grid.index(v) {
                if d + 1 < self.table[vi] {
                    self.table[vi] = d + 1;
                    self.queue.push_back(v);
                }
            }
        }
        d
    }
}

impl DistanceOracle for DistTable {
    fn goal(&self) -> Coord {
        self.goal
    }

    fn distance(&mut self, grid: &Grid, cell: Coord) -> u32 {
        self.get(grid, cell)
    }

    fn warm(&mut self, grid: &Grid) {
        DistTable::warm(self, grid);
    }
}
