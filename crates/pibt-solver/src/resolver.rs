//! The recursive move resolver (PIBT's core procedure).
//!
//! # Protocol
//!
//! For the agent being resolved, candidates are its current cell (only when
//! it was not pushed here by priority inheritance) plus its passable
//! neighbours, shuffled with the solver RNG and then stably sorted by goal
//! distance.  Walking that list:
//!
//! ```text
//! claimed in `next`                    → vertex collision, skip
//! occupied in `now` by another agent k:
//!     k decided or k already in chain  → skip
//!     else                             → stay tentatively, resolve k
//!                                        k ok   → done (this agent stays)
//!                                        k fail → retract, keep going
//! free                                 → claim it, done
//! ```
//!
//! Running out of candidates forces the agent to stay and reports failure to
//! whoever pushed it.  Every call therefore leaves its agent decided.
//!
//! Note that inheritance success leaves the pushing agent on its own cell:
//! agents only ever move into cells that are empty in the current
//! configuration.

use tracing::trace;

use pibt_core::{AgentId, Coord, SolverRng};
use pibt_grid::{DistanceOracle, Grid};

use crate::occupancy::OccupancyCache;

/// Counters gathered during one timestep's resolution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Recursive calls made to resolve a blocking agent.
    pub inheritances: usize,
    /// Inheritance attempts that failed and were retracted.
    pub backtracks:   usize,
    /// Agents that exhausted their candidates and were forced to stay.
    pub forced_stays: usize,
}

/// Borrowed state for one timestep's resolution pass.
///
/// `now` is read-only here; `next` and `to` are mutated as claims are made
/// and retracted.
pub(crate) struct Resolver<'a, O: DistanceOracle> {
    grid:    &'a Grid,
    oracles: &'a mut [O],
    rng:     &'a mut SolverRng,
    from:    &'a [Coord],
    to:      &'a mut [Option<Coord>],
    now:     &'a OccupancyCache,
    next:    &'a mut OccupancyCache,
    /// Agents currently deferring to the one being resolved, outermost first.
    chain:   Vec<AgentId>,
    stats:   StepStats,
}

impl<'a, O: DistanceOracle> Resolver<'a, O> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        grid:    &'a Grid,
        oracles: &'a mut [O],
        rng:     &'a mut SolverRng,
        from:    &'a [Coord],
        to:      &'a mut [Option<Coord>],
        now:     &'a OccupancyCache,
        next:    &'a mut OccupancyCache,
    ) -> Self {
        Self {
            grid,
            oracles,
            rng,
            from,
            to,
            now,
            next,
            chain: Vec::new(),
            stats: StepStats::default(),
        }
    }

    #[inline]
    pub(crate) fn is_decided(&self, agent: AgentId) -> bool {
        self.to[agent.index()].is_some()
    }

    pub(crate) fn stats(&self) -> StepStats {
        self.stats
    }

    /// Top-level entry: resolve `agent` with an empty inheritance chain.
    pub(crate) fn resolve(&mut self, agent: AgentId) -> bool {
        debug_assert!(self.chain.is_empty());
        self.pibt(agent)
    }

    fn pibt(&mut self, i: AgentId) -> bool {
        let here = self.from[i.index()];
        let pushed_by = self.chain.last().copied();

        let candidates = self.candidates(i, here, pushed_by.is_none());
        trace!(agent = %i, ?pushed_by, %here, ?candidates, "resolving");

        for v in candidates {
            if let Some(holder) = self.next.get(v) {
                trace!(agent = %i, cell = %v, %holder, "vertex collision");
                continue;
            }

            if let Some(k) = self.now.get(v).filter(|&k| k != i) {
                if self.is_decided(k) || self.chain.contains(&k) {
                    continue;
                }

                trace!(agent = %i, blocker = %k, "trying priority inheritance");
                self.reserve(i, here);
                self.chain.push(i);
                self.stats.inheritances += 1;
                let ok = self.pibt(k);
                self.chain.pop();

                if ok {
                    trace!(agent = %i, blocker = %k, "priority inheritance succeeded");
                    return true;
                }

                self.to[i.index()] = None;
                self.next.release(here);
                self.stats.backtracks += 1;
                trace!(agent = %i, blocker = %k, "priority inheritance failed");
                continue;
            }

            trace!(agent = %i, cell = %v, "reserving");
            self.reserve(i, v);
            return true;
        }

        self.reserve(i, here);
        self.stats.forced_stays += 1;
        trace!(agent = %i, %here, "no candidate left, staying");
        false
    }

    /// Shuffled, then stably sorted by ascending goal distance.
    fn candidates(&mut self, i: AgentId, here: Coord, may_stay: bool) -> Vec<Coord> {
        let mut candidates = Vec::with_capacity(5);
        if may_stay {
            candidates.push(here);
        }
        candidates.extend(self.grid.neighbors(here));
        self.rng.shuffle(&mut candidates);

        let grid = self.grid;
        let oracle = &mut self.oracles[i.index()];
        candidates.sort_by_cached_key(|&c| oracle.distance(grid, c));
        candidates
    }

    #[inline]
    fn reserve(&mut self, agent: AgentId, cell: Coord) {
        self.to[agent.index()] = Some(cell);
        self.next.claim(cell, agent);
    }
}
