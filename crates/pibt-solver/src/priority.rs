//! Agent priorities carried across timesteps.
//!
//! # Policy
//!
//! ```text
//! initial:        p_i = dist_i(start_i) / passable_cells      (in [0, 1))
//! not at goal:    p_i += 1
//! at goal:        p_i -= floor(p_i)
//! ```
//!
//! The fractional part never changes after initialisation, so it acts as a
//! fixed tie-break between agents that have waited equally long.  Arrived
//! agents fall back below every agent that is still travelling.

use pibt_core::{AgentId, Coord};
use pibt_grid::{DistanceOracle, Grid};

/// One priority per agent; higher is resolved first.
#[derive(Clone, Debug, PartialEq)]
pub struct Priorities(Vec<f64>);

impl Priorities {
    /// Normalised start-to-goal distance for every agent.
    pub fn initial<O: DistanceOracle>(grid: &Grid, starts: &[Coord], oracles: &mut [O]) -> Self {
        let passable = grid.passable_count().max(1) as f64;
        Self(
            starts
                .iter()
                .zip(oracles.iter_mut())
                .map(|(&s, oracle)| oracle.distance(grid, s) as f64 / passable)
                .collect(),
        )
    }

    pub fn from_values(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> f64 {
        self.0[agent.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Agents sorted by descending priority.  Ties keep ascending id order.
    pub fn order(&self) -> Vec<AgentId> {
        let mut order: Vec<AgentId> = AgentId::range(self.0.len()).collect();
        // `sort_by` is stable.
        order.sort_by(|a, b| self.0[b.index()].total_cmp(&self.0[a.index()]));
        order
    }

    /// Apply the per-timestep update for `config` and report whether every
    /// agent is at its goal.
    pub fn update(&mut self, config: &[Coord], goals: &[Coord]) -> bool {
        let mut all_arrived = true;
        for ((p, at), goal) in self.0.iter_mut().zip(config).zip(goals) {
            if at == goal {
                *p -= p.floor();
            } else {
                all_arrived = false;
                *p += 1.0;
            }
        }
        all_arrived
    }
}
