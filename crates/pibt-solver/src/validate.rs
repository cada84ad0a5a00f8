//! Independent checks on a finished plan.
//!
//! These do not trust the resolver: they re-derive every property from the
//! grid and the raw configurations, so they are suitable both for tests and
//! for checking plans read back from disk.

use rustc_hash::FxHashMap;

use pibt_core::{AgentId, Coord, Plan};
use pibt_grid::Grid;

use crate::PlanViolation;

/// Check every transition of `plan`: passable cells, unit or zero moves, no
/// two agents on one cell, no two agents swapping cells.
pub fn validate_transitions(grid: &Grid, plan: &Plan) -> Result<(), PlanViolation> {
    let Some(first) = plan.first() else {
        return Err(PlanViolation::Empty);
    };
    let n = first.len();

    let mut prev_at: FxHashMap<Coord, AgentId> = FxHashMap::default();
    let mut at: FxHashMap<Coord, AgentId> = FxHashMap::default();

    for (timestep, config) in plan.iter().enumerate() {
        if config.len() != n {
            return Err(PlanViolation::AgentCount { timestep, expected: n, got: config.len() });
        }
        let prev = plan.get(timestep.saturating_sub(1)).unwrap_or(config);

        at.clear();
        for (agent, (&cell, &before)) in AgentId::range(n).zip(config.iter().zip(prev)) {
            if !grid.is_free(cell) {
                return Err(PlanViolation::Impassable { timestep, agent, cell });
            }
            if cell != before && !grid.neighbors(before).any(|c| c == cell) {
                return Err(PlanViolation::Disconnected { timestep, agent, from: before, to: cell });
            }
            if let Some(&a) = at.get(&cell) {
                return Err(PlanViolation::VertexCollision { timestep, a, b: agent, cell });
            }
            at.insert(cell, agent);

            // Whoever stood on our destination must not be standing on our
            // origin now.
            if cell != before {
                if let Some(&other) = prev_at.get(&cell) {
                    if other != agent && prev[other.index()] == cell && config[other.index()] == before {
                        return Err(PlanViolation::EdgeCollision {
                            timestep,
                            a: other,
                            b: agent,
                            from: before,
                            to: cell,
                        });
                    }
                }
            }
        }
        std::mem::swap(&mut prev_at, &mut at);
    }
    Ok(())
}

/// Full validity check: `plan` starts at `starts`, ends at `goals`, and
/// every transition passes [`validate_transitions`].
pub fn validate_plan(
    grid:   &Grid,
    starts: &[Coord],
    goals:  &[Coord],
    plan:   &Plan,
) -> Result<(), PlanViolation> {
    let (Some(first), Some(last)) = (plan.first(), plan.last()) else {
        return Err(PlanViolation::Empty);
    };
    if first.len() != starts.len() {
        return Err(PlanViolation::AgentCount { timestep: 0, expected: starts.len(), got: first.len() });
    }
    for (agent, (&got, &expected)) in AgentId::range(starts.len()).zip(first.iter().zip(starts)) {
        if got != expected {
            return Err(PlanViolation::WrongStart { agent, expected, got });
        }
    }

    validate_transitions(grid, plan)?;

    if last.len() != goals.len() {
        return Err(PlanViolation::AgentCount {
            timestep: plan.len() - 1,
            expected: goals.len(),
            got:      last.len(),
        });
    }
    for (agent, (&got, &expected)) in AgentId::range(goals.len()).zip(last.iter().zip(goals)) {
        if got != expected {
            return Err(PlanViolation::WrongGoal { agent, expected, got });
        }
    }
    Ok(())
}

/// `true` if [`validate_plan`] accepts the plan.
pub fn is_valid_plan(grid: &Grid, starts: &[Coord], goals: &[Coord], plan: &Plan) -> bool {
    validate_plan(grid, starts, goals, plan).is_ok()
}
