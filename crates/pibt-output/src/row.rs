//! Plain data row types written by output backends.

use pibt_core::Coord;

/// One agent's cell at a given timestep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentPositionRow {
    pub timestep: u64,
    pub agent_id: u32,
    pub x:        u32,
    pub y:        u32,
}

impl AgentPositionRow {
    /// One row per agent of `config`, in agent order.
    pub fn from_configuration(timestep: usize, config: &[Coord]) -> Vec<Self> {
        config
            .iter()
            .enumerate()
            .map(|(i, cell)| Self {
                timestep: timestep as u64,
                agent_id: i as u32,
                x:        cell.x,
                y:        cell.y,
            })
            .collect()
    }
}

/// Summary statistics for one planner step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSummaryRow {
    pub timestep:       u64,
    pub moved_agents:   u64,
    pub agents_at_goal: u64,
}
