use thiserror::Error;

use pibt_core::{AgentId, Configuration, Coord};

/// Errors returned while building or running a planner.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("{starts} start cells but {goals} goal cells")]
    AgentCountMismatch { starts: usize, goals: usize },

    #[error("{got} distance oracles supplied for {expected} agents")]
    OracleCountMismatch { expected: usize, got: usize },

    #[error("distance oracle for {agent} targets {got}, but its goal is {expected}")]
    OracleGoalMismatch { agent: AgentId, expected: Coord, got: Coord },

    #[error("{what} cell {cell} of {agent} is not a passable grid cell")]
    ImpassableCell { agent: AgentId, cell: Coord, what: &'static str },

    #[error("{second} has the same {what} cell {cell} as {first}")]
    DuplicateCell {
        first:  AgentId,
        second: AgentId,
        cell:   Coord,
        what:   &'static str,
    },

    #[error("step given {got} {what} for {expected} agents")]
    StepInputMismatch { what: &'static str, expected: usize, got: usize },

    /// A reservation was claimed but never matched to a returned next cell.
    /// This is a bug in the resolver, not a planning failure.
    #[error("occupancy invariant violated: {0}")]
    InvariantViolation(Box<InvariantViolation>),
}

pub type SolverResult<T> = Result<T, SolverError>;

/// Diagnostic snapshot captured when a timestep ends with dirty occupancy
/// caches.
#[derive(Debug, Clone, PartialEq)]
pub struct InvariantViolation {
    /// Configuration the step started from.
    pub from:       Configuration,
    /// Next cells as far as they were decided (`None` = undecided).
    pub to:         Vec<Option<Coord>>,
    /// Priorities the step was ordered by.
    pub priorities: Vec<f64>,
    /// Cells still marked in the "now" cache after cleanup.
    pub stray_now:  Vec<(Coord, AgentId)>,
    /// Cells still claimed in the "next" cache after cleanup.
    pub stray_next: Vec<(Coord, AgentId)>,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let undecided = self.to.iter().filter(|t| t.is_none()).count();
        write!(
            f,
            "{} stray current-cell entries, {} stray reservations {:?}, {} undecided agents \
             (from {:?}, to {:?}, priorities {:?})",
            self.stray_now.len(),
            self.stray_next.len(),
            self.stray_next,
            undecided,
            self.from,
            self.to,
            self.priorities,
        )
    }
}

/// Reasons a plan fails [`validate_plan`][crate::validate_plan].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanViolation {
    #[error("plan is empty")]
    Empty,

    #[error("timestep {timestep} has {got} agents, expected {expected}")]
    AgentCount { timestep: usize, expected: usize, got: usize },

    #[error("{agent} starts at {got}, expected {expected}")]
    WrongStart { agent: AgentId, expected: Coord, got: Coord },

    #[error("{agent} ends at {got}, expected its goal {expected}")]
    WrongGoal { agent: AgentId, expected: Coord, got: Coord },

    #[error("{agent} occupies impassable cell {cell} at timestep {timestep}")]
    Impassable { timestep: usize, agent: AgentId, cell: Coord },

    #[error("{agent} jumps from {from} to {to} at timestep {timestep}")]
    Disconnected { timestep: usize, agent: AgentId, from: Coord, to: Coord },

    #[error("{a} and {b} both occupy {cell} at timestep {timestep}")]
    VertexCollision { timestep: usize, a: AgentId, b: AgentId, cell: Coord },

    #[error("{a} and {b} swap across {from}-{to} at timestep {timestep}")]
    EdgeCollision { timestep: usize, a: AgentId, b: AgentId, from: Coord, to: Coord },
}
