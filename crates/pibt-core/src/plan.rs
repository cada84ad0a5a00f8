//! The time-indexed plan returned by the planner.

use crate::{AgentId, Configuration, Coord};

/// An ordered sequence of configurations indexed by timestep.
///
/// Index 0 is always the initial (start) configuration.  A plan may be
/// partial: when the step budget runs out before every agent arrives, the
/// caller must check [`is_solved`](Self::is_solved).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    configs: Vec<Configuration>,
}

impl Plan {
    /// A plan holding only the initial configuration.
    pub fn new(start: Configuration) -> Self {
        Self { configs: vec![start] }
    }

    /// Wrap an existing sequence of configurations (e.g. one read back from
    /// disk).  The sequence may be empty.
    pub fn from_configs(configs: Vec<Configuration>) -> Self {
        Self { configs }
    }

    pub fn push(&mut self, config: Configuration) {
        self.configs.push(config);
    }

    /// Number of configurations, including the initial one.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Number of transitions (`len() - 1`, or 0 for an empty plan).
    pub fn makespan(&self) -> usize {
        self.configs.len().saturating_sub(1)
    }

    /// Number of agents, taken from the initial configuration.
    pub fn agent_count(&self) -> usize {
        self.configs.first().map_or(0, Vec::len)
    }

    pub fn get(&self, t: usize) -> Option<&Configuration> {
        self.configs.get(t)
    }

    pub fn first(&self) -> Option<&Configuration> {
        self.configs.first()
    }

    pub fn last(&self) -> Option<&Configuration> {
        self.configs.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Configuration> {
        self.configs.iter()
    }

    pub fn configs(&self) -> &[Configuration] {
        &self.configs
    }

    pub fn into_configs(self) -> Vec<Configuration> {
        self.configs
    }

    /// Position of `agent` at timestep `t`.
    pub fn position(&self, t: usize, agent: AgentId) -> Option<Coord> {
        self.configs.get(t).and_then(|c| c.get(agent.index())).copied()
    }

    /// `true` if the final configuration equals `goals`.
    pub fn is_solved(&self, goals: &[Coord]) -> bool {
        self.last().is_some_and(|last| last.as_slice() == goals)
    }

    /// Sum-of-loss cost: for every transition, count the agents that are not
    /// both at and remaining at their final cell.
    ///
    /// Agents resting at their final position from some timestep on stop
    /// accruing cost; an agent that leaves and comes back pays for the
    /// excursion.
    pub fn sum_of_loss(&self) -> usize {
        let Some(last) = self.last() else {
            return 0;
        };
        self.configs
            .windows(2)
            .map(|w| {
                w[0].iter()
                    .zip(&w[1])
                    .zip(last)
                    .filter(|((from, to), goal)| !(from == goal && to == goal))
                    .count()
            })
            .sum()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a Configuration;
    type IntoIter = std::slice::Iter<'a, Configuration>;

    fn into_iter(self) -> Self::IntoIter {
        self.configs.iter()
    }
}
