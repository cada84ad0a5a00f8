//! Planner run configuration.
//!
//! Time is a plain timestep counter: timestep 0 is the start configuration
//! and every call of the step driver advances it by one.  `max_timestep`
//! bounds the number of steps, so a plan never holds more than
//! `max_timestep + 1` configurations.

/// Default step budget when none is configured.
pub const DEFAULT_MAX_TIMESTEP: usize = 1_000;

/// Top-level planner configuration.
///
/// Typically loaded from a TOML file by the application crate and passed to
/// the planner builder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlanConfig {
    /// Master RNG seed.  The same seed always produces identical plans.
    pub seed: u64,

    /// Step budget.  Planning stops after this many timesteps even if some
    /// agents have not reached their goals.
    pub max_timestep: usize,
}

impl PlanConfig {
    pub fn new(seed: u64, max_timestep: usize) -> Self {
        Self { seed, max_timestep }
    }

    /// Upper bound on the number of configurations a plan can hold.
    #[inline]
    pub fn max_plan_len(&self) -> usize {
        self.max_timestep + 1
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self { seed: 0, max_timestep: DEFAULT_MAX_TIMESTEP }
    }
}
