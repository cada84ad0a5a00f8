//! `pibt-solver`: Priority Inheritance with Backtracking for grid MAPF.
//!
//! # One timestep
//!
//! ```text
//! step(from, priorities):
//!   ① Caches    fresh "now" / "next" occupancy tables; mark every agent
//!                on its current cell in "now".
//!   ② Resolve   for each agent in descending priority order that is not
//!                yet decided, run the recursive resolver (see `resolver`).
//!   ③ Cleanup   clear each agent's "now" entry and its "next" claim.
//!   ④ Check     both caches must be empty and every agent decided,
//!                otherwise `SolverError::InvariantViolation`.
//! ```
//!
//! # Plan loop
//!
//! ```text
//! priorities = dist(start) / passable_cells
//! plan = [starts]
//! while plan.len() <= max_timestep:
//!     next = step(last, priorities)
//!     update priorities (+1 travelling, drop integer part on goal)
//!     plan.push(next)
//!     stop once every agent stands on its goal
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Warms every agent's distance table on Rayon's thread pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pibt_grid::{load_map, load_scenario};
//! use pibt_solver::{PibtBuilder, validate_plan};
//!
//! let grid = load_map(Path::new("random-32-32-10.map"))?;
//! let scen = load_scenario(Path::new("random-32-32-10-random-1.scen"), Some(200))?;
//! let mut pibt = PibtBuilder::new(grid, scen.starts, scen.goals).seed(0).build()?;
//! let plan = pibt.solve()?;
//! validate_plan(pibt.grid(), pibt.starts(), pibt.goals(), &plan)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod occupancy;
pub mod priority;
mod resolver;
pub mod solver;
pub mod validate;


pub use builder::PibtBuilder;
pub use error::{InvariantViolation, PlanViolation, SolverError, SolverResult};
pub use observer::{NoopObserver, PlanObserver};
pub use occupancy::OccupancyCache;
pub use priority::Priorities;
pub use resolver::StepStats;
pub use solver::{Pibt, StepReport, solve};
pub use validate::{is_valid_plan, validate_plan, validate_transitions};
