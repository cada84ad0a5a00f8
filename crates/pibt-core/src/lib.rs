//! `pibt-core`: foundational types for the PIBT multi-agent planner.
//!
//! This crate is a dependency of every other `pibt-*` crate.  It has no
//! `pibt-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`coord`]       | `Coord`, `Configuration`                              |
//! | [`plan`]        | `Plan`: time-indexed sequence of configurations      |
//! | [`config`]      | `PlanConfig` (seed, step budget)                      |
//! | [`rng`]         | `SolverRng` (seeded tie-breaking source)              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod coord;
pub mod error;
pub mod ids;
pub mod plan;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::PlanConfig;
pub use coord::{Configuration, Coord};
pub use error::{CoreError, CoreResult};
pub use ids::AgentId;
pub use plan::Plan;
pub use rng::SolverRng;
