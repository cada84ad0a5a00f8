//! `pibt-grid`: static grid, distance oracle, and benchmark file loading.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`grid`]        | `Grid`: passability bitmap + 4-connected neighbour query |
//! | [`dist_table`]  | `DistanceOracle` trait, lazy-BFS `DistTable`              |
//! | [`map`]         | MovingAI `.map` / `.scen` loaders, `Scenario`             |
//! | [`error`]       | `GridError`, `GridResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod dist_table;
pub mod error;
pub mod grid;
pub mod map;


pub use dist_table::{DistTable, DistanceOracle};
pub use error::{GridError, GridResult};
pub use grid::Grid;
pub use map::{Scenario, load_map, load_scenario, parse_map, parse_scenario};
