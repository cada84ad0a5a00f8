//! Grid cell coordinates and joint configurations.
//!
//! `Coord` uses `u32` column / row indices.  `x` is the column (0 = west
//! edge) and `y` the row (0 = north edge), matching the MovingAI benchmark
//! convention so map and scenario files load without transposition.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// A single grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// 4-connected grid distance, ignoring obstacles.
    #[inline]
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// `true` if `other` is one of the four orthogonal neighbours of `self`.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl FromStr for Coord {
    type Err = CoreError;

    /// Parse the `(x,y)` form produced by `Display`.  Whitespace around the
    /// numbers is tolerated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| CoreError::Parse(format!("expected \"(x,y)\", got {s:?}")))?;

        let (x, y) = inner
            .split_once(',')
            .ok_or_else(|| CoreError::Parse(format!("missing ',' in {s:?}")))?;

        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .map_err(|e| CoreError::Parse(format!("invalid coordinate {v:?} in {s:?}: {e}")))
        };
        Ok(Coord::new(parse(x)?, parse(y)?))
    }
}

/// Joint positions of all agents at one timestep, indexed by `AgentId`.
///
/// A valid configuration has pairwise-distinct entries.
pub type Configuration = Vec<Coord>;
