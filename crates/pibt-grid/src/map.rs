//! MovingAI benchmark loaders.
//!
//! # `.map` format
//!
//! ```text
//! type octile
//! height 4
//! width 5
//! map
//! .....
//! .@@..
//! .....
//! T....
//! ```
//!
//! Header lines are `key value` pairs terminated by a lone `map` line.  Only
//! `height` and `width` are interpreted.  In the body, `.` is passable and
//! every other character (`@`, `T`, `O`, `W`, …) is an obstacle.
//!
//! # `.scen` format
//!
//! Tab-separated, one agent per row, preceded by a `version` line:
//!
//! ```text
//! version 1
//! 0	random-32-32-10.map	32	32	5	3	20	17	29.0
//! ```
//!
//! | Column | Meaning                 |
//! |--------|-------------------------|
//! | 0      | bucket                  |
//! | 1      | map file name           |
//! | 2, 3   | map width, map height   |
//! | 4, 5   | start x, start y        |
//! | 6, 7   | goal x, goal y          |
//! | 8      | optimal path length     |
//!
//! Rows that do not have exactly nine fields (the `version` line, blank
//! lines) are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use pibt_core::{Configuration, Coord};

use crate::{Grid, GridError, GridResult};

const SCENARIO_FIELDS: usize = 9;

// ── Map ───────────────────────────────────────────────────────────────────────

/// Load a MovingAI `.map` file.
pub fn load_map(path: &Path) -> GridResult<Grid> {
    let file = File::open(path)?;
    parse_map(BufReader::new(file))
}

/// Like [`load_map`] but accepts any buffered reader.
pub fn parse_map<R: BufRead>(reader: R) -> GridResult<Grid> {
    let mut width:  Option<usize> = None;
    let mut height: Option<usize> = None;
    let mut in_body = false;
    let mut rows: Vec<String> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();

        if !in_body {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some("map"), None) => in_body = true,
                (Some("height"), Some(v)) => height = Some(parse_dim("height", v)?),
                (Some("width"), Some(v)) => width = Some(parse_dim("width", v)?),
                _ => {}
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }
        rows.push(line.to_owned());
    }

    let (Some(width), Some(height)) = (width, height) else {
        return Err(GridError::Map("missing width or height header".into()));
    };
    if !in_body {
        return Err(GridError::Map("missing \"map\" line".into()));
    }
    if rows.len() != height {
        return Err(GridError::RowCountMismatch { expected: height, got: rows.len() });
    }
    if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.chars().count() != width) {
        return Err(GridError::RaggedRows { row, expected: width, got: r.chars().count() });
    }

    Grid::from_rows(&rows)
}

fn parse_dim(key: &str, value: &str) -> GridResult<usize> {
    value
        .parse()
        .map_err(|_| GridError::Map(format!("invalid {key} {value:?}")))
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// Start and goal configurations read from a scenario file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scenario {
    /// Map file name referenced by the first row, if any.
    pub map_name: Option<String>,
    pub starts:   Configuration,
    pub goals:    Configuration,
}

impl Scenario {
    pub fn agent_count(&self) -> usize {
        self.starts.len()
    }
}

#[derive(Deserialize)]
struct ScenarioRecord {
    _bucket:          u32,
    map:              String,
    _map_width:       u32,
    _map_height:      u32,
    start_x:          u32,
    start_y:          u32,
    goal_x:           u32,
    goal_y:           u32,
    _optimal_length:  f64,
}

/// Load a MovingAI `.scen` file, keeping at most `limit` agents.
pub fn load_scenario(path: &Path, limit: Option<usize>) -> GridResult<Scenario> {
    let file = File::open(path)?;
    parse_scenario(file, limit)
}

/// Like [`load_scenario`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`).
pub fn parse_scenario<R: Read>(reader: R, limit: Option<usize>) -> GridResult<Scenario> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut scenario = Scenario::default();
    let limit = limit.unwrap_or(usize::MAX);

    for result in csv_reader.records() {
        if scenario.agent_count() >= limit {
            break;
        }
        let record = result?;
        if record.len() != SCENARIO_FIELDS {
            continue;
        }
        let row: ScenarioRecord = record.deserialize(None).map_err(|e| {
            let line = record.position().map_or(0, |p| p.line());
            GridError::Scenario(format!("line {line}: {e}"))
        })?;

        scenario.map_name.get_or_insert(row.map);
        scenario.starts.push(Coord::new(row.start_x, row.start_y));
        scenario.goals.push(Coord::new(row.goal_x, row.goal_y));
    }

    Ok(scenario)
}
