//! Run configuration for the `mapf` binary.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! [instance]
//! map        = "demos/mapf/data/rooms-10-8.map"
//! scen       = "demos/mapf/data/rooms-10-8.scen"
//! num_agents = 12
//!
//! [planner]
//! seed         = 0
//! max_timestep = 1000
//!
//! [output]
//! path   = "output/mapf/plan.txt"
//! format = "visualizer"   # or "csv" (path is then a directory)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use pibt_core::PlanConfig;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MapfConfig {
    #[serde(default)]
    pub instance: InstanceConfig,
    #[serde(default)]
    pub planner:  PlanConfig,
    #[serde(default)]
    pub output:   OutputConfig,
}

impl MapfConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Which benchmark instance to load.
#[derive(Clone, Debug, Deserialize)]
pub struct InstanceConfig {
    #[serde(default = "default_map")]
    pub map: PathBuf,

    #[serde(default = "default_scen")]
    pub scen: PathBuf,

    /// Number of scenario rows to use (default: 12)
    #[serde(default = "default_num_agents")]
    pub num_agents: usize,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            map:        default_map(),
            scen:       default_scen(),
            num_agents: default_num_agents(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: default_output_path(), format: OutputFormat::default() }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `t:(x,y),...` lines in a single file.
    #[default]
    Visualizer,
    /// `agent_positions.csv` and `step_summaries.csv` in a directory.
    Csv,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "visualizer" | "txt" => Ok(Self::Visualizer),
            "csv" => Ok(Self::Csv),
            other => bail!("unknown output format {other:?} (expected \"visualizer\" or \"csv\")"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visualizer => f.write_str("visualizer"),
            Self::Csv => f.write_str("csv"),
        }
    }
}

fn default_map() -> PathBuf {
    PathBuf::from("demos/mapf/data/rooms-10-8.map")
}
fn default_scen() -> PathBuf {
    PathBuf::from("demos/mapf/data/rooms-10-8.scen")
}
fn default_num_agents() -> usize {
    12
}
fn default_output_path() -> PathBuf {
    PathBuf::from("output/mapf/plan.txt")
}
