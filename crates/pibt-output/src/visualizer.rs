//! Visualizer text format.
//!
//! One line per timestep, each agent's cell followed by a comma:
//!
//! ```text
//! 0:(0,0),(2,2),
//! 1:(1,0),(2,1),
//! ```
//!
//! This is the plan format read by the common MAPF visualizers.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use pibt_core::{Configuration, Coord, Plan};

use crate::writer::PlanWriter;
use crate::{OutputError, OutputResult};

/// Streams configurations to any [`Write`] in visualizer format.
pub struct VisualizerWriter<W: Write> {
    out:      W,
    finished: bool,
}

impl VisualizerWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> VisualizerWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, finished: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PlanWriter for VisualizerWriter<W> {
    fn write_configuration(&mut self, timestep: usize, config: &[Coord]) -> OutputResult<()> {
        write!(self.out, "{timestep}:")?;
        for cell in config {
            write!(self.out, "{cell},")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}

/// Write a whole plan to `path`.
pub fn write_plan(path: &Path, plan: &Plan) -> OutputResult<()> {
    let mut writer = VisualizerWriter::create(path)?;
    for (t, config) in plan.iter().enumerate() {
        writer.write_configuration(t, config)?;
    }
    writer.finish()
}

/// Read a plan written by [`write_plan`] or [`VisualizerWriter`].
pub fn read_plan(path: &Path) -> OutputResult<Plan> {
    parse_plan(BufReader::new(File::open(path)?))
}

/// Parse visualizer text.  Blank lines are ignored; timesteps must count up
/// from 0.
pub fn parse_plan<R: BufRead>(reader: R) -> OutputResult<Plan> {
    let mut configs = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let err = |message: String| OutputError::Parse { line: i + 1, message };

        let (t, cells) = line
            .split_once(':')
            .ok_or_else(|| err("missing ':' after timestep".to_owned()))?;
        let t: usize = t
            .trim()
            .parse()
            .map_err(|e| err(format!("invalid timestep {t:?}: {e}")))?;
        if t != configs.len() {
            return Err(err(format!("expected timestep {}, found {t}", configs.len())));
        }

        configs.push(parse_configuration(cells).map_err(err)?);
    }

    Ok(Plan::from_configs(configs))
}

/// `(x,y),(x,y),` → cells.  The trailing comma is optional.
fn parse_configuration(s: &str) -> Result<Configuration, String> {
    let mut config = Vec::new();
    let mut rest = s.trim();
    while !rest.is_empty() {
        let close = rest
            .find(')')
            .ok_or_else(|| format!("unterminated cell in {rest:?}"))?;
        let cell: Coord = rest[..=close].parse().map_err(|e| format!("{e}"))?;
        config.push(cell);

        rest = rest[close + 1..].trim_start();
        rest = rest.strip_prefix(',').unwrap_or(rest).trim_start();
    }
    Ok(config)
}
