//! mapf: plan a MovingAI benchmark instance with PIBT.
//!
//! Loads a `.map` grid and the first N agents of a `.scen` file, plans with
//! PIBT, checks the result, and writes it in visualizer or CSV format.
//!
//! ```text
//! mapf [CONFIG.toml] [-m MAP] [-i SCEN] [-N AGENTS] [-s SEED]
//!      [-T MAX_TIMESTEP] [-o OUTPUT] [-f visualizer|csv] [-v]
//! ```
//!
//! Without a config argument, `mapf.toml` in the working directory is used if
//! present.  Flags override file values.  Log filtering follows `RUST_LOG`;
//! the default is `mapf=info`, and `-v` adds `pibt_solver=debug`.

mod config;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pibt_core::Plan;
use pibt_grid::{load_map, load_scenario};
use pibt_output::{CsvWriter, PlanOutputObserver, PlanWriter, VisualizerWriter};
use pibt_solver::{PibtBuilder, validate_plan};

use config::{MapfConfig, OutputFormat};

// ── Command line ──────────────────────────────────────────────────────────────

const USAGE: &str = "\
usage: mapf [CONFIG.toml] [options]

  -m, --map PATH            MovingAI .map file
  -i, --scen PATH           MovingAI .scen file
  -N, --num-agents N        agents to take from the scenario
  -s, --seed N              tie-breaking seed
  -T, --max-timestep N      step budget
  -o, --output PATH         output file (visualizer) or directory (csv)
  -f, --format FORMAT       visualizer | csv
  -v, --verbose             per-step solver logging
  -h, --help                print this message";

#[derive(Debug, Default)]
struct Cli {
    config:       Option<PathBuf>,
    map:          Option<PathBuf>,
    scen:         Option<PathBuf>,
    num_agents:   Option<usize>,
    seed:         Option<u64>,
    max_timestep: Option<usize>,
    output:       Option<PathBuf>,
    format:       Option<OutputFormat>,
    verbose:      bool,
    help:         bool,
}

impl Cli {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut cli = Cli::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next().with_context(|| format!("{flag} needs a value"))
            };
            match arg.as_str() {
                "-m" | "--map" => cli.map = Some(value(&arg)?.into()),
                "-i" | "--scen" => cli.scen = Some(value(&arg)?.into()),
                "-N" | "--num-agents" => cli.num_agents = Some(parse_num(&arg, value(&arg)?)?),
                "-s" | "--seed" => cli.seed = Some(parse_num(&arg, value(&arg)?)?),
                "-T" | "--max-timestep" => cli.max_timestep = Some(parse_num(&arg, value(&arg)?)?),
                "-o" | "--output" => cli.output = Some(value(&arg)?.into()),
                "-f" | "--format" => cli.format = Some(value(&arg)?.parse()?),
                "-v" | "--verbose" => cli.verbose = true,
                "-h" | "--help" => cli.help = true,
                flag if flag.starts_with('-') => bail!("unknown option {flag}\n\n{USAGE}"),
                path if cli.config.is_none() => cli.config = Some(path.into()),
                extra => bail!("unexpected argument {extra:?}\n\n{USAGE}"),
            }
        }
        Ok(cli)
    }

    fn apply(&self, config: &mut MapfConfig) {
        if let Some(map) = &self.map {
            config.instance.map = map.clone();
        }
        if let Some(scen) = &self.scen {
            config.instance.scen = scen.clone();
        }
        if let Some(n) = self.num_agents {
            config.instance.num_agents = n;
        }
        if let Some(seed) = self.seed {
            config.planner.seed = seed;
        }
        if let Some(max) = self.max_timestep {
            config.planner.max_timestep = max;
        }
        if let Some(path) = &self.output {
            config.output.path = path.clone();
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}

fn parse_num<T>(flag: &str, value: String) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("{flag}: invalid number {value:?}"))
}

// ── Run ───────────────────────────────────────────────────────────────────────

/// Outcome of one planning run.
#[derive(Debug)]
struct Summary {
    agents:      usize,
    plan:        Plan,
    solved:      bool,
    elapsed_ms:  f64,
}

fn run(config: &MapfConfig) -> Result<Summary> {
    let grid = load_map(&config.instance.map)
        .with_context(|| format!("loading map {}", config.instance.map.display()))?;
    let scen = load_scenario(&config.instance.scen, Some(config.instance.num_agents))
        .with_context(|| format!("loading scenario {}", config.instance.scen.display()))?;

    if scen.agent_count() < config.instance.num_agents {
        warn!(
            requested = config.instance.num_agents,
            available = scen.agent_count(),
            "scenario has fewer agents than requested"
        );
    }
    info!(
        map = %config.instance.map.display(),
        width = grid.width(),
        height = grid.height(),
        agents = scen.agent_count(),
        seed = config.planner.seed,
        "instance loaded"
    );

    let mut pibt = PibtBuilder::new(grid, scen.starts, scen.goals)
        .config(config.planner.clone())
        .build()?;

    let t0 = Instant::now();
    let plan = match config.output.format {
        OutputFormat::Visualizer => {
            if let Some(parent) = config.output.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            plan_with(&mut pibt, VisualizerWriter::create(&config.output.path)?)?
        }
        OutputFormat::Csv => {
            std::fs::create_dir_all(&config.output.path)?;
            plan_with(&mut pibt, CsvWriter::new(&config.output.path)?)?
        }
    };
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    let solved = plan.is_solved(pibt.goals());
    if solved {
        validate_plan(pibt.grid(), pibt.starts(), pibt.goals(), &plan)
            .context("planner returned an invalid solution")?;
    } else {
        warn!(makespan = plan.makespan(), "step budget exhausted before all agents arrived");
    }

    Ok(Summary { agents: pibt.agent_count(), plan, solved, elapsed_ms })
}

fn plan_with<W: PlanWriter>(pibt: &mut pibt_solver::Pibt, writer: W) -> Result<Plan> {
    let mut obs = PlanOutputObserver::new(writer);
    let plan = pibt.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing plan output");
    }
    Ok(plan)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn init_tracing(verbose: bool) -> Result<()> {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mapf=info"));
    if verbose {
        filter = filter.add_directive("pibt_solver=debug".parse()?);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse(std::env::args().skip(1))?;
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }
    init_tracing(cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            MapfConfig::load(path)?
        }
        None if Path::new("mapf.toml").exists() => {
            info!("loading configuration from mapf.toml");
            MapfConfig::load(Path::new("mapf.toml"))?
        }
        None => MapfConfig::default(),
    };
    cli.apply(&mut config);

    let summary = run(&config)?;

    println!("agents      : {}", summary.agents);
    println!("solved      : {}", summary.solved);
    println!("makespan    : {}", summary.plan.makespan());
    println!("sum of loss : {}", summary.plan.sum_of_loss());
    println!("elapsed     : {:.3} ms", summary.elapsed_ms);
    println!("output      : {} ({})", config.output.path.display(), config.output.format);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
    }

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse(args("run.toml -N 3 --seed 5 -T 40 -f csv -o out -v")).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("run.toml")));
        assert!(cli.verbose);

        let mut config = MapfConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.instance.num_agents, 3);
        assert_eq!(config.planner.seed, 5);
        assert_eq!(config.planner.max_timestep, 40);
        assert_eq!(config.output.format, OutputFormat::Csv);
        assert_eq!(config.output.path, PathBuf::from("out"));
    }

    #[test]
    fn bad_arguments_rejected() {
        assert!(Cli::parse(args("--bogus")).is_err());
        assert!(Cli::parse(args("-N")).is_err());
        assert!(Cli::parse(args("-N many")).is_err());
        assert!(Cli::parse(args("a.toml b.toml")).is_err());
    }

    #[test]
    fn sample_instance_plans_to_visualizer_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut config = MapfConfig::default();
        config.instance.map = data("rooms-10-8.map");
        config.instance.scen = data("rooms-10-8.scen");
        config.output.path = dir.path().join("nested").join("plan.txt");

        let summary = run(&config).unwrap();
        assert_eq!(summary.agents, 12);
        assert!(summary.solved);

        let written = pibt_output::read_plan(&config.output.path).unwrap();
        assert_eq!(written, summary.plan);
    }

    #[test]
    fn sample_instance_plans_to_csv() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut config = MapfConfig::default();
        config.instance.map = data("rooms-10-8.map");
        config.instance.scen = data("rooms-10-8.scen");
        config.instance.num_agents = 4;
        config.output.path = dir.path().to_path_buf();
        config.output.format = OutputFormat::Csv;

        let summary = run(&config).unwrap();
        assert_eq!(summary.agents, 4);
        assert!(dir.path().join("agent_positions.csv").exists());
        assert!(dir.path().join("step_summaries.csv").exists());
    }
}
