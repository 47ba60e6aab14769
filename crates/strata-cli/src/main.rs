//! Strata CLI: generate a level file from a batch of events.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use strata_core::GenConfig;
use strata_gen::{generate, CostKind};
use strata_io::{read_constraint_sets, read_events, write_level};

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Builds a read-optimized level tree from semi-structured events", long_about = None)]
struct Cli {
    /// Input events file (one JSON event per line)
    #[arg(long = "in", value_name = "FILE")]
    input: PathBuf,

    /// Constraints file (JSON list of constraint sets)
    #[arg(long, value_name = "FILE")]
    constraints: PathBuf,

    /// Output level file
    #[arg(long, value_name = "FILE")]
    out: PathBuf,

    /// Use size-based cost instead of access cost
    #[arg(long)]
    size_cost: bool,

    /// Print the generated level tree
    #[arg(short, long)]
    verbose: bool,

    /// Sampling seed (overrides STRATA_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Parallel search workers (overrides STRATA_WORKERS)
    #[arg(long)]
    workers: Option<usize>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let events = read_events(&cli.input)?;
    let constraint_sets = read_constraint_sets(&cli.constraints)?;

    let mut config = GenConfig::from_env();
    apply_overrides(&mut config, cli.seed, cli.workers);

    let kind = if cli.size_cost {
        CostKind::Size
    } else {
        CostKind::Access
    };

    let level = generate(&events, &constraint_sets, kind, &config)?;
    write_level(&cli.out, &level)?;

    if cli.verbose {
        println!("{}", level);
    }
    Ok(())
}

fn apply_overrides(config: &mut GenConfig, seed: Option<u64>, workers: Option<usize>) {
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }
    if let Some(workers) = workers {
        config.workers = workers;
    }
}
