//! swap-sim: run the HTLC swap scenarios and print a JSON report

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use htlc_contracts::config::EngineConfig;
use tracing_subscriber::EnvFilter;

use swap_sim::export::{build_export, export_json, write_to_file};
use swap_sim::scenarios::{run_all, ScenarioConfig};

/// swap-sim: HTLC swap scenario runner
#[derive(Parser, Debug)]
#[command(name = "swap-sim")]
#[command(about = "Run hashed timelock swap scenarios against an in-memory engine")]
struct Args {
    /// Seed for the preimage stream
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Engine config JSON file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of withdraw/rollback races
    #[arg(long, default_value = "16")]
    race_rounds: usize,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let engine = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    tracing::info!(seed = args.seed, race_rounds = args.race_rounds, "running swap scenarios");
    let config = ScenarioConfig {
        engine,
        race_rounds: args.race_rounds,
    };
    let results = run_all(args.seed, &config);
    let export = build_export(args.seed, &config.engine, results);

    match &args.output {
        Some(path) => {
            write_to_file(&export, path).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{}", export_json(&export)?),
    }

    if !export.all_passed {
        bail!("one or more scenarios failed");
    }
    Ok(())
}
