//! baseline: one experiment of the circular-economy plastics model.
//!
//! Builds the model from the default configuration (or a JSON file),
//! optionally overrides a few levers from the command line, runs it, and
//! writes `metrics.csv` while printing a short summary of the last year.
//!
//! ```text
//! RUST_LOG=info cargo run -p baseline -- --steps 30 --l1 0.2 --out output/baseline
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ce_core::ModelConfig;
use ce_output::{CsvWriter, TimeSeriesObserver};
use ce_sim::{COLUMNS, ModelBuilder};

#[derive(Parser)]
#[command(name = "baseline")]
#[command(about = "Run the circular-economy automotive plastics model")]
struct Cli {
    /// Number of years to simulate
    #[arg(long, default_value = "50")]
    steps: u64,

    /// JSON model configuration; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of users
    #[arg(long)]
    users: Option<usize>,

    /// L1: minimum share of reused parts in garage purchases
    #[arg(long)]
    l1: Option<f64>,

    /// L2: minimum share of high-grade recyclate in new parts
    #[arg(long)]
    l2: Option<f64>,

    /// L5: minimum share of recyclate in new parts
    #[arg(long)]
    l5: Option<f64>,

    /// Check population invariants after every stage
    #[arg(long)]
    audit: bool,

    /// Output directory for metrics.csv
    #[arg(long, default_value = "output/baseline")]
    out: PathBuf,

    /// Log the wall-clock run time
    #[arg(long)]
    time: bool,
}

fn load_config(cli: &Cli) -> Result<ModelConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => ModelConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(users) = cli.users {
        config.agent_counts.users = users;
    }
    if let Some(l1) = cli.l1 {
        config.levers.min_reused_parts = l1;
    }
    if let Some(l2) = cli.l2 {
        config.levers.min_recyclate_high = l2;
    }
    if let Some(l5) = cli.l5 {
        config.levers.min_recyclate_total = l5;
    }
    config.audit |= cli.audit;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    info!(
        "levers: L1={} L2={} L3={} L4={} L5={}",
        config.levers.min_reused_parts,
        config.levers.min_recyclate_high,
        config.levers.cohesive_factor,
        config.levers.virgin_externality,
        config.levers.min_recyclate_total
    );
    info!(
        "uncertainties: X1={} X2={} X3={}",
        config.uncertainties.oil_price_increase,
        config.uncertainties.oil_shock_probability,
        config.uncertainties.recycling_efficiency_increase
    );

    let mut model = ModelBuilder::new(config).build().context("building model")?;

    let writer = CsvWriter::new(&cli.out)?;
    let path = writer.path().to_path_buf();
    let mut obs = TimeSeriesObserver::new(writer);
    let series = model.run_with(cli.steps, cli.time, &mut obs)?;

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    println!("{} rows written to {}", obs.rows_written(), path.display());

    if let Some(last) = series.last() {
        println!();
        println!("Year {}", last.year);
        println!("{}", "-".repeat(36));
        for (name, value) in COLUMNS.iter().zip(last.values()) {
            println!("{name:<24} {value:>11.3}");
        }
    }
    Ok(())
}
