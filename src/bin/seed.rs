use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use waste_forecast_rs::engine::{Clock, SystemClock, parse_date};
use waste_forecast_rs::error::Result;
use waste_forecast_rs::state::{load_store, save_store, seed_demo};

#[derive(Parser, Debug)]
#[command(name = "seed")]
#[command(about = "Fill a kitchen state file with demo items and random waste history")]
struct Args {
    /// Path to the kitchen state JSON file
    #[arg(long, default_value = "kitchen_state.json")]
    file: PathBuf,

    /// Number of days of history, ending today
    #[arg(long, default_value = "30")]
    days: u32,

    /// Random seed for reproducibility
    #[arg(long, default_value = "123")]
    seed: u64,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long)]
    today: Option<String>,
}

fn run(args: Args) -> Result<()> {
    let today = match &args.today {
        Some(s) => parse_date(s)?,
        None => SystemClock.today(),
    };

    let mut store = load_store(&args.file)?;
    let mut rng = StdRng::seed_from_u64(args.seed);

    info!(days = args.days, seed = args.seed, %today, "seeding demo data");
    let written = seed_demo(&mut store, today, args.days, &mut rng)?;

    save_store(&args.file, &store)?;
    println!(
        "Seed complete: {} items, {} new waste entries over the last {} days ({:?})",
        store.len(),
        written,
        args.days,
        args.file
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
