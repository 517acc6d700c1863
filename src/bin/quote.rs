//! Ridecast quote tool - fare estimates from the trained demand model
//!
//! Loads the persisted demand model, predicts demand for the requested
//! departure hour and pickup location, and prints the shared/private fare
//! pair for the trip.
//!
//! # Usage
//! ```sh
//! cargo run --bin quote -- --distance-miles 7.5 \
//!     --departs-at "2024-05-01 08:30:00" --origin Downtown
//! ```
//!
//! # Environment Variables
//! - `MODEL_PATH` - Model artifact location (default: data/ride_demand_model.json)
//! - `BASE_FARE`, `RATE_PER_MILE`, `DEMAND_SURCHARGE_RATE` - Fare schedule overrides

use anyhow::{Context, Result};
use clap::Parser;
use ridecast::application::demand::predictor::DemandPredictor;
use ridecast::application::pricing::engine::PricingEngine;
use ridecast::config::Config;
use ridecast::infrastructure::dataset::parse_timestamp;
use ridecast::infrastructure::model_store::ModelStore;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the trained model artifact (overrides MODEL_PATH)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Trip distance in miles
    #[arg(long)]
    distance_miles: f64,

    /// Departure time, e.g. "2024-05-01 08:30:00"
    #[arg(long)]
    departs_at: String,

    /// Pickup location label as it appears in the ride history
    #[arg(long)]
    origin: String,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Setup logging (stdout only)
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Ridecast quote {} starting...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = Config::from_env()?;
    let model_path = args.model.unwrap_or(config.model_path);

    let departs_at = parse_timestamp(&args.departs_at)
        .with_context(|| format!("Failed to parse departure time {:?}", args.departs_at))?;

    let predictor = DemandPredictor::new(ModelStore::new(&model_path));
    predictor
        .load()
        .with_context(|| format!("Failed to load demand model from {:?}", model_path))?;

    let engine = PricingEngine::new(config.fare);
    let quote = engine.quote(args.distance_miles, departs_at, &args.origin, &predictor)?;

    println!(
        "Fare estimate for {:.1} miles from {} departing {}: {}",
        args.distance_miles, args.origin, departs_at, quote
    );

    Ok(())
}
