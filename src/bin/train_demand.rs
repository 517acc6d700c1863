//! Fits the ride demand model from exported ride history.
//!
//! Reads a `historical_rides.csv`, trains a random forest on hour of day
//! and pickup location, evaluates it on a held-out slice and writes the
//! model artifact the quote service loads.
//!
//! # Usage
//! ```sh
//! cargo run --bin train_demand -- --input data/historical_rides.csv
//! ```

use clap::Parser;
use ridecast::application::demand::trainer::ModelTrainer;
use ridecast::infrastructure::dataset::load_history;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to ride history CSV
    #[arg(long, default_value = "data/historical_rides.csv")]
    input: PathBuf,

    /// Path to output model artifact
    #[arg(long, default_value = "data/ride_demand_model.json")]
    output: PathBuf,

    /// Number of trees in the random forest
    #[arg(long, default_value_t = 100)]
    n_trees: usize,

    /// Maximum depth of trees
    #[arg(long, default_value_t = 10)]
    max_depth: u16,

    /// Minimum samples required to split an internal node
    #[arg(long, default_value_t = 5)]
    min_split: usize,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_fraction: f64,

    /// Seed for the held-out split and the forest. Keep it fixed to get
    /// byte-identical artifacts from an unchanged history.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if !args.input.exists() {
        println!(
            "Ride history not found at {:?}. Export it from the rides database first.",
            args.input
        );
        return Ok(());
    }

    println!("Loading ride history from {:?}", args.input);
    let records = load_history(&args.input)?;
    println!("Loaded {} records", records.len());

    let trainer = ModelTrainer::new(args.n_trees, args.max_depth, args.min_split);
    let (model, report) = trainer.fit(&records, args.test_fraction, args.seed)?;

    println!("\nTraining complete:");
    println!("  Train rows: {}", report.n_train);
    println!("  Test rows:  {}", report.n_test);
    println!("  Test MSE:   {:.2}", report.mse);
    println!("  Test MAE:   {:.2}", report.mae);
    println!("  Locations:  {}", model.vocabulary().len());

    model.save(&args.output)?;
    println!("\nModel saved to {:?}", args.output);

    Ok(())
}
