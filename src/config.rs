use crate::domain::pricing::fare::FareSchedule;
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: PathBuf,
    pub fare: FareSchedule,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let model_path = env::var("MODEL_PATH")
            .unwrap_or_else(|_| "data/ride_demand_model.json".to_string())
            .into();

        let base_fare = env::var("BASE_FARE")
            .unwrap_or_else(|_| "2.50".to_string())
            .parse::<Decimal>()
            .context("Failed to parse BASE_FARE")?;

        let rate_per_mile = env::var("RATE_PER_MILE")
            .unwrap_or_else(|_| "1.75".to_string())
            .parse::<Decimal>()
            .context("Failed to parse RATE_PER_MILE")?;

        let demand_surcharge_rate = env::var("DEMAND_SURCHARGE_RATE")
            .unwrap_or_else(|_| "0.35".to_string())
            .parse::<Decimal>()
            .context("Failed to parse DEMAND_SURCHARGE_RATE")?;

        Ok(Config {
            model_path,
            fare: FareSchedule::new(base_fare, rate_per_mile, demand_surcharge_rate),
        })
    }
}
