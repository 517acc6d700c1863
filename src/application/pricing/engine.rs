use crate::application::demand::predictor::DemandPredictor;
use crate::domain::errors::PricingError;
use crate::domain::pricing::fare::{FareSchedule, PriceQuote};
use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Turns a demand estimate into a shared/private fare pair.
///
/// The metered component depends only on distance; the demand surcharge is
/// added to the private fare, which is why private >= shared always holds
/// on the way out.
pub struct PricingEngine {
    schedule: FareSchedule,
}

impl PricingEngine {
    pub fn new(schedule: FareSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &FareSchedule {
        &self.schedule
    }

    /// Quotes a trip departing `departs_at` from `origin`.
    ///
    /// The distance is rejected before the predictor is consulted, so a
    /// malformed request never reports a model problem.
    pub fn quote(
        &self,
        distance_miles: f64,
        departs_at: NaiveDateTime,
        origin: &str,
        predictor: &DemandPredictor,
    ) -> Result<PriceQuote, PricingError> {
        if !distance_miles.is_finite() || distance_miles < 0.0 {
            return Err(PricingError::InvalidDistance { distance_miles });
        }

        let demand_estimate = predictor.predict(departs_at.hour(), origin)?;

        // Inputs beyond Decimal's range cannot be quoted; refusing them
        // keeps the quote monotonic instead of wrapping or collapsing a
        // tier to zero. Distance problems report as such, anything past
        // the demand query as a fare overflow.
        let out_of_range = || PricingError::InvalidDistance { distance_miles };
        let fare_overflow = || PricingError::FareOutOfRange {
            distance_miles,
            demand: demand_estimate,
        };
        let distance = Decimal::from_f64(distance_miles).ok_or_else(out_of_range)?;
        let demand = Decimal::from_f64(demand_estimate).ok_or_else(fare_overflow)?;

        let metered = self
            .schedule
            .rate_per_mile
            .checked_mul(distance)
            .and_then(|mileage| self.schedule.base_fare.checked_add(mileage))
            .ok_or_else(out_of_range)?;
        let surcharge = self
            .schedule
            .demand_surcharge_rate
            .checked_mul(demand)
            .ok_or_else(fare_overflow)?;
        let private = metered.checked_add(surcharge).ok_or_else(fare_overflow)?;

        Ok(PriceQuote::new(metered, private))
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(FareSchedule::default())
    }
}
