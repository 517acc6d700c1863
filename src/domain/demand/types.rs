use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of historical training data: when a ride departed, where it
/// started, and how many riders wanted one.
///
/// Records are immutable once loaded. A dataset is an ordered
/// `Vec<HistoricalRideRecord>`; the order is irrelevant to model quality but
/// fixes the vocabulary code assignment and, together with the seed, the
/// exact train/test partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRideRecord {
    /// Departure time as local wall-clock time. Demand is an hour-of-day
    /// signal, so no timezone normalization is applied.
    pub departs_at: NaiveDateTime,
    /// Free-text pickup location label, e.g. a neighborhood name.
    pub location: String,
    /// Observed rider demand. Validated non-negative and finite at training
    /// time; a missing CSV cell arrives here as NaN.
    pub ride_demand: f64,
}

impl HistoricalRideRecord {
    pub fn new(departs_at: NaiveDateTime, location: impl Into<String>, ride_demand: f64) -> Self {
        Self {
            departs_at,
            location: location.into(),
            ride_demand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_record_construction() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 13)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let record = HistoricalRideRecord::new(at, "Downtown", 42.0);

        assert_eq!(record.location, "Downtown");
        assert_eq!(record.ride_demand, 42.0);
        assert_eq!(record.departs_at, at);
    }
}
