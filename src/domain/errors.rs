use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fitting a demand model from historical rides
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("training dataset is empty")]
    EmptyDataset,

    #[error("test fraction must be within (0, 1), got {value}")]
    InvalidTestFraction { value: f64 },

    #[error("invalid ride_demand label at row {row}: {reason}")]
    InvalidLabel { row: usize, reason: String },

    #[error("not enough training rows after split: {remaining} (need at least {minimum})")]
    InsufficientData { remaining: usize, minimum: usize },

    #[error("model fitting failed: {reason}")]
    Fit { reason: String },

    #[error(transparent)]
    Store(#[from] ModelStoreError),
}

/// Errors raised while serving a single demand query
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("unknown location {label:?}: not present in the trained vocabulary")]
    UnknownLocation { label: String },

    #[error("no demand model is bound; train or load a model first")]
    NotReady,

    #[error("hour_of_day must be within 0-23, got {hour}")]
    HourOutOfRange { hour: u32 },

    #[error("demand inference failed: {reason}")]
    Inference { reason: String },
}

/// Errors raised by the persisted model artifact store
#[derive(Debug, Error)]
pub enum ModelStoreError {
    #[error("model artifact not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("model artifact version {found} is not readable by this build (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("model artifact is corrupt: {reason}")]
    Corrupt { reason: String },

    #[error("failed to encode model artifact: {reason}")]
    Encode { reason: String },

    #[error("model artifact io failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while computing a fare quote
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("distance_miles must be a finite non-negative number, got {distance_miles}")]
    InvalidDistance { distance_miles: f64 },

    #[error(
        "fare exceeds the representable currency range for distance {distance_miles} and demand {demand}"
    )]
    FareOutOfRange { distance_miles: f64, demand: f64 },

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_error_formatting() {
        let err = PredictionError::UnknownLocation {
            label: "Narnia".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("Narnia"));
        assert!(msg.contains("vocabulary"));
    }

    #[test]
    fn test_training_error_formatting() {
        let err = TrainingError::InsufficientData {
            remaining: 1,
            minimum: 2,
        };

        let msg = err.to_string();
        assert!(msg.contains('1'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_store_error_formatting() {
        let err = ModelStoreError::VersionMismatch {
            found: 7,
            expected: 1,
        };

        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('1'));
    }

    #[test]
    fn test_fare_out_of_range_names_both_inputs() {
        let err = PricingError::FareOutOfRange {
            distance_miles: 5.0,
            demand: 1e300,
        };

        let msg = err.to_string();
        assert!(msg.contains('5'));
        assert!(msg.contains("demand"));
    }

    #[test]
    fn test_pricing_error_passes_prediction_message_through() {
        let err = PricingError::from(PredictionError::NotReady);
        assert_eq!(err.to_string(), PredictionError::NotReady.to_string());
    }
}
