use crate::application::demand::model::DemandModel;
use crate::domain::demand::features::encode_record;
use crate::domain::demand::types::HistoricalRideRecord;
use crate::domain::demand::vocabulary::LocationVocabulary;
use crate::domain::errors::TrainingError;
use chrono::NaiveDateTime;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::collections::HashSet;
use tracing::info;

/// Minimum distinct rows the train partition must keep after the split.
const MIN_TRAIN_ROWS: usize = 2;

/// Held-out evaluation figures from one training run. Diagnostics only;
/// nothing enforces a threshold against them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    pub n_train: usize,
    pub n_test: usize,
    /// Mean squared error over the held-out partition.
    pub mse: f64,
    /// Mean absolute error over the held-out partition.
    pub mae: f64,
}

/// Fits a demand model from labeled historical rides.
///
/// Hyperparameters mirror the random forest knobs exposed by the training
/// CLI; the same `seed` drives both the train/test partition and the forest's
/// bootstrap sampling, so a run is fully reproducible from `(records, seed)`.
#[derive(Debug, Clone)]
pub struct ModelTrainer {
    pub n_trees: usize,
    pub max_depth: u16,
    pub min_samples_split: usize,
}

impl ModelTrainer {
    pub fn new(n_trees: usize, max_depth: u16, min_samples_split: usize) -> Self {
        Self {
            n_trees,
            max_depth,
            min_samples_split,
        }
    }

    /// Trains a forest over `(hour_of_day, location_code) -> ride_demand` and
    /// evaluates it on a seeded held-out partition.
    ///
    /// The location vocabulary is fitted over the whole dataset before the
    /// split, so code assignment depends only on record order, never on the
    /// partition.
    pub fn fit(
        &self,
        records: &[HistoricalRideRecord],
        test_fraction: f64,
        seed: u64,
    ) -> Result<(DemandModel, TrainingReport), TrainingError> {
        if records.is_empty() {
            return Err(TrainingError::EmptyDataset);
        }
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(TrainingError::InvalidTestFraction {
                value: test_fraction,
            });
        }
        validate_labels(records)?;

        let vocabulary = LocationVocabulary::fit(records);

        let mut rows = Vec::with_capacity(records.len());
        let mut labels = Vec::with_capacity(records.len());
        for record in records {
            let features = encode_record(record, &vocabulary)
                .map_err(|e| TrainingError::Fit {
                    reason: e.to_string(),
                })?;
            rows.push(features.to_row());
            labels.push(record.ride_demand);
        }

        let (train_idx, test_idx) = split_indices(records.len(), test_fraction, seed);

        let distinct_train = count_distinct(records, &train_idx);
        if distinct_train < MIN_TRAIN_ROWS {
            return Err(TrainingError::InsufficientData {
                remaining: distinct_train,
                minimum: MIN_TRAIN_ROWS,
            });
        }

        let x_train: Vec<Vec<f64>> = train_idx.iter().map(|&i| rows[i].clone()).collect();
        let y_train: Vec<f64> = train_idx.iter().map(|&i| labels[i]).collect();
        let x_test: Vec<Vec<f64>> = test_idx.iter().map(|&i| rows[i].clone()).collect();
        let y_test: Vec<f64> = test_idx.iter().map(|&i| labels[i]).collect();

        let x_train_m = DenseMatrix::from_2d_vec(&x_train).map_err(|e| TrainingError::Fit {
            reason: e.to_string(),
        })?;

        let params = RandomForestRegressorParameters::default()
            .with_n_trees(self.n_trees)
            .with_max_depth(self.max_depth)
            .with_min_samples_split(self.min_samples_split)
            .with_seed(seed);

        let forest =
            RandomForestRegressor::fit(&x_train_m, &y_train, params).map_err(|e| {
                TrainingError::Fit {
                    reason: e.to_string(),
                }
            })?;

        let x_test_m = DenseMatrix::from_2d_vec(&x_test).map_err(|e| TrainingError::Fit {
            reason: e.to_string(),
        })?;
        let predictions: Vec<f64> =
            forest
                .predict(&x_test_m)
                .map_err(|e| TrainingError::Fit {
                    reason: e.to_string(),
                })?;

        let n_test = predictions.len();
        let sq_err: f64 = predictions
            .iter()
            .zip(y_test.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum();
        let abs_err: f64 = predictions
            .iter()
            .zip(y_test.iter())
            .map(|(p, t)| (p - t).abs())
            .sum();
        let report = TrainingReport {
            n_train: train_idx.len(),
            n_test,
            mse: sq_err / n_test as f64,
            mae: abs_err / n_test as f64,
        };

        info!(
            "Trained demand model: {} train rows, {} test rows, {} locations, MSE={:.4}",
            report.n_train,
            report.n_test,
            vocabulary.len(),
            report.mse
        );

        Ok((DemandModel::from_parts(forest, vocabulary), report))
    }
}

impl Default for ModelTrainer {
    fn default() -> Self {
        Self::new(100, 10, 5)
    }
}

fn validate_labels(records: &[HistoricalRideRecord]) -> Result<(), TrainingError> {
    for (row, record) in records.iter().enumerate() {
        if !record.ride_demand.is_finite() {
            return Err(TrainingError::InvalidLabel {
                row,
                reason: "missing or non-finite value".to_string(),
            });
        }
        if record.ride_demand < 0.0 {
            return Err(TrainingError::InvalidLabel {
                row,
                reason: format!("negative value {}", record.ride_demand),
            });
        }
    }
    Ok(())
}

/// Seeded pseudo-random partition of `0..n` into (train, test) index sets.
/// Same `(n, test_fraction, seed)` always yields the same partition. The
/// test side holds at least one row so the evaluation metric is defined.
fn split_indices(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n as f64 * test_fraction).round() as usize).clamp(1, n);
    let test_idx = indices[..n_test].to_vec();
    let train_idx = indices[n_test..].to_vec();
    (train_idx, test_idx)
}

fn count_distinct(records: &[HistoricalRideRecord], indices: &[usize]) -> usize {
    let distinct: HashSet<(&str, NaiveDateTime, u64)> = indices
        .iter()
        .map(|&i| {
            let r = &records[i];
            (r.location.as_str(), r.departs_at, r.ride_demand.to_bits())
        })
        .collect();
    distinct.len()
}
