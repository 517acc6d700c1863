use crate::domain::demand::features::FeatureVector;
use crate::domain::demand::vocabulary::LocationVocabulary;
use crate::domain::errors::{ModelStoreError, PredictionError};
use crate::infrastructure::model_store::ModelStore;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::path::Path;

/// The fitted ensemble type: demand is the average of the individual tree
/// outputs.
pub type DemandForest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// A trained demand regressor and the location vocabulary it was trained
/// with. The two are one inseparable unit: codes from any other vocabulary
/// would silently address the wrong part of the feature space, so the pair
/// is persisted and restored together.
#[derive(Debug)]
pub struct DemandModel {
    forest: DemandForest,
    vocabulary: LocationVocabulary,
}

impl DemandModel {
    pub(crate) fn from_parts(forest: DemandForest, vocabulary: LocationVocabulary) -> Self {
        Self { forest, vocabulary }
    }

    pub fn vocabulary(&self) -> &LocationVocabulary {
        &self.vocabulary
    }

    pub(crate) fn forest(&self) -> &DemandForest {
        &self.forest
    }

    /// Ensemble-averaged demand estimate for one encoded query.
    ///
    /// Deterministic for a fixed model and input, and non-negative because
    /// training labels are validated non-negative and tree outputs are
    /// averages of them. The error arm only surfaces a library-level
    /// inference failure, which a well-formed vector cannot trigger.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let input = DenseMatrix::from_2d_vec(&vec![features.to_row()]).map_err(|e| {
            PredictionError::Inference {
                reason: e.to_string(),
            }
        })?;

        let predictions = self
            .forest
            .predict(&input)
            .map_err(|e| PredictionError::Inference {
                reason: e.to_string(),
            })?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| PredictionError::Inference {
                reason: "no prediction returned".to_string(),
            })
    }

    /// Persists the model and its vocabulary as one atomic artifact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelStoreError> {
        ModelStore::new(path.as_ref()).save(self)
    }

    /// Restores a model persisted by [`DemandModel::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelStoreError> {
        ModelStore::new(path.as_ref()).load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::demand::trainer::ModelTrainer;
    use crate::domain::demand::features::encode_query;
    use crate::domain::demand::types::HistoricalRideRecord;
    use chrono::NaiveDate;

    fn record(day: u32, hour: u32, location: &str, demand: f64) -> HistoricalRideRecord {
        let at = NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        HistoricalRideRecord::new(at, location, demand)
    }

    fn trained_model() -> DemandModel {
        let records = vec![
            record(1, 8, "A", 30.0),
            record(1, 20, "A", 12.0),
            record(2, 8, "B", 25.0),
            record(2, 20, "B", 9.0),
            record(3, 8, "A", 33.0),
            record(3, 20, "A", 14.0),
            record(4, 8, "B", 27.0),
            record(4, 20, "B", 8.0),
            record(5, 8, "A", 31.0),
            record(5, 20, "B", 10.0),
        ];
        let (model, _) = ModelTrainer::default()
            .fit(&records, 0.2, 42)
            .expect("fit");
        model
    }

    #[test]
    fn test_predict_is_finite_and_non_negative() {
        let model = trained_model();
        let features = encode_query(8, "A", model.vocabulary()).expect("encode");

        let demand = model.predict(&features).expect("predict");
        assert!(demand.is_finite());
        assert!(demand >= 0.0);
        // forest outputs are averages of training labels
        assert!(demand <= 33.0);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let model = trained_model();
        let features = encode_query(20, "B", model.vocabulary()).expect("encode");

        let first = model.predict(&features).expect("predict");
        let second = model.predict(&features).expect("predict");
        assert_eq!(first, second);
    }

    #[test]
    fn test_vocabulary_covers_training_locations_only() {
        let model = trained_model();
        assert!(model.vocabulary().contains("A"));
        assert!(model.vocabulary().contains("B"));
        assert!(!model.vocabulary().contains("C"));
    }
}
