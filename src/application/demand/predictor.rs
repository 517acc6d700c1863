use crate::application::demand::model::DemandModel;
use crate::application::demand::trainer::{ModelTrainer, TrainingReport};
use crate::domain::demand::features::encode_query;
use crate::domain::demand::types::HistoricalRideRecord;
use crate::domain::errors::{ModelStoreError, PredictionError, TrainingError};
use crate::infrastructure::model_store::ModelStore;
use std::sync::{Arc, Mutex, RwLock};
use tracing::info;

/// Serves demand estimates from the most recently trained or loaded model.
///
/// The bound model is swapped atomically: readers that grabbed the previous
/// model finish against it, and a failed retrain or reload leaves the
/// current model untouched. Swaps are serialized through `swap_guard`, so
/// the persisted artifact and the bound model never diverge under
/// concurrent retrains or reloads.
pub struct DemandPredictor {
    model: RwLock<Option<Arc<DemandModel>>>,
    swap_guard: Mutex<()>,
    store: ModelStore,
    trainer: ModelTrainer,
}

impl DemandPredictor {
    pub fn new(store: ModelStore) -> Self {
        Self::with_trainer(store, ModelTrainer::default())
    }

    pub fn with_trainer(store: ModelStore, trainer: ModelTrainer) -> Self {
        Self {
            model: RwLock::new(None),
            swap_guard: Mutex::new(()),
            store,
            trainer,
        }
    }

    /// Whether a model is bound and [`DemandPredictor::predict`] can serve.
    pub fn is_ready(&self) -> bool {
        self.model.read().unwrap().is_some()
    }

    /// Trains a fresh model on `records`, persists it, and makes it the
    /// serving model. The previous model keeps serving until the new one is
    /// both trained and saved; on any failure the swap does not happen.
    /// A concurrent retrain or reload waits its turn.
    pub fn train(
        &self,
        records: &[HistoricalRideRecord],
        test_fraction: f64,
        seed: u64,
    ) -> Result<TrainingReport, TrainingError> {
        let _swap = self.swap_guard.lock().unwrap();
        let (model, report) = self.trainer.fit(records, test_fraction, seed)?;
        self.store.save(&model)?;
        self.bind(model);
        info!(
            "Demand model retrained and bound: {} train rows, test MSE {:.4}",
            report.n_train, report.mse
        );
        Ok(report)
    }

    /// Binds the model persisted at the store path, replacing any currently
    /// bound model. On failure the current model stays bound. A concurrent
    /// retrain or reload waits its turn.
    pub fn load(&self) -> Result<(), ModelStoreError> {
        let _swap = self.swap_guard.lock().unwrap();
        let model = self.store.load()?;
        self.bind(model);
        info!("Demand model loaded from {:?}", self.store.path());
        Ok(())
    }

    /// Estimated ride demand for an hour of day and a pickup location.
    ///
    /// Serves from whichever model was bound when the call started, so a
    /// concurrent retrain never tears a prediction.
    pub fn predict(&self, hour_of_day: u32, location: &str) -> Result<f64, PredictionError> {
        let model = {
            let guard = self.model.read().unwrap();
            guard.clone().ok_or(PredictionError::NotReady)?
        };

        let features = encode_query(hour_of_day, location, model.vocabulary())?;
        model.predict(&features)
    }

    fn bind(&self, model: DemandModel) {
        let mut guard = self.model.write().unwrap();
        *guard = Some(Arc::new(model));
    }
}
