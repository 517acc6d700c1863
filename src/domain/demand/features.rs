use crate::domain::demand::types::HistoricalRideRecord;
use crate::domain::demand::vocabulary::LocationVocabulary;
use crate::domain::errors::PredictionError;
use chrono::Timelike;

/// Ordered list of feature names.
/// This order MUST match the column order fed to the regressor at both
/// training and serving time. Any change here is a breaking change for
/// persisted model artifacts.
pub const FEATURE_NAMES: &[&str] = &["hour_of_day", "location_code"];

/// Fixed-shape numeric encoding of one historical record or one serving
/// query, consumed by the regression model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureVector {
    pub hour_of_day: u32,
    pub location_code: u32,
}

impl FeatureVector {
    /// Row representation in `FEATURE_NAMES` order, ready for a
    /// `DenseMatrix`.
    pub fn to_row(&self) -> Vec<f64> {
        vec![f64::from(self.hour_of_day), f64::from(self.location_code)]
    }
}

/// Encodes one historical record against a fitted vocabulary.
///
/// The hour always falls in 0-23 because it is extracted from the record's
/// timestamp. A location missing from the vocabulary is a hard failure:
/// silently assigning a fresh code here would drift the mapping away from
/// the one the model was trained with.
pub fn encode_record(
    record: &HistoricalRideRecord,
    vocabulary: &LocationVocabulary,
) -> Result<FeatureVector, PredictionError> {
    let location_code = vocabulary.code_for(&record.location).ok_or_else(|| {
        PredictionError::UnknownLocation {
            label: record.location.clone(),
        }
    })?;

    Ok(FeatureVector {
        hour_of_day: record.departs_at.hour(),
        location_code,
    })
}

/// Encodes one serving-time query against a fitted vocabulary.
///
/// Unlike [`encode_record`], the hour arrives raw from the caller and is
/// range-checked.
pub fn encode_query(
    hour_of_day: u32,
    location: &str,
    vocabulary: &LocationVocabulary,
) -> Result<FeatureVector, PredictionError> {
    if hour_of_day > 23 {
        return Err(PredictionError::HourOutOfRange { hour: hour_of_day });
    }

    let location_code =
        vocabulary
            .code_for(location)
            .ok_or_else(|| PredictionError::UnknownLocation {
                label: location.to_string(),
            })?;

    Ok(FeatureVector {
        hour_of_day,
        location_code,
    })
}
