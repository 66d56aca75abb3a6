use chrono::NaiveDate;
use ndarray::Axis;
use tracing::{debug, info};

use crate::config::TrainingConfig;
use crate::error::{PipelineError, Result};
use crate::features::EngineeredIncident;
use crate::models::GridDayAggregate;
use crate::training::classifier::HotspotClassifier;
use crate::training::dataset::{classifier_dataset, grid_day_aggregates, regressor_dataset};
use crate::training::metrics::{mean_absolute_error, ClassificationReport};
use crate::training::regressor::CountRegressor;
use crate::training::split::{stratified_train_test_split, train_test_split};

/// Fitted models plus their held-out evaluations
#[derive(Debug)]
pub struct TrainedModels {
    /// Hotspot classifier
    pub classifier: HotspotClassifier,

    /// Grid-day count regressor
    pub regressor: CountRegressor,

    /// Classification report on the held-out rows
    pub classification: ClassificationReport,

    /// Mean absolute error of the regressor on held-out aggregates
    pub regression_mae: f64,

    /// Latest observed date, the anchor for forecasting
    pub last_date: NaiveDate,
}

/// Trains and evaluates the hotspot classifier and the count regressor
///
/// The two sub-pipelines share nothing beyond the input records: the
/// classifier works on per-record rows, the regressor on grid-day
/// aggregates it builds itself.
pub struct ModelTrainer {
    config: TrainingConfig,
}

impl ModelTrainer {
    /// Create a trainer with a validated configuration
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run both training sub-pipelines over the engineered records
    pub fn train(&self, records: &[EngineeredIncident]) -> Result<TrainedModels> {
        let (classifier, classification) = self.train_classifier(records)?;

        let aggregates = grid_day_aggregates(records.iter().map(|r| &r.gridded));
        let (regressor, regression_mae) = self.train_regressor(&aggregates)?;

        let last_date = aggregates
            .iter()
            .map(|agg| agg.date_key)
            .max()
            .ok_or_else(|| {
                PipelineError::InputData("no aggregates to anchor the forecast on".to_string())
            })?;

        Ok(TrainedModels {
            classifier,
            regressor,
            classification,
            regression_mae,
            last_date,
        })
    }

    /// Classifier sub-pipeline: stratified split, fit, held-out report
    fn train_classifier(
        &self,
        records: &[EngineeredIncident],
    ) -> Result<(HotspotClassifier, ClassificationReport)> {
        let (features, labels) = classifier_dataset(records)?;
        let dropped = records.len() - labels.len();
        if dropped > 0 {
            debug!(dropped, "dropped records without a hotspot label");
        }

        let (train_idx, test_idx) =
            stratified_train_test_split(&labels, self.config.test_size, self.config.seed)?;
        if test_idx.is_empty() {
            return Err(PipelineError::InputData(
                "not enough labeled records to hold out a classifier test set".to_string(),
            ));
        }

        let x_train = features.select(Axis(0), &train_idx);
        let x_test = features.select(Axis(0), &test_idx);
        let y_train: Vec<i32> = train_idx.iter().map(|&i| labels[i]).collect();
        let y_test: Vec<i32> = test_idx.iter().map(|&i| labels[i]).collect();

        let mut classifier =
            HotspotClassifier::new(self.config.classifier_trees, self.config.seed);
        classifier.fit(&x_train, &y_train)?;

        let predictions = classifier.predict(&x_test)?;
        let report = ClassificationReport::compute(&y_test, &predictions, 2);
        info!(
            train_rows = y_train.len(),
            test_rows = y_test.len(),
            accuracy = report.accuracy,
            macro_f1 = report.macro_f1,
            "hotspot classifier evaluated"
        );

        Ok((classifier, report))
    }

    /// Regressor sub-pipeline: plain split over aggregates, fit, held-out
    /// mean absolute error
    fn train_regressor(
        &self,
        aggregates: &[GridDayAggregate],
    ) -> Result<(CountRegressor, f64)> {
        let (features, targets) = regressor_dataset(aggregates)?;

        let (train_idx, test_idx) =
            train_test_split(targets.len(), self.config.test_size, self.config.seed);
        if test_idx.is_empty() {
            return Err(PipelineError::InputData(
                "not enough grid-day aggregates to hold out a regressor test set".to_string(),
            ));
        }

        let x_train = features.select(Axis(0), &train_idx);
        let x_test = features.select(Axis(0), &test_idx);
        let y_train: Vec<f64> = train_idx.iter().map(|&i| targets[i]).collect();
        let y_test: Vec<f64> = test_idx.iter().map(|&i| targets[i]).collect();

        let mut regressor = CountRegressor::new(self.config.regressor_trees, self.config.seed);
        regressor.fit(&x_train, &y_train)?;

        let predictions = regressor.predict(&x_test)?;
        let mae = mean_absolute_error(&y_test, &predictions);
        info!(
            train_rows = y_train.len(),
            test_rows = y_test.len(),
            mae,
            "count regressor evaluated"
        );

        Ok((regressor, mae))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::CalendarFeatures;
    use crate::models::{GridCell, GriddedIncident, IncidentRecord};
    use chrono::{Duration, TimeZone, Utc};

    fn small_config() -> TrainingConfig {
        TrainingConfig {
            classifier_trees: 10,
            regressor_trees: 10,
            ..TrainingConfig::default()
        }
    }

    /// Engineered records over several cells and days; cells with `x == 0`
    /// are labeled hotspots
    fn sample_records() -> Vec<EngineeredIncident> {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        let mut records = Vec::new();

        for day in 0..20i64 {
            for x in 0..4usize {
                let n = if x == 0 { 3 } else { 1 };
                for k in 0..n {
                    let ts = start + Duration::days(day) + Duration::hours(k as i64);
                    let record =
                        IncidentRecord::new(ts, 0.0, 0.0, (k % 3) as u8, k % 2 == 0, false);
                    let calendar = CalendarFeatures::from_datetime(&ts);
                    records.push(EngineeredIncident {
                        gridded: GriddedIncident {
                            record,
                            cell: GridCell::new(x, day as usize % 4),
                        },
                        calendar,
                        hotspot: Some(x == 0),
                    });
                }
            }
        }

        records
    }

    #[test]
    fn test_train_produces_fitted_models() {
        let records = sample_records();
        let trainer = ModelTrainer::new(small_config()).unwrap();

        let trained = trainer.train(&records).unwrap();

        assert!(trained.classifier.is_trained());
        assert!(trained.regressor.is_trained());
        assert!(trained.classification.accuracy >= 0.0);
        assert!(trained.classification.accuracy <= 1.0);
        assert!(trained.regression_mae >= 0.0);
        assert_eq!(
            trained.last_date,
            chrono::NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
        );
    }

    #[test]
    fn test_training_is_reproducible() {
        let records = sample_records();
        let trainer = ModelTrainer::new(small_config()).unwrap();

        let first = trainer.train(&records).unwrap();
        let second = trainer.train(&records).unwrap();

        assert_eq!(first.classification, second.classification);
        assert_eq!(first.regression_mae, second.regression_mae);
    }

    #[test]
    fn test_degenerate_label_distribution_fails() {
        let mut records = sample_records();
        // Flip every label to hotspot except a single record
        for r in records.iter_mut() {
            r.hotspot = Some(true);
        }
        records[0].hotspot = Some(false);

        let trainer = ModelTrainer::new(small_config()).unwrap();
        let err = trainer.train(&records).unwrap_err();
        assert_eq!(err.error_code(), "INPUT_DATA_ERROR");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = TrainingConfig {
            test_size: 2.0,
            ..TrainingConfig::default()
        };
        assert!(ModelTrainer::new(config).is_err());
    }
}
