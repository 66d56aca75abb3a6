//! End-to-end batch pipeline
//!
//! Load -> grid -> features -> train -> forecast, single-threaded and
//! single-pass. Any stage failure aborts the whole run.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{GridConfig, TrainingConfig};
use crate::error::{PipelineError, Result};
use crate::features::engineer_features;
use crate::forecast::{forecast_counts, ForecastRow};
use crate::grid::GridAssigner;
use crate::models::IncidentRecord;
use crate::training::{ClassificationReport, ModelTrainer};

/// Evaluation summary and forecast table produced by one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Held-out evaluation of the hotspot classifier
    pub classification: ClassificationReport,

    /// Held-out mean absolute error of the count regressor
    pub regression_mae: f64,

    /// Forward forecast, one row per (future date, cell) pair
    pub forecast: Vec<ForecastRow>,
}

/// Run the full batch pipeline over a set of incident records
pub fn run_pipeline(
    records: Vec<IncidentRecord>,
    grid_config: GridConfig,
    training_config: TrainingConfig,
) -> Result<PipelineReport> {
    grid_config.validate()?;
    training_config.validate()?;

    if records.is_empty() {
        return Err(PipelineError::InputData(
            "no incident records provided".to_string(),
        ));
    }

    info!(records = records.len(), "starting pipeline run");

    let assigner = GridAssigner::new(grid_config.clone())?;
    let gridded = assigner.assign_records(records);

    let engineered = engineer_features(gridded, training_config.hotspot_quantile)?;

    let trainer = ModelTrainer::new(training_config.clone())?;
    let trained = trainer.train(&engineered)?;

    let forecast = forecast_counts(
        &trained.regressor,
        &grid_config,
        trained.last_date,
        training_config.forecast_days,
    )?;

    info!(
        macro_f1 = trained.classification.macro_f1,
        mae = trained.regression_mae,
        forecast_rows = forecast.len(),
        "pipeline run complete"
    );

    Ok(PipelineReport {
        classification: trained.classification,
        regression_mae: trained.regression_mae,
        forecast,
    })
}
