//! Grid-based incident hotspot classification and count forecasting
//!
//! Bins geo-tagged incident records into a fixed spatial grid, engineers
//! calendar and hotspot features, trains two random-forest models and
//! projects the regressor forward over the full grid:
//! - Grid assignment over a configurable bounding box
//! - Calendar feature derivation and quantile-based hotspot labeling
//! - Seeded train/test splitting and held-out evaluation
//! - A short-range forecast over every (future date, cell) pair
//!
//! The pipeline is a synchronous, single-pass batch job: records flow
//! strictly forward from grid assignment through feature engineering and
//! training to the forecast table. Record loading and output persistence
//! belong to the host application.

pub mod config;
pub mod error;
pub mod features;
pub mod forecast;
pub mod grid;
pub mod models;
pub mod pipeline;
pub mod stats;
pub mod training;

pub use config::{GridConfig, TrainingConfig};
pub use error::{PipelineError, Result};
pub use features::{engineer_features, CalendarFeatures, EngineeredIncident};
pub use forecast::{forecast_counts, ForecastRow};
pub use grid::GridAssigner;
pub use models::{GridCell, GridDayAggregate, GriddedIncident, IncidentRecord};
pub use pipeline::{run_pipeline, PipelineReport};
pub use training::{
    ClassificationReport, CountRegressor, HotspotClassifier, ModelTrainer, TrainedModels,
};
