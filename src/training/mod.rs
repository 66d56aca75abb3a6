//! Model training: dataset assembly, splitting, fitting and evaluation
//!
//! Two independent sub-pipelines share the engineered records:
//! - a hotspot classifier over per-record features
//! - a grid-day count regressor over calendar and cell features
//!
//! The sub-pipelines use intentionally different feature sets: the
//! classifier sees incident-level detail (severity, weapon, arrest) while
//! the regressor predicts an aggregate count from calendar and cell
//! features only.

pub mod classifier;
pub mod dataset;
pub mod metrics;
pub mod regressor;
pub mod split;
pub mod trainer;

pub use classifier::HotspotClassifier;
pub use dataset::{
    classifier_dataset, grid_day_aggregates, regressor_dataset, CLASSIFIER_FEATURES,
    REGRESSOR_FEATURES,
};
pub use metrics::{mean_absolute_error, ClassMetrics, ClassificationReport};
pub use regressor::CountRegressor;
pub use split::{stratified_train_test_split, train_test_split};
pub use trainer::{ModelTrainer, TrainedModels};
