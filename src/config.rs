use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Spatial grid configuration
///
/// Bounding box and resolution used to bin coordinates into discrete
/// cells. Passed explicitly into the grid assigner; there is no global
/// grid state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Western edge of the bounding box
    #[serde(default = "default_min_coord")]
    pub x_min: f64,

    /// Southern edge of the bounding box
    #[serde(default = "default_min_coord")]
    pub y_min: f64,

    /// Eastern edge of the bounding box
    #[serde(default = "default_max_coord")]
    pub x_max: f64,

    /// Northern edge of the bounding box
    #[serde(default = "default_max_coord")]
    pub y_max: f64,

    /// Number of cells along the x axis
    #[serde(default = "default_resolution")]
    pub nx: usize,

    /// Number of cells along the y axis
    #[serde(default = "default_resolution")]
    pub ny: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            x_min: default_min_coord(),
            y_min: default_min_coord(),
            x_max: default_max_coord(),
            y_max: default_max_coord(),
            nx: default_resolution(),
            ny: default_resolution(),
        }
    }
}

impl GridConfig {
    /// Validate grid bounds and resolution
    pub fn validate(&self) -> Result<()> {
        if self.x_max <= self.x_min {
            return Err(PipelineError::Configuration(format!(
                "x_max ({}) must be greater than x_min ({})",
                self.x_max, self.x_min
            )));
        }

        if self.y_max <= self.y_min {
            return Err(PipelineError::Configuration(format!(
                "y_max ({}) must be greater than y_min ({})",
                self.y_max, self.y_min
            )));
        }

        if self.nx == 0 || self.ny == 0 {
            return Err(PipelineError::Configuration(format!(
                "grid resolution must be positive, got {}x{}",
                self.nx, self.ny
            )));
        }

        Ok(())
    }

    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny
    }
}

/// Model training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Fraction of rows held out for evaluation
    #[serde(default = "default_test_size")]
    pub test_size: f64,

    /// Seed for the split shuffles and the forests
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Quantile of the cell-count distribution above which a cell is a
    /// hotspot
    #[serde(default = "default_hotspot_quantile")]
    pub hotspot_quantile: f64,

    /// Number of trees in the hotspot classifier forest
    #[serde(default = "default_classifier_trees")]
    pub classifier_trees: usize,

    /// Number of trees in the count regressor forest
    #[serde(default = "default_regressor_trees")]
    pub regressor_trees: usize,

    /// How many days past the last observed date to forecast
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: default_test_size(),
            seed: default_seed(),
            hotspot_quantile: default_hotspot_quantile(),
            classifier_trees: default_classifier_trees(),
            regressor_trees: default_regressor_trees(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl TrainingConfig {
    /// Validate training parameters
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(PipelineError::Configuration(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }

        if !(0.0..=1.0).contains(&self.hotspot_quantile) {
            return Err(PipelineError::Configuration(format!(
                "hotspot_quantile must be in [0, 1], got {}",
                self.hotspot_quantile
            )));
        }

        if self.classifier_trees == 0 || self.regressor_trees == 0 {
            return Err(PipelineError::Configuration(
                "forest sizes must be positive".to_string(),
            ));
        }

        if self.forecast_days == 0 {
            return Err(PipelineError::Configuration(
                "forecast_days must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn default_min_coord() -> f64 {
    0.0
}

fn default_max_coord() -> f64 {
    1.0
}

fn default_resolution() -> usize {
    10
}

fn default_test_size() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_hotspot_quantile() -> f64 {
    0.85
}

fn default_classifier_trees() -> usize {
    200
}

fn default_regressor_trees() -> usize {
    300
}

fn default_forecast_days() -> u32 {
    7
}
