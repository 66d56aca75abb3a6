use ndarray::Array2;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{PipelineError, Result};
use crate::training::dataset::to_dense_matrix;

/// Random-forest count regressor
///
/// Opaque beyond its fit/predict contract; the forest is seeded so a fixed
/// configuration reproduces the same model.
#[derive(Debug)]
pub struct CountRegressor {
    model: Option<RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>>,
    n_trees: usize,
    seed: u64,
}

impl CountRegressor {
    pub fn new(n_trees: usize, seed: u64) -> Self {
        Self {
            model: None,
            n_trees,
            seed,
        }
    }

    /// Fit the forest on the given features and count targets
    pub fn fit(&mut self, features: &Array2<f64>, targets: &[f64]) -> Result<()> {
        let x = to_dense_matrix(features)?;
        let y = targets.to_vec();

        let params = RandomForestRegressorParameters::default()
            .with_n_trees(self.n_trees)
            .with_seed(self.seed);

        let model = RandomForestRegressor::fit(&x, &y, params).map_err(|e| {
            PipelineError::InputData(format!("failed to fit count regressor: {}", e))
        })?;

        self.model = Some(model);
        Ok(())
    }

    /// Predict counts for the given features
    pub fn predict(&self, features: &Array2<f64>) -> Result<Vec<f64>> {
        let model = self.model.as_ref().ok_or_else(|| {
            PipelineError::InputData("count regressor is not trained".to_string())
        })?;

        let x = to_dense_matrix(features)?;
        model
            .predict(&x)
            .map_err(|e| PipelineError::InputData(format!("count prediction failed: {}", e)))
    }

    /// Whether the model has been fitted
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }
}
