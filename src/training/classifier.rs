use ndarray::Array2;
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{PipelineError, Result};
use crate::training::dataset::to_dense_matrix;

/// Random-forest hotspot classifier
///
/// Opaque beyond its fit/predict contract; the forest is seeded so a fixed
/// configuration reproduces the same model.
#[derive(Debug)]
pub struct HotspotClassifier {
    model: Option<RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>>,
    n_trees: usize,
    seed: u64,
}

impl HotspotClassifier {
    pub fn new(n_trees: usize, seed: u64) -> Self {
        Self {
            model: None,
            n_trees,
            seed,
        }
    }

    /// Fit the forest on the given features and hotspot labels
    pub fn fit(&mut self, features: &Array2<f64>, labels: &[i32]) -> Result<()> {
        let x = to_dense_matrix(features)?;
        let y = labels.to_vec();

        let params = RandomForestClassifierParameters::default()
            .with_n_trees(self.n_trees as u16)
            .with_seed(self.seed);

        let model = RandomForestClassifier::fit(&x, &y, params).map_err(|e| {
            PipelineError::InputData(format!("failed to fit hotspot classifier: {}", e))
        })?;

        self.model = Some(model);
        Ok(())
    }

    /// Predict hotspot labels for the given features
    pub fn predict(&self, features: &Array2<f64>) -> Result<Vec<i32>> {
        let model = self.model.as_ref().ok_or_else(|| {
            PipelineError::InputData("hotspot classifier is not trained".to_string())
        })?;

        let x = to_dense_matrix(features)?;
        model
            .predict(&x)
            .map_err(|e| PipelineError::InputData(format!("hotspot prediction failed: {}", e)))
    }

    /// Whether the model has been fitted
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two well-separated clusters: label 1 when the first feature is large
    fn separable_data(n: usize) -> (Array2<f64>, Vec<i32>) {
        let mut features = Array2::zeros((n, 2));
        let mut labels = Vec::with_capacity(n);

        for i in 0..n {
            let label = i32::from(i % 2 == 0);
            features[[i, 0]] = if label == 1 { 10.0 } else { 0.0 } + (i % 5) as f64 * 0.1;
            features[[i, 1]] = (i % 7) as f64;
            labels.push(label);
        }

        (features, labels)
    }

    #[test]
    fn test_untrained_classifier_rejects_predict() {
        let classifier = HotspotClassifier::new(10, 42);
        assert!(!classifier.is_trained());

        let features = Array2::zeros((1, 2));
        assert!(classifier.predict(&features).is_err());
    }

    #[test]
    fn test_fit_and_predict_separable_classes() {
        let (features, labels) = separable_data(40);

        let mut classifier = HotspotClassifier::new(10, 42);
        classifier.fit(&features, &labels).unwrap();
        assert!(classifier.is_trained());

        let predictions = classifier.predict(&features).unwrap();
        assert_eq!(predictions.len(), 40);
        assert_eq!(predictions, labels);
    }

    #[test]
    fn test_fit_is_reproducible_for_fixed_seed() {
        let (features, labels) = separable_data(30);

        let mut a = HotspotClassifier::new(10, 42);
        a.fit(&features, &labels).unwrap();
        let mut b = HotspotClassifier::new(10, 42);
        b.fit(&features, &labels).unwrap();

        assert_eq!(
            a.predict(&features).unwrap(),
            b.predict(&features).unwrap()
        );
    }
}
