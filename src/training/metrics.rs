//! Held-out evaluation metrics for the trained models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-class evaluation metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

/// Classification report: accuracy, per-class metrics and macro averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Fraction of correctly predicted rows
    pub accuracy: f64,

    /// Macro-averaged precision
    pub macro_precision: f64,

    /// Macro-averaged recall
    pub macro_recall: f64,

    /// Macro-averaged F1
    pub macro_f1: f64,

    /// Metrics per class, keyed `class_<label>`
    pub per_class: BTreeMap<String, ClassMetrics>,
}

impl ClassificationReport {
    /// Compute the report from true and predicted labels
    ///
    /// Labels are class indices in `0..n_classes`. Empty input yields an
    /// all-zero report.
    pub fn compute(y_true: &[i32], y_pred: &[i32], n_classes: usize) -> Self {
        let n_samples = y_true.len();
        if n_samples == 0 || n_classes == 0 {
            return Self {
                accuracy: 0.0,
                macro_precision: 0.0,
                macro_recall: 0.0,
                macro_f1: 0.0,
                per_class: BTreeMap::new(),
            };
        }

        let correct = y_true
            .iter()
            .zip(y_pred.iter())
            .filter(|(t, p)| t == p)
            .count();
        let accuracy = correct as f64 / n_samples as f64;

        let mut per_class = BTreeMap::new();

        for class_idx in 0..n_classes as i32 {
            let tp = y_true
                .iter()
                .zip(y_pred.iter())
                .filter(|(&t, &p)| t == class_idx && p == class_idx)
                .count();

            let fp = y_pred
                .iter()
                .zip(y_true.iter())
                .filter(|(&p, &t)| p == class_idx && t != class_idx)
                .count();

            let fn_count = y_true
                .iter()
                .zip(y_pred.iter())
                .filter(|(&t, &p)| t == class_idx && p != class_idx)
                .count();

            let precision = if tp + fp > 0 {
                tp as f64 / (tp + fp) as f64
            } else {
                0.0
            };

            let recall = if tp + fn_count > 0 {
                tp as f64 / (tp + fn_count) as f64
            } else {
                0.0
            };

            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            let support = y_true.iter().filter(|&&t| t == class_idx).count();

            per_class.insert(
                format!("class_{}", class_idx),
                ClassMetrics {
                    precision,
                    recall,
                    f1_score: f1,
                    support,
                },
            );
        }

        let macro_precision =
            per_class.values().map(|m| m.precision).sum::<f64>() / n_classes as f64;
        let macro_recall = per_class.values().map(|m| m.recall).sum::<f64>() / n_classes as f64;
        let macro_f1 = per_class.values().map(|m| m.f1_score).sum::<f64>() / n_classes as f64;

        Self {
            accuracy,
            macro_precision,
            macro_recall,
            macro_f1,
            per_class,
        }
    }
}

/// Mean absolute error between true and predicted values
///
/// Returns 0.0 for empty input.
pub fn mean_absolute_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).abs())
        .sum::<f64>()
        / y_true.len() as f64
}
