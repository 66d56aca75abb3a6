use std::collections::BTreeMap;

use chrono::NaiveDate;
use ndarray::Array2;
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::error::{PipelineError, Result};
use crate::features::{CalendarFeatures, EngineeredIncident};
use crate::models::{GridCell, GridDayAggregate, GriddedIncident};

/// Classifier feature columns, in matrix order
pub const CLASSIFIER_FEATURES: [&str; 10] = [
    "hour",
    "dow",
    "month",
    "day",
    "is_weekend",
    "grid_x",
    "grid_y",
    "severity",
    "weapon_used",
    "arrested",
];

/// Regressor feature columns, in matrix order
pub const REGRESSOR_FEATURES: [&str; 6] =
    ["dow", "month", "day", "is_weekend", "grid_x", "grid_y"];

/// Feature matrix and hotspot targets for the classifier
///
/// Rows with a missing hotspot label are dropped before assembly.
pub fn classifier_dataset(records: &[EngineeredIncident]) -> Result<(Array2<f64>, Vec<i32>)> {
    let labeled: Vec<&EngineeredIncident> =
        records.iter().filter(|r| r.hotspot.is_some()).collect();

    if labeled.is_empty() {
        return Err(PipelineError::InputData(
            "no labeled records available for classifier training".to_string(),
        ));
    }

    let mut features = Array2::zeros((labeled.len(), CLASSIFIER_FEATURES.len()));
    let mut targets = Vec::with_capacity(labeled.len());

    for (i, engineered) in labeled.iter().enumerate() {
        let cal = &engineered.calendar;
        let record = &engineered.gridded.record;
        let cell = engineered.gridded.cell;

        let row = [
            cal.hour as f64,
            cal.dow as f64,
            cal.month as f64,
            cal.day as f64,
            if cal.is_weekend { 1.0 } else { 0.0 },
            cell.x as f64,
            cell.y as f64,
            record.severity as f64,
            if record.weapon_used { 1.0 } else { 0.0 },
            if record.arrested { 1.0 } else { 0.0 },
        ];
        for (j, value) in row.into_iter().enumerate() {
            features[[i, j]] = value;
        }

        targets.push(i32::from(engineered.hotspot == Some(true)));
    }

    Ok((features, targets))
}

/// Group records into per-cell per-day counts, sorted by `(date_key, cell)`
/// so downstream splits see the same row order on every run
pub fn grid_day_aggregates<'a, I>(records: I) -> Vec<GridDayAggregate>
where
    I: IntoIterator<Item = &'a GriddedIncident>,
{
    let mut counts: BTreeMap<(NaiveDate, GridCell), usize> = BTreeMap::new();
    for gridded in records {
        *counts
            .entry((gridded.record.date_key, gridded.cell))
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((date_key, cell), count)| GridDayAggregate {
            date_key,
            cell,
            count,
        })
        .collect()
}

/// Feature matrix and count targets for the regressor, one row per
/// aggregate
pub fn regressor_dataset(aggregates: &[GridDayAggregate]) -> Result<(Array2<f64>, Vec<f64>)> {
    if aggregates.is_empty() {
        return Err(PipelineError::InputData(
            "no grid-day aggregates available for regressor training".to_string(),
        ));
    }

    let mut features = Array2::zeros((aggregates.len(), REGRESSOR_FEATURES.len()));
    let mut targets = Vec::with_capacity(aggregates.len());

    for (i, agg) in aggregates.iter().enumerate() {
        let cal = CalendarFeatures::from_date(agg.date_key);
        for (j, value) in calendar_cell_row(&cal, agg.cell).into_iter().enumerate() {
            features[[i, j]] = value;
        }
        targets.push(agg.count as f64);
    }

    Ok((features, targets))
}

/// The regressor feature row for one (date, cell) pair; shared with the
/// forecaster so training and prediction encode features identically
pub fn calendar_cell_row(cal: &CalendarFeatures, cell: GridCell) -> [f64; 6] {
    [
        cal.dow as f64,
        cal.month as f64,
        cal.day as f64,
        if cal.is_weekend { 1.0 } else { 0.0 },
        cell.x as f64,
        cell.y as f64,
    ]
}

/// Convert an ndarray feature matrix into smartcore's matrix type
pub fn to_dense_matrix(features: &Array2<f64>) -> Result<DenseMatrix<f64>> {
    let (rows, cols) = features.dim();
    Ok(DenseMatrix::new(
        rows,
        cols,
        features.iter().copied().collect(),
        false,
    ))
}
