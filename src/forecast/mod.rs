//! Forward forecasting over the full grid
//!
//! Projects the fitted count regressor over the cross product of the next
//! forecast window and every cell of the grid, observed or not.

use chrono::{Duration, NaiveDate};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GridConfig;
use crate::error::Result;
use crate::features::CalendarFeatures;
use crate::grid::GridAssigner;
use crate::models::GridCell;
use crate::training::dataset::{calendar_cell_row, REGRESSOR_FEATURES};
use crate::training::regressor::CountRegressor;

/// One predicted (future date, cell) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRow {
    /// Day of week, 0 = Monday .. 6 = Sunday
    pub dow: u32,

    /// Month, 1-12
    pub month: u32,

    /// Day of month
    pub day: u32,

    /// Saturday or Sunday
    pub is_weekend: bool,

    /// Cell column index
    pub grid_x: usize,

    /// Cell row index
    pub grid_y: usize,

    /// Forecast date
    pub date: NaiveDate,

    /// Predicted incident count for the cell on this date
    pub predicted_count: f64,
}

/// Predict incident counts for the `days` calendar days immediately after
/// `last_date`, for every cell in the grid
///
/// The output is the full cross product of the forecast dates with the
/// nx x ny cell set (exactly `nx * ny * days` rows), produced by a single
/// batch regressor invocation.
pub fn forecast_counts(
    regressor: &CountRegressor,
    grid: &GridConfig,
    last_date: NaiveDate,
    days: u32,
) -> Result<Vec<ForecastRow>> {
    let assigner = GridAssigner::new(grid.clone())?;

    let mut keys: Vec<(NaiveDate, CalendarFeatures, GridCell)> =
        Vec::with_capacity(grid.cell_count() * days as usize);
    for offset in 1..=i64::from(days) {
        let date = last_date + Duration::days(offset);
        let calendar = CalendarFeatures::from_date(date);
        for cell in assigner.cells() {
            keys.push((date, calendar, cell));
        }
    }

    let mut features = Array2::zeros((keys.len(), REGRESSOR_FEATURES.len()));
    for (i, (_, calendar, cell)) in keys.iter().enumerate() {
        for (j, value) in calendar_cell_row(calendar, *cell).into_iter().enumerate() {
            features[[i, j]] = value;
        }
    }

    let predictions = regressor.predict(&features)?;

    let rows: Vec<ForecastRow> = keys
        .into_iter()
        .zip(predictions)
        .map(|((date, calendar, cell), predicted_count)| ForecastRow {
            dow: calendar.dow,
            month: calendar.month,
            day: calendar.day,
            is_weekend: calendar.is_weekend,
            grid_x: cell.x,
            grid_y: cell.y,
            date,
            predicted_count,
        })
        .collect();

    info!(rows = rows.len(), days, "forecast generated");
    Ok(rows)
}
