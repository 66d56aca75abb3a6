//! Feature engineering: calendar features and hotspot labeling
//!
//! Calendar features are derived from each record's timestamp; the hotspot
//! label is computed once per run over the per-cell count distribution and
//! broadcast back onto every record sharing the cell.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::{GridCell, GriddedIncident};
use crate::stats;

/// Calendar features derived from a timestamp or date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFeatures {
    /// Hour of day, 0-23 (0 when derived from a bare date)
    pub hour: u32,

    /// Day of week, 0 = Monday .. 6 = Sunday
    pub dow: u32,

    /// Month, 1-12
    pub month: u32,

    /// Day of month
    pub day: u32,

    /// Saturday or Sunday
    pub is_weekend: bool,
}

impl CalendarFeatures {
    /// Derive features from a full timestamp
    pub fn from_datetime(ts: &DateTime<Utc>) -> Self {
        let dow = ts.weekday().num_days_from_monday();
        Self {
            hour: ts.hour(),
            dow,
            month: ts.month(),
            day: ts.day(),
            is_weekend: dow >= 5,
        }
    }

    /// Derive features from a bare calendar date; the hour is 0
    pub fn from_date(date: NaiveDate) -> Self {
        let dow = date.weekday().num_days_from_monday();
        Self {
            hour: 0,
            dow,
            month: date.month(),
            day: date.day(),
            is_weekend: dow >= 5,
        }
    }
}

/// A gridded incident with calendar features and hotspot label attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineeredIncident {
    /// The record and its cell
    pub gridded: GriddedIncident,

    /// Calendar features from the record's timestamp
    pub calendar: CalendarFeatures,

    /// Whether the record's cell is a hotspot. `None` when the cell has no
    /// aggregate to label from; unlabeled records are excluded from
    /// classifier training.
    pub hotspot: Option<bool>,
}

/// Count incidents per cell
pub fn cell_counts(records: &[GriddedIncident]) -> BTreeMap<GridCell, usize> {
    let mut counts = BTreeMap::new();
    for gridded in records {
        *counts.entry(gridded.cell).or_insert(0) += 1;
    }
    counts
}

/// Threshold separating hotspot cells from the rest: the given quantile of
/// the per-cell count distribution
pub fn hotspot_threshold(counts: &BTreeMap<GridCell, usize>, quantile: f64) -> f64 {
    let mut values: Vec<f64> = counts.values().map(|&c| c as f64).collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    stats::percentile(&values, quantile)
}

/// Build the immutable cell -> hotspot label map
pub fn hotspot_labels(
    counts: &BTreeMap<GridCell, usize>,
    threshold: f64,
) -> BTreeMap<GridCell, bool> {
    counts
        .iter()
        .map(|(&cell, &count)| (cell, count as f64 >= threshold))
        .collect()
}

/// Attach calendar features and hotspot labels to every record
///
/// The label is computed per cell over the full historical count
/// distribution and broadcast back through a lookup; a record whose cell is
/// missing from the label map keeps `hotspot: None`.
pub fn engineer_features(
    records: Vec<GriddedIncident>,
    hotspot_quantile: f64,
) -> Result<Vec<EngineeredIncident>> {
    if records.is_empty() {
        return Err(PipelineError::InputData(
            "no incident records to engineer features from".to_string(),
        ));
    }

    let counts = cell_counts(&records);
    let threshold = hotspot_threshold(&counts, hotspot_quantile);
    let labels = hotspot_labels(&counts, threshold);
    debug!(cells = counts.len(), threshold, "computed hotspot threshold");

    Ok(records
        .into_iter()
        .map(|gridded| {
            let calendar = CalendarFeatures::from_datetime(&gridded.record.occurred_at);
            let hotspot = labels.get(&gridded.cell).copied();
            EngineeredIncident {
                gridded,
                calendar,
                hotspot,
            }
        })
        .collect())
}
