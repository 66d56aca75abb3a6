use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single geo-tagged incident report
///
/// Immutable once constructed. `date_key` is derived from the timestamp at
/// construction time and identifies the calendar day the record belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// When the incident occurred
    pub occurred_at: DateTime<Utc>,

    /// Longitude of the incident location
    pub lon: f64,

    /// Latitude of the incident location
    pub lat: f64,

    /// Ordinal severity level
    pub severity: u8,

    /// Whether a weapon was involved
    pub weapon_used: bool,

    /// Whether an arrest was made
    pub arrested: bool,

    /// Calendar date of the incident
    pub date_key: NaiveDate,
}

impl IncidentRecord {
    /// Create a new record, deriving `date_key` from the timestamp
    pub fn new(
        occurred_at: DateTime<Utc>,
        lon: f64,
        lat: f64,
        severity: u8,
        weapon_used: bool,
        arrested: bool,
    ) -> Self {
        Self {
            occurred_at,
            lon,
            lat,
            severity,
            weapon_used,
            arrested,
            date_key: occurred_at.date_naive(),
        }
    }
}

/// A discrete spatial grid cell
///
/// Derived from a record's coordinates, never stored on its own. Ordered so
/// it can key deterministic aggregations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GridCell {
    /// Column index, `0 <= x < nx`
    pub x: usize,

    /// Row index, `0 <= y < ny`
    pub y: usize,
}

impl GridCell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// An incident record together with its assigned grid cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GriddedIncident {
    /// The underlying record
    pub record: IncidentRecord,

    /// The cell the record's coordinates fall into
    pub cell: GridCell,
}

/// Incident count for one cell on one calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridDayAggregate {
    /// Calendar date
    pub date_key: NaiveDate,

    /// Grid cell
    pub cell: GridCell,

    /// Number of incidents observed for this cell on this date
    pub count: usize,
}
