//! Spatial grid assignment
//!
//! Maps continuous (longitude, latitude) coordinates to discrete cell
//! indices over a fixed bounding box.

use crate::config::GridConfig;
use crate::error::Result;
use crate::models::{GridCell, GriddedIncident, IncidentRecord};

/// Keeps a coordinate exactly on the upper bound from landing one cell
/// past the edge after truncation.
const UPPER_BOUND_EPS: f64 = 1e-8;

/// Assigns coordinates to cells of a fixed rectangular grid
#[derive(Debug, Clone)]
pub struct GridAssigner {
    config: GridConfig,
}

impl GridAssigner {
    /// Create an assigner for the given grid configuration
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Map a coordinate pair to its grid cell
    ///
    /// Coordinates are normalized into `[0, n)` along each axis and clamped
    /// into the valid index range before truncation. Out-of-bounds input is
    /// clamped to the nearest edge cell rather than rejected; a point
    /// exactly on the upper bound lands in the last cell.
    pub fn assign(&self, lon: f64, lat: f64) -> GridCell {
        GridCell {
            x: Self::scale(lon, self.config.x_min, self.config.x_max, self.config.nx),
            y: Self::scale(lat, self.config.y_min, self.config.y_max, self.config.ny),
        }
    }

    fn scale(coord: f64, min: f64, max: f64, n: usize) -> usize {
        let scaled = (coord - min) / (max - min) * n as f64;
        let upper = n as f64 - UPPER_BOUND_EPS;
        let idx = scaled.max(0.0).min(upper) as usize;
        idx.min(n - 1)
    }

    /// Assign every record to its cell
    pub fn assign_records(&self, records: Vec<IncidentRecord>) -> Vec<GriddedIncident> {
        records
            .into_iter()
            .map(|record| {
                let cell = self.assign(record.lon, record.lat);
                GriddedIncident { record, cell }
            })
            .collect()
    }

    /// Iterate over every cell of the grid, x-major
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let ny = self.config.ny;
        (0..self.config.nx).flat_map(move |x| (0..ny).map(move |y| GridCell { x, y }))
    }

    /// The grid configuration this assigner was built with
    pub fn config(&self) -> &GridConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assigner(nx: usize, ny: usize) -> GridAssigner {
        GridAssigner::new(GridConfig {
            nx,
            ny,
            ..GridConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_point_near_east_edge() {
        let grid = assigner(2, 2);
        let cell = grid.assign(0.99, 0.01);
        assert_eq!(cell, GridCell::new(1, 0));
    }

    #[test]
    fn test_point_exactly_on_upper_bound_clamps_to_last_cell() {
        let grid = assigner(10, 10);
        let cell = grid.assign(1.0, 1.0);
        assert_eq!(cell, GridCell::new(9, 9));
    }

    #[test]
    fn test_points_beyond_bounds_clamp_to_edges() {
        let grid = assigner(10, 10);

        assert_eq!(grid.assign(2.5, 0.5), GridCell::new(9, 5));
        assert_eq!(grid.assign(-0.3, 0.5), GridCell::new(0, 5));
        assert_eq!(grid.assign(0.5, -1.0), GridCell::new(5, 0));
        assert_eq!(grid.assign(0.5, 99.0), GridCell::new(5, 9));
    }

    #[test]
    fn test_cells_stay_in_range_across_the_box() {
        let grid = assigner(10, 10);

        for i in 0..=100 {
            for j in 0..=100 {
                let cell = grid.assign(i as f64 / 100.0, j as f64 / 100.0);
                assert!(cell.x < 10);
                assert!(cell.y < 10);
            }
        }
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let grid = assigner(10, 10);

        let first = grid.assign(0.734, 0.219);
        for _ in 0..10 {
            assert_eq!(grid.assign(0.734, 0.219), first);
        }
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = assigner(1, 1);

        assert_eq!(grid.assign(0.0, 0.0), GridCell::new(0, 0));
        assert_eq!(grid.assign(1.0, 1.0), GridCell::new(0, 0));
        assert_eq!(grid.assign(5.0, -5.0), GridCell::new(0, 0));
    }

    #[test]
    fn test_offset_bounding_box() {
        let grid = GridAssigner::new(GridConfig {
            x_min: -10.0,
            y_min: 40.0,
            x_max: -9.0,
            y_max: 41.0,
            nx: 4,
            ny: 4,
        })
        .unwrap();

        assert_eq!(grid.assign(-9.99, 40.01), GridCell::new(0, 0));
        assert_eq!(grid.assign(-9.01, 40.99), GridCell::new(3, 3));
        assert_eq!(grid.assign(-9.5, 40.5), GridCell::new(2, 2));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = GridAssigner::new(GridConfig {
            x_max: 0.0,
            ..GridConfig::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_cells_cover_full_grid() {
        let grid = assigner(3, 2);
        let cells: Vec<GridCell> = grid.cells().collect();

        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], GridCell::new(0, 0));
        assert_eq!(cells[1], GridCell::new(0, 1));
        assert_eq!(cells[5], GridCell::new(2, 1));
    }

    #[test]
    fn test_assign_records_attaches_cells() {
        use chrono::TimeZone;

        let grid = assigner(10, 10);
        let ts = chrono::Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let records = vec![
            IncidentRecord::new(ts, 0.05, 0.95, 1, false, false),
            IncidentRecord::new(ts, 0.55, 0.15, 3, true, true),
        ];

        let gridded = grid.assign_records(records);
        assert_eq!(gridded.len(), 2);
        assert_eq!(gridded[0].cell, GridCell::new(0, 9));
        assert_eq!(gridded[1].cell, GridCell::new(5, 1));
    }
}
