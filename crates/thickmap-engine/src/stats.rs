//! Zone statistics and critical-cell ranking

use crate::classifier::Classification;
use serde::{Deserialize, Serialize};
use thickmap_core::units::MeasurementSystem;
use thickmap_core::ExpandedField;
use tracing::debug;

/// Name of the aggregate row covering every measured cell
pub const TOTAL_ROW_NAME: &str = "Total";

/// Summary of one zone over the whole field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneStatistics {
    /// Zone name
    pub name: String,
    /// Number of cells in the zone
    pub cell_count: usize,
    /// `cell_count / measured cells`, 0 when nothing was measured
    pub coverage_ratio: f64,
    /// Mean thickness of the zone, 0 when the zone is empty
    pub average_value: f64,
    /// Range covered by the zone, e.g. `10.00–12.50 mm`
    pub bounds_description: String,
}

impl ZoneStatistics {
    /// Coverage as a percentage
    pub fn coverage_percent(&self) -> f64 {
        self.coverage_ratio * 100.0
    }
}

/// A measured cell in a critical zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalCell {
    pub row: usize,
    pub column: usize,
    /// Position around the circumference, `column / cols * 360`
    pub angle_degrees: f64,
    pub value: f64,
    pub zone_name: String,
}

/// Descriptive statistics over all measured cells
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThicknessSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub valid_cells: usize,
    pub total_cells: usize,
}

impl ThicknessSummary {
    /// True when no cell was measured
    pub fn is_empty(&self) -> bool {
        self.valid_cells == 0
    }
}

/// Turns a classification into report rows
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsAggregator {
    units: MeasurementSystem,
}

impl StatisticsAggregator {
    pub fn new(units: MeasurementSystem) -> Self {
        Self { units }
    }

    /// Per-zone statistics in zone order, and the critical cells sorted by
    /// ascending thickness. Equal values keep row-major order.
    pub fn aggregate(
        &self,
        field: &ExpandedField,
        classification: &Classification,
    ) -> (Vec<ZoneStatistics>, Vec<CriticalCell>) {
        let total_valid = classification.valid_count();
        let grid = field.grid();

        let zones = classification
            .zones
            .iter()
            .map(|zone| {
                let values: Vec<f64> = grid
                    .cells()
                    .filter(|(r, c, _)| zone.mask.get(*r, *c).copied().unwrap_or(false))
                    .map(|(_, _, v)| *v)
                    .collect();
                ZoneStatistics {
                    name: zone.name.clone(),
                    cell_count: values.len(),
                    coverage_ratio: ratio(values.len(), total_valid),
                    average_value: mean(&values),
                    bounds_description: zone.bounds.describe(self.units),
                }
            })
            .collect();

        let critical = critical_cells(field, classification);
        debug!(
            "Aggregated {} zones, {} critical cells",
            classification.zones.len(),
            critical.len()
        );

        (zones, critical)
    }

    /// Aggregate row over every measured cell
    pub fn total(&self, field: &ExpandedField) -> ZoneStatistics {
        let values = field.valid_values();
        ZoneStatistics {
            name: TOTAL_ROW_NAME.to_string(),
            cell_count: values.len(),
            coverage_ratio: if values.is_empty() { 0.0 } else { 1.0 },
            average_value: mean(&values),
            bounds_description: "All measured cells".to_string(),
        }
    }

    /// Min, max, mean, median and standard deviation of the measured cells
    pub fn summarize(&self, field: &ExpandedField) -> ThicknessSummary {
        let values = field.valid_values();
        let total_cells = field.grid().len();
        let Some((min, max)) = field.valid_range() else {
            return ThicknessSummary {
                total_cells,
                ..ThicknessSummary::default()
            };
        };

        ThicknessSummary {
            min,
            max,
            mean: mean(&values),
            median: median(&values),
            std_dev: std_dev(&values),
            valid_cells: values.len(),
            total_cells,
        }
    }
}

fn critical_cells(field: &ExpandedField, classification: &Classification) -> Vec<CriticalCell> {
    let cols = field.cols().max(1) as f64;
    let mut cells: Vec<CriticalCell> = field
        .grid()
        .cells()
        .filter_map(|(row, column, value)| {
            let zone = classification.zone_at(row, column)?;
            zone.critical.then(|| CriticalCell {
                row,
                column,
                angle_degrees: column as f64 / cols * 360.0,
                value: *value,
                zone_name: zone.name.clone(),
            })
        })
        .collect();

    // sort_by is stable, so ties stay in scan order
    cells.sort_by(|a, b| a.value.total_cmp(&b.value));
    cells
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
