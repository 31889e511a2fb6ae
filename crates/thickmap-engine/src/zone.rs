//! Zone definitions and masks

use serde::{Deserialize, Serialize};
use thickmap_core::units::{format_thickness, MeasurementSystem};
use thickmap_core::BooleanMask;

/// One end of a zone interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Bound {
    Inclusive(f64),
    Exclusive(f64),
}

impl Bound {
    pub fn value(self) -> f64 {
        match self {
            Self::Inclusive(v) | Self::Exclusive(v) => v,
        }
    }
}

/// Interval a zone covers. A missing end is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneBounds {
    pub lower: Option<Bound>,
    pub upper: Option<Bound>,
}

impl ZoneBounds {
    pub fn new(lower: Option<Bound>, upper: Option<Bound>) -> Self {
        Self { lower, upper }
    }

    /// `value < upper`
    pub fn below(upper: f64) -> Self {
        Self::new(None, Some(Bound::Exclusive(upper)))
    }

    /// `value >= lower`
    pub fn at_or_above(lower: f64) -> Self {
        Self::new(Some(Bound::Inclusive(lower)), None)
    }

    /// `value > lower`
    pub fn above(lower: f64) -> Self {
        Self::new(Some(Bound::Exclusive(lower)), None)
    }

    /// Does `value` satisfy both ends
    pub fn contains(&self, value: f64) -> bool {
        let above_lower = match self.lower {
            None => true,
            Some(Bound::Inclusive(lo)) => value >= lo,
            Some(Bound::Exclusive(lo)) => value > lo,
        };
        let below_upper = match self.upper {
            None => true,
            Some(Bound::Inclusive(hi)) => value <= hi,
            Some(Bound::Exclusive(hi)) => value < hi,
        };
        above_lower && below_upper
    }

    /// Human-readable range such as `10.00–12.50 mm` or `< 15.00 mm`
    ///
    /// Bounds are printed as stored, with the label of `units`.
    pub fn describe(&self, units: MeasurementSystem) -> String {
        let fmt = |v: f64| format_thickness(v, units);
        match (self.lower, self.upper) {
            (None, None) => "All values".to_string(),
            (None, Some(Bound::Exclusive(hi))) => format!("< {}", fmt(hi)),
            (None, Some(Bound::Inclusive(hi))) => format!("≤ {}", fmt(hi)),
            (Some(Bound::Inclusive(lo)), None) => format!("≥ {}", fmt(lo)),
            (Some(Bound::Exclusive(lo)), None) => format!("> {}", fmt(lo)),
            (Some(lo), Some(hi)) => format!("{:.2}–{}", lo.value(), fmt(hi.value())),
        }
    }
}

/// A classified zone: its name, interval and member cells
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneMask {
    /// Zone name, e.g. `Red` or `Zone 2`
    pub name: String,
    /// Interval in absolute thickness
    pub bounds: ZoneBounds,
    /// Whether cells in this zone are reported as critical
    pub critical: bool,
    /// Member cells
    pub mask: BooleanMask,
}

impl ZoneMask {
    /// Number of member cells
    pub fn count(&self) -> usize {
        self.mask.count()
    }
}
