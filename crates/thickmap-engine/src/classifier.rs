//! Zone classification
//!
//! Partitions the measured cells of an [`ExpandedField`] into the ordered
//! zones of a [`ZonePolicyConfig`]. Each zone is a boundary test on the
//! cell value; the tests of one policy never overlap and together cover
//! every measured value, so each measured cell lands in exactly one zone.
//! Sentinel cells land in none.

use crate::warning::AnalysisWarning;
use crate::zone::{Bound, ZoneBounds, ZoneMask};
use thickmap_core::{
    is_measured, BooleanMask, ExpandedField, NormalizedBand, PolicyError, ZonePolicyConfig,
    ZonePolicyKind,
};
use tracing::{debug, warn};

/// Result of classifying one field
#[derive(Debug, Clone)]
pub struct Classification {
    /// Policy that produced the zones
    pub policy: ZonePolicyKind,
    /// Zones in policy order, lowest thickness first
    pub zones: Vec<ZoneMask>,
    /// Measured cells
    pub valid: BooleanMask,
    /// Binary threshold actually used, after clamping
    pub effective_threshold: Option<f64>,
    /// Non-fatal conditions met while classifying
    pub warnings: Vec<AnalysisWarning>,
}

impl Classification {
    /// Look up a zone by name
    pub fn zone(&self, name: &str) -> Option<&ZoneMask> {
        self.zones.iter().find(|z| z.name == name)
    }

    /// Zone names in order
    pub fn zone_names(&self) -> Vec<&str> {
        self.zones.iter().map(|z| z.name.as_str()).collect()
    }

    /// The zone a cell belongs to, if it is measured
    pub fn zone_at(&self, row: usize, col: usize) -> Option<&ZoneMask> {
        self.zones
            .iter()
            .find(|z| z.mask.get(row, col).copied().unwrap_or(false))
    }

    /// Number of measured cells
    pub fn valid_count(&self) -> usize {
        self.valid.count()
    }

    /// Union of all zones flagged critical
    pub fn critical_mask(&self) -> BooleanMask {
        let empty = self.valid.map(|_| false);
        self.zones
            .iter()
            .filter(|z| z.critical)
            .fold(empty, |acc, z| acc.union(&z.mask))
    }
}

/// How a raw value is mapped before the boundary tests run
#[derive(Debug, Clone, Copy)]
enum Scale {
    Absolute,
    Normalized { min: f64, span: f64 },
}

impl Scale {
    fn apply(self, value: f64) -> f64 {
        match self {
            Self::Absolute => value,
            // a flat field sits in the middle of the scale
            Self::Normalized { span, .. } if span <= 0.0 => 0.5,
            Self::Normalized { min, span } => ((value - min) / span).clamp(0.0, 1.0),
        }
    }
}

/// A zone before it is applied to a field
#[derive(Debug, Clone)]
struct ZoneRule {
    name: String,
    test: ZoneBounds,
    display: ZoneBounds,
    critical: bool,
}

impl ZoneRule {
    fn absolute(name: impl Into<String>, bounds: ZoneBounds, critical: bool) -> Self {
        Self {
            name: name.into(),
            test: bounds,
            display: bounds,
            critical,
        }
    }
}

/// Classifies fields under one zone policy
#[derive(Debug, Clone)]
pub struct ZoneClassifier {
    policy: ZonePolicyConfig,
}

impl ZoneClassifier {
    /// Create a classifier for `policy`. Parameters are checked by [`Self::classify`].
    pub fn new(policy: ZonePolicyConfig) -> Self {
        Self { policy }
    }

    /// The policy in use
    pub fn policy(&self) -> &ZonePolicyConfig {
        &self.policy
    }

    /// Classify every measured cell of `field`
    pub fn classify(&self, field: &ExpandedField) -> Result<Classification, PolicyError> {
        self.policy.validate()?;

        let valid = field.valid_mask();
        let range = field.valid_range();
        let mut warnings = Vec::new();
        if range.is_none() {
            warn!("Field has no measured cells");
            warnings.push(AnalysisWarning::NoValidData);
        }

        let mut effective_threshold = None;
        let (rules, scale) = match &self.policy {
            ZonePolicyConfig::BinaryThreshold {
                reference,
                percentage,
            } => {
                let requested = reference.resolve(range.map(|(lo, _)| lo)) * (percentage / 100.0);
                let mut threshold = requested;
                if let Some((_, max)) = range {
                    if requested > max {
                        warn!(
                            "Threshold {:.3} exceeds data maximum {:.3}, clamping",
                            requested, max
                        );
                        warnings.push(AnalysisWarning::ThresholdClamped {
                            requested,
                            clamped: max,
                        });
                        threshold = max;
                    }
                }
                effective_threshold = Some(threshold);
                (binary_rules(threshold), Scale::Absolute)
            }
            ZonePolicyConfig::ThreeZone {
                threshold_thickness,
                nominal_thickness,
            } => (
                three_zone_rules(*threshold_thickness, *nominal_thickness),
                Scale::Absolute,
            ),
            ZonePolicyConfig::FixedRange {
                min_threshold,
                max_threshold,
                zone_count,
            } => (
                fixed_range_rules(*min_threshold, *max_threshold, *zone_count),
                Scale::Absolute,
            ),
            ZonePolicyConfig::NormalizedBands { bands } => {
                let (lo, hi) = range.unwrap_or((0.0, 0.0));
                (
                    normalized_rules(bands, lo, hi),
                    Scale::Normalized {
                        min: lo,
                        span: hi - lo,
                    },
                )
            }
        };

        let grid = field.grid();
        let zones: Vec<ZoneMask> = rules
            .into_iter()
            .map(|rule| {
                let mask = grid.map(|v| is_measured(*v) && rule.test.contains(scale.apply(*v)));
                debug!("Zone '{}': {} cells", rule.name, mask.count());
                ZoneMask {
                    name: rule.name,
                    bounds: rule.display,
                    critical: rule.critical,
                    mask,
                }
            })
            .collect();

        Ok(Classification {
            policy: self.policy.kind(),
            zones,
            valid,
            effective_threshold,
            warnings,
        })
    }
}

/// `zone_count + 1` evenly spaced boundaries from `min` to `max`.
///
/// The last boundary is exactly `max`. Equal endpoints give a single
/// repeated point.
pub fn zone_boundaries(min: f64, max: f64, zone_count: usize) -> Vec<f64> {
    let n = zone_count.max(1);
    let mut boundaries: Vec<f64> = (0..=n)
        .map(|i| min + (max - min) * (i as f64 / n as f64))
        .collect();
    boundaries[n] = max;
    boundaries
}

fn binary_rules(threshold: f64) -> Vec<ZoneRule> {
    vec![
        ZoneRule::absolute("Red", ZoneBounds::below(threshold), true),
        ZoneRule::absolute("Blue", ZoneBounds::at_or_above(threshold), false),
    ]
}

fn three_zone_rules(threshold: f64, nominal: f64) -> Vec<ZoneRule> {
    vec![
        ZoneRule::absolute("Red", ZoneBounds::below(threshold), true),
        ZoneRule::absolute(
            "Yellow",
            ZoneBounds::new(
                Some(Bound::Inclusive(threshold)),
                Some(Bound::Exclusive(nominal)),
            ),
            false,
        ),
        ZoneRule::absolute("Green", ZoneBounds::at_or_above(nominal), false),
    ]
}

fn fixed_range_rules(min: f64, max: f64, zone_count: usize) -> Vec<ZoneRule> {
    let boundaries = zone_boundaries(min, max, zone_count);
    let mut rules = Vec::with_capacity(zone_count + 2);

    rules.push(ZoneRule::absolute("Below Min", ZoneBounds::below(min), true));
    for i in 1..boundaries.len() {
        let lower = if i == 1 {
            Bound::Inclusive(boundaries[0])
        } else {
            Bound::Exclusive(boundaries[i - 1])
        };
        let bounds = ZoneBounds::new(Some(lower), Some(Bound::Inclusive(boundaries[i])));
        rules.push(ZoneRule::absolute(format!("Zone {}", i), bounds, i == 1));
    }
    rules.push(ZoneRule::absolute("Above Max", ZoneBounds::above(max), false));

    rules
}

fn normalized_rules(bands: &[NormalizedBand], lo: f64, hi: f64) -> Vec<ZoneRule> {
    let to_abs = |u: f64| lo + u * (hi - lo);
    let last = bands.len().saturating_sub(1);

    bands
        .iter()
        .enumerate()
        .map(|(k, band)| {
            let previous = k.checked_sub(1).map(|p| bands[p].upper);
            let test = ZoneBounds::new(
                previous.map(Bound::Exclusive),
                (k != last).then_some(Bound::Inclusive(band.upper)),
            );
            let display = ZoneBounds::new(
                Some(previous.map_or(Bound::Inclusive(lo), |p| Bound::Exclusive(to_abs(p)))),
                Some(Bound::Inclusive(if k == last { hi } else { to_abs(band.upper) })),
            );
            ZoneRule {
                name: band.name.clone(),
                test,
                display,
                critical: k == 0,
            }
        })
        .collect()
}
