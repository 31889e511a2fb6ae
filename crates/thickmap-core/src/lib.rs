//! # ThickMap Core
//!
//! Core types, validation and unit handling for ThickMap.
//! Provides the data model shared by the expansion engine, the
//! settings layer and the command-line front end:
//!
//! - **Grid**: dense row-major matrices for thickness values and zone masks
//! - **Geometry**: cylinder geometry and the expansion factors derived from it
//! - **Policy**: the zone classification policies and their parameters
//! - **Header**: report, equipment and part details echoed into reports
//! - **Units**: measurement-system labels and parsing of lengths
//! - **Errors**: the validation error taxonomy

pub mod constants;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod header;
pub mod policy;
pub mod units;

pub use constants::{is_measured, DEFAULT_ZONE_COUNT, MAX_FIELD_CELLS, SENTINEL};
pub use error::{Error, GeometryError, PolicyError, Result, SourceError};
pub use geometry::{ExpansionFactors, GeometryParams};
pub use grid::{BooleanMask, ExpandedField, Grid, SourceMatrix};
pub use header::InspectionHeader;
pub use policy::{NormalizedBand, ReferenceThickness, ZonePolicyConfig, ZonePolicyKind};
pub use units::MeasurementSystem;
