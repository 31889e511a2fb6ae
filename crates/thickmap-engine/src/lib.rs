//! # ThickMap Engine
//!
//! Turns a sparse grid of wall-thickness readings taken on a cylinder into
//! a dense surface field, classifies every measured cell into thickness
//! zones and summarizes the result.
//!
//! ## Stages
//!
//! - **Grid Expander**: resamples the measurement grid onto the full cylinder
//!   surface using the shell geometry; unmeasured cells carry the sentinel
//! - **Zone Classifier**: partitions measured cells into ordered, mutually
//!   exclusive zones under one of several policies
//! - **Statistics Aggregator**: per-zone coverage, counts and means, overall
//!   descriptive statistics, and the ranked list of critical cells
//! - **Pipeline**: runs the three stages for one request and assembles a report
//!
//! Every stage is a pure function of its inputs. Nothing is cached or shared
//! between calls.

pub mod classifier;
pub mod expander;
pub mod pipeline;
pub mod stats;
pub mod warning;
pub mod zone;

pub use classifier::{Classification, ZoneClassifier};
pub use expander::{expand, GridExpander};
pub use pipeline::{analyze, AnalysisReport, AnalysisRequest};
pub use stats::{CriticalCell, StatisticsAggregator, ThicknessSummary, ZoneStatistics};
pub use warning::AnalysisWarning;
pub use zone::{Bound, ZoneBounds, ZoneMask};
