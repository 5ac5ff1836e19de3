//! Efficiency statistics for trigger studies.
//!
//! This crate hosts:
//! - the Clopper-Pearson binomial interval,
//! - efficiency points/curves and the plot artifact,
//! - the threshold-scan and score-bin aggregations over event columns.

pub mod curve;
pub mod efficiency;
pub mod interval;

pub use curve::{EfficiencyCurve, EfficiencyCurveArtifact, EfficiencyPoint};
pub use efficiency::{binned_curve, scan_curve};
pub use interval::{DEFAULT_ALPHA, binomial_interval};
