//! Efficiency points, curves, and the plot artifact.

use serde::{Deserialize, Serialize};
use teff_core::{Error, Result};

use crate::interval::binomial_interval;

/// One measured efficiency with its Clopper-Pearson errors.
///
/// `value` is `None` when the denominator is empty; such points carry zero
/// errors and are skipped when plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyPoint {
    /// Threshold (scan mode) or bin center (binned mode).
    pub x: f64,
    pub n_passing: u64,
    pub n_total: u64,
    pub value: Option<f64>,
    pub err_low: f64,
    pub err_high: f64,
}

impl EfficiencyPoint {
    /// Build a point from pass/total counts.
    pub fn from_counts(x: f64, n_passing: u64, n_total: u64, alpha: f64) -> Result<Self> {
        if n_passing > n_total {
            return Err(Error::Validation(format!(
                "n_passing ({n_passing}) exceeds n_total ({n_total}) at x = {x}"
            )));
        }
        if n_total == 0 {
            return Ok(Self { x, n_passing, n_total, value: None, err_low: 0.0, err_high: 0.0 });
        }
        let (err_low, err_high) = binomial_interval(n_passing, n_total, alpha)?;
        let value = n_passing as f64 / n_total as f64;
        Ok(Self { x, n_passing, n_total, value: Some(value), err_low, err_high })
    }

    pub fn is_defined(&self) -> bool {
        self.value.is_some()
    }
}

/// A named efficiency curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyCurve {
    pub name: String,
    pub points: Vec<EfficiencyPoint>,
}

impl EfficiencyCurve {
    pub fn new(name: impl Into<String>, points: Vec<EfficiencyPoint>) -> Self {
        Self { name: name.into(), points }
    }

    /// Points with a defined efficiency.
    pub fn defined_points(&self) -> impl Iterator<Item = &EfficiencyPoint> {
        self.points.iter().filter(|p| p.is_defined())
    }
}

/// Plot-ready bundle of curves sharing one pair of axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyCurveArtifact {
    pub x_label: String,
    pub y_label: String,
    pub curves: Vec<EfficiencyCurve>,
}

impl EfficiencyCurveArtifact {
    /// Conventional axis labels for offline-tagger efficiency plots.
    pub fn new(curves: Vec<EfficiencyCurve>) -> Self {
        Self {
            x_label: "offline b-jet value".to_string(),
            y_label: "N_passing / N_total".to_string(),
            curves,
        }
    }
}
