//! Threshold-scan and score-bin efficiency aggregation.
//!
//! Both entry points consume whole-dataset columns (per-file masks and score
//! columns concatenated in file order) and produce one curve per call. The
//! measured quantity is always
//! `P(analysis path fired | base selection & tagger condition)`; the
//! analysis path never enters the denominator.

use teff_core::{Error, Result};
use teff_nano::JaggedCol;
use teff_select::mask::{count_true, reduce_and};
use tracing::{info, warn};

use crate::curve::{EfficiencyCurve, EfficiencyPoint};

fn check_inputs(scores: &JaggedCol, analysis: &[bool], base: &[bool]) -> Result<()> {
    if scores.n_events() != analysis.len() || scores.n_events() != base.len() {
        return Err(Error::Validation(format!(
            "column length mismatch: {} score rows, {} analysis entries, {} base entries",
            scores.n_events(),
            analysis.len(),
            base.len()
        )));
    }
    Ok(())
}

fn efficiency_point(
    curve: &str,
    x: f64,
    tagger_pass: &[bool],
    analysis: &[bool],
    base: &[bool],
    alpha: f64,
) -> Result<EfficiencyPoint> {
    let total_mask = reduce_and(&[base, tagger_pass])?;
    let passing_mask = reduce_and(&[&total_mask, analysis])?;
    let n_total = count_true(&total_mask);
    let n_passing = count_true(&passing_mask);
    if n_total == 0 {
        warn!(curve, x, "no events in denominator, efficiency undefined");
    } else {
        info!(curve, x, n_passing, n_total, "efficiency point");
    }
    EfficiencyPoint::from_counts(x, n_passing, n_total, alpha)
}

/// Scan mode: tagger condition is "any jet score above the threshold".
pub fn scan_curve(
    name: impl Into<String>,
    scores: &JaggedCol,
    analysis: &[bool],
    base: &[bool],
    thresholds: &[f64],
    alpha: f64,
) -> Result<EfficiencyCurve> {
    check_inputs(scores, analysis, base)?;
    let name = name.into();
    let mut points = Vec::with_capacity(thresholds.len());
    for &t in thresholds {
        let tagger_pass = scores.any(|s| s > t);
        points.push(efficiency_point(&name, t, &tagger_pass, analysis, base, alpha)?);
    }
    Ok(EfficiencyCurve::new(name, points))
}

/// Binned mode: tagger condition is "leading score in `[lo, hi)` and at
/// least two jets above the loose working point"; points sit at bin centers.
pub fn binned_curve(
    name: impl Into<String>,
    scores: &JaggedCol,
    analysis: &[bool],
    base: &[bool],
    bins: &[(f64, f64)],
    loose_wp: f64,
    alpha: f64,
) -> Result<EfficiencyCurve> {
    check_inputs(scores, analysis, base)?;
    let name = name.into();

    let leading = scores.max();
    let two_loose: Vec<bool> =
        scores.count_where(|s| s > loose_wp).iter().map(|&c| c >= 2).collect();

    let mut points = Vec::with_capacity(bins.len());
    for &(lo, hi) in bins {
        let in_bin: Vec<bool> = leading
            .iter()
            .zip(&two_loose)
            .map(|(m, &loose)| loose && m.is_some_and(|v| lo <= v && v < hi))
            .collect();
        let center = 0.5 * (lo + hi);
        points.push(efficiency_point(&name, center, &in_bin, analysis, base, alpha)?);
    }
    Ok(EfficiencyCurve::new(name, points))
}
