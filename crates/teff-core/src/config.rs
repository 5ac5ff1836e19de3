//! Run configuration for the efficiency pipeline.
//!
//! A [`RunConfig`] names everything a run depends on: which trigger paths are
//! being measured, which base selections define the probe sample, which
//! offline tagger branches are scanned, and the threshold/bin grids. The
//! pipeline is driven entirely by this structure; nothing is picked up from
//! module-level state.
//!
//! Configs load from YAML (JSON is accepted too). Missing fields fall back to
//! the threshold-scan defaults below; [`RunConfig::default_bins`] gives the
//! binned-mode trigger menu.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Demonstration dataset location (an EOS export of NanoAOD files).
pub const DEFAULT_DATA_DIR: &str =
    "/eos/cms/store/group/dpg_trigger/comm_trigger/TriggerStudiesGroup/STEAM/savarghe/nanoaod/eraD/Fill8136/";

/// Default name of the event tree in NanoAOD files.
pub const DEFAULT_TREE: &str = "Events";

const SCAN_ANALYSIS_PATH: &str = "HLT_Mu12_DoublePFJets40MaxDeta1p6_DoublePFBTagDeepJet_p71";
const BINS_ANALYSIS_PATH: &str =
    "HLT_Mu8_TrkIsoVVL_Ele23_CaloIdL_TrackIdL_IsoVL_DZ_PFDiJet30_PFBtagDeepJet_1p5";
const BINS_BASE_PATH: &str = "HLT_Mu8_TrkIsoVVL_Ele23_CaloIdL_TrackIdL_IsoVL_DZ_PFDiJet30";
const QCD_BASE_PATH: &str = "HLT_PFHT1050";

/// A base selection the probe sample is conditioned on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionSpec {
    /// Opposite-sign e-mu pair with quality cuts, plus the jet selection.
    Ttbar,
    /// A high-HT trigger path plus the jet selection.
    Qcd {
        #[serde(default = "default_qcd_path")]
        path: String,
    },
    /// A raw trigger-path flag, no kinematic cuts.
    TriggerPath { path: String },
}

fn default_qcd_path() -> String {
    QCD_BASE_PATH.to_string()
}

impl SelectionSpec {
    /// Short name used in logs and output file names.
    pub fn name(&self) -> &str {
        match self {
            SelectionSpec::Ttbar => "ttbar",
            SelectionSpec::Qcd { .. } => "qcd",
            SelectionSpec::TriggerPath { path } => path,
        }
    }
}

/// An offline b-tagging discriminant to scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggerSpec {
    /// Per-jet score branch, e.g. `Jet_btagDeepFlavB`.
    pub branch: String,
    /// Display label; falls back to the branch name when empty.
    #[serde(default)]
    pub label: String,
}

impl TaggerSpec {
    pub fn new(branch: impl Into<String>, label: impl Into<String>) -> Self {
        Self { branch: branch.into(), label: label.into() }
    }

    pub fn display(&self) -> &str {
        if self.label.is_empty() { &self.branch } else { &self.label }
    }
}

/// Inclusive linear threshold grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub start: f64,
    pub stop: f64,
    pub points: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { start: 0.0, stop: 1.0, points: 25 }
    }
}

impl GridSpec {
    /// Materialize the grid, endpoints included.
    pub fn values(&self) -> Vec<f64> {
        linspace(self.start, self.stop, self.points)
    }
}

/// Equal-width binning given by edge count (`edges` edges make `edges - 1` bins).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinningSpec {
    pub start: f64,
    pub stop: f64,
    pub edges: usize,
}

impl Default for BinningSpec {
    fn default() -> Self {
        Self { start: 0.0, stop: 1.0, edges: 12 }
    }
}

impl BinningSpec {
    pub fn edge_values(&self) -> Vec<f64> {
        linspace(self.start, self.stop, self.edges)
    }

    /// Half-open `[low, high)` bin intervals.
    pub fn bins(&self) -> Vec<(f64, f64)> {
        let edges = self.edge_values();
        edges.windows(2).map(|w| (w[0], w[1])).collect()
    }
}

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Full configuration of an efficiency run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Trigger paths whose efficiency is measured.
    pub analysis_paths: Vec<String>,
    /// Base selections conditioning the probe sample.
    pub base_selections: Vec<SelectionSpec>,
    /// Offline discriminants to scan.
    pub taggers: Vec<TaggerSpec>,
    /// Threshold grid (scan mode).
    pub thresholds: GridSpec,
    /// Score binning (binned mode).
    pub bins: BinningSpec,
    /// Two-sided miscoverage of the Clopper-Pearson interval.
    pub alpha: f64,
    /// Loose working point for the binned-mode 2-jet gate.
    pub loose_wp: f64,
    /// Name of the event tree inside each file.
    pub tree: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::default_scan()
    }
}

impl RunConfig {
    /// Threshold-scan defaults: the double-PF-jet b-tag path probed on ttbar
    /// and QCD-enriched samples.
    pub fn default_scan() -> Self {
        Self {
            analysis_paths: vec![SCAN_ANALYSIS_PATH.to_string()],
            base_selections: vec![
                SelectionSpec::Ttbar,
                SelectionSpec::Qcd { path: QCD_BASE_PATH.to_string() },
            ],
            taggers: default_taggers(),
            thresholds: GridSpec::default(),
            bins: BinningSpec::default(),
            alpha: 0.32,
            loose_wp: 0.2,
            tree: DEFAULT_TREE.to_string(),
        }
    }

    /// Binned-mode defaults: the e-mu cross trigger probed against its
    /// un-btagged twin on the ttbar-enriched sample.
    pub fn default_bins() -> Self {
        Self {
            analysis_paths: vec![BINS_ANALYSIS_PATH.to_string()],
            base_selections: vec![
                SelectionSpec::Ttbar,
                SelectionSpec::TriggerPath { path: BINS_BASE_PATH.to_string() },
            ],
            ..Self::default_scan()
        }
    }

    /// Load from a YAML (or JSON) file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Parse from a YAML (or JSON) string and validate.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: RunConfig = serde_yaml_ng::from_str(text)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.analysis_paths.is_empty() {
            return Err(Error::Validation("analysis_paths must not be empty".into()));
        }
        if self.base_selections.is_empty() {
            return Err(Error::Validation("base_selections must not be empty".into()));
        }
        if self.taggers.is_empty() {
            return Err(Error::Validation("taggers must not be empty".into()));
        }
        if !(self.alpha.is_finite() && self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(Error::Validation(format!("alpha must be in (0,1), got {}", self.alpha)));
        }
        if !(self.loose_wp.is_finite() && (0.0..=1.0).contains(&self.loose_wp)) {
            return Err(Error::Validation(format!(
                "loose_wp must be in [0,1], got {}",
                self.loose_wp
            )));
        }
        if self.thresholds.points < 2 {
            return Err(Error::Validation(format!(
                "thresholds.points must be >= 2, got {}",
                self.thresholds.points
            )));
        }
        if !(self.thresholds.start < self.thresholds.stop) {
            return Err(Error::Validation(format!(
                "thresholds require start < stop, got ({}, {})",
                self.thresholds.start, self.thresholds.stop
            )));
        }
        if self.bins.edges < 2 {
            return Err(Error::Validation(format!(
                "bins.edges must be >= 2, got {}",
                self.bins.edges
            )));
        }
        if !(self.bins.start < self.bins.stop) {
            return Err(Error::Validation(format!(
                "bins require start < stop, got ({}, {})",
                self.bins.start, self.bins.stop
            )));
        }
        if self.tree.is_empty() {
            return Err(Error::Validation("tree name must not be empty".into()));
        }
        Ok(())
    }
}

/// Partial run config as read from a user file.
///
/// Unset fields keep whatever mode defaults the overlay is applied to, so
/// the same file can tweak a scan run and a binned run without restating
/// either mode's trigger paths.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunOverlay {
    pub analysis_paths: Option<Vec<String>>,
    pub base_selections: Option<Vec<SelectionSpec>>,
    pub taggers: Option<Vec<TaggerSpec>>,
    pub thresholds: Option<GridSpec>,
    pub bins: Option<BinningSpec>,
    pub alpha: Option<f64>,
    pub loose_wp: Option<f64>,
    pub tree: Option<String>,
}

impl RunOverlay {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&text)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    pub fn apply(self, mut base: RunConfig) -> RunConfig {
        if let Some(v) = self.analysis_paths {
            base.analysis_paths = v;
        }
        if let Some(v) = self.base_selections {
            base.base_selections = v;
        }
        if let Some(v) = self.taggers {
            base.taggers = v;
        }
        if let Some(v) = self.thresholds {
            base.thresholds = v;
        }
        if let Some(v) = self.bins {
            base.bins = v;
        }
        if let Some(v) = self.alpha {
            base.alpha = v;
        }
        if let Some(v) = self.loose_wp {
            base.loose_wp = v;
        }
        if let Some(v) = self.tree {
            base.tree = v;
        }
        base
    }
}

fn default_taggers() -> Vec<TaggerSpec> {
    vec![
        TaggerSpec::new("Jet_btagDeepFlavB", "offline DeepJet"),
        TaggerSpec::new("Jet_btagDeepB", "offline DeepCSV"),
    ]
}
