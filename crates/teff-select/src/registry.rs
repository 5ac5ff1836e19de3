//! Named selections resolved from the run configuration.
//!
//! The registry is built once, before the file loop, so the set of masks
//! computed per file is fixed up front and each selection carries its own
//! name for logging and output files.

use teff_core::Result;
use teff_core::config::SelectionSpec;
use teff_nano::{BranchRequest, EventBatch};

use crate::cuts;

/// A named, evaluatable selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    pub spec: SelectionSpec,
}

impl Selection {
    pub fn new(spec: SelectionSpec) -> Self {
        Self { name: spec.name().to_string(), spec }
    }

    /// Branches this selection reads.
    pub fn branches(&self) -> BranchRequest {
        match &self.spec {
            SelectionSpec::Ttbar => {
                let mut req = BranchRequest::default()
                    .count("nElectron")
                    .count("nMuon")
                    .count("nJet")
                    .jagged("Jet_pt");
                for prefix in ["Electron", "Muon"] {
                    for field in ["pt", "eta", "phi", "mass", "dz", "dxy", "charge"] {
                        req.push_unique_jagged(format!("{prefix}_{field}"));
                    }
                }
                req
            }
            SelectionSpec::Qcd { path } => {
                BranchRequest::default().flag(path.clone()).count("nJet").jagged("Jet_pt")
            }
            SelectionSpec::TriggerPath { path } => BranchRequest::default().flag(path.clone()),
        }
    }

    pub fn evaluate(&self, batch: &EventBatch) -> Result<Vec<bool>> {
        match &self.spec {
            SelectionSpec::Ttbar => cuts::ttbar_selection(batch),
            SelectionSpec::Qcd { path } => cuts::qcd_selection(batch, path),
            SelectionSpec::TriggerPath { path } => cuts::trigger_path_selection(batch, path),
        }
    }
}

/// Resolve configured base selections into named selections, in order.
pub fn build_registry(specs: &[SelectionSpec]) -> Vec<Selection> {
    specs.iter().cloned().map(Selection::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use teff_nano::JaggedCol;

    #[test]
    fn registry_preserves_order_and_names() {
        let specs = vec![
            SelectionSpec::Ttbar,
            SelectionSpec::Qcd { path: "HLT_PFHT1050".into() },
            SelectionSpec::TriggerPath { path: "HLT_IsoMu24".into() },
        ];
        let registry = build_registry(&specs);
        let names: Vec<&str> = registry.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["ttbar", "qcd", "HLT_IsoMu24"]);
    }

    #[test]
    fn ttbar_branch_request_is_complete() {
        let sel = Selection::new(SelectionSpec::Ttbar);
        let req = sel.branches();
        assert_eq!(req.counts, vec!["nElectron", "nMuon", "nJet"]);
        assert!(req.jagged.contains(&"Electron_dxy".to_string()));
        assert!(req.jagged.contains(&"Muon_charge".to_string()));
        assert!(req.jagged.contains(&"Jet_pt".to_string()));
        assert_eq!(req.jagged.len(), 15);
        assert!(req.flags.is_empty());
    }

    #[test]
    fn trigger_path_evaluates_like_the_raw_flag() {
        let batch = EventBatch::from_columns(
            3,
            [("HLT_IsoMu24".to_string(), vec![true, false, true])],
            [],
            [],
        )
        .unwrap();
        let sel = Selection::new(SelectionSpec::TriggerPath { path: "HLT_IsoMu24".into() });
        assert_eq!(sel.evaluate(&batch).unwrap(), vec![true, false, true]);
    }

    #[test]
    fn qcd_evaluates_path_and_jets() {
        let batch = EventBatch::from_columns(
            2,
            [("HLT_PFHT1050".to_string(), vec![true, true])],
            [("nJet".to_string(), vec![2, 1])],
            [("Jet_pt".to_string(), JaggedCol::from_rows(&[vec![40.0, 31.0], vec![90.0]]))],
        )
        .unwrap();
        let sel = Selection::new(SelectionSpec::Qcd { path: "HLT_PFHT1050".into() });
        assert_eq!(sel.evaluate(&batch).unwrap(), vec![true, false]);
    }
}
