//! In-memory contents of one event tree.

use std::collections::BTreeMap;

use teff_core::{Error, Result};

use crate::jagged::JaggedCol;

/// The branches a pipeline run needs from each file.
///
/// Built once from the run configuration; files missing any of these are
/// dropped by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchRequest {
    /// Per-event boolean flags (trigger paths).
    pub flags: Vec<String>,
    /// Per-event object counts (`nJet`, `nMuon`, ...).
    pub counts: Vec<String>,
    /// Per-object jagged columns (`Jet_pt`, tagger scores, ...).
    pub jagged: Vec<String>,
}

impl BranchRequest {
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.push_unique_flag(name.into());
        self
    }

    pub fn count(mut self, name: impl Into<String>) -> Self {
        self.push_unique_count(name.into());
        self
    }

    pub fn jagged(mut self, name: impl Into<String>) -> Self {
        self.push_unique_jagged(name.into());
        self
    }

    pub fn push_unique_flag(&mut self, name: String) {
        if !self.flags.contains(&name) {
            self.flags.push(name);
        }
    }

    pub fn push_unique_count(&mut self, name: String) {
        if !self.counts.contains(&name) {
            self.counts.push(name);
        }
    }

    pub fn push_unique_jagged(&mut self, name: String) {
        if !self.jagged.contains(&name) {
            self.jagged.push(name);
        }
    }

    /// Union with another request.
    pub fn merge(&mut self, other: &BranchRequest) {
        for f in &other.flags {
            self.push_unique_flag(f.clone());
        }
        for c in &other.counts {
            self.push_unique_count(c.clone());
        }
        for j in &other.jagged {
            self.push_unique_jagged(j.clone());
        }
    }
}

/// Columnar event storage for one file (Structure-of-Arrays).
///
/// Every column has exactly `n_events` entries; jagged columns have
/// `n_events` rows. This is validated at construction, so selection code can
/// index without further length checks.
#[derive(Debug, Clone, Default)]
pub struct EventBatch {
    n_events: usize,
    flags: BTreeMap<String, Vec<bool>>,
    counts: BTreeMap<String, Vec<u32>>,
    jagged: BTreeMap<String, JaggedCol>,
}

impl EventBatch {
    /// Assemble a batch from materialized columns.
    pub fn from_columns(
        n_events: usize,
        flags: impl IntoIterator<Item = (String, Vec<bool>)>,
        counts: impl IntoIterator<Item = (String, Vec<u32>)>,
        jagged: impl IntoIterator<Item = (String, JaggedCol)>,
    ) -> Result<Self> {
        let mut batch = Self { n_events, ..Default::default() };
        for (name, col) in flags {
            batch.insert_flags(name, col)?;
        }
        for (name, col) in counts {
            batch.insert_counts(name, col)?;
        }
        for (name, col) in jagged {
            batch.insert_jagged(name, col)?;
        }
        Ok(batch)
    }

    pub fn n_events(&self) -> usize {
        self.n_events
    }

    pub fn insert_flags(&mut self, name: String, col: Vec<bool>) -> Result<()> {
        if col.len() != self.n_events {
            return Err(Error::Validation(format!(
                "flag column '{name}' has {} entries, batch has {}",
                col.len(),
                self.n_events
            )));
        }
        self.flags.insert(name, col);
        Ok(())
    }

    pub fn insert_counts(&mut self, name: String, col: Vec<u32>) -> Result<()> {
        if col.len() != self.n_events {
            return Err(Error::Validation(format!(
                "count column '{name}' has {} entries, batch has {}",
                col.len(),
                self.n_events
            )));
        }
        self.counts.insert(name, col);
        Ok(())
    }

    pub fn insert_jagged(&mut self, name: String, col: JaggedCol) -> Result<()> {
        if col.n_events() != self.n_events {
            return Err(Error::Validation(format!(
                "jagged column '{name}' has {} rows, batch has {}",
                col.n_events(),
                self.n_events
            )));
        }
        self.jagged.insert(name, col);
        Ok(())
    }

    pub fn flags(&self, name: &str) -> Result<&[bool]> {
        self.flags
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingBranch(name.to_string()))
    }

    pub fn counts(&self, name: &str) -> Result<&[u32]> {
        self.counts
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::MissingBranch(name.to_string()))
    }

    pub fn jagged(&self, name: &str) -> Result<&JaggedCol> {
        self.jagged.get(name).ok_or_else(|| Error::MissingBranch(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_columns_roundtrip() {
        let batch = EventBatch::from_columns(
            2,
            [("HLT_X".to_string(), vec![true, false])],
            [("nJet".to_string(), vec![2, 0])],
            [("Jet_pt".to_string(), JaggedCol::from_rows(&[vec![40.0, 25.0], vec![]]))],
        )
        .unwrap();
        assert_eq!(batch.n_events(), 2);
        assert_eq!(batch.flags("HLT_X").unwrap(), &[true, false]);
        assert_eq!(batch.counts("nJet").unwrap(), &[2, 0]);
        assert_eq!(batch.jagged("Jet_pt").unwrap().row(0), &[40.0, 25.0]);
    }

    #[test]
    fn length_mismatch_rejected() {
        let err = EventBatch::from_columns(
            3,
            [("HLT_X".to_string(), vec![true, false])],
            [],
            [],
        )
        .unwrap_err();
        assert!(err.to_string().contains("HLT_X"));
    }

    #[test]
    fn missing_branch_error() {
        let batch = EventBatch::from_columns(1, [], [], []).unwrap();
        let err = batch.flags("HLT_Gone").unwrap_err();
        assert!(matches!(err, Error::MissingBranch(ref b) if b == "HLT_Gone"));
    }

    #[test]
    fn request_builder_dedups() {
        let mut req = BranchRequest::default()
            .flag("HLT_A")
            .flag("HLT_A")
            .count("nJet")
            .jagged("Jet_pt");
        req.merge(&BranchRequest::default().flag("HLT_B").jagged("Jet_pt"));
        assert_eq!(req.flags, vec!["HLT_A".to_string(), "HLT_B".to_string()]);
        assert_eq!(req.counts, vec!["nJet".to_string()]);
        assert_eq!(req.jagged, vec!["Jet_pt".to_string()]);
    }
}
