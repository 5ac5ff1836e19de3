//! Read-path checks against files written with oxyroot's writer.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use oxyroot::{RootFile, WriterTree};
use teff_core::Error;
use teff_nano::BranchRequest;
use teff_nano::reader::{load_batch, probe, tree_names};

fn write_events_file(path: &Path) {
    let mut file = RootFile::create(path).unwrap();
    let mut tree = WriterTree::new("Events");

    let hlt = vec![true, false, true];
    let njet = vec![2_i32, 0, 3];
    let jet_pt: Vec<Vec<f32>> = vec![vec![50.0, 35.0], vec![], vec![80.0, 20.0, 31.0]];

    tree.new_branch("HLT_PFHT1050", hlt.into_iter());
    tree.new_branch("nJet", njet.into_iter());
    tree.new_branch("Jet_pt", jet_pt.into_iter());
    tree.write(&mut file).unwrap();
    file.close().unwrap();
}

fn fixture(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let file = format!("teff_nano_{}_{}_{}.root", std::process::id(), nanos, name);
    let path = std::env::temp_dir().join(file);
    write_events_file(&path);
    path
}

#[test]
fn batch_loads_flags_counts_and_jagged() {
    let path = fixture("batch");

    let request =
        BranchRequest::default().flag("HLT_PFHT1050").count("nJet").jagged("Jet_pt");
    let batch = load_batch(&path, "Events", &request).unwrap();

    assert_eq!(batch.n_events(), 3);
    assert_eq!(batch.flags("HLT_PFHT1050").unwrap(), &[true, false, true]);
    assert_eq!(batch.counts("nJet").unwrap(), &[2, 0, 3]);

    let pt = batch.jagged("Jet_pt").unwrap();
    assert_eq!(pt.row(0), &[50.0, 35.0]);
    assert_eq!(pt.row(1), &[] as &[f64]);
    assert_eq!(pt.row(2), &[80.0, 20.0, 31.0]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_branch_is_reported_as_such() {
    let path = fixture("missing_branch");

    let request = BranchRequest::default().flag("HLT_DoesNotExist");
    let err = load_batch(&path, "Events", &request).unwrap_err();
    assert!(matches!(err, Error::MissingBranch(ref b) if b == "HLT_DoesNotExist"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_tree_is_a_root_error() {
    let path = fixture("missing_tree");

    let err = load_batch(&path, "NotATree", &BranchRequest::default()).unwrap_err();
    assert!(matches!(err, Error::Root(_)));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn probe_reports_entries_and_missing_branches() {
    let path = fixture("probe");

    let request = BranchRequest::default().flag("HLT_PFHT1050").count("nJet").jagged("Jet_eta");
    let seen = probe(&path, "Events", &request).unwrap();
    assert_eq!(seen.n_events, 3);
    assert_eq!(seen.missing, vec!["Jet_eta".to_string()]);

    assert!(probe(&path, "NotATree", &request).is_err());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn tree_names_lists_the_event_tree() {
    let path = fixture("tree_names");

    let names = tree_names(&path).unwrap();
    assert_eq!(names, vec!["Events".to_string()]);

    let _ = std::fs::remove_file(&path);
}
