//! Typed branch reading over `oxyroot`.
//!
//! NanoAOD stores trigger flags as `bool` leaves, object counts as 32-bit
//! integers, and per-object quantities as leaf-count arrays
//! (`float[]`-style). Files written by other toolkits show up with
//! `vector<T>` columns instead; both layouts are accepted.

use std::path::Path;

use oxyroot::{Branch, Named, ReaderTree, RootFile, Slice};
use teff_core::{Error, Result};
use tracing::debug;

use crate::batch::{BranchRequest, EventBatch};
use crate::jagged::JaggedCol;

/// The oxyroot error types are not public; carry their message.
fn map_root_error<E: std::fmt::Display>(context: &str, err: E) -> Error {
    Error::Root(format!("{context}: {err}"))
}

/// Open `path` and return its event tree.
pub fn open_tree(path: &Path, tree_name: &str) -> Result<ReaderTree> {
    let mut file = RootFile::open(path)
        .map_err(|err| map_root_error(&format!("failed to open '{}'", path.display()), err))?;
    file.get_tree(tree_name).map_err(|err| {
        map_root_error(&format!("no tree '{tree_name}' in '{}'", path.display()), err)
    })
}

/// What a dry run sees in one file: entry count plus the requested
/// branches the tree does not carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeProbe {
    pub n_events: u64,
    pub missing: Vec<String>,
}

/// Inspect a file without reading any branch data.
pub fn probe(path: &Path, tree_name: &str, request: &BranchRequest) -> Result<TreeProbe> {
    let tree = open_tree(path, tree_name)?;
    let n_events = tree.entries().max(0) as u64;
    let missing = request
        .flags
        .iter()
        .chain(&request.counts)
        .chain(&request.jagged)
        .filter(|name| tree.branch(name.as_str()).is_none())
        .cloned()
        .collect();
    Ok(TreeProbe { n_events, missing })
}

/// Names of all TTrees in a file, in file order.
pub fn tree_names(path: &Path) -> Result<Vec<String>> {
    let file = RootFile::open(path)
        .map_err(|err| map_root_error(&format!("failed to open '{}'", path.display()), err))?;
    Ok(file
        .keys()
        .into_iter()
        .filter(|key| key.class_name() == "TTree")
        .map(|key| key.name().to_string())
        .collect())
}

/// Load the requested branches of one file into an [`EventBatch`].
///
/// A branch absent from the tree yields [`Error::MissingBranch`]; the caller
/// decides whether that drops the file or fails the run.
pub fn load_batch(path: &Path, tree_name: &str, request: &BranchRequest) -> Result<EventBatch> {
    let tree = open_tree(path, tree_name)?;
    let n_events = tree.entries().max(0) as usize;
    debug!(file = %path.display(), n_events, "loading event batch");

    let mut batch = EventBatch::from_columns(n_events, [], [], [])?;
    for name in &request.flags {
        batch.insert_flags(name.clone(), read_flags(&tree, name)?)?;
    }
    for name in &request.counts {
        batch.insert_counts(name.clone(), read_counts(&tree, name)?)?;
    }
    for name in &request.jagged {
        batch.insert_jagged(name.clone(), read_jagged(&tree, name)?)?;
    }
    Ok(batch)
}

fn find_branch<'t>(tree: &'t ReaderTree, name: &str) -> Result<&'t Branch> {
    tree.branch(name).ok_or_else(|| Error::MissingBranch(name.to_string()))
}

/// Per-event boolean flag branch. Integer leaves are accepted as nonzero.
pub fn read_flags(tree: &ReaderTree, name: &str) -> Result<Vec<bool>> {
    let branch = find_branch(tree, name)?;
    let type_name = branch.item_type_name();
    let read_err = |err| map_root_error(&format!("failed to read branch '{name}'"), err);
    match type_name.as_str() {
        "bool" => Ok(branch.as_iter::<bool>().map_err(read_err)?.collect()),
        "int32_t" => Ok(branch.as_iter::<i32>().map_err(read_err)?.map(|v| v != 0).collect()),
        "uint32_t" => Ok(branch.as_iter::<u32>().map_err(read_err)?.map(|v| v != 0).collect()),
        "uint8_t" => Ok(branch.as_iter::<u8>().map_err(read_err)?.map(|v| v != 0).collect()),
        other => Err(Error::Root(format!("branch '{name}' has type '{other}', expected a flag"))),
    }
}

/// Per-event object-count branch.
pub fn read_counts(tree: &ReaderTree, name: &str) -> Result<Vec<u32>> {
    let branch = find_branch(tree, name)?;
    let type_name = branch.item_type_name();
    let read_err = |err| map_root_error(&format!("failed to read branch '{name}'"), err);
    match type_name.as_str() {
        "uint32_t" => Ok(branch.as_iter::<u32>().map_err(read_err)?.collect()),
        "int32_t" => {
            Ok(branch.as_iter::<i32>().map_err(read_err)?.map(|v| v.max(0) as u32).collect())
        }
        "uint8_t" => Ok(branch.as_iter::<u8>().map_err(read_err)?.map(u32::from).collect()),
        other => Err(Error::Root(format!("branch '{name}' has type '{other}', expected a count"))),
    }
}

/// Per-object jagged branch, widened to `f64`.
pub fn read_jagged(tree: &ReaderTree, name: &str) -> Result<JaggedCol> {
    let branch = find_branch(tree, name)?;
    let type_name = branch.item_type_name();
    let read_err = |err| map_root_error(&format!("failed to read branch '{name}'"), err);
    let rows: Vec<Vec<f64>> = match type_name.as_str() {
        "float[]" => branch
            .as_iter::<Slice<f32>>()
            .map_err(read_err)?
            .map(|s| s.into_vec().into_iter().map(f64::from).collect())
            .collect(),
        "double[]" => branch
            .as_iter::<Slice<f64>>()
            .map_err(read_err)?
            .map(Slice::into_vec)
            .collect(),
        "int32_t[]" => branch
            .as_iter::<Slice<i32>>()
            .map_err(read_err)?
            .map(|s| s.into_vec().into_iter().map(f64::from).collect())
            .collect(),
        "vector<float>" => branch
            .as_iter::<Vec<f32>>()
            .map_err(read_err)?
            .map(|v| v.into_iter().map(f64::from).collect())
            .collect(),
        "vector<double>" => branch.as_iter::<Vec<f64>>().map_err(read_err)?.collect(),
        "vector<int32_t>" => branch
            .as_iter::<Vec<i32>>()
            .map_err(read_err)?
            .map(|v| v.into_iter().map(f64::from).collect())
            .collect(),
        other => {
            return Err(Error::Root(format!(
                "branch '{name}' has type '{other}', expected per-object values"
            )));
        }
    };
    Ok(JaggedCol::from_rows(&rows))
}
