//! Directory-level efficiency aggregation.
//!
//! Reads every usable file once, evaluates the base selections and trigger
//! flags per file, and concatenates the results so curves are computed over
//! the whole dataset. Files missing a requested branch are skipped with a
//! warning; anything else aborts the run.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, warn};

use teff_core::{Error, RunConfig};
use teff_nano::reader;
use teff_nano::{BranchRequest, JaggedCol};
use teff_select::{build_registry, reduce_and};
use teff_stats::{EfficiencyCurve, EfficiencyCurveArtifact, binned_curve, scan_curve};

/// Event-level inputs for curve building, concatenated across files.
///
/// Column order follows the run config, so output files come out in a
/// stable, predictable order.
pub struct Dataset {
    pub n_events: usize,
    pub n_files: usize,
    pub(crate) selections: Vec<(String, Vec<bool>)>,
    pub(crate) analysis: Vec<(String, Vec<bool>)>,
    pub(crate) scores: Vec<(String, JaggedCol)>,
}

impl Dataset {
    fn analysis(&self, path: &str) -> Result<&[bool]> {
        lookup(&self.analysis, "analysis path", path).map(Vec::as_slice)
    }

    fn scores(&self, branch: &str) -> Result<&JaggedCol> {
        lookup(&self.scores, "tagger branch", branch)
    }
}

fn lookup<'a, T>(list: &'a [(String, T)], kind: &str, name: &str) -> Result<&'a T> {
    list.iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v)
        .with_context(|| format!("{kind} '{name}' missing from dataset"))
}

/// A plot-ready artifact plus the file stem it is written under.
#[derive(Debug)]
pub struct NamedArtifact {
    pub stem: String,
    pub artifact: EfficiencyCurveArtifact,
}

/// Every branch a run reads: selection inputs, analysis-path flags, and
/// the tagger score columns.
pub fn branch_request(run: &RunConfig) -> BranchRequest {
    let mut request = BranchRequest::default();
    for sel in &build_registry(&run.base_selections) {
        request.merge(&sel.branches());
    }
    for path in &run.analysis_paths {
        request.push_unique_flag(path.clone());
    }
    for tagger in &run.taggers {
        request.push_unique_jagged(tagger.branch.clone());
    }
    request
}

/// Load and concatenate every file, skipping files that lack a branch.
pub fn load_dataset(files: &[PathBuf], run: &RunConfig) -> Result<Dataset> {
    let registry = build_registry(&run.base_selections);
    let request = branch_request(run);

    let mut selections: Vec<(String, Vec<bool>)> =
        registry.iter().map(|s| (s.name.clone(), Vec::new())).collect();
    let mut analysis: Vec<(String, Vec<bool>)> =
        run.analysis_paths.iter().map(|p| (p.clone(), Vec::new())).collect();
    let mut scores: Vec<(String, JaggedCol)> =
        run.taggers.iter().map(|t| (t.branch.clone(), JaggedCol::empty(0))).collect();

    let mut n_events = 0usize;
    let mut n_files = 0usize;

    for file in files {
        let batch = match reader::load_batch(file, &run.tree, &request) {
            Ok(batch) => batch,
            Err(Error::MissingBranch(branch)) => {
                warn!(file = %file.display(), branch = %branch, "missing branch, skipping file");
                continue;
            }
            Err(e) => return Err(e).with_context(|| format!("read {}", file.display())),
        };

        // Evaluate everything before extending, so a failing file leaves the
        // accumulated columns untouched.
        let mut file_selections = Vec::with_capacity(registry.len());
        for sel in &registry {
            file_selections
                .push(sel.evaluate(&batch).with_context(|| format!("read {}", file.display()))?);
        }
        let file_flags: Vec<&[bool]> = analysis
            .iter()
            .map(|(path, _)| batch.flags(path))
            .collect::<teff_core::Result<_>>()?;
        let file_scores: Vec<&JaggedCol> = scores
            .iter()
            .map(|(branch, _)| batch.jagged(branch))
            .collect::<teff_core::Result<_>>()?;

        for ((_, dst), src) in selections.iter_mut().zip(file_selections) {
            dst.extend(src);
        }
        for ((_, dst), src) in analysis.iter_mut().zip(file_flags) {
            dst.extend_from_slice(src);
        }
        for ((_, dst), src) in scores.iter_mut().zip(file_scores) {
            dst.append(src);
        }

        n_events += batch.n_events();
        n_files += 1;
        debug!(file = %file.display(), events = batch.n_events(), "loaded file");
    }

    if n_files == 0 {
        bail!("no usable ROOT files: every input was missing a requested branch");
    }

    info!(n_files, n_events, "dataset assembled");
    Ok(Dataset { n_events, n_files, selections, analysis, scores })
}

/// Scan mode: one single-curve artifact per (path, selection, tagger), plus
/// a combined artifact holding every curve.
pub fn scan_artifacts(dataset: &Dataset, run: &RunConfig) -> Result<Vec<NamedArtifact>> {
    let thresholds = run.thresholds.values();
    let multi_path = run.analysis_paths.len() > 1;

    let mut artifacts = Vec::new();
    let mut all_curves: Vec<EfficiencyCurve> = Vec::new();

    for path in &run.analysis_paths {
        let analysis = dataset.analysis(path)?;
        for (sel_name, base) in &dataset.selections {
            for tagger in &run.taggers {
                let scores = dataset.scores(&tagger.branch)?;
                let label = tagger.display();
                let (name, stem) = if multi_path {
                    (
                        format!("{path}_{sel_name}_{label}"),
                        format!("efficiencies_{path}__{sel_name}__{label}"),
                    )
                } else {
                    (format!("{sel_name}_{label}"), format!("efficiencies_{sel_name}__{label}"))
                };
                let curve = scan_curve(name, scores, analysis, base, &thresholds, run.alpha)?;
                all_curves.push(curve.clone());
                let artifact = EfficiencyCurveArtifact::new(vec![curve]);
                artifacts.push(NamedArtifact { stem, artifact });
            }
        }
    }

    artifacts.push(NamedArtifact {
        stem: "efficiencies_all".into(),
        artifact: EfficiencyCurveArtifact::new(all_curves),
    });
    Ok(artifacts)
}

/// Binned mode: the denominator conditions on the conjunction of every base
/// selection; one artifact per (path, tagger), plus the combined artifact.
pub fn binned_artifacts(dataset: &Dataset, run: &RunConfig) -> Result<Vec<NamedArtifact>> {
    let bins = run.bins.bins();
    let multi_path = run.analysis_paths.len() > 1;

    let masks: Vec<&[bool]> = dataset.selections.iter().map(|(_, m)| m.as_slice()).collect();
    let base = reduce_and(&masks)?;

    let mut artifacts = Vec::new();
    let mut all_curves: Vec<EfficiencyCurve> = Vec::new();

    for path in &run.analysis_paths {
        let analysis = dataset.analysis(path)?;
        for tagger in &run.taggers {
            let scores = dataset.scores(&tagger.branch)?;
            let label = tagger.display();
            let name = if multi_path { format!("{path}_{label}") } else { label.to_string() };
            let stem = format!("efficiencies_{path}__{label}");
            let curve =
                binned_curve(name, scores, analysis, &base, &bins, run.loose_wp, run.alpha)?;
            all_curves.push(curve.clone());
            artifacts
                .push(NamedArtifact { stem, artifact: EfficiencyCurveArtifact::new(vec![curve]) });
        }
    }

    artifacts.push(NamedArtifact {
        stem: "efficiencies_all".into(),
        artifact: EfficiencyCurveArtifact::new(all_curves),
    });
    Ok(artifacts)
}
