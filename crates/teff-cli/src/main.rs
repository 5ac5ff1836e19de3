//! trigeff CLI

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use teff_core::RunConfig;
use teff_core::config::DEFAULT_DATA_DIR;
use teff_nano::reader;
use teff_render::config::PlotConfig;

mod discover;
mod pipeline;

#[derive(Parser)]
#[command(name = "trigeff")]
#[command(about = "trigeff - Trigger b-tagging efficiency curves from NanoAOD")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Efficiency vs b-tag threshold (one point per working point)
    Scan {
        /// Directory scanned recursively for *.root files
        #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
        path: PathBuf,

        /// Run config (YAML); unset fields keep the scan-mode defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for plots
        #[arg(short, long, default_value = "plots")]
        out: PathBuf,

        /// Also write each curve artifact as pretty JSON
        #[arg(long)]
        json: bool,

        /// Write SVG files instead of PNG
        #[arg(long)]
        svg_only: bool,
    },

    /// Efficiency vs leading offline discriminant, in score bins
    Bins {
        /// Directory scanned recursively for *.root files
        #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
        path: PathBuf,

        /// Run config (YAML); unset fields keep the bins-mode defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for plots
        #[arg(short, long, default_value = "efficiencies")]
        out: PathBuf,

        /// Also write each curve artifact as pretty JSON
        #[arg(long)]
        json: bool,

        /// Write SVG files instead of PNG
        #[arg(long)]
        svg_only: bool,
    },

    /// List the *.root files a run would read, with entry counts
    Discover {
        /// Directory scanned recursively for *.root files
        #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
        path: PathBuf,

        /// Run config (YAML); sets the tree and branches probed
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Scan { path, config, out, json, svg_only } => {
            cmd_scan(&path, config.as_ref(), &out, json, svg_only)
        }
        Commands::Bins { path, config, out, json, svg_only } => {
            cmd_bins(&path, config.as_ref(), &out, json, svg_only)
        }
        Commands::Discover { path, config } => cmd_discover(&path, config.as_ref()),
        Commands::Version => {
            println!("trigeff {}", teff_core::VERSION);
            Ok(())
        }
    }
}

fn cmd_scan(
    path: &Path,
    config: Option<&PathBuf>,
    out: &Path,
    json: bool,
    svg_only: bool,
) -> Result<()> {
    let run = resolve_run_config(config, RunConfig::default_scan())?;
    let dataset = load_inputs(path, &run)?;
    let artifacts = pipeline::scan_artifacts(&dataset, &run)?;
    write_outputs(&artifacts, out, json, svg_only)
}

fn cmd_bins(
    path: &Path,
    config: Option<&PathBuf>,
    out: &Path,
    json: bool,
    svg_only: bool,
) -> Result<()> {
    let run = resolve_run_config(config, RunConfig::default_bins())?;
    let dataset = load_inputs(path, &run)?;
    let artifacts = pipeline::binned_artifacts(&dataset, &run)?;
    write_outputs(&artifacts, out, json, svg_only)
}

fn cmd_discover(path: &Path, config: Option<&PathBuf>) -> Result<()> {
    let run = resolve_run_config(config, RunConfig::default_scan())?;
    let request = pipeline::branch_request(&run);
    let files = discover::find_root_files(path)?;
    for f in &files {
        match reader::probe(f, &run.tree, &request) {
            Ok(seen) if seen.missing.is_empty() => {
                println!("{}  {} events", f.display(), seen.n_events);
            }
            Ok(seen) => {
                println!(
                    "{}  {} events  missing: {}",
                    f.display(),
                    seen.n_events,
                    seen.missing.join(", ")
                );
            }
            Err(e) => println!("{}  unreadable: {e}", f.display()),
        }
    }
    tracing::info!(n_files = files.len(), "discovery complete");
    Ok(())
}

fn resolve_run_config(config: Option<&PathBuf>, defaults: RunConfig) -> Result<RunConfig> {
    let run = match config {
        Some(path) => {
            let overlay = teff_core::RunOverlay::from_path(path)
                .with_context(|| format!("load config {}", path.display()))?;
            overlay.apply(defaults)
        }
        None => defaults,
    };
    run.validate()?;
    Ok(run)
}

fn load_inputs(path: &Path, run: &RunConfig) -> Result<pipeline::Dataset> {
    let files = discover::find_root_files(path)?;
    if files.is_empty() {
        bail!("no .root files found under {}", path.display());
    }
    tracing::info!(n_files = files.len(), "discovered input files");
    pipeline::load_dataset(&files, run)
}

fn write_outputs(
    artifacts: &[pipeline::NamedArtifact],
    out: &Path,
    json: bool,
    svg_only: bool,
) -> Result<()> {
    std::fs::create_dir_all(out).with_context(|| format!("create {}", out.display()))?;
    let plot_config = PlotConfig::default();
    let ext = if svg_only { "svg" } else { "png" };

    for named in artifacts {
        let path = out.join(format!("{}.{ext}", named.stem));
        teff_render::render_to_file(&named.artifact, &path, &plot_config)
            .with_context(|| format!("render {}", path.display()))?;
        tracing::info!(path = %path.display(), "wrote plot");

        if json {
            let json_path = out.join(format!("{}.json", named.stem));
            std::fs::write(&json_path, serde_json::to_string_pretty(&named.artifact)?)?;
            tracing::info!(path = %json_path.display(), "wrote artifact");
        }
    }
    Ok(())
}
