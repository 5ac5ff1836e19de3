//! Efficiency-curve plot rendering.
//!
//! Curves arrive as a plot-ready [`EfficiencyCurveArtifact`]; rendering
//! produces an SVG string, rasterized to PNG with `resvg` when the `png`
//! feature (on by default) is enabled.

pub mod canvas;
pub mod color;
pub mod config;
pub mod header;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;
pub mod text;

use config::PlotConfig;
use teff_stats::EfficiencyCurveArtifact;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("bad plot config: {0}")]
    Config(String),
    #[error("unsupported output format {0:?}")]
    Format(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "png")]
    #[error("png export failed: {0}")]
    Png(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Render an efficiency artifact to an SVG string.
pub fn render_svg(artifact: &EfficiencyCurveArtifact, config: &PlotConfig) -> Result<String> {
    plots::efficiency::render(artifact, config)
}

/// Render an efficiency artifact to encoded bytes in the requested format.
pub fn render_to_bytes(
    artifact: &EfficiencyCurveArtifact,
    format: &str,
    config: &PlotConfig,
) -> Result<Vec<u8>> {
    let svg = render_svg(artifact, config)?;
    match format {
        "svg" => Ok(svg.into_bytes()),
        #[cfg(feature = "png")]
        "png" => output::png::svg_to_png(&svg, config.output.dpi),
        other => Err(RenderError::Format(other.to_string())),
    }
}

/// Render an efficiency artifact to a file (format inferred from extension).
pub fn render_to_file(
    artifact: &EfficiencyCurveArtifact,
    path: &std::path::Path,
    config: &PlotConfig,
) -> Result<()> {
    let format = path.extension().and_then(|e| e.to_str()).unwrap_or("svg");
    let bytes = render_to_bytes(artifact, format, config)?;
    Ok(std::fs::write(path, bytes)?)
}
