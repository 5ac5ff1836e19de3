use serde::Deserialize;

use crate::color::Color;

// 15 x 10 inch page at 72 pt per inch
const PAGE_W_PT: f64 = 15.0 * 72.0;
const PAGE_H_PT: f64 = 10.0 * 72.0;

/// Top-level plot configuration (YAML or programmatic).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub figure: FigureConfig,
    pub font: FontConfig,
    pub axes: AxesConfig,
    pub grid: GridConfig,
    pub experiment: ExperimentConfig,
    pub markers: MarkerConfig,
    pub palette: PaletteConfig,
    pub output: OutputConfig,
}

impl PlotConfig {
    pub fn palette_colors(&self) -> Vec<Color> {
        crate::color::palette_colors(&self.palette.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self { width: PAGE_W_PT, height: PAGE_H_PT }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub size: f64,
    pub label_size: f64,
    pub tick_size: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self { size: 13.0, label_size: 15.0, tick_size: 11.0 }
    }
}

/// Which way the frame ticks point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub direction: TickDirection,
    /// Repeat the ticks on the top and right frame edges.
    pub mirror: bool,
    pub major_length: f64,
    pub minor_length: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self { direction: TickDirection::In, mirror: true, major_length: 5.0, minor_length: 3.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub show: bool,
    pub color: Color,
    pub alpha: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { show: true, color: Color::rgb(180, 180, 180), alpha: 0.6 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub name: String,
    pub status: String,
    pub sqrt_s_tev: f64,
    pub lumi_fb_inv: f64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            name: "CMS".into(),
            status: "Preliminary".into(),
            sqrt_s_tev: 13.6,
            lumi_fb_inv: 0.0,
        }
    }
}

/// Data point styling shared by every curve on a plot.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub size: f64,
    pub cap_width: f64,
    pub line_width: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self { size: 3.5, cap_width: 4.0, line_width: 1.2 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub name: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self { name: "cms_petroff6".into() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: String,
    pub dpi: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: "png".into(), dpi: 100 }
    }
}

/// Parse an optional YAML fragment on top of the defaults.
pub fn resolve_config(user_yaml: Option<&str>) -> crate::Result<PlotConfig> {
    user_yaml
        .map(|yaml| {
            serde_yaml_ng::from_str(yaml).map_err(|e| crate::RenderError::Config(e.to_string()))
        })
        .transpose()
        .map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = PlotConfig::default();
        assert_eq!(c.experiment.name, "CMS");
        assert_eq!(c.palette.name, "cms_petroff6");
        assert!((c.figure.width - 1080.0).abs() < 1e-9);
        assert_eq!(c.axes.direction, TickDirection::In);
        assert_eq!(c.palette_colors().len(), 6);
    }

    #[test]
    fn yaml_overrides() {
        let yaml = r#"
figure:
  width: 600
axes:
  direction: out
experiment:
  status: "Work in Progress"
grid:
  show: false
"#;
        let c = resolve_config(Some(yaml)).unwrap();
        assert!((c.figure.width - 600.0).abs() < 1e-9);
        // Untouched sections keep their defaults
        assert!((c.figure.height - 720.0).abs() < 1e-9);
        assert_eq!(c.axes.direction, TickDirection::Out);
        assert_eq!(c.experiment.status, "Work in Progress");
        assert!(!c.grid.show);
    }

    #[test]
    fn bad_yaml_is_a_config_error() {
        let err = resolve_config(Some("figure: [not, a, map]")).unwrap_err();
        assert!(matches!(err, crate::RenderError::Config(_)));
    }
}
