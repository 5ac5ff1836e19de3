use teff_stats::EfficiencyCurveArtifact;

use crate::canvas::Canvas;
use crate::config::PlotConfig;
use crate::header::draw_experiment_header;
use crate::layout::axes::Axis;
use crate::layout::legend::{self, LegendEntry};
use crate::layout::margins::PlotArea;
use crate::plots::axes_draw::draw_axes;
use crate::primitives::*;

/// Render one or more efficiency curves onto a shared unit frame.
///
/// Undefined points (empty denominator) are skipped. Curves keep their
/// artifact order, which also fixes their palette colors.
pub fn render(artifact: &EfficiencyCurveArtifact, config: &PlotConfig) -> crate::Result<String> {
    let has_points = artifact.curves.iter().any(|c| c.defined_points().next().is_some());
    if !has_points {
        return Ok(empty_svg());
    }

    let mut canvas = Canvas::new(config.figure.width, config.figure.height);

    // The frame stays at the unit square unless data reaches past it
    // (custom binning ranges).
    let mut x_lo: f64 = 0.0;
    let mut x_hi: f64 = 1.0;
    for curve in &artifact.curves {
        for p in &curve.points {
            x_lo = x_lo.min(p.x);
            x_hi = x_hi.max(p.x);
        }
    }
    let x_axis = Axis::linear(x_lo, x_hi, 11).with_label(artifact.x_label.as_str());
    let y_axis = Axis::linear(0.0, 1.0, 11).with_label(artifact.y_label.as_str());

    let area = PlotArea::auto(&canvas, &y_axis, &x_axis, config);
    draw_experiment_header(&mut canvas, &area, config);
    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    let palette = config.palette_colors();
    let _clip = canvas.push_clip(area.left, area.top, area.width, area.height);

    for (i, curve) in artifact.curves.iter().enumerate() {
        let color = palette[i % palette.len()];
        let bar_style = LineStyle::solid(color, config.markers.line_width);
        let marker = MarkerStyle { radius: config.markers.size, color, open: false };

        for point in &curve.points {
            let Some(value) = point.value else { continue };
            let px = x_axis.to_px(point.x, area.left, area.right());
            let py = y_axis.to_px(value, area.bottom(), area.top);
            let py_lo = y_axis.to_px(value - point.err_low, area.bottom(), area.top);
            let py_hi = y_axis.to_px(value + point.err_high, area.bottom(), area.top);
            canvas.error_bar(px, py_lo, py_hi, config.markers.cap_width, &bar_style);
            canvas.marker(px, py, &marker);
        }
    }

    canvas.pop_clip();

    let entries: Vec<LegendEntry> = artifact
        .curves
        .iter()
        .enumerate()
        .map(|(i, c)| LegendEntry { label: c.name.clone(), color: palette[i % palette.len()] })
        .collect();
    legend::draw_legend(&mut canvas, &area, &entries, config.font.size, true);

    Ok(canvas.finish_svg())
}

fn empty_svg() -> String {
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><text x="10" y="30">No efficiency data</text></svg>"#.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use teff_stats::{EfficiencyCurve, EfficiencyPoint};

    fn point(x: f64, passing: u64, total: u64) -> EfficiencyPoint {
        EfficiencyPoint::from_counts(x, passing, total, 0.32).unwrap()
    }

    fn artifact(curves: Vec<EfficiencyCurve>) -> EfficiencyCurveArtifact {
        EfficiencyCurveArtifact::new(curves)
    }

    #[test]
    fn single_curve_draws_markers_and_error_bars() {
        let curve = EfficiencyCurve::new(
            "ttbar offline DeepJet",
            vec![point(0.1, 80, 100), point(0.5, 40, 100), point(0.9, 5, 100)],
        );
        let svg = render(&artifact(vec![curve]), &PlotConfig::default()).unwrap();
        // 3 data markers + 1 legend swatch
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains("ttbar offline DeepJet"));
        assert!(svg.contains("offline b-jet value"));
        assert!(svg.contains("N_passing / N_total"));
    }

    #[test]
    fn undefined_points_are_skipped() {
        let curve = EfficiencyCurve::new(
            "qcd offline DeepCSV",
            vec![point(0.25, 3, 10), point(0.75, 0, 0)],
        );
        let svg = render(&artifact(vec![curve]), &PlotConfig::default()).unwrap();
        // 1 defined marker + 1 legend swatch
        assert_eq!(svg.matches("<circle").count(), 2);
    }

    #[test]
    fn multi_curve_gets_distinct_colors_and_legend_rows() {
        let a = EfficiencyCurve::new("ttbar offline DeepJet", vec![point(0.2, 9, 10)]);
        let b = EfficiencyCurve::new("ttbar offline DeepCSV", vec![point(0.2, 7, 10)]);
        let svg = render(&artifact(vec![a, b]), &PlotConfig::default()).unwrap();
        assert!(svg.contains("ttbar offline DeepJet"));
        assert!(svg.contains("ttbar offline DeepCSV"));
        assert!(svg.contains("#5790fc"));
        assert!(svg.contains("#f89c20"));
    }

    #[test]
    fn all_undefined_yields_placeholder() {
        let curve = EfficiencyCurve::new("empty", vec![point(0.5, 0, 0)]);
        let svg = render(&artifact(vec![curve]), &PlotConfig::default()).unwrap();
        assert!(svg.contains("No efficiency data"));
    }

    #[test]
    fn experiment_header_is_present() {
        let curve = EfficiencyCurve::new("ttbar offline DeepJet", vec![point(0.4, 1, 2)]);
        let svg = render(&artifact(vec![curve]), &PlotConfig::default()).unwrap();
        assert!(svg.contains(">CMS</text>"));
        assert!(svg.contains("Preliminary"));
    }
}
