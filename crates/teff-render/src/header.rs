use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::PlotConfig;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Experiment label above the frame (e.g. **CMS** *Preliminary*, √s = 13.6 TeV).
pub fn draw_experiment_header(canvas: &mut Canvas, area: &PlotArea, config: &PlotConfig) {
    let experiment = &config.experiment;
    if experiment.name.is_empty() {
        return;
    }

    let size = config.font.label_size * 1.3;
    let x = area.left + area.width * 0.02;
    let y = area.top - 6.0;

    let name_style = TextStyle { weight: FontWeight::Bold, ..TextStyle::sized(size) };
    canvas.text(x, y, &experiment.name, &name_style);

    if !experiment.status.is_empty() {
        let status_style =
            TextStyle { slant: FontSlant::Italic, ..TextStyle::sized(size * 0.85) };
        let name_w = canvas.measure_text(&experiment.name, &name_style).width;
        canvas.text(x + name_w + 5.0, y, &experiment.status, &status_style);
    }

    let mut conditions = Vec::new();
    if experiment.sqrt_s_tev > 0.0 {
        conditions.push(format!("\u{221A}s = {} TeV", experiment.sqrt_s_tev));
    }
    if experiment.lumi_fb_inv > 0.0 {
        conditions.push(format!("{} fb\u{207B}\u{00B9}", experiment.lumi_fb_inv));
    }
    if !conditions.is_empty() {
        let conditions_style = TextStyle {
            color: Color::rgb(80, 80, 80),
            anchor: Anchor::End,
            ..TextStyle::sized(config.font.tick_size)
        };
        canvas.text(area.right(), y, &conditions.join(", "), &conditions_style);
    }
}
