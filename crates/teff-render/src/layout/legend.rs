use crate::canvas::Canvas;
use crate::color::Color;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

const SWATCH_WIDTH: f64 = 14.0;
const PADDING: f64 = 6.0;

/// Legend box in the top-right corner of the plot area, one marker
/// swatch and label per entry.
pub fn draw_legend(
    canvas: &mut Canvas,
    area: &PlotArea,
    entries: &[LegendEntry],
    font_size: f64,
    frame: bool,
) {
    if entries.is_empty() {
        return;
    }

    let row_height = font_size + 4.0;
    let text_style = TextStyle {
        size: font_size * 0.85,
        baseline: Baseline::Central,
        ..Default::default()
    };

    let widest_label = entries
        .iter()
        .map(|e| canvas.measure_text(&e.label, &text_style).width)
        .fold(0.0_f64, f64::max);
    let box_w = PADDING + SWATCH_WIDTH + 6.0 + widest_label + PADDING;
    let box_h = 2.0 * PADDING + entries.len() as f64 * row_height;
    let box_x = area.right() - box_w - 5.0;
    let box_y = area.top + 5.0;

    let background = ShapeStyle {
        fill: Some(Color::rgb(255, 255, 255).with_alpha(0.9)),
        stroke: frame.then(|| Color::rgb(200, 200, 200)),
        stroke_width: 0.5,
        opacity: 1.0,
    };
    canvas.rect(box_x, box_y, box_w, box_h, &background);

    for (i, entry) in entries.iter().enumerate() {
        let row_mid = box_y + PADDING + (i as f64 + 0.5) * row_height;
        let swatch_x = box_x + PADDING + SWATCH_WIDTH / 2.0;
        canvas.marker(swatch_x, row_mid, &MarkerStyle { color: entry.color, ..Default::default() });
        canvas.text(box_x + PADDING + SWATCH_WIDTH + 6.0, row_mid, &entry.label, &text_style);
    }
}
