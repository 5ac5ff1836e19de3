use crate::canvas::Canvas;
use crate::config::PlotConfig;
use crate::layout::axes::Axis;
use crate::primitives::TextStyle;

/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

const EDGE_PAD: f64 = 15.0;
const MIN_EXTENT: f64 = 50.0;

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Size the data region so tick labels, axis labels, and the header
    /// all fit around it.
    pub fn auto(canvas: &Canvas, y_axis: &Axis, x_axis: &Axis, config: &PlotConfig) -> Self {
        let tick_style = TextStyle::sized(config.font.tick_size);
        let label_room = config.font.label_size + 6.0;

        let widest_y_tick = y_axis
            .tick_labels
            .iter()
            .map(|l| canvas.measure_text(l, &tick_style).width)
            .fold(0.0_f64, f64::max);
        let mut left = EDGE_PAD + widest_y_tick + 8.0;
        if !y_axis.label.is_empty() {
            left += label_room;
        }

        let mut bottom = EDGE_PAD + config.font.tick_size + 6.0;
        if !x_axis.label.is_empty() {
            bottom += label_room;
        }

        let top = if config.experiment.name.is_empty() {
            12.0
        } else {
            config.font.label_size * 1.3 + 20.0
        };

        let width = canvas.width - left - EDGE_PAD;
        let height = canvas.height - top - bottom;
        Self { left, top, width: width.max(MIN_EXTENT), height: height.max(MIN_EXTENT) }
    }
}
