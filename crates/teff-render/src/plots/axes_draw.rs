use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::{PlotConfig, TickDirection};
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

const FRAME_COLOR: Color = Color::rgb(0, 0, 0);

/// Boxed frame with grid, major/minor ticks, and axis labels.
pub fn draw_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    config: &PlotConfig,
) {
    if config.grid.show {
        draw_grid(canvas, area, x_axis, y_axis, config);
    }
    draw_frame(canvas, area);
    draw_x_ticks(canvas, area, x_axis, config);
    draw_y_ticks(canvas, area, y_axis, config);
    draw_axis_labels(canvas, area, x_axis, y_axis, config);
}

fn draw_grid(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    config: &PlotConfig,
) {
    let style = LineStyle {
        dash: Some((3.0, 3.0)),
        ..LineStyle::solid(config.grid.color.with_alpha(config.grid.alpha), 0.5)
    };
    for &v in &x_axis.tick_positions {
        let px = x_axis.to_px(v, area.left, area.right());
        if inside(px, area.left, area.right()) {
            canvas.line(px, area.top, px, area.bottom(), &style);
        }
    }
    for &v in &y_axis.tick_positions {
        let py = y_axis.to_px(v, area.bottom(), area.top);
        if inside(py, area.top, area.bottom()) {
            canvas.line(area.left, py, area.right(), py, &style);
        }
    }
}

fn draw_frame(canvas: &mut Canvas, area: &PlotArea) {
    let style = LineStyle::solid(FRAME_COLOR, 0.8);
    canvas.line(area.left, area.top, area.right(), area.top, &style);
    canvas.line(area.left, area.bottom(), area.right(), area.bottom(), &style);
    canvas.line(area.left, area.top, area.left, area.bottom(), &style);
    canvas.line(area.right(), area.top, area.right(), area.bottom(), &style);
}

fn draw_x_ticks(canvas: &mut Canvas, area: &PlotArea, axis: &Axis, config: &PlotConfig) {
    let major = LineStyle::solid(FRAME_COLOR, 0.6);
    let minor = LineStyle::solid(FRAME_COLOR, 0.4);
    let inward = config.axes.direction == TickDirection::In;
    // Inward ticks extend into the data region, outward ones away from it
    let dir = if inward { -1.0 } else { 1.0 };
    let len = config.axes.major_length;

    let label_style = TextStyle {
        anchor: Anchor::Middle,
        baseline: Baseline::Hanging,
        ..TextStyle::sized(config.font.tick_size)
    };
    let label_y = if inward { area.bottom() + 3.0 } else { area.bottom() + len + 3.0 };

    for (i, &v) in axis.tick_positions.iter().enumerate() {
        let px = axis.to_px(v, area.left, area.right());
        if !inside(px, area.left, area.right()) {
            continue;
        }
        canvas.line(px, area.bottom(), px, area.bottom() + dir * len, &major);
        if config.axes.mirror {
            canvas.line(px, area.top, px, area.top - dir * len, &major);
        }
        if let Some(label) = axis.tick_labels.get(i) {
            canvas.text(px, label_y, label, &label_style);
        }
    }

    let minor_len = config.axes.minor_length;
    for &v in &axis.minor_ticks {
        let px = axis.to_px(v, area.left, area.right());
        if inside(px, area.left, area.right()) {
            canvas.line(px, area.bottom(), px, area.bottom() + dir * minor_len, &minor);
        }
    }
}

fn draw_y_ticks(canvas: &mut Canvas, area: &PlotArea, axis: &Axis, config: &PlotConfig) {
    let major = LineStyle::solid(FRAME_COLOR, 0.6);
    let minor = LineStyle::solid(FRAME_COLOR, 0.4);
    let inward = config.axes.direction == TickDirection::In;
    let dir = if inward { 1.0 } else { -1.0 };
    let len = config.axes.major_length;

    let label_style = TextStyle {
        anchor: Anchor::End,
        baseline: Baseline::Central,
        ..TextStyle::sized(config.font.tick_size)
    };
    let label_x = if inward { area.left - 4.0 } else { area.left - len - 4.0 };

    for (i, &v) in axis.tick_positions.iter().enumerate() {
        let py = axis.to_px(v, area.bottom(), area.top);
        if !inside(py, area.top, area.bottom()) {
            continue;
        }
        canvas.line(area.left, py, area.left + dir * len, py, &major);
        if config.axes.mirror {
            canvas.line(area.right(), py, area.right() - dir * len, py, &major);
        }
        if let Some(label) = axis.tick_labels.get(i) {
            canvas.text(label_x, py, label, &label_style);
        }
    }

    let minor_len = config.axes.minor_length;
    for &v in &axis.minor_ticks {
        let py = axis.to_px(v, area.bottom(), area.top);
        if inside(py, area.top, area.bottom()) {
            canvas.line(area.left, py, area.left + dir * minor_len, py, &minor);
        }
    }
}

fn draw_axis_labels(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    config: &PlotConfig,
) {
    let style = TextStyle { anchor: Anchor::Middle, ..TextStyle::sized(config.font.label_size) };
    let inward = config.axes.direction == TickDirection::In;

    if !x_axis.label.is_empty() {
        let mut y = area.bottom() + config.font.tick_size + 14.0;
        if !inward {
            y += config.axes.major_length;
        }
        canvas.text(area.left + area.width / 2.0, y, &x_axis.label, &style);
    }
    if !y_axis.label.is_empty() {
        let mid = area.top + area.height / 2.0;
        canvas.text_rotated(area.left - 40.0, mid, &y_axis.label, &style, -90.0);
    }
}

fn inside(px: f64, lo: f64, hi: f64) -> bool {
    px >= lo - 0.5 && px <= hi + 0.5
}
