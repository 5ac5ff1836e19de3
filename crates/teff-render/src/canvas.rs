use std::fmt::Write;

use crate::color::Color;
use crate::primitives::*;
use crate::text::{TextMetrics, measure_styled};

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";

/// Streaming SVG canvas: every draw call appends markup to the body,
/// so element order on screen is call order. Coordinates in points
/// (1pt = 1/72").
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    body: String,
    defs: Vec<String>,
    open_clips: usize,
    next_clip: usize,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::with_capacity(16 * 1024),
            defs: Vec::new(),
            open_clips: 0,
            next_clip: 0,
        }
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &ShapeStyle) {
        write!(self.body, r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}""#)
            .unwrap();
        shape_attrs(&mut self.body, style);
        self.body.push_str(" />\n");
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &LineStyle) {
        write!(self.body, r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}""#)
            .unwrap();
        line_attrs(&mut self.body, style);
        self.body.push_str(" />\n");
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &ShapeStyle) {
        write!(self.body, r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}""#).unwrap();
        shape_attrs(&mut self.body, style);
        self.body.push_str(" />\n");
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, style: &TextStyle) {
        self.text_element(x, y, content, style, None);
    }

    pub fn text_rotated(&mut self, x: f64, y: f64, content: &str, style: &TextStyle, angle: f64) {
        self.text_element(x, y, content, style, Some(angle));
    }

    fn text_element(
        &mut self,
        x: f64,
        y: f64,
        content: &str,
        style: &TextStyle,
        rotate: Option<f64>,
    ) {
        let out = &mut self.body;
        write!(out, r#"<text x="{x:.2}" y="{y:.2}""#).unwrap();
        write!(out, r#" font-family="{FONT_FAMILY}" font-size="{:.1}""#, style.size).unwrap();
        write!(out, r#" fill="{}""#, style.color).unwrap();
        write!(out, r#" text-anchor="{}""#, style.anchor.svg_value()).unwrap();
        write!(out, r#" dominant-baseline="{}""#, style.baseline.svg_value()).unwrap();
        if style.weight == FontWeight::Bold {
            out.push_str(r#" font-weight="bold""#);
        }
        if style.slant == FontSlant::Italic {
            out.push_str(r#" font-style="italic""#);
        }
        if let Some(angle) = rotate {
            write!(out, r#" transform="rotate({angle:.1},{x:.2},{y:.2})""#).unwrap();
        }
        out.push('>');
        xml_escape(out, content);
        out.push_str("</text>\n");
    }

    /// Error bar: vertical line plus horizontal caps when `cap_width > 0`.
    pub fn error_bar(&mut self, x: f64, y_lo: f64, y_hi: f64, cap_width: f64, style: &LineStyle) {
        self.line(x, y_lo, x, y_hi, style);
        if cap_width > 0.0 {
            let half = 0.5 * cap_width;
            self.line(x - half, y_lo, x + half, y_lo, style);
            self.line(x - half, y_hi, x + half, y_hi, style);
        }
    }

    /// Data marker. Open markers keep a white core with a colored rim.
    pub fn marker(&mut self, x: f64, y: f64, marker: &MarkerStyle) {
        let style = if marker.open {
            ShapeStyle {
                fill: Some(Color::rgb(255, 255, 255)),
                ..ShapeStyle::outline(marker.color, 1.0)
            }
        } else {
            ShapeStyle {
                stroke: Some(marker.color),
                stroke_width: 0.5,
                ..ShapeStyle::fill(marker.color)
            }
        };
        self.circle(x, y, marker.radius, &style);
    }

    /// Open a clipped group; drawing until the matching [`Self::pop_clip`]
    /// is confined to the rectangle.
    pub fn push_clip(&mut self, x: f64, y: f64, w: f64, h: f64) -> String {
        let id = format!("clip{}", self.next_clip);
        self.next_clip += 1;
        let mut def = format!(r#"<clipPath id="{id}">"#);
        write!(def, r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" />"#).unwrap();
        def.push_str("</clipPath>");
        self.defs.push(def);
        writeln!(self.body, r#"<g clip-path="url(#{id})">"#).unwrap();
        self.open_clips += 1;
        id
    }

    pub fn pop_clip(&mut self) {
        if self.open_clips > 0 {
            self.open_clips -= 1;
            self.body.push_str("</g>\n");
        }
    }

    pub fn measure_text(&self, content: &str, style: &TextStyle) -> TextMetrics {
        measure_styled(content, style)
    }

    pub fn finish_svg(&self) -> String {
        let (w, h) = (self.width, self.height);
        let mut out = String::with_capacity(self.body.len() + 1024);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )
        .unwrap();

        if !self.defs.is_empty() {
            writeln!(out, "<defs>\n{}\n</defs>", self.defs.join("\n")).unwrap();
        }

        writeln!(out, r#"<rect width="{w}" height="{h}" fill="white" />"#).unwrap();

        out.push_str(&self.body);
        for _ in 0..self.open_clips {
            out.push_str("</g>\n");
        }
        out.push_str("</svg>\n");
        out
    }
}

fn shape_attrs(out: &mut String, style: &ShapeStyle) {
    match &style.fill {
        Some(fill) => write!(out, r#" fill="{fill}""#).unwrap(),
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(stroke) = &style.stroke {
        write!(out, r#" stroke="{stroke}" stroke-width="{:.2}""#, style.stroke_width).unwrap();
    }
    if (style.opacity - 1.0).abs() > 1e-4 {
        write!(out, r#" opacity="{:.3}""#, style.opacity).unwrap();
    }
}

fn line_attrs(out: &mut String, style: &LineStyle) {
    write!(out, r#" stroke="{}" stroke-width="{:.2}""#, style.color, style.width).unwrap();
    if let Some((on, off)) = style.dash {
        write!(out, r#" stroke-dasharray="{on:.0} {off:.0}""#).unwrap();
    }
}

fn xml_escape(out: &mut String, content: &str) {
    for ch in content.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
