use crate::color::Color;

/// Fill and outline for closed shapes (rects, circles).
#[derive(Debug, Clone)]
pub struct ShapeStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self { fill: None, stroke: None, stroke_width: 1.0, opacity: 1.0 }
    }
}

impl ShapeStyle {
    pub fn fill(color: Color) -> Self {
        Self { fill: Some(color), ..Default::default() }
    }

    pub fn outline(color: Color, width: f64) -> Self {
        Self { stroke: Some(color), stroke_width: width, ..Default::default() }
    }
}

/// Stroke for lines. A dash is (on, off) lengths in points.
#[derive(Debug, Clone, Copy)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    pub dash: Option<(f64, f64)>,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::solid(Color::rgb(0, 0, 0), 1.0)
    }
}

impl LineStyle {
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    pub fn dashed(color: Color, width: f64, on: f64, off: f64) -> Self {
        Self { color, width, dash: Some((on, off)) }
    }
}

#[derive(Debug, Clone)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub weight: FontWeight,
    pub slant: FontSlant,
    pub anchor: Anchor,
    pub baseline: Baseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 10.0,
            color: Color::rgb(0, 0, 0),
            weight: FontWeight::Regular,
            slant: FontSlant::Upright,
            anchor: Anchor::Start,
            baseline: Baseline::Alphabetic,
        }
    }
}

impl TextStyle {
    pub fn sized(size: f64) -> Self {
        Self { size, ..Default::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSlant {
    Upright,
    Italic,
}

/// Horizontal text anchoring, as SVG `text-anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn svg_value(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Vertical text anchoring, as SVG `dominant-baseline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Alphabetic,
    Central,
    Hanging,
}

impl Baseline {
    pub fn svg_value(self) -> &'static str {
        match self {
            Baseline::Alphabetic => "auto",
            Baseline::Central => "central",
            Baseline::Hanging => "hanging",
        }
    }
}

/// Data-point marker, drawn as a circle. Open markers get a white core.
#[derive(Debug, Clone, Copy)]
pub struct MarkerStyle {
    pub radius: f64,
    pub color: Color,
    pub open: bool,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self { radius: 3.0, color: Color::rgb(0, 0, 0), open: false }
    }
}
