use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

fn channel(hex: &str, at: usize) -> u8 {
    hex.get(at..at + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()).unwrap_or(0)
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rrggbb` (or `rrggbb`); malformed channels read as zero.
    pub fn hex(s: &str) -> Self {
        let digits = s.strip_prefix('#').unwrap_or(s);
        Self::rgb(channel(digits, 0), channel(digits, 2), channel(digits, 4))
    }

    pub const fn with_alpha(mut self, a: f64) -> Self {
        self.a = a;
        self
    }

    /// CSS color string: `#rrggbb`, or `rgba(..)` when translucent.
    pub fn css(&self) -> String {
        let Self { r, g, b, a } = *self;
        if (a - 1.0).abs() < 1e-6 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("rgba({r}, {g}, {b}, {a:.3})")
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(|s| Color::hex(&s))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

pub const CMS_PETROFF6: &[&str] =
    &["#5790fc", "#f89c20", "#e42536", "#964a8b", "#9c9ca1", "#7a21dd"];

pub const TABLEAU10: &[&str] = &[
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// Look up a palette by name; unknown names fall back to the CMS set.
pub fn palette_colors(name: &str) -> Vec<Color> {
    let table = match name {
        "tableau10" => TABLEAU10,
        _ => CMS_PETROFF6,
    };
    table.iter().copied().map(Color::hex).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        let c = Color::hex("#F89C20");
        assert_eq!((c.r, c.g, c.b), (0xF8, 0x9C, 0x20));
        assert!((c.a - 1.0).abs() < 1e-9);
    }

    #[test]
    fn short_hex_reads_as_black_tail() {
        let c = Color::hex("#ff");
        assert_eq!((c.r, c.g, c.b), (0xFF, 0, 0));
    }

    #[test]
    fn css_opaque() {
        assert_eq!(Color::rgb(87, 144, 252).css(), "#5790fc");
    }

    #[test]
    fn css_alpha() {
        assert_eq!(Color::rgb(87, 144, 252).with_alpha(0.5).css(), "rgba(87, 144, 252, 0.500)");
    }

    #[test]
    fn palette_lookup() {
        assert_eq!(palette_colors("cms_petroff6").len(), 6);
        assert_eq!(palette_colors("tableau10").len(), 10);
        assert_eq!(palette_colors("nonsense").len(), 6);
    }
}
