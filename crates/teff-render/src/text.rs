use crate::primitives::{FontWeight, TextStyle};

#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

// Vertical metrics of a DejaVu-class sans face, in em units. The renderer
// substitutes whatever sans-serif the host has, so these only need to be
// close enough for margin and legend sizing.
const ASCENT_EM: f64 = 0.93;
const DESCENT_EM: f64 = 0.24;
const BOLD_FACTOR: f64 = 1.03;

fn char_advance_em(ch: char) -> f64 {
    match ch {
        ' ' => 0.28,
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.24,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '/' | '\\' | '-' => 0.34,
        'm' | 'w' | 'M' | 'W' | '@' => 0.88,
        '_' | '=' | '+' | '<' | '>' | '~' => 0.6,
        'A'..='Z' => 0.68,
        '0'..='9' => 0.58,
        _ => 0.52,
    }
}

/// Approximate text width and height in points for a generic sans face.
pub fn measure_text(text: &str, size_pt: f64, weight: FontWeight) -> TextMetrics {
    let mut width_em = 0.0;
    for ch in text.chars() {
        width_em += char_advance_em(ch);
    }
    if weight == FontWeight::Bold {
        width_em *= BOLD_FACTOR;
    }
    TextMetrics {
        width: width_em * size_pt,
        height: (ASCENT_EM + DESCENT_EM) * size_pt,
        ascent: ASCENT_EM * size_pt,
    }
}

/// Measure text with a TextStyle.
pub fn measure_styled(text: &str, style: &TextStyle) -> TextMetrics {
    measure_text(text, style.size, style.weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_hello() {
        let m = measure_text("Hello", 12.0, FontWeight::Regular);
        assert!(m.width > 20.0);
        assert!(m.height > 8.0);
        assert!(m.ascent > 0.0);
        assert!(m.ascent < m.height);
    }

    #[test]
    fn bold_wider_than_regular() {
        let r = measure_text("Test", 12.0, FontWeight::Regular);
        let b = measure_text("Test", 12.0, FontWeight::Bold);
        assert!(b.width > r.width);
    }

    #[test]
    fn narrow_chars_narrower_than_wide() {
        let narrow = measure_text("iiii", 12.0, FontWeight::Regular);
        let wide = measure_text("mmmm", 12.0, FontWeight::Regular);
        assert!(narrow.width < wide.width);
    }

    #[test]
    fn width_scales_with_size() {
        let small = measure_text("abc", 10.0, FontWeight::Regular);
        let large = measure_text("abc", 20.0, FontWeight::Regular);
        assert!((large.width - 2.0 * small.width).abs() < 1e-9);
    }
}
