use resvg::{tiny_skia, usvg};

use crate::RenderError;

/// Convert an SVG string to PNG bytes at the given DPI.
///
/// Text is set in whatever sans-serif the host provides; the SVG itself
/// never references a specific font file.
pub fn svg_to_png(svg: &str, dpi: u32) -> crate::Result<Vec<u8>> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options).map_err(png_err)?;

    let scale = dpi as f32 / 72.0;
    let px_w = (tree.size().width() * scale) as u32;
    let px_h = (tree.size().height() * scale) as u32;
    let mut pixmap = tiny_skia::Pixmap::new(px_w, px_h)
        .ok_or_else(|| RenderError::Png(format!("zero-sized raster ({px_w}x{px_h})")))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    pixmap.encode_png().map_err(png_err)
}

fn png_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Png(e.to_string())
}
