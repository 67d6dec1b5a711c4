//! Text watermark sources: glyph rasterization and padding.

pub mod fallback;
pub mod font;

use std::path::Path;

use ndarray::s;
use tracing::warn;

use crate::consts::{MAX_FONT_SIZE, MIN_FONT_SIZE, TEXT_PADDING_MIN, TEXT_PADDING_RATIO};
use crate::error::{Result, StampError};
use crate::layer::WatermarkSource;
use crate::raster::Raster;

pub use fallback::BlockGlyphs;
pub use font::FontGlyphs;

/// Rasterizes a line of text. The returned raster is tight around the ink
/// (no padding) with glyph coverage in the alpha channel.
pub trait GlyphRenderer {
    fn render_glyphs(&self, text: &str, font_size_pt: u32, color: [u8; 3]) -> Result<Raster>;

    fn name(&self) -> &str;
}

/// Transparent margin added around rendered text so rotation has room.
pub fn text_padding(font_size_pt: u32) -> u32 {
    let scaled = (font_size_pt as f64 * TEXT_PADDING_RATIO).round() as u32;
    scaled.max(TEXT_PADDING_MIN)
}

/// Surround `glyphs` with `pad` transparent pixels on every side. Pixels are
/// copied unblended so partially covered edges keep their color.
pub fn pad_raster(glyphs: &Raster, pad: u32) -> Raster {
    let mut out = Raster::new(glyphs.width() + pad * 2, glyphs.height() + pad * 2);
    let (p, h, w) = (pad as usize, glyphs.height() as usize, glyphs.width() as usize);
    out.data
        .slice_mut(s![p..p + h, p..p + w, ..])
        .assign(&glyphs.data);
    out
}

/// Build a text watermark source: trims the text, clamps the font size,
/// renders and pads the glyphs.
pub fn text_source(
    content: &str,
    font_size_pt: u32,
    color: [u8; 3],
    renderer: &dyn GlyphRenderer,
) -> Result<WatermarkSource> {
    let content = content.trim();
    if content.is_empty() {
        return Err(StampError::EmptyText);
    }
    let font_size_pt = font_size_pt.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    let glyphs = renderer.render_glyphs(content, font_size_pt, color)?;
    let raster = pad_raster(&glyphs, text_padding(font_size_pt));
    Ok(WatermarkSource::Text {
        content: content.to_string(),
        font_size_pt,
        raster,
    })
}

/// Pick a glyph renderer: the font at `font_path`, else a system sans-serif,
/// else the built-in block glyphs. A missing font is not an error.
pub fn resolve_renderer(font_path: Option<&Path>) -> Box<dyn GlyphRenderer> {
    let loaded = match font_path {
        Some(path) => FontGlyphs::from_file(path),
        None => FontGlyphs::system_default(),
    };
    match loaded {
        Ok(glyphs) => Box::new(glyphs),
        Err(e) => {
            warn!(error = %e, "Falling back to built-in glyphs");
            Box::new(BlockGlyphs)
        }
    }
}
