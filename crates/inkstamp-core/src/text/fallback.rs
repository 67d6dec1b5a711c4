use crate::error::Result;
use crate::raster::Raster;

use super::GlyphRenderer;

/// Built-in glyph set used when no font can be loaded: every visible
/// character is drawn as an outlined box, spaces as blank advance.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockGlyphs;

impl BlockGlyphs {
    fn cell_size(font_size_pt: u32) -> (u32, u32) {
        let height = font_size_pt.max(1);
        let width = (height * 3 / 5).max(1);
        (width, height)
    }
}

impl GlyphRenderer for BlockGlyphs {
    fn render_glyphs(&self, text: &str, font_size_pt: u32, color: [u8; 3]) -> Result<Raster> {
        let (cell_w, cell_h) = Self::cell_size(font_size_pt);
        let gap = (cell_w / 5).max(1);
        let stroke = (font_size_pt / 12).max(1);
        let count = text.chars().count().max(1) as u32;

        let width = count * cell_w + (count - 1) * gap;
        let mut raster = Raster::new(width, cell_h);
        let ink = [color[0], color[1], color[2], 255];

        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x0 = i as u32 * (cell_w + gap);
            for y in 0..cell_h {
                for x in 0..cell_w {
                    let edge = x < stroke
                        || y < stroke
                        || x + stroke >= cell_w
                        || y + stroke >= cell_h;
                    if edge {
                        raster.put_pixel(x0 + x, y, ink);
                    }
                }
            }
        }
        Ok(raster)
    }

    fn name(&self) -> &str {
        "built-in blocks"
    }
}
