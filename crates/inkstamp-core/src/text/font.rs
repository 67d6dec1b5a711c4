use std::path::Path;

use ab_glyph::{point, Font, FontArc, FontVec, PxScale, Rect as GlyphRect, ScaleFont};
use fontdb::{Database, Family, Query};
use tracing::debug;

use crate::error::{Result, StampError};
use crate::raster::Raster;

use super::GlyphRenderer;

/// Families tried, in order, when no font file is given.
const PREFERRED_FAMILIES: [Family<'static>; 5] = [
    Family::Name("Noto Sans"),
    Family::Name("DejaVu Sans"),
    Family::Name("Liberation Sans"),
    Family::Name("Arial"),
    Family::SansSerif,
];

/// Glyph renderer backed by an outline font.
#[derive(Clone)]
pub struct FontGlyphs {
    font: FontArc,
    name: String,
}

impl FontGlyphs {
    pub fn new(font: FontArc, name: impl Into<String>) -> Self {
        Self {
            font,
            name: name.into(),
        }
    }

    /// Load a TrueType/OpenType font file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| StampError::FontUnavailable(format!("{}: {e}", path.display())))?;
        let font = FontArc::try_from_vec(data)
            .map_err(|e| StampError::FontUnavailable(format!("{}: {e}", path.display())))?;
        Ok(Self::new(font, path.display().to_string()))
    }

    /// First usable sans-serif face installed on the system.
    pub fn system_default() -> Result<Self> {
        let mut db = Database::new();
        db.load_system_fonts();

        for family in PREFERRED_FAMILIES {
            let query = Query {
                families: &[family],
                ..Default::default()
            };
            let Some(id) = db.query(&query) else {
                continue;
            };
            let loaded = db.with_face_data(id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index).ok()
            });
            if let Some(Some(font)) = loaded {
                let name = db
                    .face(id)
                    .and_then(|face| face.families.first().map(|(n, _)| n.clone()))
                    .unwrap_or_else(|| "system font".to_string());
                debug!(font = %name, "System font loaded");
                return Ok(Self::new(FontArc::new(font), name));
            }
        }

        Err(StampError::FontUnavailable(
            "no usable system sans-serif font".into(),
        ))
    }
}

impl GlyphRenderer for FontGlyphs {
    fn render_glyphs(&self, text: &str, font_size_pt: u32, color: [u8; 3]) -> Result<Raster> {
        let scale = PxScale::from(font_size_pt as f32);
        let scaled = self.font.as_scaled(scale);

        // Lay the line out on a baseline at the ascent.
        let mut caret = point(0.0, scaled.ascent());
        let mut previous = None;
        let mut outlines = Vec::new();
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, caret);
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                outlines.push(outlined);
            }
            caret.x += scaled.h_advance(id);
            previous = Some(id);
        }

        // Whitespace-only text has no ink; keep its advance box.
        let bounds = outlines
            .iter()
            .map(|g| g.px_bounds())
            .reduce(union)
            .unwrap_or(GlyphRect {
                min: point(0.0, 0.0),
                max: point(caret.x.max(1.0), scaled.height().max(1.0)),
            });

        let origin_x = bounds.min.x.floor() as i32;
        let origin_y = bounds.min.y.floor() as i32;
        let width = ((bounds.max.x.ceil() as i32 - origin_x).max(1)) as u32;
        let height = ((bounds.max.y.ceil() as i32 - origin_y).max(1)) as u32;
        let mut raster = Raster::new(width, height);

        for outlined in &outlines {
            let gb = outlined.px_bounds();
            let gx0 = gb.min.x.floor() as i32 - origin_x;
            let gy0 = gb.min.y.floor() as i32 - origin_y;
            outlined.draw(|gx, gy, coverage| {
                let px = gx0 + gx as i32;
                let py = gy0 + gy as i32;
                if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                    return;
                }
                let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                let (px, py) = (px as u32, py as u32);
                // Overlapping glyphs keep the stronger coverage.
                let current = raster.pixel(px, py)[3];
                if alpha > current {
                    raster.put_pixel(px, py, [color[0], color[1], color[2], alpha]);
                }
            });
        }

        Ok(raster)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn union(a: GlyphRect, b: GlyphRect) -> GlyphRect {
    GlyphRect {
        min: point(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
        max: point(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
    }
}
