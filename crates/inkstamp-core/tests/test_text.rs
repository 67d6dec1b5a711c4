use std::path::Path;

use inkstamp_core::error::StampError;
use inkstamp_core::layer::{WatermarkLayer, WatermarkSource};
use inkstamp_core::raster::Raster;
use inkstamp_core::text::{
    pad_raster, resolve_renderer, text_padding, text_source, BlockGlyphs, FontGlyphs,
    GlyphRenderer,
};

const WHITE: [u8; 3] = [255, 255, 255];

// ---------------------------------------------------------------------------
// Padding
// ---------------------------------------------------------------------------

#[test]
fn test_padding_scales_with_size() {
    assert_eq!(text_padding(72), 29);
    assert_eq!(text_padding(100), 40);
}

#[test]
fn test_padding_has_floor() {
    assert_eq!(text_padding(8), 10);
    assert_eq!(text_padding(20), 10);
}

#[test]
fn test_pad_raster_keeps_pixels_unblended() {
    let mut glyphs = Raster::new(2, 1);
    glyphs.put_pixel(0, 0, [200, 100, 50, 40]);
    let padded = pad_raster(&glyphs, 3);
    assert_eq!((padded.width(), padded.height()), (8, 7));
    assert_eq!(padded.pixel(3, 3), [200, 100, 50, 40]);
    assert_eq!(padded.pixel(0, 0), [0, 0, 0, 0]);
}

// ---------------------------------------------------------------------------
// Block glyphs
// ---------------------------------------------------------------------------

#[test]
fn test_block_glyph_layout() {
    // 20pt: 12x20 cells with a 2px gap.
    let r = BlockGlyphs.render_glyphs("AB", 20, [1, 2, 3]).unwrap();
    assert_eq!((r.width(), r.height()), (26, 20));
    assert_eq!(r.pixel(0, 0), [1, 2, 3, 255]);
    assert_eq!(r.pixel(5, 10)[3], 0);
    assert_eq!(r.pixel(12, 10)[3], 0);
    assert_eq!(r.pixel(14, 0), [1, 2, 3, 255]);
}

#[test]
fn test_block_glyph_space_is_blank() {
    let r = BlockGlyphs.render_glyphs("A B", 20, WHITE).unwrap();
    let x0 = 14;
    for y in 0..20 {
        for x in x0..x0 + 12 {
            assert_eq!(r.pixel(x, y)[3], 0);
        }
    }
}

// ---------------------------------------------------------------------------
// Text sources
// ---------------------------------------------------------------------------

#[test]
fn test_text_source_trims_and_pads() {
    let source = text_source("  Hi  ", 72, WHITE, &BlockGlyphs).unwrap();
    let WatermarkSource::Text {
        content,
        font_size_pt,
        raster,
    } = &source
    else {
        panic!("expected a text source");
    };
    assert_eq!(content, "Hi");
    assert_eq!(*font_size_pt, 72);
    // 43px cells, 8px gap, 29px padding on each side.
    assert_eq!((raster.width(), raster.height()), (94 + 58, 72 + 58));
    assert_eq!(raster.pixel(28, 28)[3], 0);
    assert_eq!(raster.pixel(29, 29)[3], 255);
}

#[test]
fn test_text_source_clamps_font_size() {
    let small = text_source("A", 4, WHITE, &BlockGlyphs).unwrap();
    let large = text_source("A", 1000, WHITE, &BlockGlyphs).unwrap();
    assert!(matches!(small, WatermarkSource::Text { font_size_pt: 8, .. }));
    assert!(matches!(large, WatermarkSource::Text { font_size_pt: 400, .. }));
}

#[test]
fn test_empty_text_is_rejected() {
    for text in ["", "   ", "\t\n"] {
        assert!(matches!(
            text_source(text, 72, WHITE, &BlockGlyphs),
            Err(StampError::EmptyText)
        ));
    }
}

#[test]
fn test_text_opacity_applied_once() {
    let source = text_source("\u{a9} Test", 72, WHITE, &BlockGlyphs).unwrap();
    let layer = WatermarkLayer::new(source, None);
    let rendered = layer.render(1.0);
    let max_alpha = rendered
        .raster
        .data
        .iter()
        .skip(3)
        .step_by(4)
        .copied()
        .max()
        .unwrap();
    assert_eq!(max_alpha, 153);
}

// ---------------------------------------------------------------------------
// Font resolution
// ---------------------------------------------------------------------------

#[test]
fn test_missing_font_file_is_unavailable() {
    let err = FontGlyphs::from_file(Path::new("/nonexistent/font.ttf"))
        .err()
        .unwrap();
    assert!(matches!(err, StampError::FontUnavailable(_)));
}

#[test]
fn test_unparsable_font_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.ttf");
    std::fs::write(&path, b"not a font").unwrap();
    assert!(matches!(
        FontGlyphs::from_file(&path),
        Err(StampError::FontUnavailable(_))
    ));
}

#[test]
fn test_bad_font_path_falls_back_to_blocks() {
    let renderer = resolve_renderer(Some(Path::new("/nonexistent/font.ttf")));
    assert_eq!(renderer.name(), "built-in blocks");
    let r = renderer.render_glyphs("x", 20, WHITE).unwrap();
    assert_eq!((r.width(), r.height()), (12, 20));
}

#[test]
fn test_any_resolved_renderer_draws_ink() {
    let renderer = resolve_renderer(None);
    let r = renderer.render_glyphs("Wm", 48, WHITE).unwrap();
    assert!(r.width() > 0 && r.height() > 0);
    assert!(r.data.iter().skip(3).step_by(4).any(|&a| a > 0));
}
