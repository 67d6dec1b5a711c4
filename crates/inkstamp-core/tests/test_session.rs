mod common;

use common::{solid, write_png, RED, WHITE};
use inkstamp_core::consts::{DEFAULT_OPACITY, DISPLAY_BACKGROUND};
use inkstamp_core::error::StampError;
use inkstamp_core::geometry::{Footprint, Point, PointF, Rect};
use inkstamp_core::io::image_io::{load_raster, ExportFormat};
use inkstamp_core::layer::{InputOrigin, Param};
use inkstamp_core::session::{export_placement, Editor};
use inkstamp_core::text::BlockGlyphs;

/// 800x600 base shown at scale 1 with a 100x50 red watermark at (400, 275).
fn unit_editor() -> Editor {
    let mut editor = Editor::default();
    editor.load_base(solid(800, 600, WHITE)).unwrap();
    editor.set_image_watermark(solid(100, 50, RED));
    editor
}

/// 1600x1200 base shown at scale 0.5 with an opaque, centered 40x20
/// watermark.
fn half_scale_editor() -> Editor {
    let mut editor = Editor::default();
    editor.load_base(solid(1600, 1200, WHITE)).unwrap();
    editor.set_image_watermark(solid(40, 20, RED));
    editor.set_slider(Param::Opacity, 1.0).unwrap();
    editor.center_watermark().unwrap();
    editor
}

fn placement(editor: &Editor) -> Rect {
    editor.layer().unwrap().placement().unwrap()
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 1)
}

fn assert_near(a: PointF, b: PointF, tol: f64) {
    assert!(
        (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol,
        "{a:?} vs {b:?}"
    );
}

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

#[test]
fn test_fresh_editor_reports_missing_inputs() {
    let mut editor = Editor::default();
    assert_eq!(editor.status(), "Ready");
    assert!(matches!(editor.export(), Err(StampError::NoBaseImage)));
    assert!(matches!(editor.export_unmarked(), Err(StampError::NoBaseImage)));
    assert!(matches!(editor.compose_preview(), Err(StampError::NoBaseImage)));
    assert!(matches!(editor.center_watermark(), Err(StampError::NoBaseImage)));
    assert!(editor.status().starts_with("Error:"));
    assert!(matches!(editor.reset_params(), Err(StampError::NoWatermarkSet)));
    assert!(matches!(
        editor.set_slider(Param::Scale, 2.0),
        Err(StampError::NoWatermarkSet)
    ));
}

#[test]
fn test_export_requires_watermark() {
    let mut editor = Editor::default();
    let base = solid(800, 600, WHITE);
    editor.load_base(base.clone()).unwrap();
    assert!(matches!(editor.export(), Err(StampError::NoWatermarkSet)));
    assert_eq!(editor.export_unmarked().unwrap(), base);
}

#[test]
fn test_watermark_before_base_is_placed_on_load() {
    let mut editor = Editor::default();
    editor.set_image_watermark(solid(100, 50, RED));
    assert!(editor.layer().is_some());
    assert!(!editor.pointer_down(Point::new(60, 60)));

    editor.load_base(solid(800, 600, WHITE)).unwrap();
    assert_near(placement(&editor).center(), PointF::new(450.0, 300.0), 1.0);
}

#[test]
fn test_open_base_decode_failure_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not an image").unwrap();

    let mut editor = Editor::default();
    assert!(matches!(editor.open_base(&path), Err(StampError::Decode(_))));
    assert!(editor.base().is_none());
    assert!(editor.status().starts_with("Error:"));
}

#[test]
fn test_open_base_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "photo.png", &solid(300, 200, WHITE));
    let mut editor = Editor::default();
    let vp = editor.open_base(&path).unwrap();
    assert_eq!((vp.preview_width, vp.preview_height), (300, 200));
    assert_eq!(editor.status(), "Opened photo.png  size 300x200");
    assert_eq!(editor.preview().unwrap().footprint(), Footprint::new(300, 200));
}

// ---------------------------------------------------------------------------
// Watermark sources
// ---------------------------------------------------------------------------

#[test]
fn test_text_watermark_status_names_renderer() {
    let mut editor = unit_editor();
    editor
        .set_text_watermark("Hi", 72, [255, 255, 255], &BlockGlyphs)
        .unwrap();
    assert_eq!(editor.status(), "Text watermark created (built-in blocks)");
    assert_near(placement(&editor).center(), PointF::new(450.0, 300.0), 1.0);
}

#[test]
fn test_empty_text_keeps_previous_watermark() {
    let mut editor = unit_editor();
    let before = placement(&editor);
    let err = editor.set_text_watermark("   ", 72, [0, 0, 0], &BlockGlyphs);
    assert!(matches!(err, Err(StampError::EmptyText)));
    assert_eq!(placement(&editor), before);
    assert!(editor.status().starts_with("Error:"));
}

// ---------------------------------------------------------------------------
// Pointer and wheel
// ---------------------------------------------------------------------------

#[test]
fn test_drag_moves_by_pointer_delta() {
    let mut editor = unit_editor();
    assert_eq!(placement(&editor).top_left(), Point::new(400, 275));

    assert!(editor.pointer_down(Point::new(410, 280)));
    assert_eq!(editor.status(), "Dragging watermark...");
    editor.pointer_move(Point::new(420, 285));
    editor.pointer_move(Point::new(425, 285));
    editor.pointer_up(Point::new(425, 285));

    assert_eq!(placement(&editor).top_left(), Point::new(415, 280));
    assert_eq!(editor.status(), "Move complete");
    assert!(!editor.drag_state().active);
}

#[test]
fn test_pointer_down_outside_does_not_drag() {
    let mut editor = unit_editor();
    assert!(!editor.pointer_down(Point::new(10, 10)));
    editor.pointer_move(Point::new(50, 50));
    assert_eq!(placement(&editor).top_left(), Point::new(400, 275));
}

#[test]
fn test_hit_box_edges_are_inclusive() {
    let mut editor = unit_editor();
    assert!(editor.pointer_down(Point::new(500, 325)));
    editor.pointer_up(Point::new(500, 325));
    assert!(!editor.pointer_down(Point::new(501, 325)));
}

#[test]
fn test_wheel_grows_around_center() {
    let mut editor = unit_editor();
    let center = placement(&editor).center();
    assert!(editor.wheel(Point::new(450, 300), 1));

    let layer = editor.layer().unwrap();
    assert!((layer.params.user_scale - 1.12).abs() < 1e-9);
    assert_eq!(editor.status(), "Scale: 1.12x");
    assert_eq!(placement(&editor).size(), Footprint::new(112, 56));
    assert_near(placement(&editor).center(), center, 1.0);
}

#[test]
fn test_wheel_outside_is_ignored() {
    let mut editor = unit_editor();
    assert!(!editor.wheel(Point::new(5, 5), 1));
    assert!(!editor.wheel(Point::new(450, 300), 0));
    assert_eq!(editor.layer().unwrap().params.user_scale, 1.0);
}

#[test]
fn test_wheel_clamps_to_interactive_minimum() {
    let mut editor = unit_editor();
    for _ in 0..60 {
        let at = placement(&editor).top_left();
        editor.wheel(at, -1);
    }
    let scale = editor.layer().unwrap().params.user_scale;
    assert!((scale - 0.05).abs() < 1e-9, "scale {scale}");
}

#[test]
fn test_interactive_scale_beyond_slider_range() {
    let mut editor = unit_editor();
    let applied = editor
        .set_param(Param::Scale, 7.0, InputOrigin::Interactive)
        .unwrap();
    assert_eq!(applied, 7.0);
    assert_eq!(editor.set_slider(Param::Scale, 7.0).unwrap(), 5.0);
}

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

#[test]
fn test_center_places_on_preview_center() {
    let mut editor = unit_editor();
    editor.place_watermark(Point::new(0, 0)).unwrap();
    let rect = editor.center_watermark().unwrap();
    assert_eq!(rect.top_left(), Point::new(400, 275));
    assert_eq!(editor.status(), "Watermark centered");
}

#[test]
fn test_center_oversized_watermark_floors_offset() {
    let mut editor = Editor::default();
    editor.load_base(solid(100, 50, WHITE)).unwrap();
    editor.set_image_watermark(solid(301, 101, RED));

    // Preview sits at (400, 275); the overhang splits with floor division.
    let rect = editor.center_watermark().unwrap();
    assert_eq!(rect, Rect::new(Point::new(299, 249), Footprint::new(301, 101)));
    assert_eq!(placement(&editor), rect);
}

#[test]
fn test_reset_restores_defaults_in_place() {
    let mut editor = unit_editor();
    editor.set_slider(Param::Scale, 2.0).unwrap();
    editor.set_slider(Param::Rotation, 30.0).unwrap();
    editor.set_slider(Param::Opacity, 0.9).unwrap();
    let center = placement(&editor).center();

    editor.reset_params().unwrap();
    let params = editor.layer().unwrap().params;
    assert_eq!((params.user_scale, params.rotation_deg), (1.0, 0.0));
    assert_eq!(params.opacity, DEFAULT_OPACITY);
    assert_eq!(placement(&editor).size(), Footprint::new(100, 50));
    assert_near(placement(&editor).center(), center, 1.0);
}

#[test]
fn test_new_base_resets_watermark() {
    let mut editor = unit_editor();
    editor.set_slider(Param::Rotation, 30.0).unwrap();
    editor.set_slider(Param::Opacity, 1.0).unwrap();
    editor.load_base(solid(400, 400, WHITE)).unwrap();

    let params = editor.layer().unwrap().params;
    assert_eq!(params.rotation_deg, 0.0);
    assert_eq!(params.opacity, DEFAULT_OPACITY);
    assert_near(placement(&editor).center(), PointF::new(450.0, 300.0), 1.0);
}

// ---------------------------------------------------------------------------
// Preview and export
// ---------------------------------------------------------------------------

#[test]
fn test_preview_and_canvas_composition() {
    let editor = half_scale_editor();
    assert_eq!(placement(&editor), Rect::new(Point::new(440, 295), Footprint::new(20, 10)));

    let preview = editor.compose_preview().unwrap();
    assert_eq!(preview.footprint(), Footprint::new(800, 600));
    assert!(close(preview.pixel(400, 300), RED));
    assert!(close(preview.pixel(10, 10), WHITE));

    let canvas = editor.compose_canvas();
    assert_eq!(canvas.footprint(), Footprint::new(900, 600));
    assert_eq!(canvas.pixel(10, 10), DISPLAY_BACKGROUND);
    assert!(close(canvas.pixel(60, 10), WHITE));
    assert!(close(canvas.pixel(450, 300), RED));
}

#[test]
fn test_export_lands_on_preview_center() {
    let editor = half_scale_editor();
    let out = editor.export().unwrap();
    assert_eq!(out.footprint(), Footprint::new(1600, 1200));

    // 40x20 centered on (800, 600).
    assert_eq!(out.pixel(780, 590), RED);
    assert_eq!(out.pixel(819, 609), RED);
    assert_eq!(out.pixel(779, 590), WHITE);
    assert_eq!(out.pixel(820, 609), WHITE);
    assert_eq!(out.pixel(780, 589), WHITE);
}

#[test]
fn test_export_after_rotation_keeps_center() {
    let mut editor = half_scale_editor();
    editor.set_slider(Param::Rotation, 90.0).unwrap();

    let layer = editor.layer().unwrap();
    let (rendered, rect) = export_placement(layer, editor.viewport().unwrap());
    assert_eq!((rendered.width, rendered.height), (20, 40));
    assert_eq!(rect.top_left(), Point::new(790, 580));

    let out = editor.export().unwrap();
    assert_eq!(out.pixel(800, 600), RED);
    assert_eq!(out.pixel(800, 585), RED);
    assert_eq!(out.pixel(785, 600), WHITE);
}

#[test]
fn test_export_does_not_touch_base() {
    let editor = half_scale_editor();
    let _ = editor.export().unwrap();
    assert_eq!(editor.base().unwrap().pixel(800, 600), WHITE);
}

#[test]
fn test_resize_display_keeps_original_center() {
    let mut editor = half_scale_editor();
    editor.resize_display(450, 300).unwrap();

    let vp = editor.viewport().unwrap();
    assert_eq!((vp.offset_x, vp.offset_y), (25, 0));
    assert_eq!(editor.display_size(), (450, 300));
    assert_near(placement(&editor).center(), PointF::new(225.0, 150.0), 1.0);

    let (_, rect) = export_placement(editor.layer().unwrap(), vp);
    assert_near(rect.center(), PointF::new(800.0, 600.0), 4.0);
}

#[test]
fn test_resize_display_rejects_zero() {
    let mut editor = unit_editor();
    assert!(matches!(
        editor.resize_display(0, 100),
        Err(StampError::InvalidDimensions { .. })
    ));
    assert_eq!(editor.display_size(), (900, 600));
}

#[test]
fn test_save_png_and_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = Editor::default();
    editor.load_base(solid(300, 200, WHITE)).unwrap();
    editor.set_image_watermark(solid(30, 20, RED));

    let png = dir.path().join("out.png");
    assert_eq!(editor.save(&png, 95).unwrap(), ExportFormat::Png);
    assert_eq!(editor.status(), "Saved: out.png");
    assert_eq!(load_raster(&png).unwrap(), editor.export().unwrap());

    let jpg = dir.path().join("out.JPG");
    assert_eq!(editor.save(&jpg, 90).unwrap(), ExportFormat::Jpeg);
    let decoded = load_raster(&jpg).unwrap();
    assert_eq!(decoded.footprint(), Footprint::new(300, 200));
    assert!(decoded.is_opaque());
}

#[test]
fn test_save_unmarked() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = unit_editor();
    let path = dir.path().join("plain.png");
    editor.save_unmarked(&path, 95).unwrap();
    assert_eq!(&load_raster(&path).unwrap(), editor.base().unwrap());
}
