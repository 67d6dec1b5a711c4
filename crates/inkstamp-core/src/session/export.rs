use tracing::info;

use crate::composite::paste;
use crate::geometry::{Point, Rect};
use crate::layer::WatermarkLayer;
use crate::raster::Raster;
use crate::transform::RenderedWatermark;
use crate::viewport::ViewportState;

/// Render `layer` at full resolution and find where it lands on the base
/// image.
///
/// The preview footprint's center is mapped to original space and the
/// full-resolution render is centered there, so rotation expansion never
/// shifts the watermark between preview and export.
pub fn export_placement(layer: &WatermarkLayer, viewport: &ViewportState) -> (RenderedWatermark, Rect) {
    let footprint = layer
        .footprint()
        .unwrap_or_else(|| layer.render(viewport.scale).footprint());
    let center_preview = Rect::new(layer.params.anchor, footprint).pixel_center();
    let center = viewport.to_original(center_preview);

    let rendered = layer.render(1.0);
    let top_left = Point::new(
        center.x - (rendered.width / 2) as i32,
        center.y - (rendered.height / 2) as i32,
    );
    let rect = Rect::new(top_left, rendered.footprint());
    (rendered, rect)
}

/// Composite `layer` onto a copy of the full-resolution `base`.
pub fn render_export(base: &Raster, layer: &WatermarkLayer, viewport: &ViewportState) -> Raster {
    let (rendered, rect) = export_placement(layer, viewport);
    let mut out = base.clone();
    paste(&mut out, &rendered.raster, rect.top_left());
    info!(
        x = rect.x,
        y = rect.y,
        width = rect.width,
        height = rect.height,
        "Watermark baked into original"
    );
    out
}
