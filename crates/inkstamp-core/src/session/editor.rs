use std::path::Path;

use tracing::{debug, info, warn};

use crate::composite::paste;
use crate::consts::{
    DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH, DISPLAY_BACKGROUND, INTERACTIVE_SCALE_MAX,
    INTERACTIVE_SCALE_MIN, WHEEL_SCALE_STEP,
};
use crate::error::{Result, StampError};
use crate::geometry::{Point, Rect};
use crate::io::image_io::{load_raster, save_raster, ExportFormat};
use crate::layer::{InputOrigin, Param, PlacedWatermark, WatermarkLayer, WatermarkSource};
use crate::raster::Raster;
use crate::text::{text_source, GlyphRenderer};
use crate::viewport::ViewportState;

use super::export::render_export;

/// Pointer drag in progress over the watermark.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragState {
    pub active: bool,
    pub last: Point,
}

/// Interactive watermark editor.
///
/// All mutation goes through `&mut self`, one event at a time. After every
/// parameter change the layer is re-rendered at preview resolution so its
/// placement stays centered on the same spot.
pub struct Editor {
    display_width: u32,
    display_height: u32,
    base: Option<Raster>,
    preview: Option<Raster>,
    viewport: Option<ViewportState>,
    layer: Option<WatermarkLayer>,
    drag: DragState,
    status: String,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_WIDTH, DEFAULT_DISPLAY_HEIGHT)
    }
}

impl Editor {
    pub fn new(display_width: u32, display_height: u32) -> Self {
        Self {
            display_width: display_width.max(1),
            display_height: display_height.max(1),
            base: None,
            preview: None,
            viewport: None,
            layer: None,
            drag: DragState::default(),
            status: "Ready".to_string(),
        }
    }

    /// Outcome of the last operation, for a status bar.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn display_size(&self) -> (u32, u32) {
        (self.display_width, self.display_height)
    }

    pub fn base(&self) -> Option<&Raster> {
        self.base.as_ref()
    }

    pub fn preview(&self) -> Option<&Raster> {
        self.preview.as_ref()
    }

    pub fn viewport(&self) -> Option<&ViewportState> {
        self.viewport.as_ref()
    }

    pub fn layer(&self) -> Option<&WatermarkLayer> {
        self.layer.as_ref()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    // -----------------------------------------------------------------------
    // Base image
    // -----------------------------------------------------------------------

    /// Load a new base image: fit it to the display, build the preview, and
    /// reset and recenter any existing watermark.
    pub fn load_base(&mut self, base: Raster) -> Result<ViewportState> {
        let result = self.install_base(base);
        self.report(result)
    }

    /// Decode and load a base image file. On failure nothing changes.
    pub fn open_base(&mut self, path: &Path) -> Result<ViewportState> {
        let result = load_raster(path).and_then(|raster| self.install_base(raster));
        let result = self.report(result);
        if result.is_ok() {
            self.status = format!("Opened {}  {}", file_label(path), self.status_dimensions());
        }
        result
    }

    fn install_base(&mut self, base: Raster) -> Result<ViewportState> {
        let viewport = ViewportState::fit_to_display(
            base.width(),
            base.height(),
            self.display_width,
            self.display_height,
        )?;
        let preview = base.resize(viewport.preview_width, viewport.preview_height);
        info!(
            width = base.width(),
            height = base.height(),
            scale = viewport.scale,
            "Base image loaded"
        );

        self.base = Some(base);
        self.preview = Some(preview);
        self.viewport = Some(viewport);
        self.drag = DragState::default();

        if let Some(layer) = self.layer.as_mut() {
            layer.reset_params();
            layer.place_center(viewport.preview_rect().center(), viewport.scale);
        }
        self.status = format!("Opened {}", self.status_dimensions());
        Ok(viewport)
    }

    /// Change the display area. The watermark keeps its center in original
    /// space.
    pub fn resize_display(&mut self, width: u32, height: u32) -> Result<()> {
        let result = self.apply_display_size(width, height);
        self.report(result)
    }

    fn apply_display_size(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(StampError::InvalidDimensions { width, height });
        }
        self.display_width = width;
        self.display_height = height;

        let (Some(base), Some(old)) = (self.base.as_ref(), self.viewport) else {
            self.status = format!("Display area {width}x{height}");
            return Ok(());
        };
        let viewport = ViewportState::fit_to_display(base.width(), base.height(), width, height)?;
        self.preview = Some(base.resize(viewport.preview_width, viewport.preview_height));
        self.viewport = Some(viewport);

        if let Some(layer) = self.layer.as_mut() {
            if let Some(rect) = layer.placement() {
                let center = old.to_original(rect.pixel_center());
                let new_center = viewport.to_preview(center);
                layer.place_center(new_center, viewport.scale);
            } else {
                layer.place_center(viewport.preview_rect().center(), viewport.scale);
            }
        }
        self.status = format!("Display area {width}x{height}");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Watermark source
    // -----------------------------------------------------------------------

    /// Render `content` with `renderer` and use it as the watermark.
    pub fn set_text_watermark(
        &mut self,
        content: &str,
        font_size_pt: u32,
        color: [u8; 3],
        renderer: &dyn GlyphRenderer,
    ) -> Result<()> {
        let result = text_source(content, font_size_pt, color, renderer).map(|source| {
            self.install_source(source);
        });
        self.report(result)?;
        self.status = format!("Text watermark created ({})", renderer.name());
        Ok(())
    }

    pub fn set_image_watermark(&mut self, raster: Raster) {
        self.install_source(WatermarkSource::image(raster));
        self.status = "Image watermark selected".to_string();
    }

    /// Decode and use an image file as the watermark. On failure nothing
    /// changes.
    pub fn open_watermark(&mut self, path: &Path) -> Result<()> {
        let raster = self.report(load_raster(path))?;
        self.set_image_watermark(raster);
        self.status = format!("Watermark image selected: {}", file_label(path));
        Ok(())
    }

    fn install_source(&mut self, source: WatermarkSource) {
        debug!(source = %source.describe(), "Watermark source set");
        let viewport = self.viewport;
        match self.layer.as_mut() {
            Some(layer) => layer.set_source(source, viewport.as_ref()),
            None => self.layer = Some(WatermarkLayer::new(source, viewport.as_ref())),
        }
        self.drag = DragState::default();
        self.refresh();
    }

    // -----------------------------------------------------------------------
    // Pointer, wheel and sliders
    // -----------------------------------------------------------------------

    /// Start a drag if `p` (preview space) hits the watermark.
    pub fn pointer_down(&mut self, p: Point) -> bool {
        let Some(rect) = self.hit_rect() else {
            return false;
        };
        self.drag.active = rect.contains(p);
        if self.drag.active {
            self.drag.last = p;
            self.status = "Dragging watermark...".to_string();
        }
        self.drag.active
    }

    pub fn pointer_move(&mut self, p: Point) {
        if !self.drag.active {
            return;
        }
        let (dx, dy) = (p.x - self.drag.last.x, p.y - self.drag.last.y);
        if let Some(layer) = self.layer.as_mut() {
            layer.move_by(dx, dy);
        }
        self.drag.last = p;
    }

    pub fn pointer_up(&mut self, _p: Point) {
        if self.drag.active {
            self.drag.active = false;
            self.status = "Move complete".to_string();
        }
    }

    /// Zoom the watermark by one wheel notch when `p` is over it. Positive
    /// `delta` grows it. Returns whether the scale changed.
    pub fn wheel(&mut self, p: Point, delta: i32) -> bool {
        if delta == 0 {
            return false;
        }
        match self.hit_rect() {
            Some(rect) if rect.contains(p) => {}
            _ => return false,
        }
        let Some(layer) = self.layer.as_mut() else {
            return false;
        };
        let factor = if delta > 0 {
            1.0 + WHEEL_SCALE_STEP
        } else {
            1.0 - WHEEL_SCALE_STEP
        };
        let target = (layer.params.user_scale * factor)
            .clamp(INTERACTIVE_SCALE_MIN, INTERACTIVE_SCALE_MAX);
        let scale = layer.set_param(Param::Scale, target, InputOrigin::Interactive);
        self.refresh();
        self.status = format!("Scale: {scale:.2}x");
        true
    }

    /// Apply a slider value (scale factor, opacity in [0, 1], or degrees).
    pub fn set_slider(&mut self, param: Param, value: f64) -> Result<f64> {
        self.set_param(param, value, InputOrigin::Slider)
    }

    /// Set a parameter with the clamping rules of `origin` and re-render.
    pub fn set_param(&mut self, param: Param, value: f64, origin: InputOrigin) -> Result<f64> {
        let result = self
            .layer_mut()
            .map(|layer| layer.set_param(param, value, origin));
        let applied = self.report(result)?;
        self.refresh();
        Ok(applied)
    }

    // -----------------------------------------------------------------------
    // Buttons
    // -----------------------------------------------------------------------

    /// Center the current render on the preview image.
    pub fn center_watermark(&mut self) -> Result<Rect> {
        let result = self.center_on_preview();
        let rect = self.report(result)?;
        self.status = "Watermark centered".to_string();
        Ok(rect)
    }

    fn center_on_preview(&mut self) -> Result<Rect> {
        let viewport = self.viewport.ok_or(StampError::NoBaseImage)?;
        let layer = self.layer.as_mut().ok_or(StampError::NoWatermarkSet)?;
        let placed = layer.place_with(viewport.scale, |size| {
            Point::new(
                viewport.offset_x
                    + (viewport.preview_width as i32 - size.width as i32).div_euclid(2),
                viewport.offset_y
                    + (viewport.preview_height as i32 - size.height as i32).div_euclid(2),
            )
        });
        Ok(placed.rect)
    }

    /// Put the watermark's top-left at `top_left` (preview space).
    pub fn place_watermark(&mut self, top_left: Point) -> Result<()> {
        let result = self.layer_mut().map(|layer| layer.params.anchor = top_left);
        self.report(result)?;
        self.status = format!("Watermark moved to ({}, {})", top_left.x, top_left.y);
        Ok(())
    }

    /// Scale 1, no rotation, default opacity; the watermark stays centered
    /// where it was.
    pub fn reset_params(&mut self) -> Result<()> {
        let result = self.layer_mut().map(|layer| layer.reset_params());
        self.report(result)?;
        self.refresh();
        self.status = "Watermark parameters reset".to_string();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// The watermark rendered at preview resolution and its placement in
    /// preview space.
    pub fn preview_watermark(&self) -> Option<PlacedWatermark> {
        let viewport = self.viewport.as_ref()?;
        let layer = self.layer.as_ref()?;
        let rendered = layer.render(viewport.scale);
        let rect = Rect::new(layer.params.anchor, rendered.footprint());
        Some(PlacedWatermark { rendered, rect })
    }

    /// The preview image with the watermark composited on it.
    pub fn compose_preview(&self) -> Result<Raster> {
        let viewport = self.viewport.as_ref().ok_or(StampError::NoBaseImage)?;
        let mut out = self.preview.clone().ok_or(StampError::NoBaseImage)?;
        if let Some(placed) = self.preview_watermark() {
            let top_left = Point::new(
                placed.rect.x - viewport.offset_x,
                placed.rect.y - viewport.offset_y,
            );
            paste(&mut out, &placed.rendered.raster, top_left);
        }
        Ok(out)
    }

    /// The whole display area as the user sees it: background, preview image
    /// at its offset, watermark on top.
    pub fn compose_canvas(&self) -> Raster {
        let mut canvas = Raster::filled(self.display_width, self.display_height, DISPLAY_BACKGROUND);
        if let (Some(preview), Some(viewport)) = (self.preview.as_ref(), self.viewport.as_ref()) {
            paste(
                &mut canvas,
                preview,
                Point::new(viewport.offset_x, viewport.offset_y),
            );
        }
        if let Some(placed) = self.preview_watermark() {
            paste(&mut canvas, &placed.rendered.raster, placed.rect.top_left());
        }
        canvas
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    /// Bake the watermark into the full-resolution base image.
    pub fn export(&self) -> Result<Raster> {
        let base = self.base.as_ref().ok_or(StampError::NoBaseImage)?;
        let viewport = self.viewport.as_ref().ok_or(StampError::NoBaseImage)?;
        let layer = self.layer.as_ref().ok_or(StampError::NoWatermarkSet)?;
        Ok(render_export(base, layer, viewport))
    }

    /// The base image without any watermark, for an explicit "save as is".
    pub fn export_unmarked(&self) -> Result<Raster> {
        self.base.clone().ok_or(StampError::NoBaseImage)
    }

    /// Export and write to `path`; the extension picks PNG or JPEG.
    pub fn save(&mut self, path: &Path, jpeg_quality: u8) -> Result<ExportFormat> {
        let result = self
            .export()
            .and_then(|raster| save_raster(&raster, path, jpeg_quality));
        let format = self.report(result)?;
        self.status = format!("Saved: {}", file_label(path));
        Ok(format)
    }

    /// Write the base image without a watermark.
    pub fn save_unmarked(&mut self, path: &Path, jpeg_quality: u8) -> Result<ExportFormat> {
        let result = self
            .export_unmarked()
            .and_then(|raster| save_raster(&raster, path, jpeg_quality));
        let format = self.report(result)?;
        self.status = format!("Saved without watermark: {}", file_label(path));
        Ok(format)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn layer_mut(&mut self) -> Result<&mut WatermarkLayer> {
        self.layer.as_mut().ok_or(StampError::NoWatermarkSet)
    }

    /// Re-render at preview resolution so the layer's footprint and anchor
    /// track the latest parameters.
    fn refresh(&mut self) {
        if let (Some(layer), Some(viewport)) = (self.layer.as_mut(), self.viewport.as_ref()) {
            layer.refresh_preview(viewport.scale);
        }
    }

    /// Current preview-space hit box, once a base image and watermark exist.
    fn hit_rect(&self) -> Option<Rect> {
        self.viewport.as_ref()?;
        let layer = self.layer.as_ref()?;
        match layer.placement() {
            Some(rect) => Some(rect),
            None => self.preview_watermark().map(|p| p.rect),
        }
    }

    fn status_dimensions(&self) -> String {
        match self.base.as_ref() {
            Some(b) => format!("size {}x{}", b.width(), b.height()),
            None => String::new(),
        }
    }

    /// Record a failure in the status line before handing it back.
    fn report<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(ref e) = result {
            warn!(error = %e, "Operation failed");
            self.status = format!("Error: {e}");
        }
        result
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
