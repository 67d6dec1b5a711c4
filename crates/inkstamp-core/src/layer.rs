use crate::consts::{
    DEFAULT_ANCHOR, DEFAULT_OPACITY, INTERACTIVE_SCALE_MAX, INTERACTIVE_SCALE_MIN,
    ROTATION_LIMIT_DEG, SLIDER_SCALE_MAX, SLIDER_SCALE_MIN,
};
use crate::geometry::{Footprint, Point, PointF, Rect};
use crate::raster::Raster;
use crate::transform::{render, RenderedWatermark};
use crate::viewport::ViewportState;

/// Where a watermark's pixels come from.
///
/// Both variants carry the unscaled source raster the renderer works from:
/// padded glyphs for text, the loaded image as-is otherwise.
#[derive(Clone, Debug, PartialEq)]
pub enum WatermarkSource {
    Text {
        content: String,
        font_size_pt: u32,
        raster: Raster,
    },
    Image {
        raster: Raster,
    },
}

impl WatermarkSource {
    pub fn image(raster: Raster) -> Self {
        Self::Image { raster }
    }

    pub fn source_raster(&self) -> &Raster {
        match self {
            Self::Text { raster, .. } | Self::Image { raster } => raster,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Text {
                content,
                font_size_pt,
                ..
            } => format!("text \"{content}\" at {font_size_pt}pt"),
            Self::Image { raster } => format!("image {}x{}", raster.width(), raster.height()),
        }
    }
}

/// User-adjustable watermark parameters. Independent of resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WatermarkParams {
    /// Top-left corner in preview space.
    pub anchor: Point,
    pub user_scale: f64,
    /// Degrees, positive is clockwise on screen.
    pub rotation_deg: f64,
    pub opacity: f64,
}

impl Default for WatermarkParams {
    fn default() -> Self {
        Self {
            anchor: Point::new(DEFAULT_ANCHOR, DEFAULT_ANCHOR),
            user_scale: 1.0,
            rotation_deg: 0.0,
            opacity: DEFAULT_OPACITY,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Param {
    Scale,
    Opacity,
    Rotation,
}

/// Which control produced a value. Scale limits differ between the slider and
/// wheel zooming.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOrigin {
    Slider,
    Interactive,
}

/// Clamp `value` into the valid range for `param`.
pub fn clamp_param(param: Param, value: f64, origin: InputOrigin) -> f64 {
    match (param, origin) {
        (Param::Scale, InputOrigin::Slider) => value.clamp(SLIDER_SCALE_MIN, SLIDER_SCALE_MAX),
        (Param::Scale, InputOrigin::Interactive) => {
            value.clamp(INTERACTIVE_SCALE_MIN, INTERACTIVE_SCALE_MAX)
        }
        (Param::Opacity, _) => value.clamp(0.0, 1.0),
        (Param::Rotation, _) => value.clamp(-ROTATION_LIMIT_DEG, ROTATION_LIMIT_DEG),
    }
}

/// A rendered watermark together with its preview-space placement.
#[derive(Clone, Debug)]
pub struct PlacedWatermark {
    pub rendered: RenderedWatermark,
    pub rect: Rect,
}

/// Watermark source plus its parameters.
///
/// Also remembers the footprint of the last preview render, so a re-render at
/// a new scale or rotation can keep the visual center where it was.
#[derive(Clone, Debug)]
pub struct WatermarkLayer {
    source: WatermarkSource,
    pub params: WatermarkParams,
    footprint: Option<Footprint>,
}

impl WatermarkLayer {
    pub fn new(source: WatermarkSource, viewport: Option<&ViewportState>) -> Self {
        let mut layer = Self {
            source,
            params: WatermarkParams::default(),
            footprint: None,
        };
        layer.params.anchor = layer.initial_anchor(viewport);
        layer
    }

    /// Swap the source. Scale and rotation reset, opacity carries over, and
    /// the anchor recenters on the preview.
    pub fn set_source(&mut self, source: WatermarkSource, viewport: Option<&ViewportState>) {
        self.source = source;
        self.params.user_scale = 1.0;
        self.params.rotation_deg = 0.0;
        self.params.anchor = self.initial_anchor(viewport);
        self.footprint = None;
    }

    pub fn source(&self) -> &WatermarkSource {
        &self.source
    }

    /// Set a parameter, clamping out-of-range input. Non-finite values are
    /// ignored. Returns the value now in effect.
    pub fn set_param(&mut self, param: Param, value: f64, origin: InputOrigin) -> f64 {
        let slot = match param {
            Param::Scale => &mut self.params.user_scale,
            Param::Opacity => &mut self.params.opacity,
            Param::Rotation => &mut self.params.rotation_deg,
        };
        if value.is_finite() {
            *slot = clamp_param(param, value, origin);
        }
        *slot
    }

    /// Back to scale 1, no rotation, default opacity. The anchor is kept.
    pub fn reset_params(&mut self) {
        self.params.user_scale = 1.0;
        self.params.rotation_deg = 0.0;
        self.params.opacity = DEFAULT_OPACITY;
    }

    /// Whether `point` lies within `[anchor, anchor + footprint]`, with both
    /// expressed at the same resolution.
    pub fn hit_test(&self, point: Point, footprint: Footprint) -> bool {
        Rect::new(self.params.anchor, footprint).contains(point)
    }

    /// Footprint of the last preview render, if any.
    pub fn footprint(&self) -> Option<Footprint> {
        self.footprint
    }

    /// Preview-space rectangle of the last preview render.
    pub fn placement(&self) -> Option<Rect> {
        self.footprint.map(|f| Rect::new(self.params.anchor, f))
    }

    /// Render at `resolution_scale` without touching placement.
    pub fn render(&self, resolution_scale: f64) -> RenderedWatermark {
        render(self.source.source_raster(), &self.params, resolution_scale)
    }

    /// Render for the preview and re-anchor so the footprint center stays
    /// where the previous footprint's center was.
    ///
    /// Centers live on the pixel grid, so any number of refreshes leaves an
    /// unchanged center exactly where it was.
    pub fn refresh_preview(&mut self, resolution_scale: f64) -> PlacedWatermark {
        match self.placement() {
            Some(previous) => {
                let center = previous.pixel_center();
                self.place_with(resolution_scale, |size| anchor_for_center(center, size))
            }
            None => {
                let anchor = self.params.anchor;
                self.place_with(resolution_scale, |_| anchor)
            }
        }
    }

    /// Render for the preview and place the result centered on `center`.
    pub fn place_center(&mut self, center: PointF, resolution_scale: f64) -> PlacedWatermark {
        let center = center.round();
        self.place_with(resolution_scale, |size| anchor_for_center(center, size))
    }

    /// Render once for the preview and anchor the result at the top-left
    /// `position` picks for its footprint.
    pub fn place_with(
        &mut self,
        resolution_scale: f64,
        position: impl FnOnce(Footprint) -> Point,
    ) -> PlacedWatermark {
        let rendered = self.render(resolution_scale);
        let size = rendered.footprint();
        self.params.anchor = position(size);
        self.footprint = Some(size);
        PlacedWatermark {
            rect: Rect::new(self.params.anchor, size),
            rendered,
        }
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.params.anchor.x += dx;
        self.params.anchor.y += dy;
    }

    fn initial_anchor(&self, viewport: Option<&ViewportState>) -> Point {
        match viewport {
            Some(vp) => centered_anchor(self.source.source_raster(), vp),
            None => Point::new(DEFAULT_ANCHOR, DEFAULT_ANCHOR),
        }
    }
}

/// Top-left that centers the unscaled source footprint, at the viewport
/// scale, on the preview image.
fn centered_anchor(source: &Raster, vp: &ViewportState) -> Point {
    let half_w = (source.width() as f64 * vp.scale / 2.0) as i32;
    let half_h = (source.height() as f64 * vp.scale / 2.0) as i32;
    Point::new(
        vp.offset_x + vp.preview_width as i32 / 2 - half_w,
        vp.offset_y + vp.preview_height as i32 / 2 - half_h,
    )
}

/// Top-left of a `size` rectangle whose pixel center is `center`.
pub fn anchor_for_center(center: Point, size: Footprint) -> Point {
    Rect::centered_on(center, size).top_left()
}
