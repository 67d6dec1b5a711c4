use crate::error::{Result, StampError};
use crate::geometry::{Footprint, Point, PointF, Rect};

/// Affine relationship between the full-resolution base image and its
/// down-scaled preview inside a fixed display area.
///
/// Preview space includes the centering offset: a preview point `p` maps to
/// original space as `(p - offset) / scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub base_width: u32,
    pub base_height: u32,
    pub preview_width: u32,
    pub preview_height: u32,
    /// Preview pixels per original pixel, never above 1.0.
    pub scale: f64,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl ViewportState {
    /// Fit a `base_width` x `base_height` image into a `max_width` x
    /// `max_height` display area without upscaling, centered.
    pub fn fit_to_display(
        base_width: u32,
        base_height: u32,
        max_width: u32,
        max_height: u32,
    ) -> Result<Self> {
        if base_width == 0 || base_height == 0 {
            return Err(StampError::InvalidDimensions {
                width: base_width,
                height: base_height,
            });
        }
        if max_width == 0 || max_height == 0 {
            return Err(StampError::InvalidDimensions {
                width: max_width,
                height: max_height,
            });
        }

        let scale = (max_width as f64 / base_width as f64)
            .min(max_height as f64 / base_height as f64)
            .min(1.0);
        let preview_width = ((base_width as f64 * scale).round() as u32).clamp(1, max_width);
        let preview_height = ((base_height as f64 * scale).round() as u32).clamp(1, max_height);

        // Both differences are non-negative, so `/` is floor division.
        let offset_x = ((max_width - preview_width) / 2) as i32;
        let offset_y = ((max_height - preview_height) / 2) as i32;

        Ok(Self {
            base_width,
            base_height,
            preview_width,
            preview_height,
            scale,
            offset_x,
            offset_y,
        })
    }

    /// Map a preview-space point to original space, rounded to the nearest pixel.
    pub fn to_original(&self, p: impl Into<PointF>) -> Point {
        let p = p.into();
        PointF::new(
            (p.x - self.offset_x as f64) / self.scale,
            (p.y - self.offset_y as f64) / self.scale,
        )
        .round()
    }

    /// Map an original-space point to preview space.
    pub fn to_preview(&self, p: Point) -> PointF {
        PointF::new(
            p.x as f64 * self.scale + self.offset_x as f64,
            p.y as f64 * self.scale + self.offset_y as f64,
        )
    }

    pub fn length_to_original(&self, len: f64) -> f64 {
        len / self.scale
    }

    pub fn length_to_preview(&self, len: f64) -> f64 {
        len * self.scale
    }

    /// Where the preview image sits inside the display area.
    pub fn preview_rect(&self) -> Rect {
        Rect::new(
            Point::new(self.offset_x, self.offset_y),
            Footprint::new(self.preview_width, self.preview_height),
        )
    }

    pub fn base_footprint(&self) -> Footprint {
        Footprint::new(self.base_width, self.base_height)
    }
}
