use tracing::debug;

use crate::consts::ROTATION_EPSILON_DEG;
use crate::geometry::Footprint;
use crate::layer::WatermarkParams;
use crate::raster::Raster;

use super::rotate::rotate_expand;

/// A watermark rendered at a specific resolution. Recomputed on every
/// parameter or resolution change; never stored beyond its footprint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedWatermark {
    pub raster: Raster,
    pub width: u32,
    pub height: u32,
}

impl RenderedWatermark {
    fn new(raster: Raster) -> Self {
        let (width, height) = (raster.width(), raster.height());
        Self {
            raster,
            width,
            height,
        }
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.width, self.height)
    }
}

/// Size of `width` x `height` after scaling by `combined_scale`, floored and
/// kept at least one pixel on each axis.
pub fn scaled_size(width: u32, height: u32, combined_scale: f64) -> (u32, u32) {
    let w = (width as f64 * combined_scale).floor().max(1.0) as u32;
    let h = (height as f64 * combined_scale).floor().max(1.0) as u32;
    (w, h)
}

/// Render `source` with `params` at `resolution_scale` (1.0 for export, the
/// viewport scale for preview).
///
/// The order is fixed: one resize by the combined scale, then rotation with
/// canvas expansion, then the opacity multiply. The result's top-left is not
/// `params.anchor`; callers place it by its center.
pub fn render(source: &Raster, params: &WatermarkParams, resolution_scale: f64) -> RenderedWatermark {
    let combined_scale = params.user_scale * resolution_scale;
    let (w, h) = scaled_size(source.width(), source.height(), combined_scale);
    let mut raster = source.resize(w, h);

    if params.rotation_deg.abs() > ROTATION_EPSILON_DEG {
        raster = rotate_expand(&raster, params.rotation_deg);
    }

    if params.opacity < 1.0 {
        raster.scale_alpha(params.opacity);
    }

    debug!(
        combined_scale,
        rotation = params.rotation_deg,
        width = raster.width(),
        height = raster.height(),
        "Watermark rendered"
    );
    RenderedWatermark::new(raster)
}
