use fast_image_resize as fir;
use image::RgbaImage;
use ndarray::{s, Array3};

use crate::error::{Result, StampError};
use crate::geometry::Footprint;

/// Number of channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// An owned RGBA pixel grid.
///
/// Pixel data is row-major with shape `(height, width, 4)`, 8 bits per channel,
/// straight (non-premultiplied) alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub data: Array3<u8>,
}

impl Raster {
    /// Fully transparent raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let mut data = Array3::<u8>::zeros((height as usize, width as usize, CHANNELS));
        for (c, &v) in color.iter().enumerate() {
            data.slice_mut(s![.., .., c]).fill(v);
        }
        Self { data }
    }

    /// Build from raw RGBA bytes in row-major order.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let data = Array3::from_shape_vec((height as usize, width as usize, CHANNELS), pixels)
            .map_err(|_| StampError::InvalidDimensions { width, height })?;
        Ok(Self { data })
    }

    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        Self::from_raw(w, h, img.into_raw()).expect("buffer size matches dimensions")
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_raw(self.width(), self.height(), self.data.iter().copied().collect())
            .expect("buffer size matches dimensions")
    }

    pub fn width(&self) -> u32 {
        self.data.dim().1 as u32
    }

    pub fn height(&self) -> u32 {
        self.data.dim().0 as u32
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.width(), self.height())
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let (row, col) = (y as usize, x as usize);
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
            self.data[[row, col, 3]],
        ]
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        let (row, col) = (y as usize, x as usize);
        for (c, v) in px.into_iter().enumerate() {
            self.data[[row, col, c]] = v;
        }
    }

    /// True when every pixel has alpha 255.
    pub fn is_opaque(&self) -> bool {
        self.data.slice(s![.., .., 3]).iter().all(|&a| a == 255)
    }

    /// Resample to `width` x `height` with a Lanczos3 filter.
    ///
    /// The resizer multiplies color by alpha before filtering and divides it
    /// back afterwards, so fully transparent pixels do not bleed their RGB
    /// into visible edges.
    pub fn resize(&self, width: u32, height: u32) -> Raster {
        let width = width.max(1);
        let height = height.max(1);
        if (width, height) == (self.width(), self.height()) {
            return self.clone();
        }

        let pixels: Vec<u8> = self.data.iter().copied().collect();
        let src = fir::images::ImageRef::new(
            self.width(),
            self.height(),
            &pixels,
            fir::PixelType::U8x4,
        )
        .expect("buffer size matches dimensions");
        let mut dst = fir::images::Image::new(width, height, fir::PixelType::U8x4);
        let options = fir::ResizeOptions::new()
            .resize_alg(fir::ResizeAlg::Convolution(fir::FilterType::Lanczos3));
        fir::Resizer::new()
            .resize(&src, &mut dst, Some(&options))
            .expect("source and destination are both U8x4");
        Raster::from_raw(width, height, dst.into_vec()).expect("buffer size matches dimensions")
    }

    /// Multiply every alpha value by `factor` (clamped to [0, 1]), rounding to
    /// the nearest integer. RGB is untouched.
    pub fn scale_alpha(&mut self, factor: f64) {
        let factor = factor.clamp(0.0, 1.0);
        self.data
            .slice_mut(s![.., .., 3])
            .mapv_inplace(|a| (a as f64 * factor).round() as u8);
    }
}
