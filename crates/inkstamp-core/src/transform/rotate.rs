use ndarray::Array3;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::raster::{Raster, CHANNELS};

/// Canvas size needed to hold a `width` x `height` raster rotated by
/// `angle_deg` without clipping.
pub fn expanded_size(width: u32, height: u32, angle_deg: f64) -> (u32, u32) {
    let theta = angle_deg.to_radians();
    let (cos, sin) = (theta.cos().abs(), theta.sin().abs());
    let w = width as f64;
    let h = height as f64;
    // The epsilon keeps exact quarter turns from gaining a pixel to fp noise.
    let new_w = (w * cos + h * sin - 1e-6).ceil().max(1.0) as u32;
    let new_h = (w * sin + h * cos - 1e-6).ceil().max(1.0) as u32;
    (new_w, new_h)
}

/// Rotate `src` clockwise on screen by `angle_deg` about its center,
/// expanding the canvas to the rotated bounding box.
///
/// Uses bicubic (Catmull-Rom) sampling over premultiplied color. Pixels that
/// map outside the source are fully transparent.
pub fn rotate_expand(src: &Raster, angle_deg: f64) -> Raster {
    let (w, h) = (src.width(), src.height());
    let (new_w, new_h) = expanded_size(w, h, angle_deg);

    let theta = angle_deg.to_radians();
    let (sin, cos) = theta.sin_cos();
    let sampler = Sampler::new(src);
    let src_cx = w as f64 / 2.0;
    let src_cy = h as f64 / 2.0;
    let dst_cx = new_w as f64 / 2.0;
    let dst_cy = new_h as f64 / 2.0;

    // Inverse map: a destination pixel center is rotated back by -angle.
    let render_row = |row: usize| -> Vec<[u8; 4]> {
        let dy = row as f64 + 0.5 - dst_cy;
        (0..new_w as usize)
            .map(|col| {
                let dx = col as f64 + 0.5 - dst_cx;
                let sx = dx * cos + dy * sin + src_cx - 0.5;
                let sy = -dx * sin + dy * cos + src_cy - 0.5;
                sampler.bicubic(sx, sy)
            })
            .collect()
    };

    let rows: Vec<Vec<[u8; 4]>> = if new_w as usize * new_h as usize >= PARALLEL_PIXEL_THRESHOLD {
        (0..new_h as usize).into_par_iter().map(render_row).collect()
    } else {
        (0..new_h as usize).map(render_row).collect()
    };

    let mut data = Array3::<u8>::zeros((new_h as usize, new_w as usize, CHANNELS));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, px) in row_data.into_iter().enumerate() {
            for (c, v) in px.into_iter().enumerate() {
                data[[row, col, c]] = v;
            }
        }
    }
    Raster { data }
}

/// Premultiplied float copy of a raster for interpolation.
struct Sampler {
    width: isize,
    height: isize,
    pixels: Vec<[f32; 4]>,
}

impl Sampler {
    fn new(src: &Raster) -> Self {
        let (w, h) = (src.width() as usize, src.height() as usize);
        let mut pixels = Vec::with_capacity(w * h);
        for row in 0..h {
            for col in 0..w {
                let a = src.data[[row, col, 3]] as f32;
                let k = a / 255.0;
                pixels.push([
                    src.data[[row, col, 0]] as f32 * k,
                    src.data[[row, col, 1]] as f32 * k,
                    src.data[[row, col, 2]] as f32 * k,
                    a,
                ]);
            }
        }
        Self {
            width: w as isize,
            height: h as isize,
            pixels,
        }
    }

    fn fetch(&self, x: isize, y: isize) -> [f32; 4] {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return [0.0; 4];
        }
        self.pixels[(y * self.width + x) as usize]
    }

    fn bicubic(&self, x: f64, y: f64) -> [u8; 4] {
        let x0 = x.floor();
        let y0 = y.floor();
        // Entirely outside the 4x4 support of any source pixel.
        if x0 < -2.0 || y0 < -2.0 || x0 > self.width as f64 || y0 > self.height as f64 {
            return [0, 0, 0, 0];
        }
        let wx = cubic_weights((x - x0) as f32);
        let wy = cubic_weights((y - y0) as f32);
        let (ix, iy) = (x0 as isize, y0 as isize);

        let mut acc = [0.0f32; 4];
        for (j, wyj) in wy.iter().enumerate() {
            for (i, wxi) in wx.iter().enumerate() {
                let px = self.fetch(ix + i as isize - 1, iy + j as isize - 1);
                let weight = wxi * wyj;
                for c in 0..4 {
                    acc[c] += px[c] * weight;
                }
            }
        }

        let alpha = acc[3].clamp(0.0, 255.0);
        let a8 = alpha.round() as u8;
        if a8 == 0 {
            return [0, 0, 0, 0];
        }
        let unpremultiply = |c: f32| (c.clamp(0.0, alpha) * 255.0 / alpha).round().min(255.0) as u8;
        [unpremultiply(acc[0]), unpremultiply(acc[1]), unpremultiply(acc[2]), a8]
    }
}

/// Catmull-Rom weights for taps at offsets -1, 0, 1, 2.
fn cubic_weights(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        0.5 * (-t3 + 2.0 * t2 - t),
        0.5 * (3.0 * t3 - 5.0 * t2 + 2.0),
        0.5 * (-3.0 * t3 + 4.0 * t2 + t),
        0.5 * (t3 - t2),
    ]
}
