#![allow(dead_code)]

use std::path::{Path, PathBuf};

use inkstamp_core::io::image_io::save_raster;
use inkstamp_core::raster::Raster;

pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

pub fn solid(width: u32, height: u32, color: [u8; 4]) -> Raster {
    Raster::filled(width, height, color)
}

/// Left half `left`, right half `right`.
pub fn halves(width: u32, height: u32, left: [u8; 4], right: [u8; 4]) -> Raster {
    let mut r = Raster::new(width, height);
    for y in 0..height {
        for x in 0..width {
            r.put_pixel(x, y, if x < width / 2 { left } else { right });
        }
    }
    r
}

/// Opaque gray ramp whose alpha varies per pixel.
pub fn alpha_ramp(width: u32, height: u32) -> Raster {
    let mut r = Raster::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let a = ((x + y * width) * 255 / (width * height - 1).max(1)) as u8;
            r.put_pixel(x, y, [120, 60, 200, a]);
        }
    }
    r
}

/// Number of pixels that differ between two same-sized rasters.
pub fn count_diff(a: &Raster, b: &Raster) -> usize {
    assert_eq!(a.footprint(), b.footprint());
    let mut n = 0;
    for y in 0..a.height() {
        for x in 0..a.width() {
            if a.pixel(x, y) != b.pixel(x, y) {
                n += 1;
            }
        }
    }
    n
}

/// Encode `raster` as PNG under `dir`.
pub fn write_png(dir: &Path, name: &str, raster: &Raster) -> PathBuf {
    let path = dir.join(name);
    save_raster(raster, &path, 95).expect("write test PNG");
    path
}
