use crate::geometry::Point;
use crate::raster::Raster;

/// Alpha-blend `overlay` onto `dst` with its top-left at `top_left`.
///
/// Any part of the overlay outside `dst` is clipped; negative positions and
/// overhang past the far edges are legal. Per RGB channel
/// `dst = src * a + dst * (1 - a)` with `a = src_alpha / 255`, and the
/// destination alpha becomes `max(dst_alpha, src_alpha)`.
pub fn paste(dst: &mut Raster, overlay: &Raster, top_left: Point) {
    let (dst_w, dst_h) = (dst.width() as i64, dst.height() as i64);
    let (ov_w, ov_h) = (overlay.width() as i64, overlay.height() as i64);
    let (ox, oy) = (top_left.x as i64, top_left.y as i64);

    let x_start = ox.max(0);
    let y_start = oy.max(0);
    let x_end = (ox + ov_w).min(dst_w);
    let y_end = (oy + ov_h).min(dst_h);
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    for y in y_start..y_end {
        let (dr, sr) = (y as usize, (y - oy) as usize);
        for x in x_start..x_end {
            let (dc, sc) = (x as usize, (x - ox) as usize);
            let a = overlay.data[[sr, sc, 3]] as u32;
            if a == 0 {
                continue;
            }
            let inv = 255 - a;
            for c in 0..3 {
                let s = overlay.data[[sr, sc, c]] as u32;
                let d = dst.data[[dr, dc, c]] as u32;
                dst.data[[dr, dc, c]] = ((s * a + d * inv + 127) / 255) as u8;
            }
            let da = dst.data[[dr, dc, 3]];
            dst.data[[dr, dc, 3]] = da.max(a as u8);
        }
    }
}

/// Composite `src` onto an opaque `background`, producing a fully opaque
/// raster. Used before encoding to formats without alpha.
pub fn flatten(src: &Raster, background: [u8; 3]) -> Raster {
    let mut out = Raster::filled(
        src.width(),
        src.height(),
        [background[0], background[1], background[2], 255],
    );
    paste(&mut out, src, Point::new(0, 0));
    out
}
