use serde::{Deserialize, Serialize};

/// Integer pixel position, in either preview or original space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fractional position. Produced when mapping into preview space so that
/// mapping back does not lose more than rounding precision.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round to the nearest integer pixel.
    pub fn round(self) -> Point {
        Point::new(self.x.round() as i32, self.y.round() as i32)
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self {
        Self::new(p.x as f64, p.y as f64)
    }
}

/// Size of a rendered watermark after scale and rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned placement rectangle (top-left + size).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(top_left: Point, size: Footprint) -> Self {
        Self {
            x: top_left.x,
            y: top_left.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Footprint {
        Footprint::new(self.width, self.height)
    }

    pub fn center(&self) -> PointF {
        PointF::new(
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Center on the pixel grid, `top_left + size / 2` with integer division.
    /// Inverse of [`Rect::centered_on`] for any size.
    pub fn pixel_center(&self) -> Point {
        Point::new(
            self.x + (self.width / 2) as i32,
            self.y + (self.height / 2) as i32,
        )
    }

    /// A `size` rectangle whose [`Rect::pixel_center`] is `center`.
    pub fn centered_on(center: Point, size: Footprint) -> Self {
        Self::new(
            Point::new(
                center.x - (size.width / 2) as i32,
                center.y - (size.height / 2) as i32,
            ),
            size,
        )
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, p: Point) -> bool {
        let right = self.x as i64 + self.width as i64;
        let bottom = self.y as i64 + self.height as i64;
        (self.x as i64..=right).contains(&(p.x as i64))
            && (self.y as i64..=bottom).contains(&(p.y as i64))
    }
}
