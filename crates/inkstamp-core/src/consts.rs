/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default display area the preview is fitted into.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 900;
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 600;

/// Background of the display area around the preview image (#333333).
pub const DISPLAY_BACKGROUND: [u8; 4] = [0x33, 0x33, 0x33, 255];

/// Background JPEG exports are flattened onto.
pub const JPEG_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Default JPEG export quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Watermark opacity for a freshly created layer or after a reset.
pub const DEFAULT_OPACITY: f64 = 0.6;

/// Preview-space anchor used when no base image is loaded yet.
pub const DEFAULT_ANCHOR: i32 = 50;

/// Scale range accepted from the scale slider.
pub const SLIDER_SCALE_MIN: f64 = 0.1;
pub const SLIDER_SCALE_MAX: f64 = 5.0;

/// Scale range reachable through interactive (mouse wheel) zooming.
pub const INTERACTIVE_SCALE_MIN: f64 = 0.05;
pub const INTERACTIVE_SCALE_MAX: f64 = 10.0;

/// Relative scale change for one wheel notch.
pub const WHEEL_SCALE_STEP: f64 = 0.12;

pub const ROTATION_LIMIT_DEG: f64 = 180.0;

/// Rotations at or below this magnitude (degrees) are treated as none.
pub const ROTATION_EPSILON_DEG: f64 = 0.001;

/// Text padding is `max(TEXT_PADDING_MIN, font_size * TEXT_PADDING_RATIO)`.
pub const TEXT_PADDING_MIN: u32 = 10;
pub const TEXT_PADDING_RATIO: f64 = 0.4;

/// Font size range accepted for text watermarks.
pub const MIN_FONT_SIZE: u32 = 8;
pub const MAX_FONT_SIZE: u32 = 400;

pub const DEFAULT_FONT_SIZE: u32 = 72;
pub const DEFAULT_TEXT_COLOR: [u8; 3] = [255, 255, 255];
