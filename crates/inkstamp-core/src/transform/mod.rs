//! Watermark rendering: scale, rotate with expansion, alpha multiply.

pub mod render;
pub mod rotate;

pub use render::{render, scaled_size, RenderedWatermark};
pub use rotate::{expanded_size, rotate_expand};
