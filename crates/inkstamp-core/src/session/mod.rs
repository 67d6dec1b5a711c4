//! Editing session: owns the base image, preview, viewport and watermark
//! layer, and turns presentation-layer events into layer mutations.

mod editor;
mod export;

pub use editor::{DragState, Editor};
pub use export::{export_placement, render_export};
