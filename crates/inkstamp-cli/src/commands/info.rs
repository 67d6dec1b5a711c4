use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use inkstamp_core::consts::{DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH};
use inkstamp_core::io::image_io::load_raster;
use inkstamp_core::viewport::ViewportState;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// Display area width the preview is fitted into
    #[arg(long, default_value_t = DEFAULT_DISPLAY_WIDTH)]
    pub display_width: u32,

    /// Display area height the preview is fitted into
    #[arg(long, default_value_t = DEFAULT_DISPLAY_HEIGHT)]
    pub display_height: u32,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let raster = load_raster(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let vp = ViewportState::fit_to_display(
        raster.width(),
        raster.height(),
        args.display_width,
        args.display_height,
    )?;

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", raster.width(), raster.height());
    println!("Opaque:      {}", if raster.is_opaque() { "yes" } else { "no" });
    println!(
        "Display:     {}x{}",
        args.display_width, args.display_height
    );
    println!("Preview:     {}x{}", vp.preview_width, vp.preview_height);
    println!("Scale:       {:.4}", vp.scale);
    println!("Offset:      ({}, {})", vp.offset_x, vp.offset_y);

    Ok(())
}
