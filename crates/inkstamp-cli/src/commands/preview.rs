use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use inkstamp_core::io::image_io::save_raster;
use inkstamp_core::project::build_editor;

use super::load_project;

#[derive(Args)]
pub struct PreviewArgs {
    /// Project file (TOML)
    pub project: PathBuf,

    /// Write only the preview image instead of the whole display canvas
    #[arg(long)]
    pub image_only: bool,

    /// Output file path
    #[arg(short, long, default_value = "preview.png")]
    pub output: PathBuf,
}

pub fn run(args: &PreviewArgs) -> Result<()> {
    let config = load_project(&args.project)?;
    let editor = build_editor(&config, &config.input)
        .with_context(|| format!("Failed to prepare {}", config.input.display()))?;

    let raster = if args.image_only {
        editor.compose_preview()?
    } else {
        editor.compose_canvas()
    };
    save_raster(&raster, &args.output, config.export.jpeg_quality)?;

    if let Some(rect) = editor.layer().and_then(|l| l.placement()) {
        println!(
            "Watermark at ({}, {}) size {}x{} in preview space",
            rect.x, rect.y, rect.width, rect.height
        );
    }
    println!("Preview saved to {}", args.output.display());
    Ok(())
}
