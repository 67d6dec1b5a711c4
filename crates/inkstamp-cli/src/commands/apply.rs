use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use inkstamp_core::consts::{
    DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH, DEFAULT_FONT_SIZE, DEFAULT_JPEG_QUALITY,
    DEFAULT_OPACITY,
};
use inkstamp_core::io::image_io::save_raster;
use inkstamp_core::project::build_editor;
use inkstamp_core::project::config::{
    DisplayConfig, ExportConfig, ParamsConfig, Placement, ProjectConfig, WatermarkConfig,
};

use super::parse_color;
use crate::summary::print_project_summary;

#[derive(Args)]
pub struct ApplyArgs {
    /// Base image to watermark
    pub file: PathBuf,

    /// Watermark text
    #[arg(long, conflicts_with = "image")]
    pub text: Option<String>,

    /// Watermark image (PNG with transparency recommended)
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Font size for text watermarks
    #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
    pub font_size: u32,

    /// Font file for text watermarks (defaults to a system sans-serif)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Text color as "r,g,b" or "#rrggbb"
    #[arg(long, default_value = "255,255,255")]
    pub color: String,

    /// Watermark scale factor
    #[arg(long, default_value = "1.0")]
    pub scale: f64,

    /// Clockwise rotation in degrees (-180 to 180)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub rotation: f64,

    /// Opacity (0.0 to 1.0)
    #[arg(long, default_value_t = DEFAULT_OPACITY)]
    pub opacity: f64,

    /// Preview-space top-left as "x,y"; centered when omitted
    #[arg(long, allow_hyphen_values = true)]
    pub anchor: Option<String>,

    /// Display area width for preview-space coordinates
    #[arg(long, default_value_t = DEFAULT_DISPLAY_WIDTH)]
    pub display_width: u32,

    /// Display area height for preview-space coordinates
    #[arg(long, default_value_t = DEFAULT_DISPLAY_HEIGHT)]
    pub display_height: u32,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    pub jpeg_quality: u8,

    /// Also write the editor preview canvas
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Output file path (.png or .jpg)
    #[arg(short, long, default_value = "watermarked.png")]
    pub output: PathBuf,
}

pub fn run(args: &ApplyArgs) -> Result<()> {
    let config = build_config_from_args(args)?;
    print_project_summary(&config);

    let mut editor = build_editor(&config, &config.input)
        .with_context(|| format!("Failed to prepare {}", config.input.display()))?;

    if let Some(ref preview_path) = args.preview {
        save_raster(&editor.compose_canvas(), preview_path, config.export.jpeg_quality)
            .with_context(|| format!("Failed to write preview {}", preview_path.display()))?;
        println!("Preview saved to {}", preview_path.display());
    }

    editor
        .save(&config.output, config.export.jpeg_quality)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    println!("{}", editor.status());

    Ok(())
}

fn build_config_from_args(args: &ApplyArgs) -> Result<ProjectConfig> {
    let watermark = match (&args.text, &args.image) {
        (_, Some(path)) => WatermarkConfig::Image { path: path.clone() },
        (Some(text), None) => WatermarkConfig::Text {
            content: text.clone(),
            font_size: args.font_size,
            font: args.font.clone(),
            color: parse_color(&args.color)?,
        },
        (None, None) => anyhow::bail!("Either --text or --image is required"),
    };

    let placement = match args.anchor {
        Some(ref anchor) => {
            let parts: Vec<i32> = anchor
                .split(',')
                .map(|s| s.trim().parse::<i32>())
                .collect::<std::result::Result<_, _>>()
                .context("Invalid anchor format (expected 'x,y')")?;
            if parts.len() != 2 {
                anyhow::bail!("Anchor requires exactly 2 values: x,y");
            }
            Placement::Anchor {
                x: parts[0],
                y: parts[1],
            }
        }
        None => Placement::Center,
    };

    Ok(ProjectConfig {
        input: args.file.clone(),
        output: args.output.clone(),
        display: DisplayConfig {
            width: args.display_width,
            height: args.display_height,
        },
        watermark,
        params: ParamsConfig {
            placement,
            scale: args.scale,
            rotation: args.rotation,
            opacity: args.opacity,
        },
        export: ExportConfig {
            jpeg_quality: args.jpeg_quality,
        },
    })
}
