use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, StampError};
use crate::geometry::{Point, Rect};
use crate::io::image_io::ExportFormat;
use crate::layer::{InputOrigin, Param};
use crate::session::Editor;
use crate::text::resolve_renderer;

use super::config::{Placement, ProjectConfig, WatermarkConfig};

/// What a project run wrote.
#[derive(Clone, Debug)]
pub struct ProjectOutput {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
    /// Watermark rectangle in preview space.
    pub preview_rect: Option<Rect>,
}

/// Set up an editor the way a user would: open `input`, create the
/// watermark, apply the parameters, then place it.
pub fn build_editor(config: &ProjectConfig, input: &Path) -> Result<Editor> {
    let mut editor = Editor::new(config.display.width, config.display.height);
    editor.open_base(input)?;

    match &config.watermark {
        WatermarkConfig::Text {
            content,
            font_size,
            font,
            color,
        } => {
            let renderer = resolve_renderer(font.as_deref());
            editor.set_text_watermark(content, *font_size, *color, renderer.as_ref())?;
        }
        WatermarkConfig::Image { path } => editor.open_watermark(path)?,
    }

    let params = &config.params;
    editor.set_param(Param::Scale, params.scale, InputOrigin::Interactive)?;
    editor.set_param(Param::Rotation, params.rotation, InputOrigin::Slider)?;
    editor.set_param(Param::Opacity, params.opacity, InputOrigin::Slider)?;

    match params.placement {
        Placement::Center => {
            editor.center_watermark()?;
        }
        Placement::Anchor { x, y } => editor.place_watermark(Point::new(x, y))?,
    }
    Ok(editor)
}

/// Run a project: watermark `config.input` and write `config.output`.
pub fn run_project(config: &ProjectConfig) -> Result<ProjectOutput> {
    run_one(config, &config.input, &config.output)
}

/// Apply one project to many inputs, writing `<stem>_watermarked.<ext>` into
/// `out_dir` with the extension of `config.output`.
///
/// `progress` is called with `(images_done, total_images)`. Stops at the first
/// failing image.
pub fn run_batch(
    config: &ProjectConfig,
    inputs: &[PathBuf],
    out_dir: &Path,
    mut progress: impl FnMut(usize, usize),
) -> Result<Vec<ProjectOutput>> {
    std::fs::create_dir_all(out_dir)?;
    let ext = config
        .output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");

    let total = inputs.len();
    let mut outputs = Vec::with_capacity(total);
    for (i, input) in inputs.iter().enumerate() {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| StampError::Config(format!("No file name in {}", input.display())))?;
        let output = out_dir.join(format!("{stem}_watermarked.{ext}"));
        outputs.push(run_one(config, input, &output)?);
        progress(i + 1, total);
    }
    info!(count = total, dir = %out_dir.display(), "Batch complete");
    Ok(outputs)
}

fn run_one(config: &ProjectConfig, input: &Path, output: &Path) -> Result<ProjectOutput> {
    let mut editor = build_editor(config, input)?;
    let format = editor.save(output, config.export.jpeg_quality)?;
    let (width, height) = editor
        .base()
        .map(|b| (b.width(), b.height()))
        .ok_or(StampError::NoBaseImage)?;

    Ok(ProjectOutput {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        format,
        width,
        height,
        preview_rect: editor.layer().and_then(|l| l.placement()),
    })
}
