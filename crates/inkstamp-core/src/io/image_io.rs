use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::composite::flatten;
use crate::consts::JPEG_BACKGROUND;
use crate::error::{Result, StampError};
use crate::raster::Raster;

/// Output formats the exporter can write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    /// `.jpg` / `.jpeg` select JPEG; everything else is written as PNG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("jpg" | "jpeg") => Self::Jpeg,
            _ => Self::Png,
        }
    }

    pub fn supports_alpha(self) -> bool {
        matches!(self, Self::Png)
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Png => write!(f, "PNG"),
            Self::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// Decode an encoded image (any format `image` recognizes) into RGBA.
pub fn decode(bytes: &[u8]) -> Result<Raster> {
    let img = image::load_from_memory(bytes).map_err(|e| StampError::Decode(e.to_string()))?;
    Ok(Raster::from_rgba_image(img.to_rgba8()))
}

/// Read and decode an image file.
pub fn load_raster(path: &Path) -> Result<Raster> {
    let bytes = std::fs::read(path)?;
    decode(&bytes).map_err(|e| match e {
        StampError::Decode(msg) => StampError::Decode(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// Encode a raster. JPEG output is flattened onto white first.
pub fn encode(raster: &Raster, format: ExportFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        ExportFormat::Png => {
            raster
                .to_rgba_image()
                .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
                .map_err(|e| StampError::Encode(e.to_string()))?;
        }
        ExportFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(
                flatten(raster, JPEG_BACKGROUND).to_rgba_image(),
            )
            .to_rgb8();
            JpegEncoder::new_with_quality(&mut buf, jpeg_quality.clamp(1, 100))
                .encode_image(&rgb)
                .map_err(|e| StampError::Encode(e.to_string()))?;
        }
    }
    Ok(buf)
}

/// Encode and write a raster, choosing the format from the file extension.
pub fn save_raster(raster: &Raster, path: &Path, jpeg_quality: u8) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path);
    let bytes = encode(raster, format, jpeg_quality)?;
    std::fs::write(path, bytes)
        .map_err(|e| StampError::Encode(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), %format, "Image saved");
    Ok(format)
}
