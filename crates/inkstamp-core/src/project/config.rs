use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH, DEFAULT_FONT_SIZE, DEFAULT_JPEG_QUALITY,
    DEFAULT_OPACITY, DEFAULT_TEXT_COLOR,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub display: DisplayConfig,
    pub watermark: WatermarkConfig,
    #[serde(default)]
    pub params: ParamsConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Display area the preview is fitted into. Preview-space anchors are only
/// meaningful relative to this size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_DISPLAY_WIDTH,
            height: DEFAULT_DISPLAY_HEIGHT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WatermarkConfig {
    Text {
        content: String,
        #[serde(default = "default_font_size")]
        font_size: u32,
        /// Font file; a system sans-serif is used when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font: Option<PathBuf>,
        #[serde(default = "default_text_color")]
        color: [u8; 3],
    },
    Image {
        path: PathBuf,
    },
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

fn default_text_color() -> [u8; 3] {
    DEFAULT_TEXT_COLOR
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self::Text {
            content: "\u{a9} YourName".to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font: None,
            color: DEFAULT_TEXT_COLOR,
        }
    }
}

/// Where the watermark goes in preview space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Placement {
    /// Centered on the preview image.
    #[default]
    Center,
    /// Top-left of the rendered footprint, in display-area coordinates.
    Anchor { x: i32, y: i32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsConfig {
    pub placement: Placement,
    pub scale: f64,
    /// Degrees, clockwise.
    pub rotation: f64,
    pub opacity: f64,
}

impl Default for ParamsConfig {
    fn default() -> Self {
        Self {
            placement: Placement::Center,
            scale: 1.0,
            rotation: 0.0,
            opacity: DEFAULT_OPACITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub jpeg_quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ProjectConfig {
    /// A complete project with every section at its default.
    pub fn example() -> Self {
        Self {
            input: PathBuf::from("photo.jpg"),
            output: PathBuf::from("photo_watermarked.png"),
            display: DisplayConfig::default(),
            watermark: WatermarkConfig::default(),
            params: ParamsConfig::default(),
            export: ExportConfig::default(),
        }
    }
}
