pub mod apply;
pub mod batch;
pub mod config;
pub mod info;
pub mod preview;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use inkstamp_core::project::config::ProjectConfig;

/// Read and parse a TOML project file.
pub fn load_project(path: &Path) -> Result<ProjectConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read project {}", path.display()))?;
    toml::from_str(&contents).context("Invalid project file")
}

/// Parse "r,g,b" or "#rrggbb".
pub fn parse_color(s: &str) -> Result<[u8; 3]> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            anyhow::bail!("Hex color must have 6 digits: {s}");
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("Invalid hex color {s}"))
        };
        return Ok([channel(0)?, channel(2)?, channel(4)?]);
    }

    let parts: Vec<u8> = s
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<std::result::Result<_, _>>()
        .context("Invalid color format (expected 'r,g,b' or '#rrggbb')")?;
    if parts.len() != 3 {
        anyhow::bail!("Color requires exactly 3 values: r,g,b");
    }
    Ok([parts[0], parts[1], parts[2]])
}
