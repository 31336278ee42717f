// Output: figure files and terminal display.

pub mod render;
pub mod terminal;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::charts::figure::Figure;
use crate::charts::palette::PlotConfig;

/// File format for a written figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Plotly figure JSON
    Json,
    Svg,
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }

    /// Guess the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            other => anyhow::bail!("Unknown image format '{other}' (expected json, svg or png)"),
        }
    }
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Respects UTF-8 character boundaries, so topic names with accented
/// letters never cause a panic.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Default output path for a figure: `<dir>/<stem>.<ext>`.
pub fn default_path(dir: &Path, stem: &str, format: ImageFormat) -> PathBuf {
    dir.join(format!("{stem}.{}", format.extension()))
}

/// Write `figure` to `path` in the given format, creating parent
/// directories as needed.
pub fn write_figure(
    figure: &Figure,
    path: &Path,
    format: ImageFormat,
    config: &PlotConfig,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    match format {
        ImageFormat::Json => {
            let json = serde_json::to_string_pretty(figure)?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        ImageFormat::Svg => render::render_svg(figure, path)?,
        ImageFormat::Png => render::render_png(figure, path, config.png_scaling)?,
    }

    Ok(())
}
