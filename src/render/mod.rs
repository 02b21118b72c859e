//! Diagram output: SVG document, PNG raster and JSON export.

pub mod raster;
pub mod svg;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::{DiagramLayout, GeometryConfig, TidyTreeConfig, TidyTreeLayout};
use crate::tree::{AttackTree, build_hierarchy};

pub use raster::{RasterOptions, svg_to_png};
pub use svg::{Margin, SvgOptions, render_svg};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("PNG export is not available in this build")]
    RasterUnavailable,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

pub const JSON_FILE_NAME: &str = "attack-tree.json";
pub const JSON_MIME: &str = "application/json";

/// Image format offered for download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Svg,
    Png,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Svg => "attack-tree.svg",
            ExportFormat::Png => "attack-tree.png",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml;charset=utf-8",
            ExportFormat::Png => "image/png",
        }
    }

    /// Download button caption.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Svg => "Download SVG",
            ExportFormat::Png => "Download PNG",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "png" => Ok(ExportFormat::Png),
            other => Err(format!("unsupported export format: {other}")),
        }
    }
}

/// A file ready to hand to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Download {
    pub fn image(format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format.file_name(),
            mime: format.mime(),
            bytes,
        }
    }
}

/// Pretty-printed JSON with 2-space indentation.
pub fn export_json(tree: &AttackTree) -> Result<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}

/// JSON export wrapped as a download.
pub fn json_download(tree: &AttackTree) -> Result<Download> {
    Ok(Download {
        file_name: JSON_FILE_NAME,
        mime: JSON_MIME,
        bytes: export_json(tree)?.into_bytes(),
    })
}

/// Adapt, materialise and lay out a backend tree.
pub fn layout_tree(
    tree: &AttackTree,
    geometry: &GeometryConfig,
    config: &TidyTreeConfig,
) -> DiagramLayout {
    let hierarchy = build_hierarchy(tree);
    TidyTreeLayout::new(config.clone()).compute(&hierarchy.to_tree(), geometry)
}
