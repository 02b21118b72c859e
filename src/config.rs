//! Application configuration handed over from JavaScript.
//!
//! Every field is optional on the JS side; missing keys take the defaults
//! below.

use serde::Deserialize;

use crate::layout::{GeometryConfig, TidyTreeConfig};
use crate::render::SvgOptions;

/// Where the diagram image is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderMode {
    /// Lay out and draw in the page.
    #[default]
    ClientSide,
    /// Ask `POST /render` for the image.
    ServerSide,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Prefix for backend URLs. Empty means same origin.
    pub base_url: String,
    pub render_mode: RenderMode,
    /// Delay before navigating to the login page after a 401.
    pub login_redirect_delay_ms: u32,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    pub geometry: GeometryConfig,
    pub layout: TidyTreeConfig,
    pub svg: SvgOptions,
    /// Pixel ratio of PNG exports.
    pub raster_scale: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            render_mode: RenderMode::ClientSide,
            login_redirect_delay_ms: 2000,
            log_level: "info".to_string(),
            geometry: GeometryConfig::default(),
            layout: TidyTreeConfig::default(),
            svg: SvgOptions::default(),
            raster_scale: 1.0,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Absolute or same-origin URL for a backend path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
