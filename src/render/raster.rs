//! PNG rasterisation of the generated SVG.
//!
//! Built on resvg/usvg/tiny-skia behind the `raster` feature. Without it
//! `svg_to_png` reports `RenderError::RasterUnavailable`.

use super::{RenderError, Result};

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    /// Fill painted under the diagram; `None` keeps it transparent.
    pub background: Option<String>,
    /// Extra font files (TTF/OTF bytes). The browser has no font database
    /// to fall back on, so labels render only with fonts registered here.
    pub fonts: Vec<Vec<u8>>,
    pub font_family: String,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: Some("white".to_string()),
            fonts: Vec::new(),
            font_family: "Arial".to_string(),
        }
    }
}

#[cfg(feature = "raster")]
pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options)?;
    let png = pixmap.encode_png().map_err(|_| RenderError::PngEncode)?;
    tracing::debug!(
        width = pixmap.width(),
        height = pixmap.height(),
        bytes = png.len(),
        "rasterised diagram"
    );
    Ok(png)
}

#[cfg(not(feature = "raster"))]
pub fn svg_to_png(_svg: &str, _options: &RasterOptions) -> Result<Vec<u8>> {
    Err(RenderError::RasterUnavailable)
}

#[cfg(feature = "raster")]
fn svg_to_pixmap(svg: &str, options: &RasterOptions) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    #[cfg(not(target_arch = "wasm32"))]
    opt.fontdb_mut().load_system_fonts();
    for font in &options.fonts {
        opt.fontdb_mut().load_font_data(font.clone());
    }
    opt.font_family = options.font_family.clone();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RenderError::SvgParse)?;

    let scale = if options.scale.is_finite() && options.scale > 0.0 {
        options.scale
    } else {
        1.0
    };
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RenderError::PixmapAlloc)?;

    if let Some(color) = options.background.as_deref().and_then(parse_color) {
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

#[cfg(feature = "raster")]
fn parse_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::WHITE),
        "black" => return Some(tiny_skia::Color::BLACK),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(tiny_skia::Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, 255)),
        8 => Some(tiny_skia::Color::from_rgba8(
            channel(0)?,
            channel(2)?,
            channel(4)?,
            channel(6)?,
        )),
        _ => None,
    }
}

#[cfg(all(test, feature = "raster"))]
mod tests {
    use super::*;

    const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="30" viewBox="0 0 40 30"><rect x="5" y="5" width="30" height="20" fill="#0284c7"/></svg>"##;

    fn png_size(png: &[u8]) -> (u32, u32) {
        let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
        (width, height)
    }

    #[test]
    fn test_png_signature_and_size() {
        let png = svg_to_png(SVG, &RasterOptions::default()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(png_size(&png), (40, 30));
    }

    #[test]
    fn test_scale_multiplies_size() {
        let options = RasterOptions {
            scale: 2.0,
            ..Default::default()
        };
        let png = svg_to_png(SVG, &options).unwrap();
        assert_eq!(png_size(&png), (80, 60));
    }

    #[test]
    fn test_invalid_svg_is_rejected() {
        let err = svg_to_png("<svg", &RasterOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::SvgParse));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("white"), Some(tiny_skia::Color::WHITE));
        assert_eq!(
            parse_color("#e0f2fe"),
            Some(tiny_skia::Color::from_rgba8(0xe0, 0xf2, 0xfe, 255))
        );
        assert_eq!(parse_color("#zzz"), None);
        assert_eq!(parse_color("salmon"), None);
    }
}
