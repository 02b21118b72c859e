//! SVG writer for laid-out attack trees.
//!
//! Links are drawn first so node boxes paint over their ends.

use std::fmt::Write as _;

use serde::Deserialize;

use crate::layout::{DiagramLayout, GeometryConfig, LayoutOrientation, PlacedNode};

const LINK_STROKE: &str = "#64748b";
const ROOT_FILL: &str = "#e0f2fe";
const ROOT_STROKE: &str = "#0284c7";
const NODE_FILL: &str = "#f8fafc";
const NODE_STROKE: &str = "#64748b";
const TEXT_FILL: &str = "#1e293b";

/// Space kept around the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 60.0,
            right: 40.0,
            bottom: 40.0,
            left: 40.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SvgOptions {
    pub margin: Margin,
    pub font_size_px: f32,
    pub corner_radius: f32,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            font_size_px: 12.0,
            corner_radius: 5.0,
        }
    }
}

/// Serialize a layout into a standalone SVG document.
pub fn render_svg(layout: &DiagramLayout, geometry: &GeometryConfig, options: &SvgOptions) -> String {
    let margin = options.margin;
    let bounds = layout.bounds;
    let width = bounds.width() + margin.left + margin.right;
    let height = bounds.height() + margin.top + margin.bottom;

    let mut out = String::with_capacity(256 + layout.nodes.len() * 320);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" style="max-width: 100%; height: auto;">"#,
        w = fmt(width),
        h = fmt(height),
    );
    let _ = write!(
        out,
        r#"<g transform="translate({},{})">"#,
        fmt(margin.left - bounds.min_x),
        fmt(margin.top - bounds.min_y),
    );

    for link in &layout.links {
        let (Some(source), Some(target)) =
            (layout.nodes.get(link.source), layout.nodes.get(link.target))
        else {
            continue;
        };
        let _ = write!(
            out,
            r#"<path class="link" fill="none" stroke="{LINK_STROKE}" stroke-width="2" d="{}"/>"#,
            link_path(source, target, layout.orientation),
        );
    }

    for node in &layout.nodes {
        write_node(&mut out, node, geometry, options);
    }

    out.push_str("</g></svg>");
    out
}

fn write_node(out: &mut String, node: &PlacedNode, geometry: &GeometryConfig, options: &SvgOptions) {
    let root = node.is_root();
    let (fill, stroke, weight) = if root {
        (ROOT_FILL, ROOT_STROKE, "bold")
    } else {
        (NODE_FILL, NODE_STROKE, "normal")
    };

    let _ = write!(
        out,
        r#"<g class="node" data-id="{}" transform="translate({},{})">"#,
        escape_attr(&node.id),
        fmt(node.x),
        fmt(node.y),
    );
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{fill}" stroke="{stroke}" stroke-width="2"/>"#,
        fmt(node.bbox.offset_x),
        fmt(node.bbox.offset_y),
        fmt(node.bbox.width),
        fmt(node.bbox.height),
        fmt(options.corner_radius),
    );

    for (line, dy) in node.label.split('\n').zip(geometry.line_offsets(&node.label)) {
        let _ = write!(
            out,
            r#"<text dy="{}" text-anchor="middle" font-size="{}px" font-weight="{weight}" fill="{TEXT_FILL}">{}</text>"#,
            fmt(dy),
            fmt(options.font_size_px),
            escape_xml(line),
        );
    }
    out.push_str("</g>");
}

/// Cubic link between two anchors; control points sit halfway along the
/// depth axis.
fn link_path(source: &PlacedNode, target: &PlacedNode, orientation: LayoutOrientation) -> String {
    let (sx, sy, tx, ty) = (source.x, source.y, target.x, target.y);
    match orientation {
        LayoutOrientation::Vertical => {
            let my = (sy + ty) / 2.0;
            format!(
                "M{},{}C{},{} {},{} {},{}",
                fmt(sx),
                fmt(sy),
                fmt(sx),
                fmt(my),
                fmt(tx),
                fmt(my),
                fmt(tx),
                fmt(ty)
            )
        }
        LayoutOrientation::Horizontal => {
            let mx = (sx + tx) / 2.0;
            format!(
                "M{},{}C{},{} {},{} {},{}",
                fmt(sx),
                fmt(sy),
                fmt(mx),
                fmt(sy),
                fmt(mx),
                fmt(ty),
                fmt(tx),
                fmt(ty)
            )
        }
    }
}

/// Number formatting for attributes: two decimals at most, no `-0`, no
/// trailing zeros.
fn fmt(v: f32) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (f64::from(v) * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let mut buffer = ryu_js::Buffer::new();
    buffer.format(rounded).to_owned()
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    escape_xml(text)
}
