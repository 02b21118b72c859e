//! Node box geometry derived from wrapped labels.
//!
//! Boxes are centred on their layout anchor. Height grows with the number
//! of label lines: `max(min_height, lines * line_height + padding)`.

use serde::{Deserialize, Serialize};

/// Geometry constants for node boxes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeometryConfig {
    /// Distance between consecutive label baselines.
    pub line_height: f32,
    /// Vertical padding added to the text block.
    pub padding: f32,
    /// Smallest box height.
    pub min_height: f32,
    /// Width of the root box.
    pub root_width: f32,
    /// Width of every other box.
    pub node_width: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            line_height: 18.0,
            padding: 20.0,
            min_height: 60.0,
            root_width: 170.0,
            node_width: 150.0,
        }
    }
}

/// Box of a single node, relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeBox {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Number of `\n`-separated segments. An empty label still has one line.
#[inline]
pub fn line_count(label: &str) -> usize {
    label.split('\n').count()
}

impl GeometryConfig {
    /// Box for a label.
    pub fn box_for(&self, label: &str, is_root: bool) -> NodeBox {
        let lines = line_count(label) as f32;
        let height = self.min_height.max(lines * self.line_height + self.padding);
        let width = if is_root { self.root_width } else { self.node_width };
        NodeBox {
            width,
            height,
            offset_x: -width / 2.0,
            offset_y: -height / 2.0,
        }
    }

    /// Vertical offset of each label line so the block is centred on the
    /// anchor.
    pub fn line_offsets(&self, label: &str) -> Vec<f32> {
        let lines = line_count(label);
        let start = -((lines - 1) as f32) * self.line_height / 2.0;
        (0..lines)
            .map(|i| start + i as f32 * self.line_height)
            .collect()
    }
}

/// Box for a label using the default constants.
pub fn box_for(label: &str, is_root: bool) -> NodeBox {
    GeometryConfig::default().box_for(label, is_root)
}
