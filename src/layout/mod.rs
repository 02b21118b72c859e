//! Diagram layout.
//!
//! Node boxes are derived from wrapped labels (`geometry`), then positioned
//! with a tidy tree so that parents sit centred over their children and no
//! two boxes overlap.

pub mod geometry;
pub mod tidy_tree;

pub use geometry::{GeometryConfig, NodeBox, box_for};
pub use tidy_tree::{
    Bounds, DiagramLayout, LayoutOrientation, Link, PlacedNode, TidyTreeConfig, TidyTreeLayout,
};
