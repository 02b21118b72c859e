//! Attack tree data model and the adapter that turns it into a hierarchy.
//!
//! The backend describes a tree as a flat list of nodes whose `children`
//! fields reference other nodes by id. The layout needs a single-rooted
//! hierarchy instead, so this module provides:
//!
//! - `model`: the wire format (`AttackTree`, `AttackNode`)
//! - `label`: text wrapping and multi-line label synthesis
//! - `hierarchy`: the flat-list to hierarchy conversion

mod hierarchy;
pub mod label;
mod model;

pub use hierarchy::{
    Hierarchy, HierarchyNode, HierarchyTree, MAX_DEPTH, MAX_MATERIALIZED_NODES, NodeIndex, ROOT_ID,
    build_hierarchy,
};
pub use label::{NODE_WRAP_WIDTH, ROOT_WRAP_WIDTH, build_label, root_label, wrap_text};
pub use model::{AttackNode, AttackTree, format_metric};
