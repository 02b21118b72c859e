//! Spatial indexing for O(log n) hit testing.
//!
//! An R-tree over the node boxes of a computed layout, used to map pointer
//! positions back to nodes and to verify that no boxes overlap.

mod rtree;

pub use rtree::{NodeRect, SpatialIndex};
