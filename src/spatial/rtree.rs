//! R-tree based spatial index using the rstar crate.
//!
//! Provides O(log n) spatial queries for:
//! - Point hit testing against node boxes
//! - Rectangle intersection
//! - Box overlap detection

use rstar::{AABB, RTree, RTreeObject};
use tracing::warn;

use crate::layout::DiagramLayout;

/// A node box in the spatial index with its layout index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRect {
    /// Index into `DiagramLayout::nodes`.
    pub index: usize,
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl NodeRect {
    pub fn new(index: usize, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            index,
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// True when the two boxes share an area, not merely an edge.
    pub fn overlaps(&self, other: &NodeRect) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

impl RTreeObject for NodeRect {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

/// Spatial index over the node boxes of a layout.
///
/// Uses an R*-tree for efficient spatial queries.
#[derive(Debug)]
pub struct SpatialIndex {
    tree: RTree<NodeRect>,
}

impl SpatialIndex {
    /// Create a new empty spatial index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk load the boxes of every placed node.
    pub fn from_layout(layout: &DiagramLayout) -> Self {
        let rects: Vec<_> = layout
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let (min_x, min_y, max_x, max_y) = node.rect();
                NodeRect::new(index, min_x, min_y, max_x, max_y)
            })
            .collect();

        let index = Self {
            tree: RTree::bulk_load(rects),
        };

        for (a, b) in index.overlapping_pairs() {
            warn!(
                first = %layout.nodes[a].id,
                second = %layout.nodes[b].id,
                "layout produced overlapping node boxes"
            );
        }
        index
    }

    /// Insert a box into the index.
    pub fn insert(&mut self, rect: NodeRect) {
        self.tree.insert(rect);
    }

    /// Layout index of the node whose box contains the point.
    ///
    /// Box edges count as inside. When several boxes match, the one with the
    /// lowest layout index wins.
    pub fn node_at(&self, x: f32, y: f32) -> Option<usize> {
        self.tree
            .locate_in_envelope_intersecting(&AABB::from_point([x, y]))
            .map(|rect| rect.index)
            .min()
    }

    /// Find all nodes whose box intersects a rectangle.
    pub fn in_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<usize> {
        let envelope = AABB::from_corners([min_x, min_y], [max_x, max_y]);
        let mut found: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|rect| rect.index)
            .collect();
        found.sort_unstable();
        found
    }

    /// All pairs `(a, b)` with `a < b` whose boxes overlap with positive area.
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for rect in self.tree.iter() {
            for other in self.tree.locate_in_envelope_intersecting(&rect.envelope()) {
                if rect.index < other.index && rect.overlaps(other) {
                    pairs.push((rect.index, other.index));
                }
            }
        }
        pairs.sort_unstable();
        pairs
    }

    /// Get the number of boxes in the index.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{GeometryConfig, TidyTreeLayout};
    use crate::tree::HierarchyTree;

    fn sample_layout() -> DiagramLayout {
        let leaf = |id: &str| HierarchyTree {
            id: id.to_owned(),
            label: id.to_owned(),
            children: Vec::new(),
        };
        let tree = HierarchyTree {
            id: "root".into(),
            label: "Goal".into(),
            children: vec![leaf("a"), leaf("b"), leaf("c")],
        };
        TidyTreeLayout::with_defaults().compute(&tree, &GeometryConfig::default())
    }

    #[test]
    fn test_node_at_hits_boxes() {
        let layout = sample_layout();
        let index = SpatialIndex::from_layout(&layout);
        assert_eq!(index.len(), 4);

        assert_eq!(index.node_at(0.0, 0.0), Some(0));
        for (i, node) in layout.nodes.iter().enumerate() {
            assert_eq!(index.node_at(node.x, node.y), Some(i));
            // Edges are inclusive
            let (min_x, min_y, _, _) = node.rect();
            assert_eq!(index.node_at(min_x, min_y), Some(i));
        }
    }

    #[test]
    fn test_node_at_misses_gaps() {
        let layout = sample_layout();
        let index = SpatialIndex::from_layout(&layout);

        // Between levels
        assert_eq!(index.node_at(0.0, 60.0), None);
        // Between siblings a and b
        let a = &layout.nodes[1];
        assert_eq!(index.node_at(a.x + 80.0, a.y), None);
        assert_eq!(index.node_at(10_000.0, 10_000.0), None);
    }

    #[test]
    fn test_in_rect() {
        let layout = sample_layout();
        let index = SpatialIndex::from_layout(&layout);

        // A band covering the children level only
        let children_y = layout.nodes[1].y;
        assert_eq!(
            index.in_rect(-1000.0, children_y - 1.0, 1000.0, children_y + 1.0),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_layout_has_no_overlaps() {
        let index = SpatialIndex::from_layout(&sample_layout());
        assert!(index.overlapping_pairs().is_empty());
    }

    #[test]
    fn test_overlapping_pairs_detects_overlap() {
        let mut index = SpatialIndex::new();
        index.insert(NodeRect::new(0, 0.0, 0.0, 10.0, 10.0));
        index.insert(NodeRect::new(1, 5.0, 5.0, 15.0, 15.0));
        // Touching edges do not count
        index.insert(NodeRect::new(2, 15.0, 0.0, 25.0, 5.0));

        assert_eq!(index.overlapping_pairs(), vec![(0, 1)]);
    }

    #[test]
    fn test_empty_index() {
        let index = SpatialIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.node_at(0.0, 0.0), None);
    }
}
