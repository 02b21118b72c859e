//! Buchheim-Junger-Leipert tidy tree layout.
//!
//! Implements the O(n) algorithm from "Improving Walker's Algorithm to Run in
//! Linear Time" (Buchheim, Junger, Leipert, 2002) over a materialised
//! `HierarchyTree`, with separations measured in pixels so that node boxes
//! of different sizes never overlap.
//!
//! # Algorithm Overview
//!
//! 1. **First walk (bottom-up):** assign preliminary breadth coordinates by
//!    merging subtree contours. Threads give O(1) amortized contour steps.
//! 2. **Second walk (top-down):** apply accumulated modifiers.
//! 3. **Level placement:** each depth gets a band as deep as its largest box.
//! 4. **Coordinate transform:** breadth/depth become x/y (vertical) or y/x
//!    (horizontal).

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::geometry::{GeometryConfig, NodeBox};
use crate::tree::HierarchyTree;

/// Direction in which the tree grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutOrientation {
    /// Root at the top, children below.
    #[default]
    Vertical,
    /// Root at the left, children to the right.
    Horizontal,
}

/// Configuration for the tidy tree layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TidyTreeConfig {
    /// Gap between the boxes of two siblings.
    pub sibling_separation: f32,
    /// Gap between boxes of neighbouring subtrees that are not siblings.
    pub subtree_separation: f32,
    /// Gap between two consecutive levels.
    pub level_separation: f32,
    pub orientation: LayoutOrientation,
}

impl Default for TidyTreeConfig {
    fn default() -> Self {
        Self {
            sibling_separation: 20.0,
            subtree_separation: 40.0,
            level_separation: 60.0,
            orientation: LayoutOrientation::Vertical,
        }
    }
}

/// Internal node data used during the Buchheim algorithm.
#[derive(Debug)]
struct LayoutNode {
    /// Depth in the tree (root = 0).
    depth: u32,
    /// Parent layout index (None for root).
    parent: Option<usize>,
    children: Vec<usize>,
    /// Box extent along the breadth axis.
    breadth: f32,
    /// Box extent along the depth axis.
    extent: f32,
    /// Preliminary breadth coordinate (from first walk).
    prelim: f32,
    /// Modifier for subtree shift (accumulated in first walk, applied in second).
    modifier: f32,
    /// Contour continuation for nodes without children.
    thread: Option<usize>,
    /// Ancestor pointer (for the "default ancestor" in apportion).
    ancestor: usize,
    shift: f32,
    change: f32,
    /// Left-to-right index among siblings.
    number: usize,
}

/// A node with its final position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedNode {
    pub id: String,
    pub label: String,
    pub depth: u32,
    /// Layout index of the parent (None for root).
    pub parent: Option<usize>,
    /// Anchor (box centre) x.
    pub x: f32,
    /// Anchor (box centre) y.
    pub y: f32,
    #[serde(rename = "box")]
    pub bbox: NodeBox,
}

impl PlacedNode {
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Box corners as `(min_x, min_y, max_x, max_y)`.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let min_x = self.x + self.bbox.offset_x;
        let min_y = self.y + self.bbox.offset_y;
        (min_x, min_y, min_x + self.bbox.width, min_y + self.bbox.height)
    }
}

/// Parent to child connection, as indices into `DiagramLayout::nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    pub source: usize,
    pub target: usize,
}

/// Axis-aligned bounds of all node boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Result of the tidy tree layout computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramLayout {
    /// Nodes in pre-order; index 0 is the root.
    pub nodes: Vec<PlacedNode>,
    pub links: Vec<Link>,
    pub bounds: Bounds,
    pub orientation: LayoutOrientation,
}

/// The tidy tree layout engine.
pub struct TidyTreeLayout {
    config: TidyTreeConfig,
}

impl TidyTreeLayout {
    /// Create a new tidy tree layout with the given configuration.
    pub fn new(config: TidyTreeConfig) -> Self {
        Self { config }
    }

    /// Create a tidy tree layout with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TidyTreeConfig::default())
    }

    pub fn config(&self) -> &TidyTreeConfig {
        &self.config
    }

    /// Compute positions for every node of `tree`.
    ///
    /// Boxes come from `geometry`; the root is the node at depth 0.
    pub fn compute(&self, tree: &HierarchyTree, geometry: &GeometryConfig) -> DiagramLayout {
        let mut layout_nodes: Vec<LayoutNode> = Vec::with_capacity(tree.node_count());
        let mut sources: Vec<(&HierarchyTree, NodeBox)> = Vec::with_capacity(tree.node_count());

        self.build_layout_tree(tree, geometry, &mut layout_nodes, &mut sources);

        // Run Buchheim's algorithm
        self.first_walk(0, &mut layout_nodes);

        let mut final_breadth: Vec<f32> = vec![0.0; layout_nodes.len()];
        self.second_walk_collect(0, &layout_nodes, &mut final_breadth);

        // Center the tree around breadth 0
        let min_b = final_breadth.iter().copied().fold(f32::INFINITY, f32::min);
        let max_b = final_breadth
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max);
        let breadth_offset = -(min_b + max_b) / 2.0;

        let level_positions = self.level_positions(&layout_nodes);

        let mut nodes = Vec::with_capacity(layout_nodes.len());
        let mut links = Vec::with_capacity(layout_nodes.len().saturating_sub(1));
        for (layout_idx, node) in layout_nodes.iter().enumerate() {
            let (source, bbox) = &sources[layout_idx];
            let breadth = final_breadth[layout_idx] + breadth_offset;
            let depth_pos = level_positions[node.depth as usize];
            let (x, y) = match self.config.orientation {
                LayoutOrientation::Vertical => (breadth, depth_pos),
                LayoutOrientation::Horizontal => (depth_pos, breadth),
            };

            if let Some(parent) = node.parent {
                links.push(Link {
                    source: parent,
                    target: layout_idx,
                });
            }
            nodes.push(PlacedNode {
                id: source.id.clone(),
                label: source.label.clone(),
                depth: node.depth,
                parent: node.parent,
                x,
                y,
                bbox: *bbox,
            });
        }

        let bounds = Self::bounds(&nodes);
        debug!(
            nodes = nodes.len(),
            width = bounds.width(),
            height = bounds.height(),
            "computed tidy tree layout"
        );

        DiagramLayout {
            nodes,
            links,
            bounds,
            orientation: self.config.orientation,
        }
    }

    /// Flatten `tree` into layout nodes in pre-order (index 0 is the root).
    fn build_layout_tree<'a>(
        &self,
        tree: &'a HierarchyTree,
        geometry: &GeometryConfig,
        layout_nodes: &mut Vec<LayoutNode>,
        sources: &mut Vec<(&'a HierarchyTree, NodeBox)>,
    ) {
        // (node, parent layout index, depth, sibling number)
        let mut stack: Vec<(&'a HierarchyTree, Option<usize>, u32, usize)> = vec![(tree, None, 0, 0)];

        while let Some((node, parent, depth, number)) = stack.pop() {
            let bbox = geometry.box_for(&node.label, depth == 0);
            let (breadth, extent) = match self.config.orientation {
                LayoutOrientation::Vertical => (bbox.width, bbox.height),
                LayoutOrientation::Horizontal => (bbox.height, bbox.width),
            };

            let layout_idx = layout_nodes.len();
            layout_nodes.push(LayoutNode {
                depth,
                parent,
                children: Vec::with_capacity(node.children.len()),
                breadth,
                extent,
                prelim: 0.0,
                modifier: 0.0,
                thread: None,
                ancestor: layout_idx,
                shift: 0.0,
                change: 0.0,
                number,
            });
            sources.push((node, bbox));
            // siblings are popped left to right, so this keeps their order
            if let Some(parent) = parent {
                layout_nodes[parent].children.push(layout_idx);
            }

            for (number, child) in node.children.iter().enumerate().rev() {
                stack.push((child, Some(layout_idx), depth + 1, number));
            }
        }
    }

    /// Anchor coordinate of every level along the depth axis.
    fn level_positions(&self, nodes: &[LayoutNode]) -> Vec<f32> {
        let levels = nodes.iter().map(|n| n.depth as usize + 1).max().unwrap_or(1);
        let mut extents = vec![0.0f32; levels];
        for node in nodes {
            let e = &mut extents[node.depth as usize];
            *e = e.max(node.extent);
        }

        let mut positions = vec![0.0f32; levels];
        for depth in 1..levels {
            positions[depth] = positions[depth - 1]
                + extents[depth - 1] / 2.0
                + self.config.level_separation
                + extents[depth] / 2.0;
        }
        positions
    }

    fn bounds(nodes: &[PlacedNode]) -> Bounds {
        let mut bounds = Bounds {
            min_x: f32::INFINITY,
            min_y: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            max_y: f32::NEG_INFINITY,
        };
        for node in nodes {
            let (min_x, min_y, max_x, max_y) = node.rect();
            bounds.min_x = bounds.min_x.min(min_x);
            bounds.min_y = bounds.min_y.min(min_y);
            bounds.max_x = bounds.max_x.max(max_x);
            bounds.max_y = bounds.max_y.max(max_y);
        }
        bounds
    }

    /// Required distance between the anchors of two neighbouring nodes on
    /// the same level.
    fn distance(&self, left: usize, right: usize, nodes: &[LayoutNode]) -> f32 {
        let gap = if self.are_siblings(left, right, nodes) {
            self.config.sibling_separation
        } else {
            self.config.subtree_separation
        };
        gap + (nodes[left].breadth + nodes[right].breadth) / 2.0
    }

    /// Check if two layout nodes are siblings (share the same parent).
    fn are_siblings(&self, a: usize, b: usize, nodes: &[LayoutNode]) -> bool {
        nodes[a].parent.is_some() && nodes[a].parent == nodes[b].parent
    }

    fn left_sibling(&self, v: usize, nodes: &[LayoutNode]) -> Option<usize> {
        let parent = nodes[v].parent?;
        let number = nodes[v].number;
        if number == 0 {
            None
        } else {
            nodes[parent].children.get(number - 1).copied()
        }
    }

    fn leftmost_sibling(&self, v: usize, nodes: &[LayoutNode]) -> usize {
        nodes[v]
            .parent
            .and_then(|parent| nodes[parent].children.first().copied())
            .unwrap_or(v)
    }

    /// Buchheim first walk: bottom-up assignment of preliminary coordinates.
    ///
    /// Post-order over an explicit stack of `(node, next child, default
    /// ancestor)`. A node is apportioned against its left siblings as soon
    /// as its own subtree is done.
    fn first_walk(&self, root: usize, nodes: &mut [LayoutNode]) {
        let mut stack: Vec<(usize, usize, usize)> = vec![(root, 0, Self::first_child(root, nodes))];

        while let Some(top) = stack.last_mut() {
            let (v, next, _) = *top;
            if let Some(&child) = nodes[v].children.get(next) {
                top.1 += 1;
                stack.push((child, 0, Self::first_child(child, nodes)));
                continue;
            }

            stack.pop();
            self.place(v, nodes);
            if let Some(parent) = stack.last_mut() {
                parent.2 = self.apportion(v, parent.2, nodes);
            }
        }
    }

    fn first_child(v: usize, nodes: &[LayoutNode]) -> usize {
        nodes[v].children.first().copied().unwrap_or(v)
    }

    /// Preliminary coordinate of `v` once all of its children are placed.
    fn place(&self, v: usize, nodes: &mut [LayoutNode]) {
        let left_sibling = self.left_sibling(v, nodes);

        let first = nodes[v].children.first().copied();
        let last = nodes[v].children.last().copied();
        let (Some(first), Some(last)) = (first, last) else {
            // Leaf node: position relative to left sibling
            nodes[v].prelim = match left_sibling {
                Some(w) => nodes[w].prelim + self.distance(w, v, nodes),
                None => 0.0,
            };
            return;
        };

        // Distribute extra space evenly among intermediate children
        self.execute_shifts(v, nodes);

        // Center parent over first and last children
        let midpoint = (nodes[first].prelim + nodes[last].prelim) / 2.0;
        match left_sibling {
            Some(w) => {
                nodes[v].prelim = nodes[w].prelim + self.distance(w, v, nodes);
                nodes[v].modifier = nodes[v].prelim - midpoint;
            }
            None => nodes[v].prelim = midpoint,
        }
    }

    /// Get the next node on the right contour of a subtree.
    fn next_right(&self, v: usize, nodes: &[LayoutNode]) -> Option<usize> {
        nodes[v].children.last().copied().or(nodes[v].thread)
    }

    /// Get the next node on the left contour of a subtree.
    fn next_left(&self, v: usize, nodes: &[LayoutNode]) -> Option<usize> {
        nodes[v].children.first().copied().or(nodes[v].thread)
    }

    /// Apportion: push `v`'s subtree right until it clears the forest of its
    /// left siblings on every level.
    fn apportion(&self, v: usize, mut default_ancestor: usize, nodes: &mut [LayoutNode]) -> usize {
        let Some(left_sibling) = self.left_sibling(v, nodes) else {
            return default_ancestor;
        };

        // inner/outer contours of the right subtree (v) and left forest
        let mut v_inner_right = v;
        let mut v_outer_right = v;
        let mut v_inner_left = left_sibling;
        let mut v_outer_left = self.leftmost_sibling(v, nodes);

        let mut s_inner_right = nodes[v_inner_right].modifier;
        let mut s_outer_right = nodes[v_outer_right].modifier;
        let mut s_inner_left = nodes[v_inner_left].modifier;
        let mut s_outer_left = nodes[v_outer_left].modifier;

        loop {
            let (Some(il), Some(ir)) = (
                self.next_right(v_inner_left, nodes),
                self.next_left(v_inner_right, nodes),
            ) else {
                break;
            };
            v_inner_left = il;
            v_inner_right = ir;
            if let Some(next) = self.next_left(v_outer_left, nodes) {
                v_outer_left = next;
            }
            if let Some(next) = self.next_right(v_outer_right, nodes) {
                v_outer_right = next;
            }

            nodes[v_outer_right].ancestor = v;

            let shift = (nodes[v_inner_left].prelim + s_inner_left)
                - (nodes[v_inner_right].prelim + s_inner_right)
                + self.distance(v_inner_left, v_inner_right, nodes);

            if shift > 0.0 {
                let ancestor = self.ancestor(v_inner_left, v, default_ancestor, nodes);
                self.move_subtree(ancestor, v, shift, nodes);
                s_inner_right += shift;
                s_outer_right += shift;
            }

            s_inner_left += nodes[v_inner_left].modifier;
            s_inner_right += nodes[v_inner_right].modifier;
            s_outer_left += nodes[v_outer_left].modifier;
            s_outer_right += nodes[v_outer_right].modifier;
        }

        // Set threads
        if let Some(next) = self.next_right(v_inner_left, nodes) {
            if self.next_right(v_outer_right, nodes).is_none() {
                nodes[v_outer_right].thread = Some(next);
                nodes[v_outer_right].modifier += s_inner_left - s_outer_right;
            }
        }

        if let Some(next) = self.next_left(v_inner_right, nodes) {
            if self.next_left(v_outer_left, nodes).is_none() {
                nodes[v_outer_left].thread = Some(next);
                nodes[v_outer_left].modifier += s_inner_right - s_outer_left;
                default_ancestor = v;
            }
        }

        default_ancestor
    }

    /// The greatest uncommon ancestor of `v_inner_left` and `v`, if it is a
    /// sibling of `v`; otherwise the default ancestor.
    fn ancestor(
        &self,
        v_inner_left: usize,
        v: usize,
        default_ancestor: usize,
        nodes: &[LayoutNode],
    ) -> usize {
        let candidate = nodes[v_inner_left].ancestor;
        if nodes[candidate].parent == nodes[v].parent {
            candidate
        } else {
            default_ancestor
        }
    }

    /// Move subtree: shift node wr and record the spread for siblings between
    /// wl and wr.
    fn move_subtree(&self, wl: usize, wr: usize, shift: f32, nodes: &mut [LayoutNode]) {
        let subtrees = (nodes[wr].number as f32 - nodes[wl].number as f32).max(1.0);
        let per_subtree = shift / subtrees;

        nodes[wr].change -= per_subtree;
        nodes[wr].shift += shift;
        nodes[wl].change += per_subtree;
        nodes[wr].prelim += shift;
        nodes[wr].modifier += shift;
    }

    /// Execute accumulated shifts for children of node v.
    fn execute_shifts(&self, v: usize, nodes: &mut [LayoutNode]) {
        let children: Vec<usize> = nodes[v].children.clone();
        let mut shift = 0.0f32;
        let mut change = 0.0f32;

        for &child in children.iter().rev() {
            nodes[child].prelim += shift;
            nodes[child].modifier += shift;
            change += nodes[child].change;
            shift += nodes[child].shift + change;
        }
    }

    /// Second walk: apply accumulated modifiers to get final coordinates.
    fn second_walk_collect(&self, root: usize, nodes: &[LayoutNode], final_breadth: &mut [f32]) {
        let mut stack = vec![(root, 0.0f32)];
        while let Some((v, modifier_sum)) = stack.pop() {
            final_breadth[v] = nodes[v].prelim + modifier_sum;
            for &child in &nodes[v].children {
                stack.push((child, modifier_sum + nodes[v].modifier));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> HierarchyTree {
        node(id, vec![])
    }

    fn node(id: &str, children: Vec<HierarchyTree>) -> HierarchyTree {
        HierarchyTree {
            id: id.to_owned(),
            label: id.to_owned(),
            children,
        }
    }

    fn compute(tree: &HierarchyTree, orientation: LayoutOrientation) -> DiagramLayout {
        TidyTreeLayout::new(TidyTreeConfig {
            orientation,
            ..Default::default()
        })
        .compute(tree, &GeometryConfig::default())
    }

    fn placed<'a>(layout: &'a DiagramLayout, id: &str) -> &'a PlacedNode {
        layout.nodes.iter().find(|n| n.id == id).unwrap()
    }

    fn overlapping(a: &PlacedNode, b: &PlacedNode) -> bool {
        let (ax0, ay0, ax1, ay1) = a.rect();
        let (bx0, by0, bx1, by1) = b.rect();
        ax0 < bx1 && bx0 < ax1 && ay0 < by1 && by0 < ay1
    }

    #[test]
    fn test_single_node() {
        let layout = compute(&leaf("root"), LayoutOrientation::Vertical);

        assert_eq!(layout.nodes.len(), 1);
        assert!(layout.links.is_empty());
        assert_eq!((layout.nodes[0].x, layout.nodes[0].y), (0.0, 0.0));
        assert_eq!(layout.bounds.width(), 170.0);
        assert_eq!(layout.bounds.height(), 60.0);
    }

    #[test]
    fn test_simple_tree() {
        let tree = node("root", vec![leaf("a"), leaf("b")]);
        let layout = compute(&tree, LayoutOrientation::Vertical);

        let root = placed(&layout, "root");
        let a = placed(&layout, "a");
        let b = placed(&layout, "b");

        // Root centered over children, children one box + gap apart
        assert!((root.x - (a.x + b.x) / 2.0).abs() < 0.01);
        assert!((b.x - a.x - 170.0).abs() < 0.01, "a={} b={}", a.x, b.x);
        assert!((a.x + 85.0).abs() < 0.01);

        // 30 (half root) + 60 (gap) + 30 (half child)
        assert!((a.y - 120.0).abs() < 0.01);
        assert_eq!(layout.links, vec![Link { source: 0, target: 1 }, Link { source: 0, target: 2 }]);
    }

    #[test]
    fn test_chain_is_straight() {
        let tree = node("root", vec![node("a", vec![node("b", vec![leaf("c")])])]);
        let layout = compute(&tree, LayoutOrientation::Vertical);

        for n in &layout.nodes {
            assert!(n.x.abs() < 0.01, "{} drifted to x={}", n.id, n.x);
        }
        let ys: Vec<f32> = layout.nodes.iter().map(|n| n.y).collect();
        assert_eq!(ys, vec![0.0, 120.0, 240.0, 360.0]);
    }

    #[test]
    fn test_nodes_are_in_pre_order() {
        let tree = node("root", vec![node("a", vec![leaf("c"), leaf("d")]), leaf("b")]);
        let layout = compute(&tree, LayoutOrientation::Vertical);

        let ids: Vec<&str> = layout.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "c", "d", "b"]);
        let parents: Vec<Option<usize>> = layout.nodes.iter().map(|n| n.parent).collect();
        assert_eq!(parents, vec![None, Some(0), Some(1), Some(1), Some(0)]);
        assert!(placed(&layout, "c").x < placed(&layout, "d").x);
    }

    #[test]
    fn test_deeper_tree() {
        // root -> a, b; a -> c, d; b -> e
        let tree = node(
            "root",
            vec![node("a", vec![leaf("c"), leaf("d")]), node("b", vec![leaf("e")])],
        );
        let layout = compute(&tree, LayoutOrientation::Vertical);

        assert_eq!(layout.nodes.len(), 6);
        assert_eq!(placed(&layout, "root").depth, 0);
        assert_eq!(placed(&layout, "a").depth, 1);
        assert_eq!(placed(&layout, "e").depth, 2);
        assert_eq!(placed(&layout, "c").y, placed(&layout, "e").y);

        let a = placed(&layout, "a");
        let c = placed(&layout, "c");
        let d = placed(&layout, "d");
        assert!((a.x - (c.x + d.x) / 2.0).abs() < 0.01, "parent centered over children");
    }

    #[test]
    fn test_horizontal_swaps_axes() {
        let tree = node("root", vec![leaf("a"), leaf("b")]);
        let layout = compute(&tree, LayoutOrientation::Horizontal);

        let root = placed(&layout, "root");
        let a = placed(&layout, "a");
        let b = placed(&layout, "b");

        assert_eq!(root.x, 0.0);
        // 85 (half root width) + 60 + 75 (half child width)
        assert!((a.x - 220.0).abs() < 0.01);
        assert_eq!(a.x, b.x);
        // 60px tall boxes + 20px gap
        assert!((b.y - a.y - 80.0).abs() < 0.01);
        assert!((root.y - (a.y + b.y) / 2.0).abs() < 0.01);
    }

    #[test]
    fn test_asymmetric_tree() {
        // Left subtree deeper than right: root -> a, b; a -> c; c -> d
        let tree = node(
            "root",
            vec![node("a", vec![node("c", vec![leaf("d")])]), leaf("b")],
        );
        let layout = compute(&tree, LayoutOrientation::Vertical);

        assert_eq!(placed(&layout, "d").depth, 3);
        let left_max = ["a", "c", "d"]
            .iter()
            .map(|id| placed(&layout, id).x)
            .fold(f32::NEG_INFINITY, f32::max);
        assert!(left_max < placed(&layout, "b").x);
    }

    #[test]
    fn test_wide_subtrees_do_not_overlap() {
        // Subtrees of uneven width and depth, tall multi-line labels.
        let wide = |prefix: &str, n: usize| -> Vec<HierarchyTree> {
            (0..n)
                .map(|i| HierarchyTree {
                    id: format!("{prefix}{i}"),
                    label: "line one\nline two\nline three".to_owned(),
                    children: Vec::new(),
                })
                .collect()
        };
        let tree = node(
            "root",
            vec![
                node("a", wide("a", 4)),
                leaf("b"),
                node("c", vec![node("c0", wide("c0_", 3)), leaf("c1")]),
                leaf("d"),
                node("e", wide("e", 5)),
            ],
        );

        for orientation in [LayoutOrientation::Vertical, LayoutOrientation::Horizontal] {
            let layout = compute(&tree, orientation);
            assert_eq!(layout.nodes.len(), tree.node_count());
            for (i, a) in layout.nodes.iter().enumerate() {
                for b in &layout.nodes[i + 1..] {
                    assert!(
                        !overlapping(a, b),
                        "{:?}: {} overlaps {}",
                        orientation,
                        a.id,
                        b.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_bounds_cover_all_boxes() {
        let tree = node("root", vec![leaf("a"), node("b", vec![leaf("c")])]);
        let layout = compute(&tree, LayoutOrientation::Vertical);

        for n in &layout.nodes {
            let (x0, y0, x1, y1) = n.rect();
            assert!(x0 >= layout.bounds.min_x && x1 <= layout.bounds.max_x);
            assert!(y0 >= layout.bounds.min_y && y1 <= layout.bounds.max_y);
        }
        assert_eq!(layout.bounds.min_y, -30.0);
    }
}
