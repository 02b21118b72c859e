//! Flat attack tree to single-rooted hierarchy conversion.
//!
//! The hierarchy is stored as an arena (`StableGraph`) so that a node
//! referenced by several parents is attached to each of them while still
//! being a single entry. `Hierarchy::to_tree` materialises the owned,
//! nested form the layout consumes.
//!
//! # Attachment rules
//!
//! 1. Every backend node gets an entry; the synthetic root (`ROOT_ID`)
//!    carries the goal.
//! 2. Nodes never referenced as a child are top-level and hang off the
//!    root in backend order.
//! 3. Every resolvable child reference is attached under its parent in
//!    backend order. Unknown ids are dropped.

use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use super::label::{build_label, root_label};
use super::model::AttackTree;

/// Arena index of a hierarchy entry.
pub type NodeIndex = petgraph::stable_graph::NodeIndex;

/// Id of the synthetic root.
pub const ROOT_ID: &str = "root";

/// Upper bound on nodes produced by `to_tree`. Heavily shared subtrees are
/// copied per placement, so a pathological DAG could otherwise explode.
pub const MAX_MATERIALIZED_NODES: usize = 10_000;

/// Deepest level `to_tree` materialises; the root is level 0. Keeps the
/// nested tree shallow enough for the recursive code that consumes it
/// (drop, serde, `find`).
pub const MAX_DEPTH: usize = 512;

/// One entry in the hierarchy arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyNode {
    pub id: String,
    /// Display text, lines separated by `\n`.
    pub label: String,
}

/// Owned, nested hierarchy handed to the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyTree {
    pub id: String,
    pub label: String,
    pub children: Vec<HierarchyTree>,
}

impl HierarchyTree {
    /// Total number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(HierarchyTree::node_count).sum::<usize>()
    }

    /// Find the first node with `id` in pre-order.
    pub fn find(&self, id: &str) -> Option<&HierarchyTree> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// Single-rooted hierarchy built from an `AttackTree`.
pub struct Hierarchy {
    /// Edge weight is the attachment sequence number, which fixes child order.
    graph: StableGraph<HierarchyNode, u32, Directed>,
    root: NodeIndex,
}

impl Hierarchy {
    /// The synthetic root.
    #[inline]
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Number of arena entries (root included).
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Get an entry by index.
    pub fn node(&self, index: NodeIndex) -> Option<&HierarchyNode> {
        self.graph.node_weight(index)
    }

    /// Children of an entry in attachment order.
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<(u32, NodeIndex)> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .map(|edge| (*edge.weight(), edge.target()))
            .collect();
        edges.sort_unstable_by_key(|&(seq, _)| seq);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    /// Ids of an entry's children in attachment order.
    pub fn child_ids(&self, index: NodeIndex) -> Vec<&str> {
        self.children(index)
            .into_iter()
            .filter_map(|child| self.node(child).map(|n| n.id.as_str()))
            .collect()
    }

    /// Number of places an entry is attached.
    pub fn parent_count(&self, index: NodeIndex) -> usize {
        self.graph.edges_directed(index, Direction::Incoming).count()
    }

    /// Look up the arena entry currently bound to `id`.
    pub fn find(&self, id: &str) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&ix| ix != self.root)
            .find(|&ix| self.graph[ix].id == id)
            .or_else(|| (id == ROOT_ID).then_some(self.root))
    }

    /// Materialise the owned hierarchy rooted at the synthetic root.
    ///
    /// Shared entries are copied into every parent they hang under. An edge
    /// leading back to an entry already on the current root path is cut,
    /// which keeps reference cycles from recursing forever. Entries deeper
    /// than `MAX_DEPTH` are dropped, and so is everything past
    /// `MAX_MATERIALIZED_NODES`.
    ///
    /// The walk keeps its own stack, so input depth never reaches the call
    /// stack.
    pub fn to_tree(&self) -> HierarchyTree {
        let mut budget = MAX_MATERIALIZED_NODES - 1;
        let mut depth_cuts = 0usize;
        let mut path = HashSet::from([self.root]);
        let mut root = self.frame(self.root);
        // open entries below the root, innermost last
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            let depth = stack.len();
            let frame = stack.last_mut().unwrap_or(&mut root);
            if budget > 0 {
                if let Some(&child) = frame.pending.get(frame.next) {
                    frame.next += 1;
                    if path.contains(&child) {
                        let parent = &self.graph[frame.index].id;
                        debug!(%parent, child = %self.graph[child].id, "cut cyclic child reference");
                        continue;
                    }
                    if depth + 1 > MAX_DEPTH {
                        depth_cuts += 1;
                        continue;
                    }
                    budget -= 1;
                    path.insert(child);
                    stack.push(self.frame(child));
                    continue;
                }
            }

            // current entry is complete
            let Some(done) = stack.pop() else {
                break;
            };
            path.remove(&done.index);
            let tree = self.finish(done);
            stack.last_mut().unwrap_or(&mut root).built.push(tree);
        }

        if budget == 0 {
            warn!(
                limit = MAX_MATERIALIZED_NODES,
                "hierarchy truncated while materialising shared subtrees"
            );
        }
        if depth_cuts > 0 {
            warn!(
                limit = MAX_DEPTH,
                dropped = depth_cuts,
                "hierarchy truncated at maximum depth"
            );
        }
        self.finish(root)
    }

    fn frame(&self, index: NodeIndex) -> Frame {
        Frame {
            index,
            pending: self.children(index),
            next: 0,
            built: Vec::new(),
        }
    }

    fn finish(&self, frame: Frame) -> HierarchyTree {
        let node = &self.graph[frame.index];
        HierarchyTree {
            id: node.id.clone(),
            label: node.label.clone(),
            children: frame.built,
        }
    }
}

/// An entry being materialised by `Hierarchy::to_tree`.
struct Frame {
    index: NodeIndex,
    pending: Vec<NodeIndex>,
    next: usize,
    built: Vec<HierarchyTree>,
}

/// Convert a flat `AttackTree` into a hierarchy under a synthetic root.
///
/// Total for any parsed tree: dangling child ids are skipped, duplicate
/// ids resolve to the last definition, and a node referenced by several
/// parents is attached to each of them.
pub fn build_hierarchy(tree: &AttackTree) -> Hierarchy {
    let mut graph: StableGraph<HierarchyNode, u32, Directed> =
        StableGraph::with_capacity(tree.nodes.len() + 1, tree.nodes.len());

    let root = graph.add_node(HierarchyNode {
        id: ROOT_ID.to_owned(),
        label: root_label(&tree.goal),
    });

    // 1. id -> entry, later definitions win
    let mut lookup: HashMap<&str, NodeIndex> = HashMap::with_capacity(tree.nodes.len() + 1);
    lookup.insert(ROOT_ID, root);
    for node in &tree.nodes {
        let entry = HierarchyNode {
            id: node.id.clone(),
            label: build_label(node, false),
        };
        let existing = lookup.get(node.id.as_str()).copied();
        match existing {
            Some(existing) if existing != root => graph[existing] = entry,
            _ => {
                let index = graph.add_node(entry);
                lookup.insert(node.id.as_str(), index);
            }
        }
    }

    // 2. every id referenced as somebody's child
    let referenced: HashSet<&str> = tree
        .nodes
        .iter()
        .flat_map(|node| node.children.iter().map(String::as_str))
        .collect();

    let mut seq = 0u32;
    let mut attach = |graph: &mut StableGraph<HierarchyNode, u32, Directed>,
                      parent: NodeIndex,
                      child: NodeIndex| {
        graph.add_edge(parent, child, seq);
        seq += 1;
    };

    // 3. top-level nodes hang off the root
    let mut top_level = 0usize;
    for node in &tree.nodes {
        if referenced.contains(node.id.as_str()) {
            continue;
        }
        if let Some(&index) = lookup.get(node.id.as_str()) {
            attach(&mut graph, root, index);
            top_level += 1;
        }
    }

    // 4. parent -> child references
    let mut dangling = 0usize;
    for node in &tree.nodes {
        let Some(&parent) = lookup.get(node.id.as_str()) else {
            continue;
        };
        for child_id in &node.children {
            match lookup.get(child_id.as_str()) {
                Some(&child) => attach(&mut graph, parent, child),
                None => dangling += 1,
            }
        }
    }

    debug!(
        nodes = tree.nodes.len(),
        top_level,
        dangling,
        "built attack tree hierarchy"
    );

    Hierarchy { graph, root }
}
