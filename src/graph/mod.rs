//! Road-network graph: nodes plus a symmetric adjacency relation.
//!
//! The graph is filled through [`GraphBuilder`] during ingestion and sealed
//! into an immutable [`Graph`] by [`GraphBuilder::build`]. Nodes live in a
//! table in insertion order; adjacency refers to table slots so that every
//! neighbor is always a registered node.

mod nearest;

use nearest::{IndexedNode, NearestIndex};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use wayfinder_types::node::{Node, NodeId};

type Adjacency = SmallVec<[usize; 4]>;

/// Mutable graph under construction.
///
/// # Examples
///
/// ```rust
/// use wayfinder::graph::GraphBuilder;
/// use wayfinder::Node;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_node(Node::new(1, 0.0, 0.0));
/// builder.add_node(Node::new(2, 1.0, 0.0));
/// builder.add_node(Node::new(3, 2.0, 0.0));
/// assert_eq!(builder.add_way(&[1, 2, 3]), 2);
///
/// let graph = builder.build();
/// assert_eq!(graph.neighbors(2).collect::<Vec<_>>(), vec![1, 3]);
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    slots: FxHashMap<NodeId, usize>,
    adjacency: Vec<Adjacency>,
    edges: usize,
    malformed_refs: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node unless its id is already present.
    ///
    /// Returns `false` for duplicates, which are ignored, and for nodes with
    /// non-finite coordinates, which are rejected.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.slots.contains_key(&node.id()) {
            return false;
        }
        if !node.is_finite() {
            log::warn!("Ignoring node {} with non-finite coordinates", node.id());
            self.malformed_refs += 1;
            return false;
        }

        let slot = self.nodes.len();
        self.slots.insert(node.id(), slot);
        self.nodes.push(node);
        self.adjacency.push(Adjacency::new());
        true
    }

    /// Connect each pair of consecutive ids in `ids` with an undirected edge.
    ///
    /// Pairs that reference an id never passed to [`add_node`](Self::add_node)
    /// are skipped with a warning; the remaining pairs are still connected.
    /// Returns the number of new edges.
    pub fn add_way(&mut self, ids: &[NodeId]) -> usize {
        let mut formed = 0;
        for pair in ids.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let (Some(&a), Some(&b)) = (self.slots.get(&from), self.slots.get(&to)) else {
                log::warn!("Skipping edge {} -> {}: unknown node reference", from, to);
                self.malformed_refs += 1;
                continue;
            };
            if self.connect(a, b) {
                formed += 1;
            }
        }
        formed
    }

    /// Connect two registered nodes. Returns `false` if either id is unknown,
    /// the ids are equal, or the edge already exists.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        match (self.slots.get(&from), self.slots.get(&to)) {
            (Some(&a), Some(&b)) => self.connect(a, b),
            _ => {
                self.malformed_refs += 1;
                false
            }
        }
    }

    fn connect(&mut self, a: usize, b: usize) -> bool {
        if a == b || self.adjacency[a].contains(&b) {
            return false;
        }
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        self.edges += 1;
        true
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(&id).map(|&slot| &self.nodes[slot])
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get(&id).map(|&slot| &mut self.nodes[slot])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// References to unknown or malformed nodes seen so far.
    pub fn malformed_refs(&self) -> usize {
        self.malformed_refs
    }

    /// Remove every node without neighbors. Returns how many were removed.
    pub fn prune_isolated(&mut self) -> usize {
        let mut remap = vec![usize::MAX; self.nodes.len()];
        let mut kept = 0;
        for (slot, adjacent) in self.adjacency.iter().enumerate() {
            if !adjacent.is_empty() {
                remap[slot] = kept;
                kept += 1;
            }
        }

        let removed = self.nodes.len() - kept;
        if removed == 0 {
            return 0;
        }

        let nodes = std::mem::take(&mut self.nodes);
        let adjacency = std::mem::take(&mut self.adjacency);
        self.slots.clear();

        for ((node, adjacent), &new_slot) in nodes.into_iter().zip(adjacency).zip(&remap) {
            if new_slot == usize::MAX {
                continue;
            }
            self.slots.insert(node.id(), new_slot);
            self.nodes.push(node);
            self.adjacency
                .push(adjacent.iter().map(|&old| remap[old]).collect());
        }

        log::debug!("Pruned {} isolated nodes, {} remain", removed, kept);
        removed
    }

    /// Seal the graph. No nodes or edges can be added afterwards.
    pub fn build(self) -> Graph {
        let nearest = NearestIndex::build(
            self.nodes
                .iter()
                .enumerate()
                .map(|(slot, node)| IndexedNode {
                    slot,
                    lon: node.lon(),
                    lat: node.lat(),
                })
                .collect(),
        );
        debug_assert_eq!(nearest.len(), self.nodes.len());

        log::debug!(
            "Sealed graph with {} nodes and {} edges",
            self.nodes.len(),
            self.edges
        );

        Graph {
            nodes: self.nodes,
            slots: self.slots,
            adjacency: self.adjacency,
            edges: self.edges,
            nearest,
        }
    }
}

/// Immutable road-network graph.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    slots: FxHashMap<NodeId, usize>,
    adjacency: Vec<Adjacency>,
    edges: usize,
    nearest: NearestIndex,
}

impl Graph {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(&id).map(|&slot| &self.nodes[slot])
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    /// Neighbor ids of `id` in the order the edges were formed. Unknown ids
    /// have no neighbors.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let adjacent: &[usize] = match self.slots.get(&id) {
            Some(&slot) => &self.adjacency[slot],
            None => &[],
        };
        adjacent.iter().map(|&slot| self.nodes[slot].id())
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.slots
            .get(&id)
            .map_or(0, |&slot| self.adjacency[slot].len())
    }

    /// The node closest to (`lon`, `lat`) by Euclidean distance. Ties go to
    /// the node inserted first.
    pub fn nearest(&self, lon: f64, lat: f64) -> Option<&Node> {
        self.nearest_slot(lon, lat).map(|slot| &self.nodes[slot])
    }

    pub(crate) fn nearest_slot(&self, lon: f64, lat: f64) -> Option<usize> {
        self.nearest.nearest(lon, lat)
    }

    pub(crate) fn slot(&self, id: NodeId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    pub(crate) fn node_at(&self, slot: usize) -> &Node {
        &self.nodes[slot]
    }

    pub(crate) fn neighbor_slots(&self, slot: usize) -> &[usize] {
        &self.adjacency[slot]
    }
}

impl Default for Graph {
    fn default() -> Self {
        GraphBuilder::new().build()
    }
}
