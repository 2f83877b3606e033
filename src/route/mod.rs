//! Shortest-route search over the road graph.
//!
//! Routes are found with A*: edge weights are Euclidean distances between
//! node coordinates and the heuristic is the straight-line distance to the
//! goal node, which never overestimates the remaining cost. Both ends of a
//! query are snapped to their nearest graph nodes first.

mod frontier;

use crate::error::{Result, WayfinderError};
use crate::graph::Graph;
use frontier::{QueueEntry, SearchNode};
use serde::{Deserialize, Serialize};
use std::collections::BinaryHeap;
use wayfinder_types::node::NodeId;

/// Node ids from start to goal, with the total path length in degrees.
///
/// An empty route means the two ends are not connected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    nodes: Vec<NodeId>,
    distance: f64,
}

impl Route {
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Sum of the edge lengths along the route.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }
}

/// A* route search over a sealed [`Graph`].
///
/// # Examples
///
/// ```rust
/// use wayfinder::graph::GraphBuilder;
/// use wayfinder::route::Router;
/// use wayfinder::Node;
///
/// let mut builder = GraphBuilder::new();
/// builder.add_node(Node::new(1, 0.0, 0.0));
/// builder.add_node(Node::new(2, 1.0, 0.0));
/// builder.add_node(Node::new(3, 1.0, 1.0));
/// builder.add_way(&[1, 2, 3]);
/// let graph = builder.build();
///
/// let route = Router::new(&graph).route(-0.1, 0.0, 1.1, 0.9)?;
/// assert_eq!(route.nodes(), &[1, 2, 3]);
/// assert!((route.distance() - 2.0).abs() < 1e-9);
/// # Ok::<(), wayfinder::WayfinderError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Router<'g> {
    graph: &'g Graph,
}

impl<'g> Router<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Shortest route from the node nearest (`start_lon`, `start_lat`) to the
    /// node nearest (`goal_lon`, `goal_lat`).
    ///
    /// Fails with [`WayfinderError::InvalidState`] on an empty graph and with
    /// [`WayfinderError::InvalidInput`] on non-finite coordinates. A missing
    /// path is an empty [`Route`], not an error.
    ///
    /// The heuristic is the distance to the snapped goal node, not to
    /// (`goal_lon`, `goal_lat`), so it never overestimates the remaining cost.
    pub fn route(
        &self,
        start_lon: f64,
        start_lat: f64,
        goal_lon: f64,
        goal_lat: f64,
    ) -> Result<Route> {
        if self.graph.is_empty() {
            return Err(WayfinderError::InvalidState(
                "Cannot route on an empty graph".into(),
            ));
        }
        if ![start_lon, start_lat, goal_lon, goal_lat]
            .iter()
            .all(|v| v.is_finite())
        {
            log::warn!("Rejecting route query with non-finite coordinates");
            return Err(WayfinderError::invalid_input(
                "Route coordinates must be finite",
            ));
        }

        let (Some(start), Some(goal)) = (
            self.graph.nearest_slot(start_lon, start_lat),
            self.graph.nearest_slot(goal_lon, goal_lat),
        ) else {
            return Err(WayfinderError::InvalidState(
                "Nearest-node index is empty".into(),
            ));
        };

        Ok(self.search(start, goal))
    }

    /// Shortest route between two known node ids.
    pub fn route_between(&self, start: NodeId, goal: NodeId) -> Result<Route> {
        if self.graph.is_empty() {
            return Err(WayfinderError::InvalidState(
                "Cannot route on an empty graph".into(),
            ));
        }
        let slot_of = |id: NodeId| {
            self.graph
                .slot(id)
                .ok_or_else(|| WayfinderError::invalid_input(format!("Unknown node {}", id)))
        };
        let (start, goal) = (slot_of(start)?, slot_of(goal)?);
        Ok(self.search(start, goal))
    }

    fn search(&self, start: usize, goal: usize) -> Route {
        let graph = self.graph;
        let goal_node = graph.node_at(goal);

        let mut arena = vec![SearchNode::start(
            start,
            graph.node_at(start).distance_to(goal_node),
        )];
        let mut queue = BinaryHeap::new();
        queue.push(QueueEntry {
            priority: arena[0].priority(),
            index: 0,
        });

        let mut best_cost = vec![f64::INFINITY; graph.len()];
        let mut finalized = vec![false; graph.len()];
        best_cost[start] = 0.0;
        let mut expanded = 0usize;

        while let Some(entry) = queue.pop() {
            let current = arena[entry.index];
            if finalized[current.slot] {
                continue;
            }
            finalized[current.slot] = true;
            expanded += 1;

            if current.slot == goal {
                log::debug!(
                    "Route found after expanding {} nodes ({} frontier entries)",
                    expanded,
                    arena.len()
                );
                return Self::reconstruct(graph, &arena, entry.index);
            }

            let here = graph.node_at(current.slot);
            for &next in graph.neighbor_slots(current.slot) {
                if finalized[next] {
                    continue;
                }
                let there = graph.node_at(next);
                let cost = current.cost + here.distance_to(there);
                if cost >= best_cost[next] {
                    continue;
                }
                best_cost[next] = cost;

                let node = SearchNode {
                    slot: next,
                    cost,
                    heuristic: there.distance_to(goal_node),
                    previous: Some(entry.index),
                };
                arena.push(node);
                queue.push(QueueEntry {
                    priority: node.priority(),
                    index: arena.len() - 1,
                });
            }
        }

        log::debug!(
            "No route between {} and {} after expanding {} nodes",
            graph.node_at(start).id(),
            goal_node.id(),
            expanded
        );
        Route::default()
    }

    fn reconstruct(graph: &Graph, arena: &[SearchNode], goal_index: usize) -> Route {
        let mut nodes = Vec::new();
        let mut cursor = Some(goal_index);
        while let Some(index) = cursor {
            let step = &arena[index];
            nodes.push(graph.node_at(step.slot).id());
            cursor = step.previous;
        }
        nodes.reverse();

        Route {
            nodes,
            distance: arena[goal_index].cost,
        }
    }
}
