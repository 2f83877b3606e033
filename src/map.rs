//! The sealed road map: routing, tiling and name search behind one handle.

use crate::builder::RoadMapBuilder;
use crate::config::Config;
use crate::error::{Result, WayfinderError};
use crate::graph::Graph;
use crate::names::NameIndex;
use crate::route::{Route, Router};
use crate::tiles::{Tile, TileGrid, TileIndex};
use serde::{Deserialize, Serialize};
use wayfinder_types::bounds::Bounds;
use wayfinder_types::node::{Node, NodeId};

/// Counters collected while building a [`RoadMap`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    pub nodes: usize,
    pub edges: usize,
    /// Distinct normalized names.
    pub names: usize,
    pub trie_nodes: usize,
    /// Tiles in the quadtree, root included. Zero without tile bounds.
    pub tiles: usize,
    /// Way references to unknown nodes, non-finite coordinates and rejected
    /// name assignments.
    pub malformed_refs: usize,
    /// Tagged ways whose highway class is not allowed.
    pub ignored_ways: usize,
    pub pruned_nodes: usize,
}

/// Immutable road map. Shareable across threads for concurrent queries.
///
/// # Examples
///
/// ```rust
/// use wayfinder::prelude::*;
///
/// let mut builder = RoadMap::builder().tile_bounds(Bounds::new(0.0, 1.0, 1.0, 0.0));
/// builder.add_node(Node::new(1, 0.2, 0.5).with_name("Soda Hall"));
/// builder.add_node(Node::new(2, 0.8, 0.5).with_name("Sather Gate"));
/// builder.add_tagged_way(&[1, 2], "residential");
/// let map = builder.build()?;
///
/// let route = map.route(0.2, 0.5, 0.8, 0.5)?;
/// assert_eq!(route.nodes(), &[1, 2]);
/// assert_eq!(map.autocomplete("s"), vec!["Soda Hall", "Sather Gate"]);
/// assert!(!map.tiles_for(&Bounds::new(0.1, 0.9, 0.4, 0.6), 0.0)?.is_empty());
/// # Ok::<(), wayfinder::WayfinderError>(())
/// ```
#[derive(Debug)]
pub struct RoadMap {
    config: Config,
    graph: Graph,
    names: NameIndex,
    tiles: Option<TileIndex>,
    stats: BuildStats,
}

impl RoadMap {
    pub fn builder() -> RoadMapBuilder {
        RoadMapBuilder::new()
    }

    pub(crate) fn new(
        config: Config,
        graph: Graph,
        names: NameIndex,
        tiles: Option<TileIndex>,
        stats: BuildStats,
    ) -> Self {
        Self {
            config,
            graph,
            names,
            tiles,
            stats,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn names(&self) -> &NameIndex {
        &self.names
    }

    /// The tile quadtree, if the map was built with tile bounds.
    pub fn tiles(&self) -> Option<&TileIndex> {
        self.tiles.as_ref()
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Shortest route between the nodes nearest the two coordinates.
    ///
    /// See [`Router::route`] for the error cases.
    pub fn route(
        &self,
        start_lon: f64,
        start_lat: f64,
        goal_lon: f64,
        goal_lat: f64,
    ) -> Result<Route> {
        Router::new(&self.graph).route(start_lon, start_lat, goal_lon, goal_lat)
    }

    pub fn route_between(&self, start: NodeId, goal: NodeId) -> Result<Route> {
        Router::new(&self.graph).route_between(start, goal)
    }

    /// Tiles to render `viewport` at `degrees_per_pixel`, sorted north then
    /// west.
    pub fn tiles_for(&self, viewport: &Bounds, degrees_per_pixel: f64) -> Result<Vec<&Tile>> {
        Ok(self.tile_index()?.query(viewport, degrees_per_pixel))
    }

    /// Same selection as [`tiles_for`](Self::tiles_for), arranged into rows.
    /// `None` when no tile overlaps the viewport.
    pub fn tile_grid(
        &self,
        viewport: &Bounds,
        degrees_per_pixel: f64,
    ) -> Result<Option<TileGrid<'_>>> {
        let index = self.tile_index()?;
        let tiles = index.query(viewport, degrees_per_pixel);
        Ok(TileGrid::from_tiles(&tiles, index.tile_size()))
    }

    fn tile_index(&self) -> Result<&TileIndex> {
        self.tiles.as_ref().ok_or_else(|| {
            WayfinderError::InvalidState("Road map was built without tile bounds".into())
        })
    }

    pub fn autocomplete(&self, prefix: &str) -> Vec<&str> {
        self.names.autocomplete(prefix)
    }

    pub fn lookup_exact(&self, name: &str) -> Option<&str> {
        self.names.lookup_exact(name)
    }

    pub fn nodes_for_name(&self, name: &str) -> &[NodeId] {
        self.names.nodes_for_name(name)
    }

    /// Nodes registered under `name` that are still part of the graph.
    pub fn locations(&self, name: &str) -> Vec<&Node> {
        self.names
            .nodes_for_name(name)
            .iter()
            .filter_map(|&id| self.graph.node(id))
            .collect()
    }
}
