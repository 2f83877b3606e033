//! Road-map builder used during ingestion.
//!
//! The builder is the only way to add nodes, ways and names. [`build`]
//! consumes it and returns the immutable [`RoadMap`] that answers queries.
//!
//! [`build`]: RoadMapBuilder::build

use crate::config::Config;
use crate::error::{Result, WayfinderError};
use crate::graph::GraphBuilder;
use crate::highway::HighwayFilter;
use crate::map::{BuildStats, RoadMap};
use crate::names::NameIndex;
use crate::tiles::TileIndex;
use wayfinder_types::bounds::Bounds;
use wayfinder_types::node::{Node, NodeId};

/// Collects nodes, ways and names, then seals them into a [`RoadMap`].
#[derive(Debug)]
pub struct RoadMapBuilder {
    config: Config,
    highways: HighwayFilter,
    tile_bounds: Option<Bounds>,
    graph: GraphBuilder,
    names: NameIndex,
    ignored_ways: usize,
    rejected_names: usize,
}

impl RoadMapBuilder {
    /// Create a builder with the default configuration and no tile index.
    pub fn new() -> Self {
        let config = Config::default();
        Self {
            highways: HighwayFilter::new(config.allowed_highways.iter().cloned()),
            config,
            tile_bounds: None,
            graph: GraphBuilder::new(),
            names: NameIndex::new(),
            ignored_ways: 0,
            rejected_names: 0,
        }
    }

    /// Replace the configuration (highway allow-list, tile layout, pruning).
    pub fn config(mut self, config: Config) -> Self {
        self.highways = HighwayFilter::new(config.allowed_highways.iter().cloned());
        self.config = config;
        self
    }

    /// Bounds of the full map image; enables tile queries on the built map.
    pub fn tile_bounds(mut self, bounds: Bounds) -> Self {
        self.tile_bounds = Some(bounds);
        self
    }

    /// Insert a node. Duplicate ids are ignored and return `false`.
    ///
    /// A named node is registered in the name index under its name.
    pub fn add_node(&mut self, node: Node) -> bool {
        let id = node.id();
        let name = node.name().map(str::to_owned);
        if !self.graph.add_node(node) {
            return false;
        }
        if let Some(name) = name {
            self.names.register(&name, id);
        }
        true
    }

    /// Connect consecutive node ids. The caller decides which ways are
    /// routable; see [`add_tagged_way`](Self::add_tagged_way) for filtering
    /// by highway class. Returns the number of new edges.
    pub fn add_way(&mut self, ids: &[NodeId]) -> usize {
        self.graph.add_way(ids)
    }

    /// Connect consecutive node ids if `highway` is an allowed road class.
    pub fn add_tagged_way(&mut self, ids: &[NodeId], highway: &str) -> usize {
        if !self.highways.allows(highway) {
            log::debug!("Ignoring way of class {:?} ({} nodes)", highway, ids.len());
            self.ignored_ways += 1;
            return 0;
        }
        self.graph.add_way(ids)
    }

    /// Name an already added node and register it in the name index.
    ///
    /// Unknown ids and nodes that already carry a different name are ignored
    /// with a warning and return `false`.
    pub fn register_name(&mut self, id: NodeId, name: &str) -> bool {
        let Some(node) = self.graph.node_mut(id) else {
            log::warn!("Ignoring name {:?} for unknown node {}", name, id);
            self.rejected_names += 1;
            return false;
        };
        if !node.assign_name(name) {
            log::warn!(
                "Ignoring name {:?} for node {}: already named {:?}",
                name,
                id,
                node.name().unwrap_or_default()
            );
            self.rejected_names += 1;
            return false;
        }
        self.names.register(name, id);
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Seal the map. Builds the tile index if image bounds were given.
    pub fn build(mut self) -> Result<RoadMap> {
        self.config
            .validate()
            .map_err(WayfinderError::InvalidConfig)?;

        let tiles = self
            .tile_bounds
            .map(|bounds| TileIndex::new(bounds, &self.config.tiles))
            .transpose()?;

        let pruned_nodes = if self.config.prune_isolated {
            self.graph.prune_isolated()
        } else {
            0
        };

        let stats = BuildStats {
            nodes: self.graph.len(),
            edges: self.graph.edge_count(),
            names: self.names.len(),
            trie_nodes: self.names.trie_nodes(),
            tiles: tiles.as_ref().map_or(0, TileIndex::len),
            malformed_refs: self.graph.malformed_refs() + self.rejected_names,
            ignored_ways: self.ignored_ways,
            pruned_nodes,
        };
        log::debug!("Built road map: {:?}", stats);

        Ok(RoadMap::new(
            self.config,
            self.graph.build(),
            self.names,
            tiles,
            stats,
        ))
    }
}

impl Default for RoadMapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
