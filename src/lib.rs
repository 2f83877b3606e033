//! In-memory road map with shortest-route search, map-tile selection and
//! place-name autocomplete.
//!
//! ```rust
//! use wayfinder::prelude::*;
//!
//! let mut builder = RoadMap::builder().tile_bounds(Bounds::new(-122.30, 37.89, -122.21, 37.82));
//! builder.add_node(Node::new(1, -122.26, 37.87).with_name("Sather Gate"));
//! builder.add_node(Node::new(2, -122.25, 37.87));
//! builder.add_node(Node::new(3, -122.25, 37.86).with_name("Top Dog"));
//! builder.add_tagged_way(&[1, 2, 3], "residential");
//! let map = builder.build()?;
//!
//! let route = map.route(-122.26, 37.87, -122.25, 37.86)?;
//! assert_eq!(route.nodes(), &[1, 2, 3]);
//! assert_eq!(map.autocomplete("top"), vec!["Top Dog"]);
//! # Ok::<(), wayfinder::WayfinderError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod graph;
pub mod highway;
pub mod map;
pub mod names;
pub mod route;
pub mod tiles;

pub use builder::RoadMapBuilder;
pub use config::{Config, TileConfig};
pub use error::{Result, WayfinderError};
pub use graph::{Graph, GraphBuilder};
pub use highway::HighwayFilter;
pub use map::{BuildStats, RoadMap};
pub use names::NameIndex;
pub use route::{Route, Router};
pub use tiles::{Tile, TileGrid, TileIndex};

pub use wayfinder_types::bounds::Bounds;
pub use wayfinder_types::node::{Node, NodeId};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{Result, RoadMap, RoadMapBuilder, WayfinderError};

    pub use crate::{Bounds, Node, NodeId};

    pub use crate::{Config, TileConfig};

    pub use crate::{Route, Tile, TileGrid};
}
