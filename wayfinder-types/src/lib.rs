//! # wayfinder-types
//!
//! Core data types shared by the Wayfinder road-map engine.
//!
//! - **Node types**: [`Node`](node::Node), [`NodeId`](node::NodeId)
//! - **Area types**: [`Bounds`](bounds::Bounds), the upper-left / lower-right
//!   rectangle used for map images, tiles and viewports
//!
//! All types are serializable with Serde and interoperate with the `geo`
//! crate's primitives.
//!
//! ## Examples
//!
//! ```rust
//! use wayfinder_types::bounds::Bounds;
//! use wayfinder_types::node::Node;
//!
//! let node = Node::new(42, -122.2585, 37.8753).with_name("Soda Hall");
//! let campus = Bounds::new(-122.27, 37.88, -122.25, 37.87);
//! assert!(campus.contains(node.lon(), node.lat()));
//! ```

pub mod bounds;
pub mod node;
