use geo::{Coord, Distance, Euclidean, Point};
use serde::{Deserialize, Serialize};

/// Identifier of a road-network node (OSM node ids are signed 64-bit).
pub type NodeId = i64;

/// A road-network node: an identifier, a longitude/latitude pair and an
/// optional display name.
///
/// Coordinates are fixed at construction. Distances between nodes are plain
/// Euclidean distances in degrees, treating longitude and latitude as a flat
/// plane.
///
/// # Examples
///
/// ```
/// use wayfinder_types::node::Node;
///
/// let a = Node::new(1, 0.0, 0.0);
/// let b = Node::new(2, 3.0, 4.0).with_name("Soda Hall");
/// assert_eq!(a.distance_to(&b), 5.0);
/// assert_eq!(b.name(), Some("Soda Hall"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    lon: f64,
    lat: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl Node {
    /// Create an unnamed node.
    pub fn new(id: NodeId, lon: f64, lat: f64) -> Self {
        Self {
            id,
            lon,
            lat,
            name: None,
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name only if the node has none yet.
    ///
    /// Returns `true` if the node now carries `name`.
    pub fn assign_name(&mut self, name: &str) -> bool {
        match &self.name {
            Some(existing) => existing == name,
            None => {
                self.name = Some(name.to_string());
                true
            }
        }
    }

    /// The node position as a `geo` coordinate (x = lon, y = lat).
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }

    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Whether both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Euclidean distance in degrees to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        Euclidean.distance(self.point(), other.point())
    }

    /// Euclidean distance in degrees to an arbitrary coordinate.
    pub fn distance_to_coord(&self, lon: f64, lat: f64) -> f64 {
        Euclidean.distance(self.point(), Point::new(lon, lat))
    }
}
