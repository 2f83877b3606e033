use geo::{Coord, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned longitude/latitude rectangle described by its four edges.
///
/// `west`/`north` form the upper-left corner and `east`/`south` the
/// lower-right corner, matching the way map images and viewports are usually
/// specified (`ullon`, `ullat`, `lrlon`, `lrlat`).
///
/// # Examples
///
/// ```
/// use wayfinder_types::bounds::Bounds;
///
/// let image = Bounds::new(-122.30, 37.89, -122.20, 37.82);
/// let [nw, ne, sw, se] = image.quadrants();
/// assert_eq!(nw.east, ne.west);
/// assert_eq!(sw.north, nw.south);
/// assert!(se.overlaps(&image));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub south: f64,
}

impl Bounds {
    /// Create bounds from the upper-left (`west`, `north`) and lower-right
    /// (`east`, `south`) corners.
    pub const fn new(west: f64, north: f64, east: f64, south: f64) -> Self {
        Self {
            west,
            north,
            east,
            south,
        }
    }

    /// Width in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Height in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    pub fn center(&self) -> Coord<f64> {
        Coord {
            x: (self.west + self.east) / 2.0,
            y: (self.north + self.south) / 2.0,
        }
    }

    /// Whether all edges are finite and the rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        [self.west, self.north, self.east, self.south]
            .iter()
            .all(|v| v.is_finite())
            && self.east > self.west
            && self.north > self.south
    }

    /// Closed rectangle intersection: rectangles that only share an edge or
    /// a corner still overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.west <= other.east
            && self.east >= other.west
            && self.north >= other.south
            && self.south <= other.north
    }

    /// Whether the coordinate lies inside or on the edge of the rectangle.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }

    /// Split into four equal quarters, in NW, NE, SW, SE order.
    ///
    /// The quarters share their inner edges exactly, so they cover the parent
    /// without gaps.
    pub fn quadrants(&self) -> [Bounds; 4] {
        let mid = self.center();
        [
            Bounds::new(self.west, self.north, mid.x, mid.y),
            Bounds::new(mid.x, self.north, self.east, mid.y),
            Bounds::new(self.west, mid.y, mid.x, self.south),
            Bounds::new(mid.x, mid.y, self.east, self.south),
        ]
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.west.min(other.west),
            self.north.max(other.north),
            self.east.max(other.east),
            self.south.min(other.south),
        )
    }
}

impl From<Bounds> for Rect<f64> {
    fn from(bounds: Bounds) -> Self {
        Rect::new(
            Coord {
                x: bounds.west,
                y: bounds.south,
            },
            Coord {
                x: bounds.east,
                y: bounds.north,
            },
        )
    }
}

impl From<Rect<f64>> for Bounds {
    fn from(rect: Rect<f64>) -> Self {
        Bounds::new(rect.min().x, rect.max().y, rect.max().x, rect.min().y)
    }
}
