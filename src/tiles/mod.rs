//! Quadtree over a pre-rendered map image pyramid.
//!
//! The root tile is the whole map image. Each level splits every tile into
//! four quarters named by appending a digit to the parent's id: `1` = NW,
//! `2` = NE, `3` = SW, `4` = SE. The depth-1 tiles are `1`..`4`, so `24` is the
//! south-east quarter of the north-east quarter.
//!
//! ```rust
//! use wayfinder::tiles::TileIndex;
//! use wayfinder::{Bounds, TileConfig};
//!
//! let image = Bounds::new(0.0, 1.0, 1.0, 0.0);
//! let index = TileIndex::new(image, &TileConfig::default().with_depth(2)).unwrap();
//!
//! // Coarse request: the four depth-1 tiles, south row first.
//! let ids: Vec<_> = index.query(&image, 1.0).iter().map(|t| t.image_id()).collect();
//! assert_eq!(ids, vec!["3", "4", "1", "2"]);
//! ```

mod grid;

pub use grid::TileGrid;

use crate::config::TileConfig;
use crate::error::{Result, WayfinderError};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use wayfinder_types::bounds::Bounds;

/// Image id of the tile covering the whole map.
pub const ROOT_IMAGE_ID: &str = "root";

/// Digits naming the NW, NE, SW and SE quarters, in child-slot order.
const QUADRANT_DIGITS: [char; 4] = ['1', '2', '3', '4'];

/// One pre-rendered tile image and the area it shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    image_id: String,
    bounds: Bounds,
    depth: u8,
}

impl Tile {
    /// Digit path from the root, or [`ROOT_IMAGE_ID`] for the root.
    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Levels below the root (the root is 0).
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Degrees of longitude covered by one pixel of this tile's image.
    pub fn resolution(&self, tile_size: u32) -> f64 {
        self.bounds.width() / f64::from(tile_size)
    }

    /// Path of the image file, e.g. `img/24.png`.
    pub fn image_path(&self, config: &TileConfig) -> String {
        format!(
            "{}{}{}",
            config.image_prefix, self.image_id, config.image_extension
        )
    }
}

#[derive(Debug, Clone)]
struct TileNode {
    tile: Tile,
    /// NW, NE, SW, SE; absent at the deepest level.
    children: Option<Box<[TileNode; 4]>>,
}

impl TileNode {
    fn build(image_id: String, bounds: Bounds, depth: u8, max_depth: u8) -> Self {
        let children = (depth < max_depth).then(|| {
            let quadrants = bounds.quadrants();
            Box::new(std::array::from_fn(|slot| {
                let child_id = if depth == 0 {
                    QUADRANT_DIGITS[slot].to_string()
                } else {
                    format!("{}{}", image_id, QUADRANT_DIGITS[slot])
                };
                TileNode::build(child_id, quadrants[slot], depth + 1, max_depth)
            }))
        });

        TileNode {
            tile: Tile {
                image_id,
                bounds,
                depth,
            },
            children,
        }
    }

    fn collect<'a>(
        &'a self,
        viewport: &Bounds,
        degrees_per_pixel: f64,
        tile_size: u32,
        selected: &mut Vec<&'a Tile>,
        seen: &mut FxHashSet<&'a str>,
    ) {
        if !viewport.overlaps(&self.tile.bounds) {
            return;
        }

        let fine_enough = self.tile.resolution(tile_size) <= degrees_per_pixel;
        match &self.children {
            Some(children) if !fine_enough => {
                for child in children.iter() {
                    child.collect(viewport, degrees_per_pixel, tile_size, selected, seen);
                }
            }
            _ => {
                if seen.insert(self.tile.image_id.as_str()) {
                    selected.push(&self.tile);
                }
            }
        }
    }

    fn count(&self) -> usize {
        1 + self
            .children
            .as_ref()
            .map_or(0, |children| children.iter().map(TileNode::count).sum())
    }

    fn find(&self, image_id: &str) -> Option<&Tile> {
        if self.tile.image_id == image_id {
            return Some(&self.tile);
        }
        let digits = image_id.strip_prefix(self.path())?;
        let slot = QUADRANT_DIGITS.iter().position(|&d| digits.starts_with(d))?;
        self.children.as_ref()?[slot].find(image_id)
    }

    /// Digit path of this node; empty for the root.
    fn path(&self) -> &str {
        if self.tile.depth == 0 {
            ""
        } else {
            &self.tile.image_id
        }
    }
}

/// Fixed-depth quadtree over the map image, built once and read-only after.
#[derive(Debug, Clone)]
pub struct TileIndex {
    root: TileNode,
    tile_size: u32,
    depth: u8,
    len: usize,
}

impl TileIndex {
    /// Build the full tree for the image covering `bounds`.
    pub fn new(bounds: Bounds, config: &TileConfig) -> Result<Self> {
        config.validate().map_err(WayfinderError::InvalidConfig)?;
        if !bounds.is_valid() {
            return Err(WayfinderError::invalid_input(format!(
                "Tile image bounds must be finite with west < east and south < north, got {:?}",
                bounds
            )));
        }

        let root = TileNode::build(ROOT_IMAGE_ID.to_string(), bounds, 0, config.depth);
        let len = root.count();
        log::debug!("Built tile index: depth {}, {} tiles", config.depth, len);

        Ok(Self {
            root,
            tile_size: config.tile_size,
            depth: config.depth,
            len,
        })
    }

    /// The whole-image tile.
    pub fn root(&self) -> &Tile {
        &self.root.tile
    }

    pub fn bounds(&self) -> &Bounds {
        &self.root.tile.bounds
    }

    /// Depth of the leaf tiles.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Total number of tiles, root included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Look up a tile by its image id.
    pub fn tile(&self, image_id: &str) -> Option<&Tile> {
        self.root.find(image_id)
    }

    /// The smallest set of tiles covering `viewport` at `degrees_per_pixel`.
    ///
    /// Starting from the depth-1 tiles, a tile overlapping the viewport is
    /// selected when it is a leaf or when its own resolution is at least as
    /// fine as requested; otherwise its four children are examined. A
    /// non-positive resolution therefore yields leaf tiles. The result is
    /// sorted by north edge, then west edge, both ascending. A viewport
    /// outside the image yields no tiles.
    pub fn query(&self, viewport: &Bounds, degrees_per_pixel: f64) -> Vec<&Tile> {
        if ![viewport.west, viewport.north, viewport.east, viewport.south]
            .iter()
            .all(|v| v.is_finite())
        {
            log::warn!("Rejecting tile query with non-finite viewport");
            return Vec::new();
        }

        let mut selected = Vec::new();
        let mut seen = FxHashSet::default();
        if let Some(children) = &self.root.children {
            for child in children.iter() {
                child.collect(
                    viewport,
                    degrees_per_pixel,
                    self.tile_size,
                    &mut selected,
                    &mut seen,
                );
            }
        }

        selected.sort_by(|a, b| {
            a.bounds
                .north
                .total_cmp(&b.bounds.north)
                .then(a.bounds.west.total_cmp(&b.bounds.west))
        });
        selected
    }
}
