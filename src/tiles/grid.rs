use super::Tile;
use wayfinder_types::bounds::Bounds;

/// A tile selection arranged as a raster: rows of tiles sharing a north
/// edge, ordered north to south, each row ordered west to east.
#[derive(Debug, Clone)]
pub struct TileGrid<'a> {
    rows: Vec<Vec<&'a Tile>>,
    bounds: Bounds,
    tile_size: u32,
}

impl<'a> TileGrid<'a> {
    /// Arrange tiles as returned by [`TileIndex::query`](super::TileIndex::query).
    ///
    /// Returns `None` for an empty selection.
    pub fn from_tiles(tiles: &[&'a Tile], tile_size: u32) -> Option<Self> {
        let (first, rest) = tiles.split_first()?;
        let mut bounds = *first.bounds();
        for tile in rest {
            bounds = bounds.union(tile.bounds());
        }

        let mut sorted = tiles.to_vec();
        sorted.sort_by(|a, b| {
            b.bounds()
                .north
                .total_cmp(&a.bounds().north)
                .then(a.bounds().west.total_cmp(&b.bounds().west))
        });

        let mut rows: Vec<Vec<&'a Tile>> = Vec::new();
        for tile in sorted {
            match rows.last_mut() {
                Some(row) if row[0].bounds().north == tile.bounds().north => row.push(tile),
                _ => rows.push(vec![tile]),
            }
        }

        Some(Self {
            rows,
            bounds,
            tile_size,
        })
    }

    /// Rows from north to south.
    pub fn rows(&self) -> &[Vec<&'a Tile>] {
        &self.rows
    }

    /// Area covered by the whole selection.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Number of tiles in the widest row.
    pub fn columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Pixel width of the stitched raster.
    pub fn width_px(&self) -> u64 {
        self.columns() as u64 * u64::from(self.tile_size)
    }

    /// Pixel height of the stitched raster.
    pub fn height_px(&self) -> u64 {
        self.rows.len() as u64 * u64::from(self.tile_size)
    }
}
