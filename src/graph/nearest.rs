//! R*-tree lookup of the graph node closest to an arbitrary coordinate.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

/// A graph node position tagged with its slot in the node table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct IndexedNode {
    pub slot: usize,
    pub lon: f64,
    pub lat: f64,
}

impl RTreeObject for IndexedNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lon, self.lat])
    }
}

impl PointDistance for IndexedNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlon = self.lon - point[0];
        let dlat = self.lat - point[1];
        dlon * dlon + dlat * dlat
    }
}

/// Nearest-node index over the sealed graph.
///
/// Among equally distant nodes the one inserted first (lowest slot) wins, so
/// results match a linear scan over the node table in insertion order.
#[derive(Clone)]
pub(crate) struct NearestIndex {
    tree: RTree<IndexedNode>,
}

impl std::fmt::Debug for NearestIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NearestIndex")
            .field("size", &self.tree.size())
            .finish()
    }
}

impl NearestIndex {
    pub fn build(points: Vec<IndexedNode>) -> Self {
        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Slot of the closest node, or `None` when the index is empty.
    pub fn nearest(&self, lon: f64, lat: f64) -> Option<usize> {
        let mut candidates = self.tree.nearest_neighbor_iter_with_distance_2(&[lon, lat]);
        let (first, best) = candidates.next()?;

        let mut slot = first.slot;
        for (node, dist_2) in candidates {
            if dist_2 > best {
                break;
            }
            slot = slot.min(node.slot);
        }
        Some(slot)
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }
}
