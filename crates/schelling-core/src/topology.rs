//! Topology: toroidal Moore adjacency.
//!
//! Every cell is adjacent to the eight cells at Chebyshev distance 1,
//! with both axes wrapping, so a cell on the left edge touches the right
//! edge and a corner touches the three opposite corners' rows and columns.

use crate::types::Coordinate;
use serde::{Deserialize, Serialize};

/// Offsets of the Moore neighborhood: cardinal four, then corners.
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Dimensions of a wrap-around grid. Pure; holds no occupancy state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topology {
    pub width: usize,
    pub height: usize,
}

impl Topology {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of cells, or `None` if it does not fit in a `usize`.
    pub fn cell_count(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Neighbors of `coord`. See [`neighbors_of`].
    pub fn neighbors_of(&self, coord: Coordinate) -> Vec<Coordinate> {
        neighbors_of(coord, self.width, self.height)
    }

    /// Every coordinate in natural enumeration order (x-major).
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Coordinate::new(x, y)))
    }
}

/// The distinct Moore neighbors of `coord` on a `width` x `height` torus.
///
/// Exactly eight cells when both dimensions are at least 3. On narrower
/// grids offsets wrap onto the same cell (or onto `coord` itself); those
/// duplicates are collapsed and `coord` is never its own neighbor.
pub fn neighbors_of(coord: Coordinate, width: usize, height: usize) -> Vec<Coordinate> {
    let mut out = Vec::with_capacity(MOORE_OFFSETS.len());
    if width == 0 || height == 0 {
        return out;
    }
    for (dx, dy) in MOORE_OFFSETS {
        let n = Coordinate::new(wrap(coord.x, dx, width), wrap(coord.y, dy, height));
        if n != coord && !out.contains(&n) {
            out.push(n);
        }
    }
    out
}

#[inline]
fn wrap(v: usize, delta: isize, size: usize) -> usize {
    (v as isize + delta).rem_euclid(size as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn cell_count_detects_overflow() {
        assert_eq!(Topology::new(20, 20).cell_count(), Some(400));
        assert_eq!(Topology::new(usize::MAX, 3).cell_count(), None);
    }

    #[test]
    fn corner_wraps_to_opposite_edges() {
        let n: HashSet<_> = neighbors_of(Coordinate::new(0, 0), 5, 5).into_iter().collect();
        assert_eq!(n.len(), 8);
        for expected in [(4, 4), (4, 0), (0, 4), (1, 4), (4, 1), (1, 0), (0, 1), (1, 1)] {
            assert!(n.contains(&Coordinate::from(expected)), "missing {:?}", expected);
        }
    }

    #[test]
    fn every_cell_has_eight_neighbors_on_large_grids() {
        for (w, h) in [(3, 3), (4, 7), (10, 10)] {
            let topo = Topology::new(w, h);
            for c in topo.coordinates() {
                let n = topo.neighbors_of(c);
                assert_eq!(n.len(), 8, "{} on {}x{}", c, w, h);
                assert!(!n.contains(&c));
            }
        }
    }

    #[test]
    fn narrow_grids_collapse_duplicates() {
        // On a 2x2 torus the other three cells are all neighbors.
        let n = neighbors_of(Coordinate::new(0, 0), 2, 2);
        assert_eq!(n.len(), 3);

        // A 1x1 grid has no neighbors at all.
        assert!(neighbors_of(Coordinate::new(0, 0), 1, 1).is_empty());
    }

    #[test]
    fn neighbors_are_deterministic() {
        let a = neighbors_of(Coordinate::new(2, 3), 6, 6);
        let b = neighbors_of(Coordinate::new(2, 3), 6, 6);
        assert_eq!(a, b);
    }

    #[test]
    fn coordinates_enumerate_x_major() {
        let topo = Topology::new(2, 3);
        let all: Vec<_> = topo.coordinates().collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], Coordinate::new(0, 0));
        assert_eq!(all[1], Coordinate::new(0, 1));
        assert_eq!(all[3], Coordinate::new(1, 0));
    }
}
