//! Occupancy: the capability an agent is handed during its turn.
//!
//! Agents never own or point back at the grid. The world lends them
//! something implementing [`Occupancy`] for the duration of a single
//! evaluation or relocation, which keeps the world the sole owner of
//! both the grid and the agent collection.

use crate::error::Result;
use crate::topology::Topology;
use crate::types::*;

/// Read access to who lives where, plus the single mutation agents need.
pub trait Occupancy {
    /// Grid dimensions and adjacency.
    fn topology(&self) -> Topology;

    /// The resident at `coord`, or `None` if the cell is vacant.
    fn occupant(&self, coord: Coordinate) -> Option<Resident>;

    /// All vacant cells in natural enumeration order.
    fn vacant_locations(&self) -> Vec<Coordinate>;

    /// Move `resident` from `from` to `to`.
    ///
    /// `from` must hold `resident` and `to` must be vacant.
    fn relocate(&mut self, resident: Resident, from: Coordinate, to: Coordinate) -> Result<()>;

    /// Residents of the occupied cells adjacent to `coord`.
    fn occupied_neighbors(&self, coord: Coordinate) -> Vec<Resident> {
        self.topology()
            .neighbors_of(coord)
            .into_iter()
            .filter_map(|n| self.occupant(n))
            .collect()
    }
}
