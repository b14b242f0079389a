//! Concrete implementation of the Occupancy trait.
//!
//! A dense grid: one slot per cell, indexed x-major so that iterating the
//! slots yields the natural enumeration order (all of column 0, then
//! column 1, ...). Every coordinate in range is present exactly once.

use rand::seq::IndexedRandom;
use rand::Rng;
use schelling_core::error::{GridError, Result, SchellingError};
use schelling_core::occupancy::Occupancy;
use schelling_core::topology::Topology;
use schelling_core::types::*;

/// In-memory occupancy grid.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    topology: Topology,
    cells: Vec<Option<Resident>>,
    occupied: usize,
}

impl OccupancyGrid {
    /// A grid with every cell vacant.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let topology = Topology::new(width, height);
        let cells = topology.cell_count().ok_or_else(|| {
            SchellingError::invalid_config(
                "world_size",
                format!("{}x{}", width, height),
                "cell count overflows usize",
            )
        })?;
        Ok(Self {
            topology,
            cells: vec![None; cells],
            occupied: 0,
        })
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Number of vacant cells.
    pub fn vacant_count(&self) -> usize {
        self.cells.len() - self.occupied
    }

    /// Uniformly pick one vacant cell.
    pub fn random_vacant_location<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Coordinate> {
        self.vacant_locations()
            .choose(rng)
            .copied()
            .ok_or_else(|| GridError::NoVacancy.into())
    }

    /// Record `resident` at `coord`, which must be vacant.
    pub fn place(&mut self, resident: Resident, coord: Coordinate) -> Result<()> {
        let idx = self.index(coord)?;
        if let Some(existing) = self.cells[idx] {
            return Err(GridError::CellOccupied {
                coord,
                occupant: existing.id,
            }
            .into());
        }
        self.cells[idx] = Some(resident);
        self.occupied += 1;
        Ok(())
    }

    /// Mark `coord` vacant, returning who lived there. The cell must be occupied.
    pub fn vacate(&mut self, coord: Coordinate) -> Result<Resident> {
        let idx = self.index(coord)?;
        let resident = self.cells[idx].take().ok_or(GridError::CellVacant(coord))?;
        self.occupied -= 1;
        Ok(resident)
    }

    /// Occupied cells with their residents, in natural order.
    pub fn residents(&self) -> impl Iterator<Item = (Coordinate, Resident)> + '_ {
        self.topology
            .coordinates()
            .zip(self.cells.iter())
            .filter_map(|(c, slot)| slot.map(|r| (c, r)))
    }

    fn index(&self, coord: Coordinate) -> Result<usize> {
        if !self.topology.contains(coord) {
            return Err(GridError::OutOfBounds {
                coord,
                width: self.topology.width,
                height: self.topology.height,
            }
            .into());
        }
        Ok(coord.x * self.topology.height + coord.y)
    }
}

impl Occupancy for OccupancyGrid {
    fn topology(&self) -> Topology {
        self.topology
    }

    fn occupant(&self, coord: Coordinate) -> Option<Resident> {
        self.index(coord).ok().and_then(|idx| self.cells[idx])
    }

    fn vacant_locations(&self) -> Vec<Coordinate> {
        self.topology
            .coordinates()
            .zip(self.cells.iter())
            .filter(|(_, slot)| slot.is_none())
            .map(|(c, _)| c)
            .collect()
    }

    fn relocate(&mut self, resident: Resident, from: Coordinate, to: Coordinate) -> Result<()> {
        if self.occupant(from) != Some(resident) {
            return Err(GridError::NotOccupant {
                agent: resident.id,
                coord: from,
            }
            .into());
        }
        // Check the target before vacating so a failed move leaves the grid untouched.
        if let Some(existing) = self.occupant(to) {
            return Err(GridError::CellOccupied {
                coord: to,
                occupant: existing.id,
            }
            .into());
        }
        self.index(to)?;
        self.vacate(from)?;
        self.place(resident, to)
    }
}
