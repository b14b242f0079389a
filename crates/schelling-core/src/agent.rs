//! Agent: a resident with a same-class preference.
//!
//! An agent carries its class, its own preference threshold (fixed at
//! creation) and its current cell. It judges a location by the class mix
//! of the occupied cells around it and, when unhappy, scans the vacancies
//! for the first one it would be happy at.

use crate::error::{GridError, Result};
use crate::occupancy::Occupancy;
use crate::types::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A single agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    id: AgentId,
    class: Class,
    /// Minimum fraction of same-class neighbors needed to be happy.
    threshold: f64,
    location: Option<Coordinate>,
}

/// Class mix of the occupied cells around a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NeighborMix {
    pub same: usize,
    pub total: usize,
}

impl NeighborMix {
    pub fn different(&self) -> usize {
        self.total - self.same
    }
}

impl Agent {
    /// Create an unplaced agent.
    pub fn new(id: AgentId, class: Class, threshold: f64) -> Self {
        Self {
            id,
            class,
            threshold,
            location: None,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    /// How the grid sees this agent.
    pub fn resident(&self) -> Resident {
        Resident {
            id: self.id,
            class: self.class,
        }
    }

    /// Record the initial placement. Later moves go through [`Agent::take_turn`].
    pub fn settle(&mut self, coord: Coordinate) {
        self.location = Some(coord);
    }

    /// Class mix around `coord`, ignoring this agent's own cell.
    ///
    /// When `coord` is a candidate vacancy next to the agent's current
    /// cell, the agent would leave that cell on moving, so it never counts
    /// itself.
    pub fn neighbor_mix(&self, grid: &dyn Occupancy, coord: Coordinate) -> NeighborMix {
        let mut mix = NeighborMix::default();
        for resident in grid.occupied_neighbors(coord) {
            if resident.id == self.id {
                continue;
            }
            mix.total += 1;
            if resident.class == self.class {
                mix.same += 1;
            }
        }
        mix
    }

    /// Whether this agent would be happy living at `coord`.
    ///
    /// No neighbors means unhappy, whatever the threshold. Otherwise happy
    /// iff the same-class fraction reaches the threshold (ties are happy).
    pub fn is_happy_at(&self, grid: &dyn Occupancy, coord: Coordinate) -> bool {
        let mix = self.neighbor_mix(grid, coord);
        if mix.total == 0 {
            return false;
        }
        mix.same as f64 / mix.total as f64 >= self.threshold
    }

    /// Happiness at the current location. Unplaced agents are unhappy.
    pub fn is_happy(&self, grid: &dyn Occupancy) -> bool {
        match self.location {
            Some(coord) => self.is_happy_at(grid, coord),
            None => false,
        }
    }

    /// One flag per occupied neighbor of `coord`: `true` when it shares this agent's class.
    pub fn neighbor_match_flags(&self, grid: &dyn Occupancy, coord: Coordinate) -> Vec<bool> {
        grid.occupied_neighbors(coord)
            .into_iter()
            .filter(|r| r.id != self.id)
            .map(|r| r.class == self.class)
            .collect()
    }

    /// Number of neighbors at the current location that are of the other class.
    pub fn dissimilar_neighbors(&self, grid: &dyn Occupancy) -> usize {
        match self.location {
            Some(coord) => self
                .neighbor_match_flags(grid, coord)
                .into_iter()
                .filter(|same| !same)
                .count(),
            None => 0,
        }
    }

    /// Run this agent's turn.
    ///
    /// Happy agents stay. Unhappy agents take a fresh snapshot of the
    /// vacancies, in the grid's natural order, and move to the first one
    /// they would be happy at. If none qualifies they stay put.
    pub fn take_turn(&mut self, grid: &mut dyn Occupancy) -> Result<Outcome> {
        let current = self.location.ok_or(GridError::Unplaced(self.id))?;

        let candidate = {
            let view: &dyn Occupancy = &*grid;
            if self.is_happy_at(view, current) {
                return Ok(Outcome::StayedHappy(self.class));
            }
            view.vacant_locations()
                .into_iter()
                .find(|&c| self.is_happy_at(view, c))
        };

        match candidate {
            Some(target) => {
                grid.relocate(self.resident(), current, target)?;
                self.location = Some(target);
                trace!(
                    agent = %self.id,
                    class = %self.class,
                    from = %current,
                    to = %target,
                    "relocated"
                );
                Ok(Outcome::Moved(self.class))
            }
            None => Ok(Outcome::StayedUnhappy(self.class)),
        }
    }
}
