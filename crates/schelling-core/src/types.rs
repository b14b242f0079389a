//! Shared types used across the simulation crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an agent within a world.
///
/// Ids are assigned sequentially at world construction and never reused,
/// since agents live for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent-{}", self.0)
    }
}

/// A cell on the grid. `x` indexes columns in `[0, width)`, `y` rows in `[0, height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

impl Coordinate {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The two agent classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Class {
    A,
    B,
}

impl Class {
    /// Both classes, in reporting order.
    pub const ALL: [Class; 2] = [Class::A, Class::B];
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::A => write!(f, "A"),
            Class::B => write!(f, "B"),
        }
    }
}

/// What the grid records about an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resident {
    pub id: AgentId,
    pub class: Class,
}

/// Result of one agent's turn within an iteration.
///
/// Together with the class tag this gives the six mutually exclusive
/// per-agent outcomes of an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Happy at the current location; nothing changed.
    StayedHappy(Class),
    /// Unhappy, but no vacancy would make the agent happy.
    StayedUnhappy(Class),
    /// Unhappy, and relocated to the first satisfying vacancy.
    Moved(Class),
}

/// Iteration index. 0 is the initial placement, before any moves.
pub type Iteration = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_listed_in_reporting_order() {
        assert_eq!(Class::ALL, [Class::A, Class::B]);
    }

    #[test]
    fn coordinate_from_tuple() {
        assert_eq!(Coordinate::from((3, 4)), Coordinate::new(3, 4));
        assert_eq!(Coordinate::new(1, 2).to_string(), "(1, 2)");
    }
}
