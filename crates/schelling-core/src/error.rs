//! Error types for simulation operations.
//!
//! Every failure here is fatal for the run: operations are deterministic
//! given their random source, so nothing is worth retrying.

use crate::types::{AgentId, Coordinate};
use thiserror::Error;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SchellingError>;

/// Errors that can occur while building or running a world.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchellingError {
    /// Invalid world configuration.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Grid invariant violation.
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// I/O errors (wrapped).
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization errors.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for SchellingError {
    fn from(e: std::io::Error) -> Self {
        SchellingError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for SchellingError {
    fn from(e: serde_json::Error) -> Self {
        SchellingError::Serialization(e.to_string())
    }
}

/// Configuration errors, raised when a world is constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The grid has no surplus cell for the requested agents.
    #[error("Grid {width}x{height} has {} cells, needs more than {num_agents}", .width * .height)]
    InsufficientCapacity {
        width: usize,
        height: usize,
        num_agents: usize,
    },

    /// Value outside its allowed range.
    #[error("{field} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    /// Invalid value.
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// An explicit layout does not agree with the configuration.
    #[error("Layout mismatch: {0}")]
    PlacementMismatch(String),
}

/// Grid errors. Unreachable while the capacity invariant holds.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Vacancy requested from a full grid.
    #[error("No vacant cell left on the grid")]
    NoVacancy,

    /// Coordinate outside the grid.
    #[error("Coordinate {coord} outside {width}x{height} grid")]
    OutOfBounds {
        coord: Coordinate,
        width: usize,
        height: usize,
    },

    /// Placement onto a cell that is already taken.
    #[error("Cell {coord} is already occupied by {occupant}")]
    CellOccupied { coord: Coordinate, occupant: AgentId },

    /// Vacate requested for a cell that is empty.
    #[error("Cell {0} is already vacant")]
    CellVacant(Coordinate),

    /// An agent asked to move from a cell it does not occupy.
    #[error("{agent} does not occupy {coord}")]
    NotOccupant { agent: AgentId, coord: Coordinate },

    /// An agent took a turn before being placed.
    #[error("{0} has no location")]
    Unplaced(AgentId),
}

// Convenience constructors
impl SchellingError {
    pub fn no_vacancy() -> Self {
        SchellingError::Grid(GridError::NoVacancy)
    }

    pub fn insufficient_capacity(width: usize, height: usize, num_agents: usize) -> Self {
        SchellingError::Config(ConfigError::InsufficientCapacity {
            width,
            height,
            num_agents,
        })
    }

    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        SchellingError::Config(ConfigError::OutOfRange {
            field: field.into(),
            min,
            max,
            value,
        })
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SchellingError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn placement_mismatch(msg: impl Into<String>) -> Self {
        SchellingError::Config(ConfigError::PlacementMismatch(msg.into()))
    }

    /// Whether this error came from configuration validation.
    pub fn is_config(&self) -> bool {
        matches!(self, SchellingError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_message_names_cell_count() {
        let err = SchellingError::insufficient_capacity(2, 2, 4);
        assert_eq!(
            err.to_string(),
            "Config error: Grid 2x2 has 4 cells, needs more than 4"
        );
        assert!(err.is_config());
    }

    #[test]
    fn grid_errors_are_not_config() {
        let err = SchellingError::no_vacancy();
        assert!(!err.is_config());
        assert_eq!(err.to_string(), "Grid error: No vacant cell left on the grid");
    }
}
