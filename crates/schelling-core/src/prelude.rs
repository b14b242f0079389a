//! Schelling Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use schelling_core::prelude::*;
//! ```

pub use crate::types::{AgentId, Class, Coordinate, Iteration, Outcome, Resident};

pub use crate::topology::{neighbors_of, Topology};

pub use crate::occupancy::Occupancy;

pub use crate::agent::{Agent, NeighborMix};

pub use crate::error::{ConfigError, GridError, Result, SchellingError};
