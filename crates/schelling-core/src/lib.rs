//! # Schelling Core
//!
//! Core types and traits for the Schelling segregation model.
//!
//! Two classes of agents live on a wrap-around grid. Each agent wants at
//! least some fraction of its occupied neighbors to share its class; an
//! unhappy agent looks for a vacant cell where that would hold and moves
//! there. This crate holds the pieces every other crate builds on:
//!
//! - **Topology** - toroidal Moore adjacency ([`topology`])
//! - **Occupancy** - the capability an agent uses to look around and move ([`occupancy`])
//! - **Agent** - happiness evaluation and the relocation algorithm ([`agent`])
//! - **Types** - coordinates, classes, turn outcomes ([`types`])
//! - **Errors** - configuration and grid failures ([`error`])
//!
//! ## Quick Start
//!
//! ```rust
//! use schelling_core::prelude::*;
//!
//! let neighbors = neighbors_of(Coordinate::new(0, 0), 5, 5);
//! assert_eq!(neighbors.len(), 8);
//! assert!(neighbors.contains(&Coordinate::new(4, 4)));
//! ```

pub mod types;
pub mod topology;
pub mod occupancy;
pub mod agent;
pub mod error;
pub mod prelude;
