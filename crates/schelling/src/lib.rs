//! # Schelling
//!
//! Residential segregation dynamics on a wrap-around grid.
//!
//! Two classes of agents share a toroidal grid. Each agent wants some
//! minimum fraction of its occupied neighbors to share its class; agents
//! that are unhappy look for a vacant cell that would satisfy them and move
//! there. Iterating this shows how mild individual preferences add up to
//! strongly segregated neighborhoods.
//!
//! ## Quick Start
//!
//! ```rust
//! use schelling::prelude::*;
//!
//! // The classic setup: 20x20 grid, 380 agents, 60% class A
//! let config = WorldConfig { seed: Some(2024), ..WorldConfig::default() };
//!
//! let mut world = World::new(config)?;
//! let report = world.run()?;
//!
//! println!("{} after {} iterations", report.state, report.stopped_at);
//! println!("integration: {:?}", report.metrics.integration);
//! # Ok::<(), SchellingError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`schelling_core`] - Coordinates, classes, topology, the agent and its
//!   happiness/relocation logic, errors
//! - [`schelling_runtime`] - Occupancy grid, world and iteration loop,
//!   metrics, sweeps, JSON export
//!
//! ## Key Concepts
//!
//! | Term | Meaning |
//! |------|---------|
//! | Happiness | Same-class neighbor fraction reaches the agent's threshold; no neighbors is never happy |
//! | Toroidal grid | Edges wrap, so every cell has a full neighborhood |
//! | Moore neighborhood | The 8 cells at Chebyshev distance 1 |
//! | Integration | Mean count of other-class neighbors per agent |
//! | Stagnant | Unhappy agents remain, but none can find a satisfying vacancy |
//!
//! ## Reproducible runs
//!
//! ```rust
//! use schelling::prelude::*;
//!
//! let config = WorldConfig { width: 8, height: 8, num_agents: 40, ..WorldConfig::default() };
//! let a = WorldBuilder::new(config.clone()).seed(7).build()?.run()?;
//! let b = WorldBuilder::new(config).seed(7).build()?.run()?;
//! assert_eq!(a.metrics, b.metrics);
//! # Ok::<(), SchellingError>(())
//! ```

// Re-export all subcrates
pub use schelling_core as core;
pub use schelling_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust
/// use schelling::prelude::*;
/// ```
pub mod prelude {
    pub use schelling_runtime::prelude::*;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
