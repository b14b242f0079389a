//! # Schelling Runtime
//!
//! World management, iteration loop and metrics.
//!
//! The runtime owns everything that changes during a run: the occupancy
//! grid, the agent collection, the random source and the recorded
//! statistics. Agents only ever see the grid through the
//! [`Occupancy`](schelling_core::occupancy::Occupancy) capability.
//!
//! ```rust
//! use schelling_runtime::prelude::*;
//!
//! let config = WorldConfig { seed: Some(42), ..WorldConfig::default() };
//! let mut world = World::new(config)?;
//! let report = world.run()?;
//!
//! assert!(report.state.is_terminal());
//! assert_eq!(report.metrics.len() as u64, report.stopped_at + 1);
//! # Ok::<(), SchellingError>(())
//! ```

pub mod grid;
pub mod world;
pub mod world_builder;
pub mod metrics;
pub mod sweep;
pub mod export;
pub mod prelude;
