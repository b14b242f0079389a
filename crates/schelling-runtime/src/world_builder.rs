//! World builder for reproducible and hand-placed worlds.
//!
//! # Example
//!
//! ```rust
//! use schelling_core::types::{Class, Coordinate};
//! use schelling_runtime::world::WorldConfig;
//! use schelling_runtime::world_builder::WorldBuilder;
//!
//! let config = WorldConfig {
//!     width: 4,
//!     height: 4,
//!     num_agents: 2,
//!     ..WorldConfig::default()
//! };
//!
//! let world = WorldBuilder::new(config)
//!     .seed(42)
//!     .with_layout(vec![
//!         (Class::A, Coordinate::new(0, 0)),
//!         (Class::B, Coordinate::new(1, 0)),
//!     ])
//!     .build()?;
//!
//! assert_eq!(world.occupied_count(), 2);
//! # Ok::<(), schelling_core::error::SchellingError>(())
//! ```

use crate::world::{World, WorldConfig};
use schelling_core::error::Result;
use schelling_core::types::{Class, Coordinate};

/// Builder for [`World`].
#[derive(Debug, Clone)]
pub struct WorldBuilder {
    config: WorldConfig,
    seed: Option<u64>,
    layout: Option<Vec<(Class, Coordinate)>>,
}

impl Default for WorldBuilder {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl WorldBuilder {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config,
            seed: None,
            layout: None,
        }
    }

    /// Seed the random source. Takes precedence over `WorldConfig::seed`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Place agents at fixed cells instead of drawing vacancies.
    ///
    /// Each entry creates one agent of the given class, with that class's
    /// configured threshold. The layout must list exactly `num_agents`
    /// distinct in-bounds cells; its class split need not match
    /// `proportion_a`. Turn order is still shuffled by the random source.
    pub fn with_layout(mut self, layout: Vec<(Class, Coordinate)>) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Validate and construct the world.
    pub fn build(self) -> Result<World> {
        let seed = self
            .seed
            .or(self.config.seed)
            .unwrap_or_else(rand::random);
        World::assemble(self.config, seed, self.layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schelling_core::error::{GridError, SchellingError};

    fn config(num_agents: usize) -> WorldConfig {
        WorldConfig {
            width: 4,
            height: 4,
            num_agents,
            ..WorldConfig::default()
        }
    }

    #[test]
    fn builder_seed_overrides_config_seed() {
        let world = WorldBuilder::new(WorldConfig {
            seed: Some(1),
            ..config(5)
        })
        .seed(99)
        .build()
        .unwrap();
        assert_eq!(world.seed(), 99);
    }

    #[test]
    fn layout_length_must_match() {
        let err = WorldBuilder::new(config(2))
            .with_layout(vec![(Class::A, Coordinate::new(0, 0))])
            .build()
            .err()
            .unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn layout_cells_must_be_distinct() {
        let err = WorldBuilder::new(config(2))
            .with_layout(vec![
                (Class::A, Coordinate::new(0, 0)),
                (Class::B, Coordinate::new(0, 0)),
            ])
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            SchellingError::Grid(GridError::CellOccupied { .. })
        ));
    }

    #[test]
    fn layout_uses_class_thresholds() {
        let world = WorldBuilder::new(WorldConfig {
            preference_a: 0.2,
            preference_b: 0.9,
            ..config(2)
        })
        .seed(3)
        .with_layout(vec![
            (Class::A, Coordinate::new(0, 0)),
            (Class::B, Coordinate::new(2, 2)),
        ])
        .build()
        .unwrap();

        for agent in world.agents() {
            match agent.class() {
                Class::A => assert_eq!(agent.threshold(), 0.2),
                Class::B => assert_eq!(agent.threshold(), 0.9),
            }
        }
    }
}
