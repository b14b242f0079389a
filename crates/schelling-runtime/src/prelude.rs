//! Schelling Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use schelling_runtime::prelude::*;
//! ```

// Re-export world
pub use crate::world::{RunReport, RunState, World, WorldConfig};

// Re-export world builder
pub use crate::world_builder::WorldBuilder;

// Re-export grid
pub use crate::grid::OccupancyGrid;

// Re-export metrics
pub use crate::metrics::{IntegrationScores, IterationCounts, MetricsHistory, MetricsRecorder};

// Re-export sweep and export helpers
pub use crate::sweep::{sweep, threshold_range, SweepPoint};
pub use crate::export::{load_report, save_report, to_json};

// Re-export from core
pub use schelling_core::prelude::*;
