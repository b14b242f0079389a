//! CLI command implementations.

pub mod init;
pub mod run;
pub mod sweep;

use anyhow::Result;
use clap::Args;
use schelling::prelude::WorldConfig;
use std::path::PathBuf;

use crate::config::Config;

/// World parameters that override the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct WorldArgs {
    /// Config file (default: nearest schelling.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of iterations
    #[arg(short = 'n', long)]
    pub max_iterations: Option<u64>,

    /// Grid width
    #[arg(long)]
    pub width: Option<usize>,

    /// Grid height
    #[arg(long)]
    pub height: Option<usize>,

    /// Number of agents
    #[arg(short, long)]
    pub agents: Option<usize>,
}

impl WorldArgs {
    /// Load the config file and apply the flags on top.
    pub fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        let world = &mut config.world;
        if let Some(seed) = self.seed {
            world.seed = Some(seed);
        }
        if let Some(max) = self.max_iterations {
            world.max_iterations = max;
        }
        if let Some(width) = self.width {
            world.width = width;
        }
        if let Some(height) = self.height {
            world.height = height;
        }
        if let Some(agents) = self.agents {
            world.num_agents = agents;
        }
    }

    pub fn world_config(&self) -> Result<WorldConfig> {
        Ok(self.resolve()?.world.to_world_config())
    }
}
