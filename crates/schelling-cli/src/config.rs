//! Configuration management for the Schelling CLI.

use anyhow::{Context, Result};
use schelling::prelude::WorldConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "schelling.toml";

/// Project configuration, read from `schelling.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSection {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_num_agents")]
    pub num_agents: usize,
    #[serde(default = "default_preference_a")]
    pub preference_a: f64,
    #[serde(default = "default_preference_b")]
    pub preference_b: f64,
    #[serde(default = "default_proportion_a")]
    pub proportion_a: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Print the per-iteration report after a run.
    #[serde(default = "default_print_to_screen")]
    pub print_to_screen: bool,
    /// Write every finished run to this JSON file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
}

// Default value functions
fn default_width() -> usize { WorldConfig::default().width }
fn default_height() -> usize { WorldConfig::default().height }
fn default_num_agents() -> usize { WorldConfig::default().num_agents }
fn default_preference_a() -> f64 { WorldConfig::default().preference_a }
fn default_preference_b() -> f64 { WorldConfig::default().preference_b }
fn default_proportion_a() -> f64 { WorldConfig::default().proportion_a }
fn default_max_iterations() -> u64 { WorldConfig::default().max_iterations }
fn default_print_to_screen() -> bool { true }

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            num_agents: default_num_agents(),
            preference_a: default_preference_a(),
            preference_b: default_preference_b(),
            proportion_a: default_proportion_a(),
            max_iterations: default_max_iterations(),
            seed: None,
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            print_to_screen: default_print_to_screen(),
            report: None,
        }
    }
}

impl WorldSection {
    pub fn to_world_config(&self) -> WorldConfig {
        WorldConfig {
            width: self.width,
            height: self.height,
            num_agents: self.num_agents,
            preference_a: self.preference_a,
            preference_b: self.preference_b,
            proportion_a: self.proportion_a,
            max_iterations: self.max_iterations,
            seed: self.seed,
        }
    }
}

impl Config {
    /// Load config from schelling.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        let start = std::env::current_dir().context("Failed to read current directory")?;
        match find_config_file(&start) {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Generate default config as TOML string.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize config")
    }
}

/// Find schelling.toml in `start` or its parent directories.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toml_round_trips_to_classic_parameters() {
        let toml = Config::default_toml().unwrap();
        let config: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.world.to_world_config(), WorldConfig::default());
        assert!(config.output.print_to_screen);
        assert!(!toml.contains("seed"));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: Config = toml::from_str("[world]\nwidth = 8\nseed = 3\n").unwrap();
        assert_eq!(config.world.width, 8);
        assert_eq!(config.world.height, 20);
        assert_eq!(config.world.num_agents, 380);
        assert_eq!(config.world.seed, Some(3));
        assert!(config.output.report.is_none());
    }

    #[test]
    fn config_is_found_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        Config::default().save(&dir.path().join(CONFIG_FILE)).unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILE));
        assert!(Config::load_from(&found).is_ok());
    }

    #[test]
    fn malformed_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[world]\nwidth = \"wide\"\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{}", err).contains("Failed to parse config"));
    }
}
