//! World: owns the grid and the agents and drives the iteration loop.
//!
//! Construction validates the configuration, places every agent on a
//! random vacant cell and records the iteration-0 baseline. Each loop
//! iteration then:
//! 1. Scores integration on the state the iteration starts from
//! 2. Shuffles the agent order
//! 3. Gives each agent its turn (stay, or relocate to a satisfying vacancy)
//! 4. Records the snapshot and decides whether to stop
//!
//! The run stops when everybody is happy (`Converged`), when unhappy
//! agents remain but nobody moved (`Stagnant`), or when the iteration
//! budget runs out (`Exhausted`).

use crate::grid::OccupancyGrid;
use crate::metrics::{IntegrationScores, IterationCounts, MetricsHistory, MetricsRecorder};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use schelling_core::agent::Agent;
use schelling_core::error::{Result, SchellingError};
use schelling_core::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Configuration for a world.
///
/// Defaults reproduce the classic setup: a 20x20 grid holding 380 agents,
/// 60% of class A, with A wanting 40% and B 30% like neighbors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Grid width (default: 20).
    pub width: usize,
    /// Grid height (default: 20).
    pub height: usize,
    /// Number of agents; must be below `width * height` (default: 380).
    pub num_agents: usize,
    /// Same-class fraction class A agents require (default: 0.4).
    pub preference_a: f64,
    /// Same-class fraction class B agents require (default: 0.3).
    pub preference_b: f64,
    /// Share of agents in class A (default: 0.6).
    pub proportion_a: f64,
    /// Loop iterations before giving up (default: 10).
    pub max_iterations: u64,
    /// Seed for the random source. `None` draws a fresh one.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            num_agents: 380,
            preference_a: 0.4,
            preference_b: 0.3,
            proportion_a: 0.6,
            max_iterations: 10,
            seed: None,
        }
    }
}

impl WorldConfig {
    /// Fail fast on combinations the simulation cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SchellingError::invalid_config(
                "world_size",
                format!("{}x{}", self.width, self.height),
                "both dimensions must be non-zero",
            ));
        }
        let cells = self.width.checked_mul(self.height).ok_or_else(|| {
            SchellingError::invalid_config(
                "world_size",
                format!("{}x{}", self.width, self.height),
                "cell count overflows usize",
            )
        })?;
        if cells <= self.num_agents {
            return Err(SchellingError::insufficient_capacity(
                self.width,
                self.height,
                self.num_agents,
            ));
        }
        for (field, value) in [
            ("preference_a", self.preference_a),
            ("preference_b", self.preference_b),
            ("proportion_a", self.proportion_a),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SchellingError::out_of_range(field, 0.0, 1.0, value));
            }
        }
        Ok(())
    }

    /// How many agents belong to class A. Halves round to even.
    pub fn class_a_count(&self) -> usize {
        let raw = (self.num_agents as f64 * self.proportion_a).round_ties_even();
        (raw as usize).min(self.num_agents)
    }

    /// Preference threshold configured for `class`.
    pub fn preference(&self, class: Class) -> f64 {
        match class {
            Class::A => self.preference_a,
            Class::B => self.preference_b,
        }
    }
}

/// Where the iteration loop stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// More iterations to go.
    Running,
    /// Every agent was happy.
    Converged,
    /// Some agents were unhappy and none of them could move.
    Stagnant,
    /// The iteration budget ran out.
    Exhausted,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunState::Running)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Running => "running",
            RunState::Converged => "converged",
            RunState::Stagnant => "stagnant",
            RunState::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// Everything a reporting layer needs once a run is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub state: RunState,
    /// Iteration at which the run stopped (0 if it never left the baseline).
    pub stopped_at: Iteration,
    /// Seed of the random source, for replaying the run.
    pub seed: u64,
    pub num_agents: usize,
    pub metrics: MetricsHistory,
    /// Integration of the final arrangement.
    pub final_integration: IntegrationScores,
}

/// The simulation world.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    grid: OccupancyGrid,
    agents: Vec<Agent>,
    rng: SmallRng,
    seed: u64,
    recorder: MetricsRecorder,
    iteration: Iteration,
    state: RunState,
}

impl World {
    /// Create a world with random placement.
    ///
    /// Uses `config.seed` when set, otherwise a fresh random seed.
    pub fn new(config: WorldConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::assemble(config, seed, None)
    }

    /// Build a world. With `layout`, agents are created from the given
    /// (class, cell) pairs instead of the configured proportion and random
    /// draws.
    pub(crate) fn assemble(
        config: WorldConfig,
        seed: u64,
        layout: Option<Vec<(Class, Coordinate)>>,
    ) -> Result<Self> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut grid = OccupancyGrid::new(config.width, config.height)?;

        let agents = match layout {
            None => {
                let mut agents = build_agents(&config);
                agents.shuffle(&mut rng);
                for agent in agents.iter_mut() {
                    let coord = grid.random_vacant_location(&mut rng)?;
                    grid.place(agent.resident(), coord)?;
                    agent.settle(coord);
                }
                agents
            }
            Some(layout) => {
                let mut agents = place_layout(&config, &mut grid, layout)?;
                agents.shuffle(&mut rng);
                agents
            }
        };

        let mut world = Self {
            config,
            grid,
            agents,
            rng,
            seed,
            recorder: MetricsRecorder::new(),
            iteration: 0,
            state: RunState::Running,
        };
        world.verify_placement()?;

        let baseline = IterationCounts::baseline(&world.agents, &world.grid);
        world.recorder.record(
            IntegrationScores::measure(&world.agents, &world.grid),
            baseline,
        );
        world.state = if baseline.happy() == world.agents.len() {
            RunState::Converged
        } else if world.config.max_iterations == 0 {
            RunState::Exhausted
        } else {
            RunState::Running
        };

        info!(
            width = world.config.width,
            height = world.config.height,
            agents = world.agents.len(),
            seed,
            happy = baseline.happy(),
            "world initialized"
        );
        Ok(world)
    }

    /// Execute one loop iteration and return the resulting state.
    ///
    /// Does nothing once the world has reached a terminal state.
    pub fn step(&mut self) -> Result<RunState> {
        if self.state.is_terminal() {
            return Ok(self.state);
        }

        let integration = IntegrationScores::measure(&self.agents, &self.grid);

        self.agents.shuffle(&mut self.rng);
        let mut outcomes = Vec::with_capacity(self.agents.len());
        for agent in self.agents.iter_mut() {
            outcomes.push(agent.take_turn(&mut self.grid)?);
        }

        let counts = IterationCounts::from_outcomes(&outcomes);
        self.recorder.record(integration, counts);
        self.iteration += 1;
        self.state = self.transition(&counts);

        debug!(
            iteration = self.iteration,
            happy = counts.happy(),
            moved = counts.moved(),
            stayed_unhappy = counts.stayed_unhappy(),
            state = %self.state,
            "iteration complete"
        );
        Ok(self.state)
    }

    /// Iterate until a terminal state and report.
    pub fn run(&mut self) -> Result<RunReport> {
        while !self.state.is_terminal() {
            self.step()?;
        }

        match self.state {
            RunState::Converged => {
                info!(iteration = self.iteration, "everyone is happy")
            }
            RunState::Stagnant => warn!(
                iteration = self.iteration,
                "unhappy agents remain but none can find a vacancy"
            ),
            RunState::Exhausted => warn!(
                iteration = self.iteration,
                "iteration budget exhausted before equilibrium"
            ),
            RunState::Running => {}
        }
        Ok(self.report())
    }

    /// Snapshot of the run so far.
    pub fn report(&self) -> RunReport {
        RunReport {
            state: self.state,
            stopped_at: self.iteration,
            seed: self.seed,
            num_agents: self.agents.len(),
            metrics: self.recorder.history().clone(),
            final_integration: IntegrationScores::measure(&self.agents, &self.grid),
        }
    }

    fn transition(&self, counts: &IterationCounts) -> RunState {
        if counts.happy() == self.agents.len() {
            RunState::Converged
        } else if counts.moved() == 0 && counts.stayed_unhappy() > 0 {
            RunState::Stagnant
        } else if self.iteration >= self.config.max_iterations {
            RunState::Exhausted
        } else {
            RunState::Running
        }
    }

    /// Every agent placed, on a distinct cell, and the grid agrees.
    fn verify_placement(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::with_capacity(self.agents.len());
        for agent in &self.agents {
            let coord = agent.location().ok_or_else(|| {
                SchellingError::placement_mismatch(format!("{} has no home", agent.id()))
            })?;
            if !seen.insert(coord) {
                return Err(SchellingError::placement_mismatch(format!(
                    "two agents share {}",
                    coord
                )));
            }
        }
        if self.grid.occupied_count() != self.agents.len() {
            return Err(SchellingError::placement_mismatch(format!(
                "{} occupied cells for {} agents",
                self.grid.occupied_count(),
                self.agents.len()
            )));
        }
        Ok(())
    }

    /// Whether each agent is happy where it stands, in current turn order.
    pub fn happiness_snapshot(&self) -> Vec<(AgentId, bool)> {
        self.agents
            .iter()
            .map(|a| (a.id(), a.is_happy(&self.grid)))
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.grid.occupied_count()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Loop iterations executed so far.
    pub fn iteration(&self) -> Iteration {
        self.iteration
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn metrics(&self) -> &MetricsHistory {
        self.recorder.history()
    }
}

/// The first `class_a_count` agents are class A, the rest class B.
fn build_agents(config: &WorldConfig) -> Vec<Agent> {
    let n_a = config.class_a_count();
    (0..config.num_agents)
        .map(|i| {
            let class = if i < n_a { Class::A } else { Class::B };
            Agent::new(AgentId(i as u32), class, config.preference(class))
        })
        .collect()
}

fn place_layout(
    config: &WorldConfig,
    grid: &mut OccupancyGrid,
    layout: Vec<(Class, Coordinate)>,
) -> Result<Vec<Agent>> {
    if layout.len() != config.num_agents {
        return Err(SchellingError::placement_mismatch(format!(
            "layout has {} agents, config expects {}",
            layout.len(),
            config.num_agents
        )));
    }
    let mut agents = Vec::with_capacity(layout.len());
    for (i, (class, coord)) in layout.into_iter().enumerate() {
        let mut agent = Agent::new(AgentId(i as u32), class, config.preference(class));
        grid.place(agent.resident(), coord)?;
        agent.settle(coord);
        agents.push(agent);
    }
    Ok(agents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schelling_core::error::ConfigError;

    fn small_config() -> WorldConfig {
        WorldConfig {
            width: 10,
            height: 10,
            num_agents: 70,
            preference_a: 0.5,
            preference_b: 0.5,
            proportion_a: 0.5,
            max_iterations: 20,
            seed: Some(7),
        }
    }

    #[test]
    fn default_config_is_valid() {
        let config = WorldConfig::default();
        config.validate().unwrap();
        assert_eq!(config.class_a_count(), 228);
    }

    #[test]
    fn capacity_must_exceed_agent_count() {
        let config = WorldConfig {
            width: 3,
            height: 3,
            num_agents: 9,
            ..WorldConfig::default()
        };
        let err = World::new(config).err().unwrap();
        assert_eq!(err, SchellingError::insufficient_capacity(3, 3, 9));
    }

    #[test]
    fn out_of_range_preference_is_rejected() {
        let config = WorldConfig {
            preference_b: 1.5,
            ..small_config()
        };
        assert!(config.validate().unwrap_err().is_config());
    }

    #[test]
    fn zero_sized_grid_is_rejected() {
        let config = WorldConfig {
            width: 0,
            num_agents: 0,
            ..small_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn class_split_rounds_half_to_even() {
        let config = WorldConfig {
            num_agents: 5,
            proportion_a: 0.5,
            ..small_config()
        };
        assert_eq!(config.class_a_count(), 2);
        let config = WorldConfig {
            num_agents: 7,
            proportion_a: 0.5,
            ..small_config()
        };
        assert_eq!(config.class_a_count(), 4);
    }

    #[test]
    fn initialization_places_every_agent_once() {
        let world = World::new(small_config()).unwrap();
        assert_eq!(world.occupied_count(), 70);
        let a = world.agents().iter().filter(|a| a.class() == Class::A).count();
        assert_eq!(a, 35);
        for agent in world.agents() {
            let threshold = world.config().preference(agent.class());
            assert_eq!(agent.threshold(), threshold);
        }
        assert_eq!(world.metrics().len(), 1);
        assert_eq!(world.metrics().moved(), vec![0]);
    }

    #[test]
    fn step_records_one_snapshot_per_iteration() {
        let mut world = World::new(small_config()).unwrap();
        if world.state().is_terminal() {
            return;
        }
        world.step().unwrap();
        assert_eq!(world.iteration(), 1);
        assert_eq!(world.metrics().len(), 2);
        assert!(world.metrics().is_aligned());
        assert_eq!(world.occupied_count(), 70);
    }

    #[test]
    fn step_after_terminal_is_a_no_op() {
        let mut world = World::new(small_config()).unwrap();
        let report = world.run().unwrap();
        let len = world.metrics().len();
        assert_eq!(world.step().unwrap(), report.state);
        assert_eq!(world.metrics().len(), len);
    }

    #[test]
    fn zero_budget_stops_at_baseline() {
        let config = WorldConfig {
            max_iterations: 0,
            preference_a: 1.0,
            preference_b: 1.0,
            ..small_config()
        };
        let mut world = World::new(config).unwrap();
        let report = world.run().unwrap();
        assert_eq!(report.stopped_at, 0);
        assert_eq!(report.metrics.len(), 1);
        assert_ne!(report.state, RunState::Running);
    }

    #[test]
    fn overflowing_grid_size_is_rejected() {
        let config = WorldConfig {
            width: usize::MAX,
            height: 2,
            ..small_config()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            SchellingError::Config(ConfigError::InvalidValue { .. })
        ));
        assert!(World::new(config).is_err());
    }

    #[test]
    fn run_state_display() {
        assert_eq!(RunState::Stagnant.to_string(), "stagnant");
        assert!(RunState::Exhausted.is_terminal());
        assert!(!RunState::Running.is_terminal());
    }
}
