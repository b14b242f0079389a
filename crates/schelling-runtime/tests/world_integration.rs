//! Properties of randomly placed worlds.
//!
//! Checks, over several seeds and configurations:
//! 1. Initialization places every agent on its own cell
//! 2. Every loop iteration accounts for every agent exactly once
//! 3. Fixed seeds reproduce runs exactly
//! 4. Runs always end in a terminal state with aligned sequences

use schelling_runtime::prelude::*;
use std::collections::HashSet;

fn configs() -> Vec<WorldConfig> {
    vec![
        WorldConfig::default(),
        WorldConfig {
            width: 12,
            height: 9,
            num_agents: 80,
            preference_a: 0.5,
            preference_b: 0.5,
            proportion_a: 0.5,
            max_iterations: 25,
            seed: None,
        },
        WorldConfig {
            width: 6,
            height: 6,
            num_agents: 35,
            preference_a: 0.7,
            preference_b: 0.2,
            proportion_a: 0.3,
            max_iterations: 15,
            seed: None,
        },
    ]
}

#[test]
fn initialization_gives_every_agent_a_unique_cell() {
    for config in configs() {
        for seed in 0..5 {
            let world = WorldBuilder::new(config.clone()).seed(seed).build().unwrap();
            assert_eq!(world.occupied_count(), config.num_agents);

            let cells: HashSet<_> = world
                .agents()
                .iter()
                .map(|a| a.location().expect("placed"))
                .collect();
            assert_eq!(cells.len(), config.num_agents);

            for agent in world.agents() {
                let coord = agent.location().unwrap();
                assert_eq!(world.grid().occupant(coord), Some(agent.resident()));
            }
        }
    }
}

#[test]
fn every_iteration_accounts_for_every_agent() {
    for config in configs() {
        for seed in 0..3 {
            let mut world = WorldBuilder::new(config.clone()).seed(seed).build().unwrap();
            let report = world.run().unwrap();
            let m = &report.metrics;

            for i in 1..m.len() {
                let total = m.moved_a[i]
                    + m.moved_b[i]
                    + m.stayed_unhappy_a[i]
                    + m.stayed_unhappy_b[i]
                    + m.happy_a[i]
                    + m.happy_b[i];
                assert_eq!(total, config.num_agents, "iteration {} seed {}", i, seed);
                assert_eq!(m.happy_count[i], m.happy_a[i] + m.happy_b[i]);
            }
            assert_eq!(m.moved_a[0] + m.moved_b[0], 0);
            assert_eq!(m.stayed_unhappy_a[0] + m.stayed_unhappy_b[0], 0);
            assert_eq!(world.occupied_count(), config.num_agents);
        }
    }
}

#[test]
fn fixed_seed_reproduces_run() {
    for config in configs() {
        let first = WorldBuilder::new(config.clone()).seed(1234).build().unwrap().run().unwrap();
        let second = WorldBuilder::new(config.clone()).seed(1234).build().unwrap().run().unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn config_seed_is_honored_and_reported() {
    let config = WorldConfig {
        seed: Some(77),
        ..WorldConfig::default()
    };
    let a = World::new(config.clone()).unwrap().run().unwrap();
    let b = World::new(config).unwrap().run().unwrap();
    assert_eq!(a.seed, 77);
    assert_eq!(a.metrics, b.metrics);
}

#[test]
fn runs_terminate_with_aligned_sequences() {
    for config in configs() {
        let mut world = WorldBuilder::new(config.clone()).seed(5).build().unwrap();
        let report = world.run().unwrap();

        assert!(report.state.is_terminal());
        assert!(report.stopped_at <= config.max_iterations);
        assert!(report.metrics.is_aligned());
        assert_eq!(report.metrics.len() as u64, report.stopped_at + 1);

        let last = report.metrics.counts_at(report.metrics.len() - 1).unwrap();
        match report.state {
            RunState::Converged => assert_eq!(last.happy(), config.num_agents),
            RunState::Stagnant => {
                assert_eq!(last.moved(), 0);
                assert!(last.stayed_unhappy() > 0);
            }
            RunState::Exhausted => assert_eq!(report.stopped_at, config.max_iterations),
            RunState::Running => unreachable!("run() returned a non-terminal state"),
        }
    }
}

#[test]
fn happiness_evaluation_is_idempotent() {
    let world = WorldBuilder::new(WorldConfig::default()).seed(3).build().unwrap();
    assert_eq!(world.happiness_snapshot(), world.happiness_snapshot());
}

#[test]
fn integration_scores_stay_within_neighborhood() {
    let mut world = WorldBuilder::new(WorldConfig::default()).seed(8).build().unwrap();
    let report = world.run().unwrap();
    for series in [
        &report.metrics.integration,
        &report.metrics.integration_a,
        &report.metrics.integration_b,
    ] {
        assert!(series.iter().all(|v| (0.0..=8.0).contains(v)));
    }
    assert!((0.0..=8.0).contains(&report.final_integration.overall));
}

#[test]
fn insufficient_capacity_fails_fast() {
    let config = WorldConfig {
        width: 5,
        height: 4,
        num_agents: 20,
        ..WorldConfig::default()
    };
    let err = World::new(config).err().expect("capacity check");
    assert!(matches!(
        err,
        SchellingError::Config(ConfigError::InsufficientCapacity { num_agents: 20, .. })
    ));
}
