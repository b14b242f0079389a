//! Run one simulation and print its report.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use schelling::prelude::*;
use std::path::PathBuf;
use tracing::debug;

use super::WorldArgs;

pub fn run(args: &WorldArgs, output: Option<String>, quiet: bool) -> Result<()> {
    let config = args.resolve()?;
    let world_config = config.world.to_world_config();
    let print_report = config.output.print_to_screen && !quiet;
    debug!(?world_config, "resolved configuration");

    let mut world = World::new(world_config.clone()).context("Failed to build world")?;

    if !quiet {
        println!(
            "{} {}x{} grid, {} agents, seed {}",
            "→".blue(),
            world_config.width,
            world_config.height,
            world_config.num_agents.to_string().cyan(),
            world.seed().to_string().cyan()
        );
    }

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(world_config.max_iterations)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} iterations")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    while !world.state().is_terminal() {
        world.step()?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    // Already terminal: logs the outcome and returns the report.
    let report = world.run()?;

    if !quiet {
        println!("{}", stop_message(&report));
    }
    if print_report {
        println!();
        for (label, values) in report_lines(&report) {
            println!("{} {}", label, values.cyan());
        }
    }

    let output = output.map(PathBuf::from).or(config.output.report);
    if let Some(path) = output {
        save_report(&report, &path)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        if !quiet {
            println!();
            println!("{} Report written to {}", "✓".green().bold(), path.display());
        }
    }

    Ok(())
}

pub(crate) fn stop_message(report: &RunReport) -> String {
    let n = report.stopped_at;
    let after = format!("Stopping after {} iteration{}.", n, if n == 1 { "" } else { "s" });
    match report.state {
        RunState::Converged => format!("Everyone is happy!  {}", after),
        RunState::Stagnant => format!(
            "Some agents are unhappy, but they cannot find anywhere to move to.  {}",
            after
        ),
        RunState::Exhausted => format!("Reached the iteration limit.  {}", after),
        RunState::Running => format!("Still running after {} iterations.", n),
    }
}

/// One labelled line per recorded sequence, from time 0 to the end.
pub(crate) fn report_lines(report: &RunReport) -> Vec<(&'static str, String)> {
    let m = &report.metrics;
    let mut lines = vec![(
        "All results begin at time=0 and go in order to the end.",
        String::new(),
    )];
    let sequences: [(&'static str, String); 10] = [
        (
            "The average number of neighbors an agent has not like them:",
            format!("{:?}", m.integration),
        ),
        (
            "The average number of neighbors an A agent has not like them:",
            format!("{:?}", m.integration_a),
        ),
        (
            "The average number of neighbors a B agent has not like them:",
            format!("{:?}", m.integration_b),
        ),
        ("The number of happy agents:", format!("{:?}", m.happy_count)),
        ("The number of happy A agents:", format!("{:?}", m.happy_a)),
        ("The number of happy B agents:", format!("{:?}", m.happy_b)),
        ("The number of A agent moves per turn:", format!("{:?}", m.moved_a)),
        ("The number of B agent moves per turn:", format!("{:?}", m.moved_b)),
        (
            "The number of A agents who failed to find a new home:",
            format!("{:?}", m.stayed_unhappy_a),
        ),
        (
            "The number of B agents who failed to find a new home:",
            format!("{:?}", m.stayed_unhappy_b),
        ),
    ];
    lines.extend(sequences);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stagnant_report() -> RunReport {
        let config = WorldConfig {
            width: 4,
            height: 4,
            num_agents: 2,
            preference_a: 1.0,
            preference_b: 1.0,
            ..WorldConfig::default()
        };
        WorldBuilder::new(config)
            .seed(2)
            .with_layout(vec![
                (Class::A, Coordinate::new(0, 0)),
                (Class::B, Coordinate::new(1, 0)),
            ])
            .build()
            .unwrap()
            .run()
            .unwrap()
    }

    #[test]
    fn stagnation_uses_cannot_move_message() {
        let message = stop_message(&stagnant_report());
        assert!(message.starts_with("Some agents are unhappy"));
        assert!(message.ends_with("after 1 iteration."));
    }

    #[test]
    fn baseline_convergence_reports_zero_iterations() {
        let config = WorldConfig {
            width: 4,
            height: 4,
            num_agents: 2,
            preference_a: 0.0,
            preference_b: 0.0,
            ..WorldConfig::default()
        };
        let report = WorldBuilder::new(config)
            .seed(2)
            .with_layout(vec![
                (Class::A, Coordinate::new(0, 0)),
                (Class::B, Coordinate::new(1, 1)),
            ])
            .build()
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(
            stop_message(&report),
            "Everyone is happy!  Stopping after 0 iterations."
        );
    }

    #[test]
    fn report_lists_every_sequence() {
        let report = stagnant_report();
        let lines = report_lines(&report);
        assert_eq!(lines.len(), 11);
        let stayed_a = lines
            .iter()
            .find(|(label, _)| label.contains("A agents who failed"))
            .unwrap();
        assert_eq!(stayed_a.1, "[0, 1]");
    }
}
