//! Compare terminal states across preference thresholds.

use anyhow::{Context, Result};
use colored::Colorize;
use schelling::prelude::*;
use std::path::Path;

use super::WorldArgs;

pub fn run(args: &WorldArgs, steps: usize, output: Option<String>, quiet: bool) -> Result<()> {
    let mut base = args.world_config()?;
    // One seed for every point, so each run starts from the same placement.
    base.seed = Some(base.seed.unwrap_or_else(rand::random));
    let thresholds = threshold_range(steps);

    if !quiet {
        println!(
            "{} Sweeping {} thresholds on a {}x{} grid, {} agents, seed {}",
            "→".blue(),
            thresholds.len().to_string().cyan(),
            base.width,
            base.height,
            base.num_agents,
            base.seed.unwrap_or_default()
        );
    }

    let points = sweep(&base, &thresholds).context("Sweep failed")?;

    if !quiet {
        println!();
        println!(
            "  {:>9}  {:<10}  {:>4}  {:>8}  {:>8}  {:>6}  {:>7}",
            "threshold".bold(),
            "state".bold(),
            "iter".bold(),
            "start".bold(),
            "final".bold(),
            "happy".bold(),
            "time".bold()
        );
        for point in &points {
            println!("{}", format_row(point, base.num_agents));
        }
    }

    if let Some(path) = output {
        let path = Path::new(&path);
        let json = serde_json::to_string_pretty(&points).context("Failed to serialize sweep")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write sweep: {}", path.display()))?;
        if !quiet {
            println!();
            println!("{} Sweep written to {}", "✓".green().bold(), path.display());
        }
    }

    Ok(())
}

fn format_row(point: &SweepPoint, num_agents: usize) -> String {
    let state = match point.state {
        RunState::Converged => point.state.to_string().green(),
        RunState::Stagnant => point.state.to_string().yellow(),
        _ => point.state.to_string().normal(),
    };
    format!(
        "  {:>9.2}  {:<10}  {:>4}  {:>8.2}  {:>8.2}  {:>6}  {:>5}ms",
        point.threshold,
        state,
        point.stopped_at,
        point.initial_integration,
        point.final_integration.overall,
        format!("{}/{}", point.final_happy, num_agents),
        point.wall_time_ms
    )
}
