//! Threshold Sweep Demo: Mild Preferences, Strong Segregation
//!
//! Shows that agents who only ask for a minority of like neighbors still
//! end up in strongly segregated neighborhoods.
//!
//! Protocol:
//! 1. Build the classic 20x20 world (380 agents, 60% class A)
//! 2. For thresholds 0.0, 0.1, ..., 1.0 run 5 seeds each, both classes sharing the threshold
//! 3. Compare starting and final integration (unlike neighbors per agent)
//! 4. Count how often each threshold converges, stagnates or runs out of iterations

use schelling_core::error::Result;
use schelling_runtime::sweep::{sweep, threshold_range, SweepPoint};
use schelling_runtime::world::{RunState, WorldConfig};
use serde::Serialize;

const SEEDS: [u64; 5] = [1, 2, 3, 4, 5];
const OUTPUT_DIR: &str = "poc/threshold-sweep/output";

#[derive(Debug, Serialize)]
struct ThresholdSummary {
    threshold: f64,
    mean_initial_integration: f64,
    mean_final_integration: f64,
    converged: usize,
    stagnant: usize,
    exhausted: usize,
    mean_iterations: f64,
}

fn main() {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║  Threshold Sweep: Mild Preferences,                 ║");
    println!("║  Strong Segregation                                 ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let base = WorldConfig {
        max_iterations: 50,
        ..WorldConfig::default()
    };
    let thresholds = threshold_range(10);

    let runs = match run_all(&base, &thresholds) {
        Ok(runs) => runs,
        Err(e) => {
            eprintln!("  sweep failed: {}", e);
            std::process::exit(1);
        }
    };
    let summaries = summarize(&thresholds, &runs);

    println!("── Results ({} seeds per threshold) ───────────────────", SEEDS.len());
    println!();
    println!("  {:>9} │ {:>7} {:>7} │ {:>4} {:>4} {:>4} │ {:>6}",
        "Threshold", "Start", "Final", "Conv", "Stag", "Exh", "Iters");
    println!("  {:─>9}─┼─{:─>7}─{:─>7}─┼─{:─>4}─{:─>4}─{:─>4}─┼─{:─>6}",
        "", "", "", "", "", "", "");
    for s in &summaries {
        println!("  {:>9.1} │ {:>7.2} {:>7.2} │ {:>4} {:>4} {:>4} │ {:>6.1}",
            s.threshold,
            s.mean_initial_integration,
            s.mean_final_integration,
            s.converged,
            s.stagnant,
            s.exhausted,
            s.mean_iterations);
    }
    println!();

    // --- Hypothesis test ---
    let mild = summaries.iter().find(|s| (s.threshold - 0.3).abs() < 1e-9);
    if let Some(mild) = mild {
        let start = mild.mean_initial_integration.max(f64::EPSILON);
        let drop = 1.0 - mild.mean_final_integration / start;
        println!("  At threshold 0.3 integration falls {:.0}% ({:.2} → {:.2}).",
            drop * 100.0, mild.mean_initial_integration, mild.mean_final_integration);
        if drop > 0.3 {
            println!("  HYPOTHESIS SUPPORTED: a mild preference segregates the grid.");
        } else {
            println!("  HYPOTHESIS NOT SUPPORTED with {} iterations.", base.max_iterations);
        }
    }

    // --- Write outputs ---
    std::fs::create_dir_all(OUTPUT_DIR).ok();

    let mut csv = String::new();
    csv.push_str("threshold,seed,state,stopped_at,initial_integration,final_integration,final_happy\n");
    for (seed, points) in &runs {
        for p in points {
            csv.push_str(&format!("{:.2},{},{},{},{:.4},{:.4},{}\n",
                p.threshold, seed, p.state, p.stopped_at,
                p.initial_integration, p.final_integration.overall, p.final_happy));
        }
    }
    std::fs::write(format!("{}/threshold-sweep.csv", OUTPUT_DIR), &csv).ok();
    println!();
    println!("  CSV: {}/threshold-sweep.csv", OUTPUT_DIR);

    if let Ok(json) = serde_json::to_string_pretty(&summaries) {
        std::fs::write(format!("{}/threshold-summary.json", OUTPUT_DIR), json).ok();
        println!("  JSON: {}/threshold-summary.json", OUTPUT_DIR);
    }
    println!();
    println!("══════════════════════════════════════════════════════");
}

/// One sweep per seed.
fn run_all(base: &WorldConfig, thresholds: &[f64]) -> Result<Vec<(u64, Vec<SweepPoint>)>> {
    SEEDS
        .iter()
        .map(|&seed| {
            let config = WorldConfig {
                seed: Some(seed),
                ..base.clone()
            };
            println!("  seed {} ...", seed);
            Ok((seed, sweep(&config, thresholds)?))
        })
        .collect()
}

fn summarize(thresholds: &[f64], runs: &[(u64, Vec<SweepPoint>)]) -> Vec<ThresholdSummary> {
    thresholds
        .iter()
        .enumerate()
        .map(|(i, &threshold)| {
            let points: Vec<&SweepPoint> = runs.iter().filter_map(|(_, p)| p.get(i)).collect();
            let n = points.len().max(1) as f64;
            let count = |state: RunState| points.iter().filter(|p| p.state == state).count();
            let mean = |f: fn(&SweepPoint) -> f64| points.iter().map(|p| f(p)).sum::<f64>() / n;
            ThresholdSummary {
                threshold,
                mean_initial_integration: mean(|p| p.initial_integration),
                mean_final_integration: mean(|p| p.final_integration.overall),
                converged: count(RunState::Converged),
                stagnant: count(RunState::Stagnant),
                exhausted: count(RunState::Exhausted),
                mean_iterations: mean(|p| p.stopped_at as f64),
            }
        })
        .collect()
}
