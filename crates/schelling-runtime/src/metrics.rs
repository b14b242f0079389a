//! Per-iteration statistics for a world run.
//!
//! Every recorded iteration appends one entry to each sequence, so all
//! sequences share the same length and index `i` always means iteration
//! `i` (0 = initial placement):
//! - Integration: mean count of other-class neighbors, overall and per class
//! - Happiness: agents that were happy, overall and per class
//! - Mobility: agents that moved, and agents that stayed while unhappy

use schelling_core::agent::Agent;
use schelling_core::occupancy::Occupancy;
use schelling_core::types::{Class, Outcome};
use serde::{Deserialize, Serialize};

/// Mean other-class neighbor counts, rounded to two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationScores {
    pub overall: f64,
    pub a: f64,
    pub b: f64,
}

impl IntegrationScores {
    /// Score the agents where they currently stand.
    ///
    /// A class with no agents scores 0.0.
    pub fn measure(agents: &[Agent], grid: &dyn Occupancy) -> Self {
        let different: Vec<(Class, usize)> = agents
            .iter()
            .map(|a| (a.class(), a.dissimilar_neighbors(grid)))
            .collect();
        let overall = different.iter().map(|&(_, d)| d).sum();
        let [a, b] = Class::ALL.map(|class| {
            let (sum, count) = different
                .iter()
                .filter(|&&(c, _)| c == class)
                .fold((0, 0), |(sum, count), &(_, d)| (sum + d, count + 1));
            rounded_mean(sum, count)
        });
        Self {
            overall: rounded_mean(overall, different.len()),
            a,
            b,
        }
    }
}

/// Happiness and mobility counts for one iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationCounts {
    pub happy_a: usize,
    pub happy_b: usize,
    pub moved_a: usize,
    pub moved_b: usize,
    pub stayed_unhappy_a: usize,
    pub stayed_unhappy_b: usize,
}

impl IterationCounts {
    /// Counts for the initial placement: who is happy, nobody moved or stayed.
    pub fn baseline(agents: &[Agent], grid: &dyn Occupancy) -> Self {
        let mut counts = Self::default();
        for agent in agents.iter().filter(|a| a.is_happy(grid)) {
            match agent.class() {
                Class::A => counts.happy_a += 1,
                Class::B => counts.happy_b += 1,
            }
        }
        counts
    }

    /// Tally the outcomes of a loop iteration.
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut counts = Self::default();
        for outcome in outcomes {
            match outcome {
                Outcome::StayedHappy(Class::A) => counts.happy_a += 1,
                Outcome::StayedHappy(Class::B) => counts.happy_b += 1,
                Outcome::Moved(Class::A) => counts.moved_a += 1,
                Outcome::Moved(Class::B) => counts.moved_b += 1,
                Outcome::StayedUnhappy(Class::A) => counts.stayed_unhappy_a += 1,
                Outcome::StayedUnhappy(Class::B) => counts.stayed_unhappy_b += 1,
            }
        }
        counts
    }

    pub fn happy(&self) -> usize {
        self.happy_a + self.happy_b
    }

    pub fn moved(&self) -> usize {
        self.moved_a + self.moved_b
    }

    pub fn stayed_unhappy(&self) -> usize {
        self.stayed_unhappy_a + self.stayed_unhappy_b
    }

    /// Agents accounted for by this iteration.
    pub fn total(&self) -> usize {
        self.happy() + self.moved() + self.stayed_unhappy()
    }
}

/// The recorded sequences, one entry per iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsHistory {
    pub integration: Vec<f64>,
    pub integration_a: Vec<f64>,
    pub integration_b: Vec<f64>,
    pub happy_count: Vec<usize>,
    pub happy_a: Vec<usize>,
    pub happy_b: Vec<usize>,
    pub moved_a: Vec<usize>,
    pub moved_b: Vec<usize>,
    pub stayed_unhappy_a: Vec<usize>,
    pub stayed_unhappy_b: Vec<usize>,
}

impl MetricsHistory {
    /// Number of recorded iterations.
    pub fn len(&self) -> usize {
        self.integration.len()
    }

    pub fn is_empty(&self) -> bool {
        self.integration.is_empty()
    }

    /// Moves per iteration, both classes.
    pub fn moved(&self) -> Vec<usize> {
        sum_pairwise(&self.moved_a, &self.moved_b)
    }

    /// Unhappy stays per iteration, both classes.
    pub fn stayed_unhappy(&self) -> Vec<usize> {
        sum_pairwise(&self.stayed_unhappy_a, &self.stayed_unhappy_b)
    }

    /// Counts recorded for iteration `i`.
    pub fn counts_at(&self, i: usize) -> Option<IterationCounts> {
        if i >= self.len() {
            return None;
        }
        Some(IterationCounts {
            happy_a: self.happy_a[i],
            happy_b: self.happy_b[i],
            moved_a: self.moved_a[i],
            moved_b: self.moved_b[i],
            stayed_unhappy_a: self.stayed_unhappy_a[i],
            stayed_unhappy_b: self.stayed_unhappy_b[i],
        })
    }

    /// Whether every sequence has the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.len();
        [
            self.integration_a.len(),
            self.integration_b.len(),
            self.happy_count.len(),
            self.happy_a.len(),
            self.happy_b.len(),
            self.moved_a.len(),
            self.moved_b.len(),
            self.stayed_unhappy_a.len(),
            self.stayed_unhappy_b.len(),
        ]
        .iter()
        .all(|&len| len == n)
    }
}

/// Accumulates a [`MetricsHistory`] one snapshot at a time.
#[derive(Debug, Clone, Default)]
pub struct MetricsRecorder {
    history: MetricsHistory,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one iteration's snapshot to every sequence.
    pub fn record(&mut self, integration: IntegrationScores, counts: IterationCounts) {
        let h = &mut self.history;
        h.integration.push(integration.overall);
        h.integration_a.push(integration.a);
        h.integration_b.push(integration.b);
        h.happy_count.push(counts.happy());
        h.happy_a.push(counts.happy_a);
        h.happy_b.push(counts.happy_b);
        h.moved_a.push(counts.moved_a);
        h.moved_b.push(counts.moved_b);
        h.stayed_unhappy_a.push(counts.stayed_unhappy_a);
        h.stayed_unhappy_b.push(counts.stayed_unhappy_b);
    }

    /// Number of snapshots recorded so far.
    pub fn recorded(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &MetricsHistory {
        &self.history
    }
}

fn rounded_mean(sum: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round2(sum as f64 / count as f64)
}

/// Two decimals, halves to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn sum_pairwise(a: &[usize], b: &[usize]) -> Vec<usize> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}
