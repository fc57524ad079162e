//! Per-generation reporting surface.
//!
//! After each generation is ranked, the orchestrator builds a
//! [`GenerationReport`] and hands it to a [`StatisticsSink`]. Reports are
//! read-only snapshots: nothing in them refers back to live agents, so sinks
//! may keep them for as long as they like (e.g. to write charts or JSON after
//! the run).

use robbie_engine::AgentStats;
use robbie_policy::genome::{GeneUsage, Genome};
use serde::{Deserialize, Serialize};

use crate::{agent::Agent, population::Population};

/// Consumer of per-generation reports.
pub trait StatisticsSink {
    fn record(&mut self, report: &GenerationReport);
}

/// Copy of one agent's final counters, plus its lookup table and gene usage
/// for genome policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub score: i64,
    pub pick_ups: u64,
    pub false_pick_ups: u64,
    pub bumps: u64,
    pub rubbish_seen: u64,
    pub rubbish_missed: u64,
    pub truncated: bool,
    /// Slot counts per move kind, in move order. `None` for policies without a genome.
    pub gene_usage: Option<GeneUsage>,
    /// The full lookup table, written as 243 move digits when serialized.
    pub genome: Option<Genome>,
}

impl AgentSnapshot {
    #[must_use]
    pub fn of(agent: &Agent) -> Self {
        let stats: &AgentStats = agent.stats();
        Self {
            score: stats.score(),
            pick_ups: stats.pick_ups(),
            false_pick_ups: stats.false_pick_ups(),
            bumps: stats.bumps(),
            rubbish_seen: stats.rubbish_seen(),
            rubbish_missed: stats.rubbish_missed(),
            truncated: agent.is_truncated(),
            gene_usage: agent.policy().genome().map(Genome::gene_usage),
            genome: agent.policy().genome().cloned(),
        }
    }
}

/// Descriptive statistics of the scores in one population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl ScoreSummary {
    /// Summarizes a set of scores.
    ///
    /// # Returns
    ///
    /// * `Some(ScoreSummary)` - if there is at least one score
    /// * `None` - if `scores` is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use robbie_training::statistics::ScoreSummary;
    /// let summary = ScoreSummary::new([5, -1, 3, 1]).unwrap();
    /// assert_eq!(summary.min, -1);
    /// assert_eq!(summary.max, 5);
    /// assert_eq!(summary.mean, 2.0);
    /// assert_eq!(summary.median, 2.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(scores: I) -> Option<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut sorted = scores.into_iter().collect::<Vec<_>>();
        sorted.sort_unstable();

        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let n = sorted.len() as f64;
        let mean = sorted.iter().map(|&s| s as f64).sum::<f64>() / n;
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
        } else {
            sorted[mid] as f64
        };
        let variance = sorted
            .iter()
            .map(|&s| (s as f64 - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}

/// Everything reported about one finished generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: usize,
    pub alpha: AgentSnapshot,
    pub runt: AgentSnapshot,
    pub scores: ScoreSummary,
}

impl GenerationReport {
    /// Builds the report of a ranked population.
    ///
    /// # Panics
    ///
    /// Panics if the population is not ranked.
    #[must_use]
    pub fn new(generation: usize, population: &Population) -> Self {
        Self {
            generation,
            alpha: AgentSnapshot::of(population.alpha()),
            runt: AgentSnapshot::of(population.runt()),
            scores: population.score_summary(),
        }
    }
}

/// A sink that keeps every report in generation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionHistory {
    reports: Vec<GenerationReport>,
}

impl EvolutionHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn reports(&self) -> &[GenerationReport] {
        &self.reports
    }

    /// Alpha scores, one per generation.
    pub fn alpha_scores(&self) -> impl Iterator<Item = i64> + '_ {
        self.reports.iter().map(|r| r.alpha.score)
    }
}

impl StatisticsSink for EvolutionHistory {
    fn record(&mut self, report: &GenerationReport) {
        self.reports.push(report.clone());
    }
}
