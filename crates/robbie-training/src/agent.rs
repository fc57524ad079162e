use std::time::Instant;

use rand::RngCore;
use robbie_engine::AgentStats;
use robbie_policy::{episode::EpisodeRunner, policy::BoxedPolicy};

/// A policy together with the counters it earned in the current generation.
///
/// Agents live for exactly one generation: they are created by a breeder,
/// evaluated, ranked, possibly used as parents, and then dropped.
#[derive(Debug, Clone)]
pub struct Agent {
    policy: BoxedPolicy,
    stats: AgentStats,
    truncated: bool,
}

impl Agent {
    /// Wraps `policy` with all counters at zero.
    #[must_use]
    pub fn new(policy: BoxedPolicy) -> Self {
        Self {
            policy,
            stats: AgentStats::new(),
            truncated: false,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &BoxedPolicy {
        &self.policy
    }

    #[must_use]
    pub fn stats(&self) -> &AgentStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut AgentStats {
        &mut self.stats
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.stats.score()
    }

    /// Whether evaluation stopped early because its deadline passed.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Plays up to `games` episodes in sequence.
    ///
    /// The deadline is checked before each episode and periodically during
    /// one. Once it has passed the agent is marked truncated and keeps the
    /// counters gathered so far, including those of an episode cut short.
    ///
    /// # Returns
    ///
    /// The number of episodes started, counting one that was cut short.
    pub fn evaluate(
        &mut self,
        runner: &EpisodeRunner,
        games: usize,
        deadline: Option<Instant>,
        rng: &mut dyn RngCore,
    ) -> usize {
        for played in 0..games {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                self.truncated = true;
                return played;
            }
            if !runner.play(self.policy.as_ref(), &mut self.stats, deadline, rng) {
                self.truncated = true;
                return played + 1;
            }
        }
        games
    }
}
