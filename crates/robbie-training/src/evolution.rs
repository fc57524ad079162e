//! The generation loop.
//!
//! # Concurrency
//!
//! Each generation fans out one scoped thread per agent and joins them all
//! before ranking. Tasks share nothing mutable: each owns its agent's counters
//! and a random generator derived from `(seed, generation, agent index)`, and
//! builds its own grids. Breeding of generation `N + 1` starts only after the
//! join of generation `N`, since it reads the fully ranked scores.
//!
//! Episodes of one agent run sequentially inside its task. When a task timeout
//! is configured, each task stops once its deadline has passed, even in the
//! middle of an episode, and its agent is marked truncated.

use std::{
    thread,
    time::{Duration, Instant},
};

use robbie_policy::breeder::SharedBreeder;
use tracing::{debug, info, warn};

use crate::{
    agent::Agent,
    config::EvolutionConfig,
    population::Population,
    statistics::{GenerationReport, StatisticsSink},
};

/// Drives a run from the founding population to the final alpha.
#[derive(Debug, Clone)]
pub struct Evolution {
    config: EvolutionConfig,
    breeder: SharedBreeder,
}

impl Evolution {
    /// Creates an orchestrator for an already validated configuration.
    #[must_use]
    pub fn new(config: EvolutionConfig, breeder: SharedBreeder) -> Self {
        Self { config, breeder }
    }

    #[must_use]
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Creates generation zero.
    #[must_use]
    pub fn founding_population(&self) -> Population {
        let mut rng = self.config.seed.for_breeding(0).rng();
        Population::founding(self.config.population_size, self.breeder.clone(), &mut rng)
    }

    /// Evaluates every agent concurrently and returns once all have finished.
    ///
    /// Counters accumulate onto whatever the agents already hold; a freshly
    /// bred population starts from zero.
    pub fn evaluate_generation(&self, population: &mut Population, generation: usize) {
        let runner = self.config.episode_runner();
        let games = self.config.games_per_agent;
        let timeout = self.config.task_timeout;
        let seed = self.config.seed;

        thread::scope(|s| {
            for (index, agent) in population.agents_mut().iter_mut().enumerate() {
                let runner = &runner;
                s.spawn(move || {
                    let mut rng = seed.for_evaluation(generation, index).rng();
                    let deadline = timeout.map(|timeout| Instant::now() + timeout);
                    let played = agent.evaluate(runner, games, deadline, &mut rng);
                    if agent.is_truncated() {
                        warn!(
                            generation,
                            agent = index,
                            played,
                            games,
                            "evaluation deadline passed, agent truncated"
                        );
                    }
                    debug!(
                        generation,
                        agent = index,
                        score = agent.score(),
                        "agent evaluated"
                    );
                });
            }
        });
    }

    /// Runs every configured generation, reporting each to `sink`.
    ///
    /// # Returns
    ///
    /// The alpha agent of the last generation.
    pub fn run(&self, sink: &mut dyn StatisticsSink) -> Agent {
        let mut population = self.founding_population();
        for generation in 0..self.config.generations {
            let started = Instant::now();
            self.evaluate_generation(&mut population, generation);
            population.rank();

            let report = GenerationReport::new(generation, &population);
            info!(
                generation,
                alpha = report.alpha.score,
                runt = report.runt.score,
                mean = report.scores.mean,
                elapsed = ?round_millis(started.elapsed()),
                "finished generation"
            );
            sink.record(&report);

            if generation + 1 < self.config.generations {
                let mut rng = self.config.seed.for_breeding(generation + 1).rng();
                population = population.next_generation(
                    self.config.parents,
                    self.config.mutation_rate,
                    &mut rng,
                );
            }
        }
        population.alpha().clone()
    }
}

fn round_millis(duration: Duration) -> Duration {
    Duration::from_millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::RngCore;
    use robbie_engine::{GridConfig, Move, ScoringConfig, Seed};
    use robbie_policy::{
        breeder::{Breeder, BreederKind},
        policy::{BoxedPolicy, FixedPolicy, Policy},
    };

    use super::*;
    use crate::statistics::EvolutionHistory;

    fn small_config(seed: u64) -> EvolutionConfig {
        EvolutionConfig {
            grid: GridConfig {
                size: 5,
                rubbish_probability: 0.3,
            },
            scoring: ScoringConfig::default(),
            moves_per_episode: 40,
            games_per_agent: 4,
            generations: 4,
            population_size: 12,
            parents: 3,
            mutation_rate: 0.02,
            seed: Seed::from_u64(seed),
            task_timeout: None,
        }
    }

    /// Breeder whose agents always pick up rubbish.
    #[derive(Debug)]
    struct PickUpBreeder;

    impl Breeder for PickUpBreeder {
        fn name(&self) -> &'static str {
            "pick-up"
        }

        fn spawn(&self, _: f64, _: &[&dyn Policy], _: &mut dyn RngCore) -> BoxedPolicy {
            Box::new(FixedPolicy(Move::PickUpRubbish))
        }
    }

    #[test]
    fn test_run_reports_every_generation() {
        let config = small_config(1);
        let evolution = Evolution::new(config, BreederKind::Genome.breeder());
        let mut history = EvolutionHistory::new();
        let alpha = evolution.run(&mut history);

        assert_eq!(history.reports().len(), 4);
        for (i, report) in history.reports().iter().enumerate() {
            assert_eq!(report.generation, i);
            assert!(report.alpha.score >= report.runt.score);
            assert_eq!(report.alpha.score, report.scores.max);
            assert_eq!(report.runt.score, report.scores.min);
            assert_eq!(report.alpha.gene_usage.unwrap().total(), 243);
        }
        assert_eq!(alpha.score(), history.reports()[3].alpha.score);
        assert_eq!(history.reports()[3].alpha.genome.as_ref(), alpha.policy().genome());
        assert!(history.reports().iter().all(|r| r.runt.genome.is_some()));
    }

    #[test]
    fn test_run_is_reproducible() {
        let run = || {
            let evolution = Evolution::new(small_config(7), BreederKind::Genome.breeder());
            let mut history = EvolutionHistory::new();
            let alpha = evolution.run(&mut history);
            (history.reports().to_vec(), alpha.policy().genome().cloned())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_founding_populations_match_for_same_seed() {
        let evolution = || Evolution::new(small_config(3), BreederKind::Genome.breeder());
        let a = evolution().founding_population();
        let b = evolution().founding_population();
        for (x, y) in a.agents().iter().zip(b.agents()) {
            assert_eq!(x.policy().genome(), y.policy().genome());
        }
    }

    #[test]
    fn test_every_agent_is_evaluated() {
        let mut config = small_config(2);
        config.grid = GridConfig {
            size: 3,
            rubbish_probability: 1.0,
        };
        config.moves_per_episode = 5;
        let evolution = Evolution::new(config, Arc::new(PickUpBreeder));
        let mut population = evolution.founding_population();
        evolution.evaluate_generation(&mut population, 0);

        for agent in population.agents() {
            let stats = agent.stats();
            assert_eq!(stats.pick_ups(), 4);
            assert_eq!(stats.false_pick_ups(), 16);
            assert_eq!(stats.rubbish_seen(), 36);
            assert_eq!(stats.rubbish_missed(), 32);
            assert!(!agent.is_truncated());
        }
    }

    #[test]
    fn test_heuristic_baseline_beats_founding_genomes() {
        let mut config = small_config(4);
        config.generations = 1;
        let mut genome_history = EvolutionHistory::new();
        Evolution::new(config, BreederKind::Genome.breeder()).run(&mut genome_history);
        let mut heuristic_history = EvolutionHistory::new();
        Evolution::new(config, BreederKind::Heuristic.breeder()).run(&mut heuristic_history);

        let genome_mean = genome_history.reports()[0].scores.mean;
        let heuristic_mean = heuristic_history.reports()[0].scores.mean;
        assert!(heuristic_mean > genome_mean);
        assert_eq!(heuristic_history.reports()[0].alpha.gene_usage, None);
    }

    #[test]
    fn test_zero_timeout_truncates_every_agent() {
        let mut config = small_config(5);
        config.task_timeout = Some(Duration::ZERO);
        let evolution = Evolution::new(config, BreederKind::Genome.breeder());
        let mut population = evolution.founding_population();
        evolution.evaluate_generation(&mut population, 0);
        assert!(population.agents().iter().all(Agent::is_truncated));
        assert!(population.agents().iter().all(|a| a.stats().rubbish_seen() == 0));
    }

    #[test]
    fn test_timeout_bounds_huge_move_budget() {
        let mut config = small_config(6);
        config.population_size = 4;
        config.games_per_agent = 1;
        config.moves_per_episode = 50_000_000;
        config.task_timeout = Some(Duration::from_millis(1));
        let evolution = Evolution::new(config, BreederKind::Genome.breeder());
        let mut population = evolution.founding_population();
        let started = Instant::now();
        evolution.evaluate_generation(&mut population, 0);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(population.agents().iter().all(Agent::is_truncated));
    }
}
