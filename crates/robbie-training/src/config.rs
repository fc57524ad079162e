//! Run configuration.
//!
//! One [`EvolutionConfig`] is built at startup, validated once, and then
//! passed by reference to everything that needs it. Nothing mutates it after
//! construction.

use std::time::Duration;

use rand::Rng as _;
use robbie_engine::{GridConfig, ScoringConfig, Seed};
use robbie_policy::episode::EpisodeRunner;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub grid: GridConfig,
    pub scoring: ScoringConfig,
    /// Turns per episode.
    pub moves_per_episode: usize,
    /// Episodes each agent plays per generation.
    pub games_per_agent: usize,
    pub generations: usize,
    pub population_size: usize,
    /// Number of top-ranked agents that breed the next generation.
    pub parents: usize,
    /// Per-gene mutation probability when breeding.
    pub mutation_rate: f64,
    /// Master seed from which every random stream of the run is derived.
    pub seed: Seed,
    /// Wall-clock budget of one agent's evaluation, if any.
    pub task_timeout: Option<Duration>,
}

impl Default for EvolutionConfig {
    /// Defaults with a fresh random seed.
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            scoring: ScoringConfig::default(),
            moves_per_episode: 500,
            games_per_agent: 100,
            generations: 500,
            population_size: 200,
            parents: 2,
            mutation_rate: 0.01,
            seed: rand::rng().random(),
            task_timeout: None,
        }
    }
}

/// A configuration value outside its allowed range.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("{name} not within allowed range [0.0, 1.0]: {value}")]
    Probability { name: &'static str, value: f64 },
    #[display("{name} must be greater than zero")]
    NotPositive { name: &'static str },
}

impl EvolutionConfig {
    /// Checks every range constraint, reporting the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("rubbish probability", self.grid.rubbish_probability),
            ("mutation rate", self.mutation_rate),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }

        let counts = [
            ("grid size", self.grid.size),
            ("games per agent", self.games_per_agent),
            ("generations", self.generations),
            ("population size", self.population_size),
            ("parents", self.parents),
        ];
        for (name, value) in counts {
            if value == 0 {
                return Err(ConfigError::NotPositive { name });
            }
        }
        Ok(())
    }

    /// The episode runner matching this configuration.
    #[must_use]
    pub fn episode_runner(&self) -> EpisodeRunner {
        EpisodeRunner::new(self.grid, self.scoring, self.moves_per_episode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(EvolutionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_invalid_values() {
        // Format: (mutation, expected error message)
        let test_cases: [(fn(&mut EvolutionConfig), &str); 8] = [
            (
                |c| c.grid.rubbish_probability = 1.5,
                "rubbish probability not within allowed range [0.0, 1.0]: 1.5",
            ),
            (
                |c| c.grid.rubbish_probability = -0.1,
                "rubbish probability not within allowed range [0.0, 1.0]: -0.1",
            ),
            (
                |c| c.mutation_rate = f64::NAN,
                "mutation rate not within allowed range [0.0, 1.0]: NaN",
            ),
            (|c| c.grid.size = 0, "grid size must be greater than zero"),
            (
                |c| c.games_per_agent = 0,
                "games per agent must be greater than zero",
            ),
            (|c| c.generations = 0, "generations must be greater than zero"),
            (
                |c| c.population_size = 0,
                "population size must be greater than zero",
            ),
            (|c| c.parents = 0, "parents must be greater than zero"),
        ];
        for (mutate, expected) in test_cases {
            let mut config = EvolutionConfig::default();
            mutate(&mut config);
            let err = config.validate().unwrap_err();
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_boundary_probabilities_are_valid() {
        let mut config = EvolutionConfig::default();
        config.grid.rubbish_probability = 1.0;
        config.mutation_rate = 0.0;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = EvolutionConfig::default();
        config.task_timeout = Some(Duration::from_millis(1500));
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EvolutionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
