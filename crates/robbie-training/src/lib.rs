//! Evolving rubbish-collecting policies with a generational genetic algorithm.
//!
//! # How Training Works
//!
//! 1. **Founding** - Create a population of agents whose policies come from the
//!    breeder with no parents
//! 2. **Evaluation** - Every agent plays `games_per_agent` episodes on fresh
//!    grids, one thread per agent, accumulating its counters
//! 3. **Ranking** - Agents are stably sorted by descending score
//! 4. **Reporting** - The alpha (best) and runt (worst) are handed to a
//!    [`StatisticsSink`](statistics::StatisticsSink)
//! 5. **Breeding** - The top `parents` agents breed a same-size population
//! 6. **Repeat** - Until the configured number of generations has run
//!
//! # Architecture
//!
//! ```text
//! Evolution (orchestrator)
//!     ↓ owns
//! Population ── SharedBreeder (robbie-policy)
//!     ↓ contains
//! Agent = BoxedPolicy + AgentStats (robbie-engine)
//!     ↓ evaluated by
//! EpisodeRunner (robbie-policy) on Grid (robbie-engine)
//! ```
//!
//! # Determinism
//!
//! No random generator is shared between threads. Each evaluation task and each
//! breeding step derives its own generator from the configured master
//! [`Seed`](robbie_engine::Seed) and its `(generation, agent)` coordinates, so
//! the same seed and configuration always produce the same genomes, counters
//! and reports.
//!
//! # Example
//!
//! ```rust,no_run
//! use robbie_policy::breeder::BreederKind;
//! use robbie_training::{
//!     config::EvolutionConfig, evolution::Evolution, statistics::EvolutionHistory,
//! };
//!
//! let config = EvolutionConfig::default();
//! config.validate().unwrap();
//!
//! let evolution = Evolution::new(config, BreederKind::Genome.breeder());
//! let mut history = EvolutionHistory::new();
//! let alpha = evolution.run(&mut history);
//! println!("best score: {}", alpha.score());
//! ```
//!
//! # Current Limitations
//!
//! - **Truncation selection only**: parents are simply the top `parents`
//!   agents; there is no tournament or fitness-proportional selection
//! - **No elitism**: every agent of the next generation is freshly bred, so the
//!   best policy can be lost between generations
//! - **No persistence**: populations live only for the duration of a run

pub mod agent;
pub mod config;
pub mod evolution;
pub mod population;
pub mod statistics;
