use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use chrono::Utc;
use robbie_engine::Seed;
use robbie_policy::breeder::BreederKind;
use robbie_training::{config::EvolutionConfig, evolution::Evolution, statistics::EvolutionHistory};
use tracing::info;

use super::EpisodeArg;
use crate::{
    model::{genome_model::GenomeModel, run_report::RunReport},
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    #[clap(flatten)]
    episode: EpisodeArg,
    /// The chance of a gene mutating when breeding
    #[arg(long, default_value_t = 0.01)]
    chance_of_mutation: f64,
    /// The number of agents in each generation
    #[arg(long, default_value_t = 200)]
    generation_size: usize,
    /// The number of top agents that parent the next generation
    #[arg(long, default_value_t = 2)]
    parents: usize,
    /// The number of generations to run
    #[arg(long, default_value_t = 500)]
    max_generations: usize,
    /// The number of games each agent plays per generation
    #[arg(long, default_value_t = 100)]
    max_games: usize,
    /// How child policies are produced
    #[arg(long, default_value = "genome")]
    breeder: BreederKind,
    /// Master seed as 32 hex digits; drawn at random when omitted
    #[arg(long)]
    seed: Option<Seed>,
    /// Stop an agent's evaluation after this many milliseconds
    #[arg(long)]
    task_timeout_ms: Option<u64>,
    /// Prefix for the files written at the end of the run
    #[arg(long, default_value = "chart")]
    output: PathBuf,
}

impl TrainArg {
    fn to_config(&self) -> EvolutionConfig {
        EvolutionConfig {
            grid: self.episode.grid(),
            scoring: self.episode.scoring(),
            moves_per_episode: self.episode.max_moves,
            games_per_agent: self.max_games,
            generations: self.max_generations,
            population_size: self.generation_size,
            parents: self.parents,
            mutation_rate: self.chance_of_mutation,
            seed: self.seed.unwrap_or_else(rand::random),
            task_timeout: self.task_timeout_ms.map(Duration::from_millis),
        }
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = arg.to_config();
    config.validate().context("Invalid training configuration")?;

    let breeder = arg.breeder.breeder();
    info!(
        seed = %config.seed,
        breeder = breeder.name(),
        generations = config.generations,
        population = config.population_size,
        "starting evolution"
    );

    let started_at = Utc::now();
    let start = Instant::now();
    let evolution = Evolution::new(config, breeder);
    let mut history = EvolutionHistory::new();
    let alpha = evolution.run(&mut history);
    let elapsed = start.elapsed();
    info!(took = ?elapsed, final_score = alpha.score(), "evolution finished");

    let report = RunReport {
        breeder: arg.breeder.to_string(),
        started_at,
        elapsed,
        config: evolution.config(),
        generations: history.reports(),
    };
    let report_path = util::prefixed_path(&arg.output, "-report.json");
    util::save_json(&report, Some(report_path.as_path()))?;
    info!(path = %report_path.display(), "wrote run report");

    if let Some(genome) = alpha.policy().genome() {
        let model = GenomeModel {
            name: format!("robbie-{}", config.seed),
            trained_at: Utc::now(),
            seed: config.seed,
            final_score: alpha.score(),
            genome: genome.clone(),
        };
        let model_path = util::prefixed_path(&arg.output, "-model.json");
        util::save_json(&model, Some(model_path.as_path()))?;
        info!(path = %model_path.display(), "wrote genome model");
    }

    Ok(())
}
