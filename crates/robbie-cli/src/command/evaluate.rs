use std::path::PathBuf;

use anyhow::Context as _;
use robbie_engine::Seed;
use robbie_policy::{heuristic::HeuristicPolicy, policy::BoxedPolicy};
use robbie_training::{agent::Agent, config::EvolutionConfig, statistics::AgentSnapshot};
use serde::Serialize;
use tracing::info;

use super::EpisodeArg;
use crate::{model::genome_model::GenomeModel, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    #[clap(flatten)]
    episode: EpisodeArg,
    /// Genome model written by `train`; the heuristic policy plays when omitted
    #[arg(long)]
    model: Option<PathBuf>,
    /// The number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,
    /// Seed as 32 hex digits; drawn at random when omitted
    #[arg(long)]
    seed: Option<Seed>,
    /// Where to write the JSON summary (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EvaluationSummary {
    policy: String,
    seed: Seed,
    games: usize,
    mean_score: f64,
    totals: AgentSnapshot,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let config = EvolutionConfig {
        grid: arg.episode.grid(),
        scoring: arg.episode.scoring(),
        moves_per_episode: arg.episode.max_moves,
        games_per_agent: arg.games,
        seed: arg.seed.unwrap_or_else(rand::random),
        ..EvolutionConfig::default()
    };
    config.validate().context("Invalid evaluation configuration")?;

    let policy: BoxedPolicy = match &arg.model {
        Some(path) => {
            let model = GenomeModel::open(path)?;
            info!(name = %model.name, trained_at = %model.trained_at, "loaded genome model");
            Box::new(model.genome)
        }
        None => Box::new(HeuristicPolicy),
    };

    let mut agent = Agent::new(policy);
    let runner = config.episode_runner();
    let mut rng = config.seed.rng();
    let played = agent.evaluate(&runner, config.games_per_agent, None, &mut rng);
    #[expect(clippy::cast_precision_loss)]
    let mean_score = agent.score() as f64 / played as f64;
    info!(policy = agent.policy().name(), games = played, mean_score, "evaluation finished");

    let summary = EvaluationSummary {
        policy: agent.policy().name().to_owned(),
        seed: config.seed,
        games: played,
        mean_score,
        totals: AgentSnapshot::of(&agent),
    };
    util::save_json(&summary, arg.output.as_deref())
}
