use std::io;

use clap::{Parser, Subcommand};
use robbie_engine::{GridConfig, ScoringConfig};
use tracing_subscriber::EnvFilter;

use self::{evaluate::EvaluateArg, train::TrainArg};

mod evaluate;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve a policy with the genetic algorithm
    Train(#[clap(flatten)] TrainArg),
    /// Play episodes with a saved model or the heuristic baseline
    Evaluate(#[clap(flatten)] EvaluateArg),
}

/// Grid, scoring and turn-budget flags shared by every mode.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EpisodeArg {
    /// The size of one side of the square grid (not including walls)
    #[arg(long, default_value_t = 10)]
    grid_size: usize,
    /// The chance of any given cell being initialised with rubbish
    #[arg(long, default_value_t = 0.25)]
    chance_of_rubbish: f64,
    /// The reward for picking up rubbish
    #[arg(long, default_value_t = 10)]
    pick_up_reward: u32,
    /// The penalty for picking up rubbish where there is none
    #[arg(long, default_value_t = 5)]
    pick_up_penalty: u32,
    /// The penalty for bumping into a wall
    #[arg(long, default_value_t = 1)]
    wall_bump_penalty: u32,
    /// The number of moves in a game
    #[arg(long, default_value_t = 500)]
    max_moves: usize,
}

impl EpisodeArg {
    fn grid(&self) -> GridConfig {
        GridConfig {
            size: self.grid_size,
            rubbish_probability: self.chance_of_rubbish,
        }
    }

    fn scoring(&self) -> ScoringConfig {
        ScoringConfig {
            pick_up_reward: self.pick_up_reward,
            pick_up_penalty: self.pick_up_penalty,
            bump_penalty: self.wall_bump_penalty,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
    }
    Ok(())
}
