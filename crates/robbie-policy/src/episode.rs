//! Bounded playthroughs of one policy on one grid.
//!
//! An episode is the unit of evaluation: a fresh [`Grid`] is built, the policy
//! plays a fixed number of turns, and every outcome is routed into the agent's
//! [`AgentStats`]:
//!
//! | Move                 | Grid result | Counter                     |
//! |----------------------|-------------|-----------------------------|
//! | do nothing           | -           | none                        |
//! | step / random step   | blocked     | [`AgentStats::penalize_bump`] |
//! | pick up rubbish      | success     | [`AgentStats::reward`]        |
//! | pick up rubbish      | failure     | [`AgentStats::penalize_false_pick_up`] |
//!
//! The rubbish count before the first turn is added to "seen" and the count
//! after the last turn to "missed".
//!
//! An optional deadline is polled every [`DEADLINE_CHECK_INTERVAL`] turns. An
//! episode that runs past it stops early; its counters so far are kept and the
//! rubbish still on the grid is counted as missed.

use std::time::Instant;

use rand::RngCore;
use robbie_engine::{AgentStats, Grid, GridConfig, Move, ScoringConfig};

use crate::policy::Policy;

/// Number of turns played between two deadline checks.
pub const DEADLINE_CHECK_INTERVAL: usize = 1024;

/// Plays episodes with one fixed grid shape, scoring and turn budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeRunner {
    grid: GridConfig,
    scoring: ScoringConfig,
    moves_per_episode: usize,
}

impl EpisodeRunner {
    #[must_use]
    pub const fn new(grid: GridConfig, scoring: ScoringConfig, moves_per_episode: usize) -> Self {
        Self {
            grid,
            scoring,
            moves_per_episode,
        }
    }

    #[must_use]
    pub const fn moves_per_episode(&self) -> usize {
        self.moves_per_episode
    }

    /// Plays one episode on a freshly generated grid.
    ///
    /// Returns `false` if `deadline` passed before the turn budget was used up.
    pub fn play<P>(
        &self,
        policy: &P,
        stats: &mut AgentStats,
        deadline: Option<Instant>,
        rng: &mut dyn RngCore,
    ) -> bool
    where
        P: Policy + ?Sized,
    {
        let mut grid = Grid::new(&self.grid, rng);
        self.play_on(&mut grid, policy, stats, deadline, rng)
    }

    /// Plays one episode on an existing grid.
    ///
    /// The grid is left in its final state so callers can inspect it. Returns
    /// `false` if `deadline` passed before the turn budget was used up.
    pub fn play_on<P>(
        &self,
        grid: &mut Grid,
        policy: &P,
        stats: &mut AgentStats,
        deadline: Option<Instant>,
        rng: &mut dyn RngCore,
    ) -> bool
    where
        P: Policy + ?Sized,
    {
        stats.accumulate_seen(grid.remaining_rubbish());
        let mut completed = true;
        for turn in 0..self.moves_per_episode {
            if turn % DEADLINE_CHECK_INTERVAL == 0
                && deadline.is_some_and(|deadline| Instant::now() >= deadline)
            {
                completed = false;
                break;
            }
            let mv = policy.decide(grid.observe(), rng);
            self.apply(grid, mv, stats, rng);
        }
        stats.accumulate_missed(grid.remaining_rubbish());
        completed
    }

    /// Applies a single move and records its outcome.
    pub fn apply(
        &self,
        grid: &mut Grid,
        mv: Move,
        stats: &mut AgentStats,
        rng: &mut dyn RngCore,
    ) {
        let moved = match mv {
            Move::DoNothing => return,
            Move::PickUpRubbish => {
                if grid.attempt_pick_up() {
                    stats.reward(self.scoring.pick_up_reward);
                } else {
                    stats.penalize_false_pick_up(self.scoring.pick_up_penalty);
                }
                return;
            }
            Move::MoveRandom => grid.attempt_random_move(rng),
            Move::MoveUp | Move::MoveRight | Move::MoveDown | Move::MoveLeft => {
                let direction = mv.direction().expect("cardinal move has a direction");
                grid.attempt_move(direction)
            }
        };
        if !moved {
            stats.penalize_bump(self.scoring.bump_penalty);
        }
    }
}
