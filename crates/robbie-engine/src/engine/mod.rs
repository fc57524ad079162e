//! Stateful simulation pieces.
//!
//! - [`Grid`] - One walled episode environment with the agent's position
//! - [`GridConfig`] - Interior size and rubbish density used to build grids
//! - [`AgentStats`] - Cumulative per-agent counters across episodes
//! - [`ScoringConfig`] - Reward and penalty magnitudes for each outcome
//! - [`Seed`] - 128-bit seed with deterministic derivation of child streams
//!
//! # Episode Flow
//!
//! 1. Build a fresh [`Grid`] from a [`GridConfig`] and an RNG
//! 2. Record the initial [`Grid::remaining_rubbish`] as "seen"
//! 3. Each turn: [`Grid::observe`], decide a move, apply it with
//!    [`Grid::attempt_move`], [`Grid::attempt_random_move`] or
//!    [`Grid::attempt_pick_up`]
//! 4. Route each outcome into the matching [`AgentStats`] method
//! 5. Record the final [`Grid::remaining_rubbish`] as "missed"

pub use self::{agent_stats::*, grid::*, seed::*};

mod agent_stats;
mod grid;
mod seed;
