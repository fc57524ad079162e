//! Simulation environment for the rubbish-collecting agent.
//!
//! - [`core`] holds the value types shared by every layer: cell states, moves,
//!   directions and the five-cell observation an agent senses.
//! - [`engine`] holds the stateful pieces: the walled [`Grid`] an episode is
//!   played on, the cumulative [`AgentStats`] counters, the [`ScoringConfig`]
//!   that prices each outcome, and the [`Seed`] used to derive reproducible
//!   random streams.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
