//! Policies that drive the agent, the breeders that create them, and the
//! episode runner that lets a policy play on a grid.
//!
//! # Architecture
//!
//! ```text
//! Breeder (genome | heuristic)
//!     ↓ spawns
//! Policy (Genome lookup table | HeuristicPolicy)
//!     ↓ decides moves for
//! EpisodeRunner
//!     ↓ plays on a fresh Grid (robbie-engine) and records into
//! AgentStats
//! ```
//!
//! - [`policy`] - The [`Policy`](policy::Policy) capability: observation in, move out
//! - [`genome`] - The evolved 243-slot lookup table and its gene-usage histogram
//! - [`heuristic`] - A fixed greedy baseline policy
//! - [`breeder`] - The [`Breeder`](breeder::Breeder) capability and its two implementations
//! - [`episode`] - Bounded playthroughs that route grid outcomes into counters

pub mod breeder;
pub mod episode;
pub mod genome;
pub mod heuristic;
pub mod policy;
