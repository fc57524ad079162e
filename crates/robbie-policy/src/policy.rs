//! The decision-making capability shared by evolved and hand-written agents.

use std::fmt;

use rand::RngCore;
use robbie_engine::{Move, Observation};

use crate::genome::Genome;

/// Chooses the next move from what the agent currently senses.
///
/// Implementations must be cheap to call; a single evaluation makes one call
/// per turn, for every turn of every episode.
///
/// The random generator is supplied by the caller so that each evaluation task
/// can own its own deterministic stream.
pub trait Policy: fmt::Debug + Send + Sync {
    /// Short identifier of the policy kind.
    fn name(&self) -> &str;

    /// Returns the move to play for `observation`.
    #[must_use]
    fn decide(&self, observation: Observation, rng: &mut dyn RngCore) -> Move;

    /// The lookup table backing this policy, if it has one.
    ///
    /// Breeders use this to read parents' genes and reporting uses it to build
    /// gene-usage histograms.
    fn genome(&self) -> Option<&Genome> {
        None
    }

    fn clone_boxed(&self) -> BoxedPolicy;
}

pub type BoxedPolicy = Box<dyn Policy>;

impl Clone for BoxedPolicy {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl Policy for BoxedPolicy {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn decide(&self, observation: Observation, rng: &mut dyn RngCore) -> Move {
        self.as_ref().decide(observation, rng)
    }

    fn genome(&self) -> Option<&Genome> {
        self.as_ref().genome()
    }

    fn clone_boxed(&self) -> BoxedPolicy {
        self.as_ref().clone_boxed()
    }
}

/// A policy that always answers with the same move.
///
/// Useful as a probe: an agent that only ever picks up rubbish, or only ever
/// walks left, has fully predictable counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPolicy(pub Move);

impl Policy for FixedPolicy {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn decide(&self, _observation: Observation, _rng: &mut dyn RngCore) -> Move {
        self.0
    }

    fn clone_boxed(&self) -> BoxedPolicy {
        Box::new(*self)
    }
}
