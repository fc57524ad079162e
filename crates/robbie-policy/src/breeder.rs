//! Strategies for creating new policies from zero or more parents.
//!
//! A population holds one shared [`Breeder`]. Founding populations call
//! [`Breeder::spawn`] with no parents and zero mutation; later populations pass
//! the top-ranked policies of the previous generation as parents.

use std::{fmt, sync::Arc};

use rand::RngCore;

use crate::{
    genome::Genome,
    heuristic::HeuristicPolicy,
    policy::{BoxedPolicy, Policy},
};

pub trait Breeder: fmt::Debug + Send + Sync {
    /// Short identifier reported alongside results.
    fn name(&self) -> &str;

    /// Creates a new policy.
    ///
    /// # Arguments
    ///
    /// * `mutation_rate` - Per-gene mutation probability in `[0, 1]`
    /// * `parents` - Policies to inherit from (empty for founding)
    /// * `rng` - Random number generator
    fn spawn(
        &self,
        mutation_rate: f64,
        parents: &[&dyn Policy],
        rng: &mut dyn RngCore,
    ) -> BoxedPolicy;
}

pub type SharedBreeder = Arc<dyn Breeder>;

/// Breeds [`Genome`] lookup tables by uniform crossover and per-slot mutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenomeBreeder;

impl Breeder for GenomeBreeder {
    fn name(&self) -> &'static str {
        "genome"
    }

    /// # Panics
    ///
    /// Panics if a parent is not backed by a genome; a population never mixes
    /// breeders, so this only happens through misuse.
    fn spawn(
        &self,
        mutation_rate: f64,
        parents: &[&dyn Policy],
        rng: &mut dyn RngCore,
    ) -> BoxedPolicy {
        let genomes = parents
            .iter()
            .map(|parent| {
                parent
                    .genome()
                    .expect("genome breeder requires genome-backed parents")
            })
            .collect::<Vec<_>>();
        Box::new(Genome::breed(mutation_rate, &genomes, rng))
    }
}

/// Produces the fixed [`HeuristicPolicy`], ignoring parents and mutation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicBreeder;

impl Breeder for HeuristicBreeder {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn spawn(
        &self,
        _mutation_rate: f64,
        _parents: &[&dyn Policy],
        _rng: &mut dyn RngCore,
    ) -> BoxedPolicy {
        Box::new(HeuristicPolicy::new())
    }
}

/// Breeder selectable by name.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display,
)]
pub enum BreederKind {
    #[default]
    #[display("genome")]
    Genome,
    #[display("heuristic")]
    Heuristic,
}

impl BreederKind {
    #[must_use]
    pub fn breeder(self) -> SharedBreeder {
        match self {
            BreederKind::Genome => Arc::new(GenomeBreeder),
            BreederKind::Heuristic => Arc::new(HeuristicBreeder),
        }
    }
}
