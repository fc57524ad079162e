//! The evolved lookup table.
//!
//! A [`Genome`] assigns one [`Move`] to each of the 243 possible observations.
//! Playing a genome is a single array lookup at [`Observation::index`]; all the
//! intelligence is in which moves evolution left in which slots.
//!
//! # Genetic Operators
//!
//! - **Founding** ([`Genome::random`]) - every slot drawn uniformly from the 7 moves
//! - **Breeding** ([`Genome::breed`]) - per slot, with probability `mutation_rate`
//!   draw a fresh random move, otherwise copy that slot from a parent chosen
//!   uniformly at random (uniform multi-parent crossover)
//!
//! Genomes are never edited in place once created; breeding always produces a
//! whole new table.
//!
//! # Text Form
//!
//! A genome is written as 243 digits, slot order, each digit the move ordinal
//! (`'0'` = do nothing … `'6'` = pick up rubbish). This is the format used by
//! saved models.

use std::{fmt, str::FromStr};

use rand::{Rng, RngCore, seq::IndexedRandom as _};
use robbie_engine::{Move, Observation};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::policy::{BoxedPolicy, Policy};

/// Number of slots in a genome (one per observation, 3^5 = 243).
pub const GENOME_LEN: usize = Observation::COUNT;

/// A complete move table indexed by encoded observation.
#[derive(Clone, PartialEq, Eq)]
pub struct Genome([Move; GENOME_LEN]);

/// Error returned when reading a genome from its text form fails.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenomeParseError {
    #[display("genome must have {GENOME_LEN} slots, got {_0}")]
    Length(#[error(not(source))] usize),
    #[display("invalid move {character:?} at slot {slot}")]
    Move { slot: usize, character: char },
}

impl Genome {
    /// Creates a founding genome with every slot drawn uniformly at random.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self(std::array::from_fn(|_| rng.random()))
    }

    /// Breeds a child genome from any number of parents.
    ///
    /// Each slot independently mutates with probability `mutation_rate` or is
    /// copied from a parent chosen uniformly at random. With no parents this is
    /// exactly [`Self::random`].
    ///
    /// # Arguments
    ///
    /// * `mutation_rate` - Per-slot mutation probability in `[0, 1]`
    /// * `parents` - Genomes to inherit from (may be empty)
    /// * `rng` - Random number generator
    pub fn breed<R>(mutation_rate: f64, parents: &[&Genome], rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        if parents.is_empty() {
            return Self::random(rng);
        }
        Self(std::array::from_fn(|slot| {
            if rng.random_bool(mutation_rate) {
                rng.random()
            } else {
                let parent = parents
                    .choose(rng)
                    .expect("parent list checked to be non-empty");
                parent.0[slot]
            }
        }))
    }

    /// Builds a genome by asking `f` for the move of every observation.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Observation) -> Move,
    {
        Self(std::array::from_fn(|slot| f(Observation::from_index(slot))))
    }

    /// Returns the move stored for `observation`.
    #[must_use]
    pub fn lookup(&self, observation: Observation) -> Move {
        self.0[observation.index()]
    }

    /// All slots in observation-index order.
    #[must_use]
    pub fn slots(&self) -> &[Move; GENOME_LEN] {
        &self.0
    }

    /// Counts how many slots hold each move kind.
    #[must_use]
    pub fn gene_usage(&self) -> GeneUsage {
        let mut counts = [0; Move::LEN];
        for mv in &self.0 {
            counts[mv.ordinal()] += 1;
        }
        GeneUsage(counts)
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|mv| write!(f, "{}", mv.as_char()))
    }
}

impl fmt::Debug for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Genome").field(&self.to_string()).finish()
    }
}

impl FromStr for Genome {
    type Err = GenomeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.chars().count();
        if count != GENOME_LEN {
            return Err(GenomeParseError::Length(count));
        }
        let mut slots = [Move::DoNothing; GENOME_LEN];
        for (slot, (dst, character)) in slots.iter_mut().zip(s.chars()).enumerate() {
            *dst = Move::from_char(character)
                .ok_or(GenomeParseError::Move { slot, character })?;
        }
        Ok(Self(slots))
    }
}

impl Serialize for Genome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Genome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Policy for Genome {
    fn name(&self) -> &'static str {
        "genome"
    }

    fn decide(&self, observation: Observation, _rng: &mut dyn RngCore) -> Move {
        self.lookup(observation)
    }

    fn genome(&self) -> Option<&Genome> {
        Some(self)
    }

    fn clone_boxed(&self) -> BoxedPolicy {
        Box::new(self.clone())
    }
}

/// Number of genome slots holding each move kind.
///
/// Indexed by [`Move::ordinal`], so iteration order is always the move order
/// `do-nothing, move-up, move-right, move-down, move-left, move-random,
/// pick-up-rubbish`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneUsage([u32; Move::LEN]);

impl GeneUsage {
    #[must_use]
    pub fn count(&self, mv: Move) -> u32 {
        self.0[mv.ordinal()]
    }

    /// Iterates over `(move, count)` pairs in move order.
    pub fn iter(&self) -> impl Iterator<Item = (Move, u32)> + '_ {
        Move::ALL.into_iter().zip(self.0.iter().copied())
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;
    use robbie_engine::Cell;

    use super::*;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    /// Counts move kinds over many genomes and checks each is near 1/7.
    fn assert_uniform_moves<'a>(genomes: impl Iterator<Item = &'a Genome>) {
        let mut counts = [0_u32; Move::LEN];
        let mut total = 0_u32;
        for genome in genomes {
            for (mv, count) in genome.gene_usage().iter() {
                counts[mv.ordinal()] += count;
                total += count;
            }
        }
        let expected = f64::from(total) / 7.0;
        for (ordinal, count) in counts.iter().enumerate() {
            let deviation = (f64::from(*count) - expected).abs() / expected;
            assert!(
                deviation < 0.05,
                "move {ordinal}: {count} vs expected {expected:.0}"
            );
        }
    }

    #[test]
    fn test_founding_genome_length() {
        let genome = Genome::random(&mut rng(0));
        assert_eq!(genome.slots().len(), 243);
        assert_eq!(genome.gene_usage().total(), 243);
    }

    #[test]
    fn test_founding_moves_are_uniform() {
        let mut rng = rng(1);
        let genomes: Vec<_> = (0..400).map(|_| Genome::random(&mut rng)).collect();
        assert_uniform_moves(genomes.iter());
    }

    #[test]
    fn test_breed_without_mutation_copies_single_parent() {
        let mut rng = rng(2);
        let parent = Genome::random(&mut rng);
        let child = Genome::breed(0.0, &[&parent], &mut rng);
        assert_eq!(child, parent);
    }

    #[test]
    fn test_breed_with_full_mutation_ignores_parents() {
        let mut rng = rng(3);
        let parent = Genome::from_fn(|_| Move::PickUpRubbish);
        let children: Vec<_> = (0..400)
            .map(|_| Genome::breed(1.0, &[&parent, &parent], &mut rng))
            .collect();
        assert_uniform_moves(children.iter());
    }

    #[test]
    fn test_breed_without_parents_is_founding() {
        let parentless = Genome::breed(0.5, &[], &mut rng(4));
        let founding = Genome::random(&mut rng(4));
        assert_eq!(parentless, founding);
    }

    #[test]
    fn test_breed_takes_each_slot_from_some_parent() {
        let mut rng = rng(5);
        let up = Genome::from_fn(|_| Move::MoveUp);
        let down = Genome::from_fn(|_| Move::MoveDown);
        let child = Genome::breed(0.0, &[&up, &down], &mut rng);
        let usage = child.gene_usage();
        assert_eq!(usage.count(Move::MoveUp) + usage.count(Move::MoveDown), 243);
        assert!(usage.count(Move::MoveUp) > 80);
        assert!(usage.count(Move::MoveDown) > 80);
    }

    #[test]
    fn test_decide_reads_encoded_slot() {
        let genome = Genome::from_fn(|obs| {
            if obs.current == Cell::Rubbish {
                Move::PickUpRubbish
            } else {
                Move::MoveRandom
            }
        });
        let mut rng = rng(6);
        for obs in Observation::all() {
            let expected = if obs.current == Cell::Rubbish {
                Move::PickUpRubbish
            } else {
                Move::MoveRandom
            };
            assert_eq!(genome.decide(obs, &mut rng), expected);
        }
    }

    #[test]
    fn test_text_form_roundtrip() {
        let genome = Genome::random(&mut rng(7));
        let text = genome.to_string();
        assert_eq!(text.len(), 243);
        assert!(text.chars().all(|c| ('0'..='6').contains(&c)));
        assert_eq!(text.parse::<Genome>().unwrap(), genome);

        let json = serde_json::to_string(&genome).unwrap();
        assert_eq!(serde_json::from_str::<Genome>(&json).unwrap(), genome);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("0123".parse::<Genome>(), Err(GenomeParseError::Length(4)));
        let mut text = "0".repeat(243);
        text.replace_range(10..11, "9");
        assert_eq!(
            text.parse::<Genome>(),
            Err(GenomeParseError::Move {
                slot: 10,
                character: '9'
            })
        );
    }

    #[test]
    fn test_gene_usage_order() {
        let genome = Genome::from_fn(|obs| Move::from_ordinal(obs.index() % 7));
        let usage = genome.gene_usage();
        let moves: Vec<_> = usage.iter().map(|(mv, _)| mv).collect();
        assert_eq!(moves, Move::ALL);
        // 243 = 7 * 34 + 5
        assert_eq!(usage.count(Move::DoNothing), 35);
        assert_eq!(usage.count(Move::PickUpRubbish), 34);
    }
}
