use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic simulation and breeding.
///
/// A run is driven by one master seed. Every concurrent evaluation task and
/// every breeding step gets its own child seed derived from the master seed
/// and its `(generation, index)` coordinates, so no random generator is ever
/// shared between threads and a run is reproducible regardless of scheduling.
///
/// Seeds are written as 32-character hex strings.
///
/// # Example
///
/// ```
/// use robbie_engine::Seed;
///
/// let master: Seed = "0123456789abcdef0123456789abcdef".parse().unwrap();
/// let a = master.for_evaluation(3, 17);
/// let b = master.for_evaluation(3, 17);
/// assert_eq!(a, b);
/// assert_ne!(a, master.for_evaluation(3, 18));
/// assert_eq!(master.to_string(), "0123456789abcdef0123456789abcdef");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed([u8; 16]);

/// Error returned when parsing a [`Seed`] from text fails.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex characters")]
pub struct SeedParseError {
    input: String,
}

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy)]
#[repr(u64)]
enum SeedStream {
    Evaluation = 1,
    Breeding = 2,
}

impl Seed {
    /// Creates a seed from its raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Expands a small integer into a seed, for tests and quick experiments.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Pcg32::seed_from_u64(value).random()
    }

    /// Creates the random generator this seed stands for.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }

    /// Seed for evaluating agent `agent` of generation `generation`.
    #[must_use]
    pub fn for_evaluation(self, generation: usize, agent: usize) -> Self {
        self.derive(SeedStream::Evaluation, generation, agent)
    }

    /// Seed for breeding the population of generation `generation`.
    #[must_use]
    pub fn for_breeding(self, generation: usize) -> Self {
        self.derive(SeedStream::Breeding, generation, 0)
    }

    fn derive(self, stream: SeedStream, generation: usize, index: usize) -> Self {
        let value = u128::from_be_bytes(self.0);
        #[expect(clippy::cast_possible_truncation)]
        let (hi, lo) = ((value >> 64) as u64, value as u64);
        let state = lo ^ (generation as u64).wrapping_mul(GOLDEN_GAMMA);
        let stream = hi ^ (index as u64) ^ ((stream as u64) << 56);
        Pcg32::new(state, stream).random()
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for Seed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || SeedParseError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(error());
        }
        let value = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(value.to_be_bytes()))
    }
}

impl Serialize for Seed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows drawing fresh seeds with `rng.random()`.
impl Distribution<Seed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Seed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        Seed(seed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_json_is_hex_string() {
        let seed = Seed::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
        let deserialized: Seed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        let inputs = [
            "",
            "0123",
            "ghijklmnopqrstuvwxyzghijklmnopqr",
            "0123456789abcdef0123456789abcdef0",
            "+fffffffffffffffffffffffffffffff",
            "-0000000000000000000000000000001",
        ];
        for input in inputs {
            let err = input.parse::<Seed>().unwrap_err();
            assert!(err.to_string().contains("invalid seed"), "{input}");
        }
    }

    #[test]
    fn test_text_form_roundtrip() {
        for input in [
            "00000000000000000000000000000000",
            "ffffffffffffffffffffffffffffffff",
            "0fffffffffffffffffffffffffffffff",
        ] {
            let seed: Seed = input.parse().unwrap();
            assert_eq!(seed.to_string(), input);
        }
    }

    #[test]
    fn test_derived_seeds_are_distinct() {
        let master = Seed::from_u64(42);
        let mut seen = HashSet::new();
        for generation in 0..20 {
            assert!(seen.insert(master.for_breeding(generation)));
            for agent in 0..50 {
                assert!(seen.insert(master.for_evaluation(generation, agent)));
            }
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = Seed::from_u64(1).rng();
        let mut b = Seed::from_u64(1).rng();
        for _ in 0..32 {
            assert_eq!(a.random::<u32>(), b.random::<u32>());
        }
    }
}
