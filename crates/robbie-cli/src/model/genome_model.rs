use std::path::Path;

use chrono::{DateTime, Utc};
use robbie_engine::Seed;
use robbie_policy::genome::Genome;
use serde::{Deserialize, Serialize};

use crate::util;

/// A trained lookup-table policy saved by `train` and loaded by `evaluate`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenomeModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub seed: Seed,
    pub final_score: i64,
    pub genome: Genome,
}

impl GenomeModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        util::read_json_file("genome model", path)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_model_survives_json() {
        let mut rng = Pcg32::seed_from_u64(5);
        let model = GenomeModel {
            name: "robbie".to_owned(),
            trained_at: Utc::now(),
            seed: Seed::from_u64(5),
            final_score: 40_123,
            genome: Genome::random(&mut rng),
        };
        let json = serde_json::to_string(&model).unwrap();
        let loaded: GenomeModel = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.genome, model.genome);
        assert_eq!(loaded.seed, model.seed);
        assert_eq!(loaded.final_score, model.final_score);
    }
}
