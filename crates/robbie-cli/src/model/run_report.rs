use std::time::Duration;

use chrono::{DateTime, Utc};
use robbie_training::{config::EvolutionConfig, statistics::GenerationReport};
use serde::Serialize;

/// Everything needed to chart or reproduce a training run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    pub breeder: String,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub config: &'a EvolutionConfig,
    pub generations: &'a [GenerationReport],
}
