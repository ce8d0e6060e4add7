use serde::Deserialize;

use crate::orchestrator::RetryPolicy;

use super::{DEFAULT_GENERATION_TEMPERATURE, DEFAULT_JUDGE_MODEL};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BenchSettings {
    /// Judge used when the caller does not name one.
    pub judge_model: String,
    pub generation_temperature: f32,
    /// Deadline for each generate or judge call; expiry counts as a failure.
    pub call_timeout_seconds: Option<u64>,
    pub retry: RetryPolicy,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            judge_model: DEFAULT_JUDGE_MODEL.to_string(),
            generation_temperature: DEFAULT_GENERATION_TEMPERATURE,
            call_timeout_seconds: None,
            retry: RetryPolicy::default(),
        }
    }
}
