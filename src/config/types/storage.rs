use serde::Deserialize;

use super::{DEFAULT_HISTORY_KEY, DEFAULT_MAX_RUNS};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub history_dir: Option<String>,
    pub history_key: String,
    pub max_runs: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            history_dir: None,
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            max_runs: DEFAULT_MAX_RUNS,
        }
    }
}
