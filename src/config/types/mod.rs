mod app;
mod backend;
mod bench;
mod catalog;
mod logging;
mod storage;

use crate::history::{DEFAULT_HISTORY_KEY, DEFAULT_MAX_RUNS};
use crate::invoker::DEFAULT_GENERATION_TEMPERATURE;

const DEFAULT_JUDGE_MODEL: &str = "openai/gpt-4o-mini";
const DEFAULT_CATALOG_PATH: &str = "litellm-config.yaml";
const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

pub use app::BenchConfig;
pub use backend::{BackendConfig, BackendSettings};
pub use bench::BenchSettings;
pub use catalog::CatalogConfig;
pub use logging::LoggingConfig;
pub use storage::StorageConfig;
