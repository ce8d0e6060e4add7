//! Caller-side persistence of completed runs.

mod error;
mod json_store;
mod leaderboard;
mod memory;

use crate::result::BenchmarkRun;

pub use error::StoreError;
pub use json_store::JsonHistoryStore;
pub use leaderboard::{compute_model_stats, ModelStats};
pub use memory::MemoryHistoryStore;

/// Key the benchmark history is stored under by default.
pub const DEFAULT_HISTORY_KEY: &str = "cw_benchmark_runs";
/// Number of runs kept per key by default.
pub const DEFAULT_MAX_RUNS: usize = 200;

/// A keyed, size-bounded list of runs, most recent first.
pub trait HistoryStore {
    /// Runs stored under `key`, newest first. Missing or unreadable history is
    /// empty.
    fn load(&self, key: &str) -> Vec<BenchmarkRun>;

    /// Prepends `run`, dropping the oldest entries beyond the store's limit.
    /// Returns the number of runs now stored.
    fn append(&mut self, key: &str, run: BenchmarkRun) -> Result<usize, StoreError>;

    /// Removes every run stored under `key`.
    fn clear(&mut self, key: &str) -> Result<(), StoreError>;
}

fn prepend_bounded(mut runs: Vec<BenchmarkRun>, run: BenchmarkRun, max_runs: usize) -> Vec<BenchmarkRun> {
    runs.insert(0, run);
    runs.truncate(max_runs.max(1));
    runs
}
