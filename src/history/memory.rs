use std::collections::HashMap;

use crate::result::BenchmarkRun;

use super::{prepend_bounded, HistoryStore, StoreError, DEFAULT_MAX_RUNS};

/// History kept in process memory.
#[derive(Debug, Clone)]
pub struct MemoryHistoryStore {
    runs: HashMap<String, Vec<BenchmarkRun>>,
    max_runs: usize,
}

impl Default for MemoryHistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RUNS)
    }
}

impl MemoryHistoryStore {
    pub fn new(max_runs: usize) -> Self {
        Self {
            runs: HashMap::new(),
            max_runs,
        }
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self, key: &str) -> Vec<BenchmarkRun> {
        self.runs.get(key).cloned().unwrap_or_default()
    }

    fn append(&mut self, key: &str, run: BenchmarkRun) -> Result<usize, StoreError> {
        let existing = self.runs.remove(key).unwrap_or_default();
        let next = prepend_bounded(existing, run, self.max_runs);
        let len = next.len();
        self.runs.insert(key.to_string(), next);
        Ok(len)
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        self.runs.remove(key);
        Ok(())
    }
}
