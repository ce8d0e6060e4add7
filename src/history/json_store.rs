use std::fs;
use std::path::{Path, PathBuf};

use crate::result::BenchmarkRun;

use super::{prepend_bounded, HistoryStore, StoreError, DEFAULT_MAX_RUNS};

/// History kept as one JSON array file per key inside a directory.
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    dir: PathBuf,
    max_runs: usize,
}

impl JsonHistoryStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            max_runs: DEFAULT_MAX_RUNS,
        }
    }

    /// Sets how many runs are kept per key.
    pub fn max_runs(mut self, max_runs: usize) -> Self {
        self.max_runs = max_runs;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn read(&self, path: &Path) -> Result<Vec<BenchmarkRun>, StoreError> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Existing runs for a write. A file that no longer parses is moved to
    /// `<key>.json.bak` so the next write cannot destroy it.
    fn read_for_update(&self, path: &Path) -> Result<Vec<BenchmarkRun>, StoreError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        match self.read(path) {
            Ok(runs) => Ok(runs),
            Err(StoreError::Serde(err)) => {
                let backup = path.with_extension("json.bak");
                log::warn!(
                    "history {} is malformed ({err}), moving it to {}",
                    path.display(),
                    backup.display()
                );
                fs::rename(path, &backup)?;
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }
}

impl HistoryStore for JsonHistoryStore {
    fn load(&self, key: &str) -> Vec<BenchmarkRun> {
        let Ok(path) = self.path_for(key) else {
            return Vec::new();
        };
        if !path.exists() {
            return Vec::new();
        }
        match self.read(&path) {
            Ok(runs) => runs,
            Err(err) => {
                log::warn!("ignoring unreadable history {}: {err}", path.display());
                Vec::new()
            }
        }
    }

    fn append(&mut self, key: &str, run: BenchmarkRun) -> Result<usize, StoreError> {
        let path = self.path_for(key)?;
        let next = prepend_bounded(self.read_for_update(&path)?, run, self.max_runs);
        fs::create_dir_all(&self.dir)?;
        let payload = serde_json::to_vec_pretty(&next)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        Ok(next.len())
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{BenchmarkResult, GenerationResult};
    use crate::score::ScoreSet;

    fn sample_run(prompt: &str) -> BenchmarkRun {
        let generation = GenerationResult {
            model: "openai/gpt-4o-mini".into(),
            output: "Rain fell.".into(),
            latency_ms: 812,
        };
        BenchmarkRun::new(
            prompt,
            "openai/gpt-4o-mini",
            vec!["openai/gpt-4o-mini".into()],
            vec![BenchmarkResult::judged(generation, ScoreSet::new(8, 7, 9, 8))],
        )
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonHistoryStore::new(dir.path().join("history"));
        let run = sample_run("Write two sentences about rain.");
        assert_eq!(store.append("cw_benchmark_runs", run.clone()).unwrap(), 1);

        let loaded = store.load("cw_benchmark_runs");
        assert_eq!(loaded, vec![run]);
    }

    #[test]
    fn keeps_latest_runs_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonHistoryStore::new(dir.path().to_path_buf()).max_runs(3);
        for i in 0..5 {
            store.append("runs", sample_run(&format!("p{i}"))).unwrap();
        }
        let prompts: Vec<String> = store.load("runs").into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts, ["p4", "p3", "p2"]);
    }

    #[test]
    fn malformed_file_loads_as_empty_and_is_kept_aside() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("runs.json"), "{not json").unwrap();
        let mut store = JsonHistoryStore::new(dir.path().to_path_buf());
        assert!(store.load("runs").is_empty());
        assert_eq!(store.append("runs", sample_run("fresh")).unwrap(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("runs.json.bak")).unwrap(),
            "{not json"
        );
    }

    #[test]
    fn append_preserves_history_that_no_longer_parses() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonHistoryStore::new(dir.path().to_path_buf());
        store.append("runs", sample_run("old")).unwrap();

        let path = dir.path().join("runs.json");
        let stored = fs::read_to_string(&path).unwrap();
        let corrupted = stored.replacen(
            "\"character_clarity\": 8",
            "\"character_clarity\": 7.5",
            1,
        );
        assert_ne!(stored, corrupted);
        fs::write(&path, &corrupted).unwrap();

        store.append("runs", sample_run("new")).unwrap();
        let backup = fs::read_to_string(dir.path().join("runs.json.bak")).unwrap();
        assert_eq!(backup, corrupted);
        let prompts: Vec<String> = store.load("runs").into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts, ["new"]);
    }

    #[test]
    fn clear_removes_history_and_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonHistoryStore::new(dir.path().to_path_buf());
        store.clear("runs").unwrap();
        store.append("runs", sample_run("p")).unwrap();
        store.clear("runs").unwrap();
        assert!(store.load("runs").is_empty());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonHistoryStore::new(dir.path().to_path_buf());
        assert!(matches!(
            store.append("../escape", sample_run("p")),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(store.load("").is_empty());
    }
}
