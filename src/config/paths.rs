use std::path::{Path, PathBuf};

use super::error::ConfigError;

const APP_DIR: &str = "cwbench";
const CONFIG_FILE: &str = "config.toml";

/// Filesystem locations used by the benchmark: the config file plus the data
/// directory holding run history and logs.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl ConfigPaths {
    /// `~/.config/cwbench/config.toml` and `~/.local/share/cwbench`, or the
    /// given config file with the default data directory.
    pub fn resolve(config_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::MissingHome)?;
        let data_dir = home.join(".local").join("share").join(APP_DIR);
        let config_file = match config_override {
            Some(path) => path,
            None => home.join(".config").join(APP_DIR).join(CONFIG_FILE),
        };
        Ok(Self::with_data_dir(config_file, data_dir))
    }

    /// Everything under a single root, e.g. a temporary directory.
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self::with_data_dir(root.join(CONFIG_FILE), root.join("data"))
    }

    fn with_data_dir(config_file: PathBuf, data_dir: PathBuf) -> Self {
        let config_dir = config_file
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            config_file,
            config_dir,
            logs_dir: data_dir.join("logs"),
            data_dir,
        }
    }

    /// Directory holding saved benchmark runs.
    pub fn history_dir(&self) -> PathBuf {
        self.data_dir.join("history")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_override_uses_current_directory() {
        let paths = ConfigPaths::with_data_dir(PathBuf::from("bench.toml"), PathBuf::from("/d"));
        assert_eq!(paths.config_dir, PathBuf::from("."));
        assert_eq!(paths.logs_dir, PathBuf::from("/d/logs"));
        assert_eq!(paths.history_dir(), PathBuf::from("/d/history"));
    }

    #[test]
    fn under_keeps_everything_in_root() {
        let paths = ConfigPaths::under("/tmp/bench");
        assert_eq!(paths.config_file, PathBuf::from("/tmp/bench/config.toml"));
        assert_eq!(paths.config_dir, PathBuf::from("/tmp/bench"));
        assert_eq!(paths.data_dir, PathBuf::from("/tmp/bench/data"));
    }
}
