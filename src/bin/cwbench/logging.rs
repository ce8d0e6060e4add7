use std::path::{Path, PathBuf};

use anyhow::bail;
use cwbench::config::{ConfigPaths, LoggingConfig};
use flexi_logger::{
    detailed_format, Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming,
};

const DEFAULT_LOG_NAME: &str = "cwbench";

/// Starts file logging with rotation; warnings about degraded models are also
/// echoed to stderr so they show up next to the results table.
pub fn init_logging(config: &LoggingConfig, paths: &ConfigPaths) -> anyhow::Result<LoggerHandle> {
    let (directory, basename) = log_location(config.path.as_deref(), &paths.logs_dir);
    let handle = Logger::try_with_env_or_str(&config.level)?
        .log_to_file(FileSpec::default().directory(directory).basename(basename))
        .format_for_files(detailed_format)
        .duplicate_to_stderr(stderr_duplicate(&config.stderr_level)?)
        .rotate(
            Criterion::Size(config.rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.rotate_keep),
        )
        .start()?;
    Ok(handle)
}

/// Directory and file stem of the log; a bare file name lands in `logs_dir`.
fn log_location(path: Option<&str>, logs_dir: &Path) -> (PathBuf, String) {
    let Some(path) = path.map(Path::new) else {
        return (logs_dir.to_path_buf(), DEFAULT_LOG_NAME.to_string());
    };
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| logs_dir.to_path_buf());
    let basename = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_LOG_NAME);
    (directory, basename.to_string())
}

fn stderr_duplicate(level: &str) -> anyhow::Result<Duplicate> {
    Ok(match level.trim().to_ascii_lowercase().as_str() {
        "off" | "none" => Duplicate::None,
        "error" => Duplicate::Error,
        "warn" | "warning" => Duplicate::Warn,
        "info" => Duplicate::Info,
        "debug" => Duplicate::Debug,
        "trace" => Duplicate::Trace,
        "all" => Duplicate::All,
        other => bail!("unknown logging.stderr_level {other:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_file_lives_in_logs_dir() {
        let (dir, name) = log_location(None, Path::new("/data/logs"));
        assert_eq!(dir, PathBuf::from("/data/logs"));
        assert_eq!(name, "cwbench");
    }

    #[test]
    fn configured_path_sets_directory_and_basename() {
        let (dir, name) = log_location(Some("/var/log/bench/runs.log"), Path::new("/data/logs"));
        assert_eq!(dir, PathBuf::from("/var/log/bench"));
        assert_eq!(name, "runs");
        let (dir, name) = log_location(Some("runs.log"), Path::new("/data/logs"));
        assert_eq!(dir, PathBuf::from("/data/logs"));
        assert_eq!(name, "runs");
    }

    #[test]
    fn stderr_levels_parse() {
        assert!(matches!(stderr_duplicate("warn").unwrap(), Duplicate::Warn));
        assert!(matches!(stderr_duplicate(" OFF ").unwrap(), Duplicate::None));
        assert!(stderr_duplicate("loud").is_err());
    }
}
