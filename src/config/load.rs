use std::fs;
use std::path::Path;

use super::error::ConfigError;
use super::paths::ConfigPaths;
use super::types::BenchConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: BenchConfig,
    pub paths: ConfigPaths,
    pub config_exists: bool,
}

/// Loads the TOML config file (or defaults when absent) and overlays
/// process environment variables on top of it.
pub fn load_config(path_override: Option<std::path::PathBuf>) -> Result<LoadedConfig, ConfigError> {
    let paths = ConfigPaths::resolve(path_override)?;
    load_config_at(paths)
}

pub fn load_config_at(paths: ConfigPaths) -> Result<LoadedConfig, ConfigError> {
    load_with_env(paths, |name| std::env::var(name).ok())
}

fn load_with_env<F>(paths: ConfigPaths, env: F) -> Result<LoadedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    ensure_dirs(&paths)?;
    let read = read_config(&paths.config_file)?;
    secure_file_permissions(&paths.config_file)?;
    let config = read.config.with_env(env);
    log::debug!(
        "loaded config from {} (exists: {})",
        paths.config_file.display(),
        read.exists
    );
    Ok(LoadedConfig {
        config,
        paths,
        config_exists: read.exists,
    })
}

fn read_config(path: &Path) -> Result<ConfigRead, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(ConfigRead {
            config: toml::from_str(&contents)?,
            exists: true,
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ConfigRead {
            config: BenchConfig::default(),
            exists: false,
        }),
        Err(err) => Err(ConfigError::Io(err)),
    }
}

struct ConfigRead {
    config: BenchConfig,
    exists: bool,
}

fn ensure_dirs(paths: &ConfigPaths) -> Result<(), ConfigError> {
    fs::create_dir_all(&paths.config_dir)?;
    fs::create_dir_all(&paths.data_dir)?;
    fs::create_dir_all(&paths.logs_dir)?;
    Ok(())
}

fn secure_file_permissions(path: &Path) -> Result<(), ConfigError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(path) {
            let mut perms = metadata.permissions();
            let mode = perms.mode() & 0o777;
            if mode & 0o077 != 0 {
                perms.set_mode(0o600);
                fs::set_permissions(path, perms)?;
            }
        }
    }
    Ok(())
}
