mod error;
mod load;
mod paths;
mod types;

pub use error::ConfigError;
pub use load::{load_config, load_config_at, LoadedConfig};
pub use paths::ConfigPaths;
pub use types::{
    BackendConfig, BackendSettings, BenchConfig, BenchSettings, CatalogConfig, LoggingConfig,
    StorageConfig,
};
