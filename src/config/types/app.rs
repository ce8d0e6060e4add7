use secrecy::SecretString;
use serde::Deserialize;

use crate::error::BenchError;

use super::{
    BackendConfig, BackendSettings, BenchSettings, CatalogConfig, LoggingConfig, StorageConfig,
};

const ENV_BASE_URL: &str = "LITELLM_BASE_URL";
const ENV_API_KEY: &str = "LITELLM_MASTER_KEY";
const ENV_JUDGE_MODEL: &str = "JUDGE_MODEL";

/// Process-wide configuration, built once at start-up and handed to the
/// invoker and orchestrator constructors.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub backend: BackendConfig,
    pub bench: BenchSettings,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

impl BenchConfig {
    /// Overlays environment variables on top of file settings.
    ///
    /// `LITELLM_BASE_URL` and `LITELLM_MASTER_KEY` set the backend endpoint and
    /// credential, `JUDGE_MODEL` the default judge. Empty values are ignored.
    pub fn with_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.backend.base_url = Some(url);
        }
        if let Some(key) = lookup(ENV_API_KEY) {
            self.backend.api_key = Some(SecretString::new(key));
        }
        if self.backend.api_key.is_none() {
            if let Some(key) = self.backend.api_key_env.as_deref().and_then(|name| lookup(name)) {
                self.backend.api_key = Some(SecretString::new(key));
            }
        }
        if let Some(judge) = lookup(ENV_JUDGE_MODEL) {
            self.bench.judge_model = judge;
        }
        self
    }

    /// Resolves the backend endpoint and credential.
    ///
    /// Fails with [`BenchError::Configuration`] when either is missing, before
    /// any request can be attempted.
    pub fn backend_settings(&self) -> Result<BackendSettings, BenchError> {
        BackendSettings::resolve(&self.backend)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = BenchConfig::default();
        cfg.backend.base_url = Some("http://file".into());
        let cfg = cfg.with_env(env_of(&[
            ("LITELLM_BASE_URL", "http://env:4000"),
            ("LITELLM_MASTER_KEY", "sk-env"),
            ("JUDGE_MODEL", "anthropic/claude-3.5-sonnet"),
        ]));

        let settings = cfg.backend_settings().unwrap();
        assert_eq!(settings.base_url, "http://env:4000");
        assert_eq!(settings.api_key.expose_secret(), "sk-env");
        assert_eq!(cfg.bench.judge_model, "anthropic/claude-3.5-sonnet");
    }

    #[test]
    fn api_key_env_is_consulted_when_no_key_is_set() {
        let mut cfg = BenchConfig::default();
        cfg.backend.base_url = Some("http://localhost:4000".into());
        cfg.backend.api_key_env = Some("MY_PROXY_KEY".into());
        let cfg = cfg.with_env(env_of(&[("MY_PROXY_KEY", "sk-custom")]));
        let settings = cfg.backend_settings().unwrap();
        assert_eq!(settings.api_key.expose_secret(), "sk-custom");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let cfg = BenchConfig::default().with_env(env_of(&[("JUDGE_MODEL", "  ")]));
        assert_eq!(cfg.bench.judge_model, "openai/gpt-4o-mini");
    }

    #[test]
    fn missing_backend_settings_is_a_configuration_error() {
        let cfg = BenchConfig::default().with_env(|_| None);
        assert!(matches!(
            cfg.backend_settings(),
            Err(BenchError::Configuration(_))
        ));
    }
}
