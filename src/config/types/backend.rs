use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::BenchError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Root of the OpenAI-compatible proxy, without the `/v1/...` suffix.
    pub base_url: Option<String>,
    pub api_key: Option<SecretString>,
    /// Environment variable to read the key from when `api_key` is unset.
    pub api_key_env: Option<String>,
    /// Whole-request timeout applied by the HTTP client.
    pub timeout_seconds: Option<u64>,
}

/// Endpoint and credential checked to be present.
#[derive(Debug)]
pub struct BackendSettings {
    pub base_url: String,
    pub api_key: SecretString,
    pub timeout: Option<Duration>,
}

impl BackendSettings {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: SecretString::new(api_key.into()),
            timeout: None,
        }
    }

    pub(super) fn resolve(cfg: &BackendConfig) -> Result<Self, BenchError> {
        let base_url = cfg
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                BenchError::Configuration("Missing backend base URL (LITELLM_BASE_URL)".into())
            })?;
        let api_key = cfg
            .api_key
            .as_ref()
            .map(|key| key.expose_secret().trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                BenchError::Configuration("Missing backend API key (LITELLM_MASTER_KEY)".into())
            })?;
        Ok(Self {
            base_url: base_url.to_string(),
            api_key: SecretString::new(api_key),
            timeout: cfg.timeout_seconds.map(Duration::from_secs),
        })
    }
}
