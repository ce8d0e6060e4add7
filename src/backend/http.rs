use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::config::BackendSettings;
use crate::error::BenchError;

use super::{ChatBackend, ChatCompletion, ChatRequest};

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Client for an OpenAI-compatible proxy such as LiteLLM.
#[derive(Debug)]
pub struct HttpBackend {
    client: Client,
    endpoint: String,
    api_key: SecretString,
}

impl HttpBackend {
    /// Creates a backend with its own HTTP client.
    pub fn new(settings: &BackendSettings) -> Result<Self, BenchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|err| {
            BenchError::Configuration(format!("failed to build HTTP client: {err}"))
        })?;
        Self::with_client(client, settings)
    }

    /// Creates a backend around an existing HTTP client.
    pub fn with_client(client: Client, settings: &BackendSettings) -> Result<Self, BenchError> {
        let base = settings.base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(BenchError::Configuration(
                "Missing backend base URL".to_string(),
            ));
        }
        if settings.api_key.expose_secret().is_empty() {
            return Err(BenchError::Configuration(
                "Missing backend API key".to_string(),
            ));
        }
        Ok(Self {
            client,
            endpoint: format!("{base}{CHAT_COMPLETIONS_PATH}"),
            api_key: SecretString::new(settings.api_key.expose_secret().clone()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn chat(&self, request: &ChatRequest<'_>) -> Result<ChatCompletion, BenchError> {
        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(request) {
                log::trace!("chat request payload: {}", json);
            }
        }

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        log::debug!("chat completions HTTP status for {}: {}", request.model, status);
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(BenchError::Backend {
                status: Some(status.as_u16()),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|err| BenchError::Parse {
            message: format!("failed to decode chat completion: {err}"),
            raw: body,
        })
    }
}
