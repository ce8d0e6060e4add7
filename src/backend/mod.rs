//! Chat-completions backend used for both generation and judging.

mod http;
mod types;

use async_trait::async_trait;

use crate::error::BenchError;

pub use http::HttpBackend;
pub use types::{ChatCompletion, ChatRequest};

/// A backend able to run one chat-completions exchange.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, request: &ChatRequest<'_>) -> Result<ChatCompletion, BenchError>;
}
