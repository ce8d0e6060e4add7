//! One generation or judge exchange against the configured backend.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::backend::{ChatBackend, ChatCompletion, ChatRequest};
use crate::chat::ChatMessage;
use crate::error::BenchError;
use crate::judge::{judge_prompt, JUDGE_SYSTEM_PROMPT};
use crate::result::GenerationResult;

/// System instruction sent with every generation request.
pub const GENERATION_SYSTEM_PROMPT: &str = "You are a helpful creative-writing assistant.";
/// Default sampling temperature for generation; favours diverse output.
pub const DEFAULT_GENERATION_TEMPERATURE: f32 = 0.9;
/// Judging is always run deterministically.
pub const JUDGE_TEMPERATURE: f32 = 0.0;

/// Runs generation and judge calls against a [`ChatBackend`].
///
/// The invoker never retries; retry policy lives in the orchestrator.
#[derive(Clone)]
pub struct ModelInvoker {
    backend: Arc<dyn ChatBackend>,
    temperature: f32,
    deadline: Option<Duration>,
}

impl ModelInvoker {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            temperature: DEFAULT_GENERATION_TEMPERATURE,
            deadline: None,
        }
    }

    /// Sets the sampling temperature used for generation calls.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Bounds each backend call; an expired deadline is reported as a
    /// [`BenchError::Backend`] without status.
    pub fn deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Asks `model` to respond to `prompt`, timing the backend call.
    ///
    /// A response without content yields an empty output rather than an error.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<GenerationResult, BenchError> {
        let messages = [
            ChatMessage::system()
                .content(GENERATION_SYSTEM_PROMPT)
                .build(),
            ChatMessage::user().content(prompt).build(),
        ];
        let request = ChatRequest {
            model,
            messages: &messages,
            temperature: self.temperature,
        };

        let start = Instant::now();
        let completion = self.call(model, self.backend.chat(&request)).await?;
        let latency_ms = start.elapsed().as_millis() as u64;

        Ok(GenerationResult {
            model: model.to_string(),
            output: completion.text().unwrap_or_default().to_string(),
            latency_ms,
        })
    }

    /// Asks `judge_model` to score `output`; returns the raw (trimmed) reply.
    pub async fn judge(
        &self,
        judge_model: &str,
        prompt: &str,
        output: &str,
    ) -> Result<String, BenchError> {
        let messages = [
            ChatMessage::system().content(JUDGE_SYSTEM_PROMPT).build(),
            ChatMessage::user()
                .content(judge_prompt(prompt, output))
                .build(),
        ];
        let request = ChatRequest {
            model: judge_model,
            messages: &messages,
            temperature: JUDGE_TEMPERATURE,
        };

        let completion = self.call(judge_model, self.backend.chat(&request)).await?;
        Ok(completion.text().unwrap_or_default().trim().to_string())
    }

    async fn call<F>(&self, model: &str, fut: F) -> Result<ChatCompletion, BenchError>
    where
        F: Future<Output = Result<ChatCompletion, BenchError>>,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, fut).await.map_err(|_| {
                BenchError::backend(format!(
                    "request to {model} timed out after {}ms",
                    deadline.as_millis()
                ))
            })?,
            None => fut.await,
        }
    }
}
