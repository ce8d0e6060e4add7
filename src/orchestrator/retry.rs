use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tokio::time::sleep;

use crate::error::BenchError;

const DEFAULT_MAX_ATTEMPTS: usize = 1;
const DEFAULT_BASE_DELAY_MS: u64 = 200;
const DEFAULT_MAX_DELAY_MS: u64 = 2_000;

/// Retry and backoff behaviour for backend calls made by the orchestrator.
///
/// The default makes a single attempt.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of attempts including the first one
    pub max_attempts: usize,
    /// Initial backoff delay in milliseconds
    pub base_delay_ms: u64,
    /// Maximum backoff delay in milliseconds
    pub max_delay_ms: u64,
    /// Whether to shave a deterministic jitter off backoff delays
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// A policy making up to `max_attempts` attempts with default delays.
    pub fn attempts(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Runs `op`, retrying transient failures with exponential backoff.
    ///
    /// The last error is returned unchanged once attempts run out.
    pub(crate) async fn run<F, Fut, T>(&self, label: &str, mut op: F) -> Result<T, BenchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, BenchError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0usize;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt >= max_attempts || !err.is_transient() {
                        return Err(err);
                    }
                    log::debug!("{label}: attempt {attempt}/{max_attempts} failed: {err}");
                    sleep(self.backoff_delay(attempt - 1)).await;
                }
            }
        }
    }

    fn backoff_delay(&self, attempt_index: usize) -> Duration {
        let mut delay = self
            .base_delay_ms
            .saturating_mul(1u64 << attempt_index.min(16));
        delay = delay.min(self.max_delay_ms);
        if self.jitter {
            let span = (delay / 2).max(1);
            let jitter = ((attempt_index as u64)
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1))
                % span;
            delay = delay.saturating_sub(jitter);
        }
        Duration::from_millis(delay)
    }
}
