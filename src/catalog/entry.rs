use serde::Serialize;

/// A selectable model with optional display metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelEntry {
    pub id: String,
    /// Human-readable context size, e.g. `128k`.
    pub context: Option<String>,
    pub context_tokens: Option<u64>,
    /// USD per million input tokens.
    pub input_cost_per_1m: Option<f64>,
    /// USD per million output tokens.
    pub output_cost_per_1m: Option<f64>,
    /// Tokens per second.
    pub speed: Option<f64>,
    /// Typical latency in seconds.
    pub latency: Option<f64>,
}

impl ModelEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            context: None,
            context_tokens: None,
            input_cost_per_1m: None,
            output_cost_per_1m: None,
            speed: None,
            latency: None,
        }
    }
}

/// Formats a token count the way model cards do: `8192`, `128k`, `1M`.
pub fn context_label(tokens: u64) -> String {
    if tokens >= 1_000_000 {
        format!("{}M", (tokens as f64 / 1_000_000.0).round())
    } else if tokens >= 1_000 {
        format!("{}k", (tokens as f64 / 1_000.0).round())
    } else {
        tokens.to_string()
    }
}

/// Converts a per-token price to USD per million tokens, rounded to four
/// decimal places.
pub fn per_million(cost_per_token: f64) -> f64 {
    (cost_per_token * 1_000_000.0 * 10_000.0).round() / 10_000.0
}
