use thiserror::Error;

/// Error types that can occur while running a benchmark.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Malformed benchmark input (empty prompt, empty model list, ...)
    #[error("Validation error: {0}")]
    Validation(String),
    /// Missing or invalid backend endpoint/credential settings
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Network failure or non-success response from the backend
    #[error("Backend error{}: {body}", status_suffix(.status))]
    Backend { status: Option<u16>, body: String },
    /// Judge output that could not be recovered as a JSON object
    #[error("Parse error: {message}. Raw response: {raw}")]
    Parse { message: String, raw: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|code| format!(" ({code})")).unwrap_or_default()
}

impl BenchError {
    /// Builds a backend error without an HTTP status.
    pub fn backend(body: impl Into<String>) -> Self {
        BenchError::Backend {
            status: None,
            body: body.into(),
        }
    }

    /// Returns true for errors that abort a whole benchmark call.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BenchError::Validation(_) | BenchError::Configuration(_)
        )
    }

    /// Returns true for failures worth another attempt: network errors,
    /// timeouts, rate limiting and server-side errors.
    pub fn is_transient(&self) -> bool {
        match self {
            BenchError::Backend { status: None, .. } => true,
            BenchError::Backend {
                status: Some(code), ..
            } => *code == 429 || *code >= 500,
            BenchError::Validation(_) | BenchError::Configuration(_) => false,
            BenchError::Parse { .. } => false,
        }
    }
}

/// Converts reqwest HTTP errors into backend errors, keeping the status when known.
impl From<reqwest::Error> for BenchError {
    fn from(err: reqwest::Error) -> Self {
        BenchError::Backend {
            status: err.status().map(|s| s.as_u16()),
            body: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::Parse {
            message: format!("{} at line {} column {}", err, err.line(), err.column()),
            raw: String::new(),
        }
    }
}
