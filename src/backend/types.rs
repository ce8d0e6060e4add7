use serde::{Deserialize, Deserializer, Serialize};

use crate::chat::ChatMessage;

/// Body of a `POST /v1/chat/completions` request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
}

/// The subset of a chat-completions response the benchmark reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletion {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub choices: Vec<CompletionChoice>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<CompletionChoice>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<CompletionChoice>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: Option<CompletionMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletion {
    /// Convenience constructor for a single-choice completion.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            choices: vec![CompletionChoice {
                message: Some(CompletionMessage {
                    content: Some(text.into()),
                }),
            }],
        }
    }

    /// Content of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}
