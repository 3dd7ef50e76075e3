use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::validate::{Validate, ValidationError};

/// Who authored a transcript entry.
///
/// The backend speaks `"user"` / `"ai"`; older payloads used `"bot"` and
/// some tooling emits `"assistant"`, so both are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sender {
    #[serde(rename = "user")]
    User,

    #[serde(rename = "ai", alias = "assistant", alias = "bot")]
    Assistant,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "ai",
        }
    }
}

/// One entry of the chat transcript. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,

    /// Base64-encoded PNG rendered by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
}

impl ChatMessage {
    /// Create user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            plot: None,
        }
    }

    /// Create assistant message without a plot
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
            plot: None,
        }
    }

    /// Create assistant message from a backend reply
    pub fn from_reply(response: ChatResponse) -> Self {
        Self {
            sender: Sender::Assistant,
            text: response.reply,
            plot: response.plot,
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    /// Decode the attached plot, if any.
    pub fn plot_bytes(&self) -> Option<Result<Vec<u8>, base64::DecodeError>> {
        self.plot.as_deref().map(|p| BASE64_STANDARD.decode(p))
    }

    /// `data:` URL suitable for an `<img src>` or any renderer that accepts one.
    pub fn plot_data_url(&self) -> Option<String> {
        self.plot
            .as_deref()
            .map(|p| format!("data:image/png;base64,{}", p))
    }
}

/// A single turn as the backend expects it inside `ChatRequest::messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub sender: Sender,
    pub text: String,
}

/// Body of `POST /chat`.
///
/// Only the newest turn is sent; the backend rebuilds the conversation
/// from `session_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub messages: Vec<ChatTurn>,
}

impl ChatRequest {
    pub fn user_turn(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            messages: vec![ChatTurn {
                sender: Sender::User,
                text: text.into(),
            }],
        }
    }
}

/// Body returned by `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,

    #[serde(default)]
    pub plot: Option<String>,
}

impl Validate for ChatResponse {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(plot) = &self.plot {
            BASE64_STANDARD
                .decode(plot)
                .map_err(|e| ValidationError::new("plot", format!("invalid base64: {}", e)))?;
        }
        Ok(())
    }
}
