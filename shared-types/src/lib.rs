//! Wire types shared between the chat widget and the chat backend
//!
//! The backend exposes a single endpoint:
//! - `POST /api/chat` with a [`ChatRequest`] body, answered by a [`ChatResponse`]
//! - error statuses carry an [`ApiError`] body
//!
//! Serializable with serde for JSON over HTTP

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Conversation
// ============================================================================

/// Opaque conversation identifier handed out by the backend.
///
/// The widget never inspects it. Whatever JSON value the backend returned is
/// echoed back verbatim on the next request, so integer, float, string and
/// structured ids all round-trip without conversion. Only `null` is refused:
/// a reply without an id is malformed.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ChatId(Value);

impl ChatId {
    /// `None` for `null`, which is never a valid id
    pub fn new(value: Value) -> Option<Self> {
        (!value.is_null()).then_some(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ChatId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        ChatId::new(value).ok_or_else(|| de::Error::custom("chat_id must not be null"))
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl From<i64> for ChatId {
    fn from(value: i64) -> Self {
        ChatId(Value::from(value))
    }
}

impl From<u64> for ChatId {
    fn from(value: u64) -> Self {
        ChatId(Value::from(value))
    }
}

impl From<&str> for ChatId {
    fn from(value: &str) -> Self {
        ChatId(Value::from(value))
    }
}

impl From<String> for ChatId {
    fn from(value: String) -> Self {
        ChatId(Value::from(value))
    }
}

// ============================================================================
// API Types
// ============================================================================

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// Trimmed, non-empty user text
    pub message: String,
    /// `null` on the first turn of a conversation
    pub chat_id: Option<ChatId>,
}

/// Successful reply from `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    /// Bot reply text, may contain fenced code blocks
    pub response: String,
    pub chat_id: ChatId,
}

/// Error body returned alongside non-2xx statuses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub error: String,
}
