//! Error types for the chat widget core

use thiserror::Error;

/// Failure of a single send round trip.
///
/// Every variant ends up on the same boundary: the coordinator turns it into
/// an apology bot message and releases the in-flight guard.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("network request failed: {0}")]
    Transport(String),

    #[error("malformed response body: {0}")]
    Decode(String),

    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ChatError {
    /// Short description that is safe to show inside the apology message.
    ///
    /// Transport and decode details stay in the log.
    pub fn user_description(&self) -> String {
        match self {
            ChatError::Http { .. } => self.to_string(),
            ChatError::Transport(_) => "network request failed".to_string(),
            ChatError::Decode(_) => "malformed response from server".to_string(),
            ChatError::Encode(_) => "could not encode request".to_string(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme '{0}', expected 'light' or 'dark'")]
    Unknown(String),

    #[error("failed to persist theme preference: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse widget config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid widget config: {0}")]
    Invalid(String),
}

/// Result type for config operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
