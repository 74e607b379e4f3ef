//! Error types for the notification pipeline.

use thiserror::Error;

/// Errors that can occur while fetching, formatting, or delivering a summary.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("schedule provider request failed: {0}")]
    Network(String),

    #[error("{0} must be set")]
    Credentials(&'static str),

    #[error("malformed session data: {0}")]
    Format(String),

    #[error("telegram delivery failed: {0}")]
    Delivery(String),
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        BotError::Format(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type BotResult<T> = Result<T, BotError>;
