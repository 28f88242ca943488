//! # Domain Errors
//!
//! Failure kinds for each stage of the pipeline. Parse and service errors end a command
//! with a user-visible reply; persistence errors are logged and swallowed.

use crate::domain::types::CommandKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("not a command")]
    NotACommand,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("malformed {}: {reason}", .command.as_str())]
    Malformed { command: CommandKind, reason: String },
}

impl ParseError {
    pub fn malformed(command: CommandKind, reason: impl Into<String>) -> Self {
        ParseError::Malformed {
            command,
            reason: reason.into(),
        }
    }

    /// The recognized command the text was aimed at, if any.
    pub fn command(&self) -> Option<CommandKind> {
        match self {
            ParseError::Malformed { command, .. } => Some(*command),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Non-2xx response, timeout or connection failure (`status` is `None` for the latter two).
    #[error("transport error (status {status:?}): {body}")]
    Transport { status: Option<u16>, body: String },

    #[error("decode error: {0}")]
    Decode(String),
}

impl ServiceError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Transport { status, .. } => *status,
            ServiceError::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        // Request URLs carry the weather API key; never keep them in an error body.
        let e = e.without_url();
        ServiceError::Transport {
            status: e.status().map(|s| s.as_u16()),
            body: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Decode(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
