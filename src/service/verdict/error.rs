//! Error types for argument evaluation

use thiserror::Error;

use crate::service::llm::TransportError;

/// The reasoning reply could not be coerced into a verdict
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in reply")]
    NoJson,

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("reply is not a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("schema violation: {0}")]
    Schema(String),
}

/// Failure at any stage after the argument was accepted
#[derive(Debug, Error)]
pub enum VerdictError {
    #[error("reasoning service unavailable: {0}")]
    Transport(#[from] TransportError),

    #[error("malformed reasoning reply: {0}")]
    Parse(#[from] ParseError),
}

impl VerdictError {
    /// Stable label for logs
    pub fn stage(&self) -> &'static str {
        match self {
            VerdictError::Transport(_) => "transport",
            VerdictError::Parse(_) => "parse",
        }
    }
}
