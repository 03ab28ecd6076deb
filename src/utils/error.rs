//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::fmt;
use thiserror::Error;

/// Coarse classification of a [`FlameError`]
///
/// Callers that only display the message can ignore this; callers that
/// react differently to bad input and internal bugs match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input text is not valid JSON, or its root is not a container
    Parse,
    /// The group-by field list is invalid
    Config,
    /// The aggregated tree violates an invariant the renderer relies on
    Render,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Parse => "parse",
            ErrorKind::Config => "config",
            ErrorKind::Render => "render",
        };
        f.write_str(name)
    }
}

/// Errors returned by the JSON-to-flamegraph core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlameError {
    #[error("invalid JSON: {reason}")]
    InvalidJson {
        reason: String,
        line: usize,
        column: usize,
    },

    #[error("document root must be an object or an array, found {0}")]
    NotAContainer(&'static str),

    #[error("group-by field #{0} is empty")]
    EmptyField(usize),

    #[error("group-by field \"{0}\" is listed more than once")]
    DuplicateField(String),

    #[error("malformed frame tree: {0}")]
    MalformedTree(String),
}

impl FlameError {
    /// Discriminant used by callers to tell user errors from internal ones
    pub fn kind(&self) -> ErrorKind {
        match self {
            FlameError::InvalidJson { .. } | FlameError::NotAContainer(_) => ErrorKind::Parse,
            FlameError::EmptyField(_) | FlameError::DuplicateField(_) => ErrorKind::Config,
            FlameError::MalformedTree(_) => ErrorKind::Render,
        }
    }
}

impl From<serde_json::Error> for FlameError {
    fn from(err: serde_json::Error) -> Self {
        FlameError::InvalidJson {
            reason: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
