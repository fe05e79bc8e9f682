//! Console error taxonomy
//!
//! Every operation failure is one of three classes, raised at the point of
//! detection and surfaced unchanged to the response layer.

use thiserror::Error;

/// Failure classes for console operations.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Invalid input: bad file name, traversal attempt, malformed body.
    #[error("{0}")]
    BadRequest(String),

    /// Missing resource: unmatched route, missing file, missing configuration path.
    #[error("{0}")]
    NotFound(String),

    /// I/O or decode failure during read/write/delete/list.
    #[error("{0}")]
    Internal(String),
}

impl ConsoleError {
    /// Wrap an underlying error with a short context message.
    pub fn internal(context: &str, err: &impl std::fmt::Display) -> Self {
        Self::Internal(format!("{context}: {err}"))
    }

    /// HTTP status code class for this failure.
    pub const fn status(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::Internal(_) => 500,
        }
    }
}
