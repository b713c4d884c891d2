//! Error taxonomy shared by every surface.
//!
//! ERROR HANDLING
//! ==============
//! Three classes, matching where a failure is detected:
//! - [`ValidationError`]: rejected locally, never reaches the network and
//!   never produces a transcript entry.
//! - [`ClientError::Transport`]: no response reached the client.
//! - [`ClientError::Remote`]: the server answered with a failure status or a
//!   body we could not use.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Input rejected before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("message is empty")]
    EmptyMessage,
    #[error("file is too large ({size} bytes); the maximum size is {}MB", .max / (1024 * 1024))]
    FileTooLarge { size: u64, max: u64 },
    #[error("unsupported file type `{0}`; allowed: PDF, DOCX, TXT")]
    UnsupportedFileType(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid url `{0}`; expected an http:// or https:// address")]
    InvalidUrl(String),
    #[error("request body could not be encoded: {0}")]
    Unencodable(String),
}

/// Failure of a remote call, or of its local preconditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No response reached the client (network down, DNS, CORS, timeout).
    #[error("network error: {0}")]
    Transport(String),
    /// The server responded, but with a failure. `message` is surfaced verbatim.
    #[error("{message}")]
    Remote { status: u16, message: String },
}

impl ClientError {
    /// Build a transport error from any displayable cause.
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self::Transport(cause.to_string())
    }

    /// HTTP status of a remote failure, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
