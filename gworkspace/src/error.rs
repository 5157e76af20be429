//! Workspace backend error kinds and their mapping onto tool errors.
//!
//! ```rust
//! use gtooling::{ToolError, ToolErrorKind};
//! use gworkspace::BackendError;
//!
//! let timeout = BackendError::timeout("statement still running");
//! assert!(timeout.retryable);
//!
//! let tool_error = ToolError::from(BackendError::authentication("bad token"));
//! assert_eq!(tool_error.kind, ToolErrorKind::Unauthorized);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use gtooling::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    Authentication,
    NotConfigured,
    InvalidRequest,
    Timeout,
    Transport,
    Unavailable,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    pub kind: BackendErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl BackendError {
    pub fn new(kind: BackendErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Authentication, message, false)
    }

    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::NotConfigured, message, false)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::InvalidRequest, message, false)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Timeout, message, true)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Transport, message, true)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Unavailable, message, true)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(BackendErrorKind::Other, message, false)
    }
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for BackendError {}

impl From<BackendError> for ToolError {
    fn from(error: BackendError) -> Self {
        match error.kind {
            BackendErrorKind::Authentication => ToolError::unauthorized(error.message),
            BackendErrorKind::Timeout => ToolError::timeout(error.message),
            BackendErrorKind::NotConfigured
            | BackendErrorKind::InvalidRequest
            | BackendErrorKind::Transport
            | BackendErrorKind::Unavailable
            | BackendErrorKind::Other => {
                ToolError::execution(error.message).retryable(error.retryable)
            }
        }
    }
}
