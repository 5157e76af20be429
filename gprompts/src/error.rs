//! Prompt catalog errors and non-fatal load warnings.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptErrorKind {
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptError {
    pub kind: PromptErrorKind,
    pub message: String,
}

impl PromptError {
    pub fn new(kind: PromptErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(PromptErrorKind::NotFound, message)
    }
}

impl Display for PromptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for PromptError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptLoadWarningKind {
    /// The directory or a file could not be read.
    Io,
    /// The file is not valid UTF-8.
    Decode,
    /// The file stem is not valid UTF-8 or is blank.
    InvalidName,
    /// An earlier file already produced a prompt with this name.
    DuplicateName,
}

/// A file skipped during loading. Loading always continues past these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLoadWarning {
    pub kind: PromptLoadWarningKind,
    pub path: PathBuf,
    pub message: String,
}

impl PromptLoadWarning {
    pub fn new(kind: PromptLoadWarningKind, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for PromptLoadWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "could not load prompt from {}: {}",
            self.path.display(),
            self.message
        )
    }
}
