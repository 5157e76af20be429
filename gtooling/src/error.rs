//! Dispatch errors, registration errors, and their classifications.

use std::error::Error;
use std::fmt::{Display, Formatter};

use gcommon::CallId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    /// The requested operation is not registered.
    NotFound,
    /// An argument was missing, mistyped, or unexpected.
    InvalidArguments,
    /// The backend refused the caller's credentials.
    Unauthorized,
    Timeout,
    /// The handler failed, panicked, or its backend could not serve it.
    Execution,
}

impl ToolErrorKind {
    /// Kinds caused by the request rather than by the handler or its backend.
    pub fn is_caller_fault(self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::InvalidArguments | Self::Unauthorized
        )
    }
}

/// A failed invocation. `message` is the text callers see in the envelope;
/// `operation` and `call_id` are attached by the dispatcher for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    pub retryable: bool,
    pub operation: Option<String>,
    pub call_id: Option<CallId>,
}

impl ToolError {
    fn with_kind(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable: kind == ToolErrorKind::Timeout,
            operation: None,
            call_id: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_kind(ToolErrorKind::NotFound, message)
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::with_kind(ToolErrorKind::InvalidArguments, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_kind(ToolErrorKind::Unauthorized, message)
    }

    /// Timeouts are retryable.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::with_kind(ToolErrorKind::Timeout, message)
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::with_kind(ToolErrorKind::Execution, message)
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn for_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn with_call_id(mut self, call_id: impl Into<CallId>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    pub fn is_user_error(&self) -> bool {
        self.kind.is_caller_fault()
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "{operation}: ")?;
        }
        write!(f, "{}", self.message)?;
        if let Some(call_id) = &self.call_id {
            write!(f, " (call {call_id})")?;
        }
        Ok(())
    }
}

impl Error for ToolError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryErrorKind {
    DuplicateOperation,
    InvalidSchema,
}

/// Bootstrap-time registration failure. Never produced while dispatching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryError {
    pub kind: RegistryErrorKind,
    pub operation: String,
    pub message: String,
}

impl RegistryError {
    pub fn new(
        kind: RegistryErrorKind,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn duplicate_operation(operation: impl Into<String>) -> Self {
        let operation = operation.into();
        let message = format!("operation '{operation}' is already registered");
        Self::new(RegistryErrorKind::DuplicateOperation, operation, message)
    }

    pub fn invalid_schema(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(RegistryErrorKind::InvalidSchema, operation, message)
    }
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} [operation={}]: {}",
            self.kind, self.operation, self.message
        )
    }
}

impl Error for RegistryError {}
