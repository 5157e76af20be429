//! Startup errors for the gateway.
//!
//! ```rust
//! use gantry::{GatewayError, GatewayErrorKind};
//!
//! let error = GatewayError::config("config.yaml", "invalid type: sequence");
//! assert_eq!(error.kind, GatewayErrorKind::Config);
//! assert!(error.to_string().contains("config.yaml"));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use gtooling::RegistryError;
use gworkspace::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    Config,
    Registry,
    Backend,
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn config(source: impl Display, message: impl Display) -> Self {
        Self::new(
            GatewayErrorKind::Config,
            format!("invalid configuration in {source}: {message}"),
        )
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Io, message)
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for GatewayError {}

impl From<RegistryError> for GatewayError {
    fn from(error: RegistryError) -> Self {
        Self::new(GatewayErrorKind::Registry, error.to_string())
    }
}

impl From<BackendError> for GatewayError {
    fn from(error: BackendError) -> Self {
        Self::new(GatewayErrorKind::Backend, error.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_errors_keep_operation_in_message() {
        let error = GatewayError::from(RegistryError::duplicate_operation("health"));
        assert_eq!(error.kind, GatewayErrorKind::Registry);
        assert!(error.message.contains("health"));
    }

    #[test]
    fn backend_errors_map_to_backend_kind() {
        let error = GatewayError::from(BackendError::other("failed to build HTTP client"));
        assert_eq!(error.kind, GatewayErrorKind::Backend);
        assert_eq!(error.message, "failed to build HTTP client");
    }
}
