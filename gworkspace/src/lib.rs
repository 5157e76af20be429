//! Workspace backend operations for the gantry tool gateway.
//!
//! The crate talks to a workspace REST API through the [`WorkspaceClient`]
//! trait and registers the operations that use it on a
//! [`gtooling::ToolRegistry`].
//!
//! ```rust
//! use gworkspace::{WorkspaceCredentials, WorkspaceToolSettings};
//!
//! let credentials = WorkspaceCredentials::from_lookup(|key| match key {
//!     "DATABRICKS_HOST" => Some("https://example.cloud.databricks.com".to_string()),
//!     _ => None,
//! });
//! let settings = WorkspaceToolSettings::from_credentials("workshop", &credentials);
//!
//! assert!(settings.databricks_configured);
//! assert_eq!(settings.default_warehouse_id, None);
//! ```

pub mod client;
pub mod credentials;
pub mod error;
pub mod http;
mod serde_api;
pub mod tools;

pub use client::{
    BackendFuture, ClusterInfo, DbfsEntry, StatementRequest, StatementResult, WarehouseInfo,
    WorkspaceClient,
};
pub use credentials::{HOST_VAR, SecretString, TOKEN_VAR, WAREHOUSE_VAR, WorkspaceCredentials};
pub use error::{BackendError, BackendErrorKind};
pub use http::{DEFAULT_REQUEST_TIMEOUT, DatabricksHttpClient};
pub use tools::{
    DEFAULT_CLUSTER_STATUS, DEFAULT_DBFS_PATH, DEFAULT_ROW_LIMIT, DEFAULT_STATEMENT_WAIT,
    WorkspaceToolSettings, register_workspace_tools,
};
