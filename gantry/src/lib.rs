//! Tool gateway facade.
//!
//! Re-exports the gateway crates and wires them together: configuration,
//! bootstrap of the operation registry and prompt catalog, and the HTTP and
//! JSON-RPC transports.
//!
//! ```rust
//! use gantry::{GatewayConfig, GatewayErrorKind};
//!
//! let config = GatewayConfig::discover(["does-not-exist/config.yaml"]).unwrap();
//! assert_eq!(config, GatewayConfig::default());
//!
//! let error = GatewayConfig::from_yaml_str("bind: [1]", "inline").unwrap_err();
//! assert_eq!(error.kind, GatewayErrorKind::Config);
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod prelude;
pub mod rpc;
pub mod server;

pub use gcommon;
pub use gobserve;
pub use gprompts;
pub use gtooling;
pub use gworkspace;

pub use bootstrap::{Gateway, bootstrap, bootstrap_from_env, bootstrap_with_settings};
pub use config::{GatewayConfig, WorkspaceConfig};
pub use error::{GatewayError, GatewayErrorKind};
pub use gprompts::{Prompt, PromptCatalog, PromptLoader};
pub use gtooling::{
    Dispatcher, Envelope, InvocationContext, ParameterKind, ParameterSpec, ToolError,
    ToolErrorKind, ToolRegistry, ToolSchema,
};
pub use gworkspace::{WorkspaceClient, WorkspaceCredentials, WorkspaceToolSettings};
pub use rpc::{JsonRpcRequest, JsonRpcResponse};
pub use server::{bind_and_serve, router, serve};
