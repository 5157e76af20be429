//! Common imports for embedding the gateway.

pub use crate::{
    Dispatcher, Envelope, Gateway, GatewayConfig, GatewayError, InvocationContext,
    ParameterKind, ParameterSpec, PromptCatalog, ToolError, ToolRegistry, ToolSchema,
    WorkspaceClient, WorkspaceToolSettings, bootstrap, bootstrap_with_settings, router, serve,
};
