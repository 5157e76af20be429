//! Startup wiring: registry, dispatcher, and prompt catalog.

use std::sync::Arc;

use gobserve::{CompositeDispatchHooks, MetricsDispatchHooks, SafeDispatchHooks, TracingDispatchHooks};
use gprompts::{PromptCatalog, PromptLoader};
use gtooling::{Dispatcher, ToolRegistry};
use gworkspace::{
    DatabricksHttpClient, WorkspaceClient, WorkspaceCredentials, WorkspaceToolSettings,
    register_workspace_tools,
};

use crate::{GatewayConfig, GatewayError};

/// Everything a transport needs to serve requests.
#[derive(Clone)]
pub struct Gateway {
    pub dispatcher: Dispatcher,
    pub prompts: Arc<PromptCatalog>,
    pub config: Arc<GatewayConfig>,
}

impl Gateway {
    pub fn servername(&self) -> &str {
        &self.config.servername
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("servername", &self.config.servername)
            .field("operations", &self.dispatcher.registry().len())
            .field("prompts", &self.prompts.len())
            .finish()
    }
}

/// Builds a gateway around `client`, using `settings` for the workspace tools.
pub fn bootstrap_with_settings(
    config: GatewayConfig,
    client: Arc<dyn WorkspaceClient>,
    settings: WorkspaceToolSettings,
) -> Result<Gateway, GatewayError> {
    let mut registry = ToolRegistry::new();
    register_workspace_tools(&mut registry, client, settings)?;

    let hooks = SafeDispatchHooks::new(
        CompositeDispatchHooks::new()
            .with(TracingDispatchHooks)
            .with(MetricsDispatchHooks),
    );
    let dispatcher = Dispatcher::new(registry)
        .with_hooks(Arc::new(hooks))
        .with_unknown_arguments(config.unknown_arguments());

    let prompts = PromptLoader::new().load(&config.prompts_dir);

    tracing::info!(
        servername = %config.servername,
        operations = dispatcher.registry().len(),
        prompts = prompts.len(),
        strict_arguments = config.strict_arguments,
        "gateway ready"
    );

    Ok(Gateway {
        dispatcher,
        prompts: Arc::new(prompts),
        config: Arc::new(config),
    })
}

/// Builds a gateway around `client`, with workspace settings taken from the
/// process environment.
pub fn bootstrap(
    config: GatewayConfig,
    client: Arc<dyn WorkspaceClient>,
) -> Result<Gateway, GatewayError> {
    let credentials = WorkspaceCredentials::from_env();
    let settings = settings_for(&config, &credentials);
    bootstrap_with_settings(config, client, settings)
}

/// Builds a gateway that talks to the workspace named by the environment.
pub fn bootstrap_from_env(config: GatewayConfig) -> Result<Gateway, GatewayError> {
    let credentials = WorkspaceCredentials::from_env();
    if !credentials.is_configured() {
        tracing::warn!(
            host_var = gworkspace::HOST_VAR,
            "workspace host is not set; workspace operations will fail until it is"
        );
    }
    let settings = settings_for(&config, &credentials);
    let client =
        DatabricksHttpClient::with_timeout(credentials, config.workspace.request_timeout())?;
    bootstrap_with_settings(config, Arc::new(client), settings)
}

fn settings_for(config: &GatewayConfig, credentials: &WorkspaceCredentials) -> WorkspaceToolSettings {
    WorkspaceToolSettings::from_credentials(config.servername.clone(), credentials)
        .with_statement_wait_timeout(config.workspace.statement_wait_timeout.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_follow_config_and_credentials() {
        let mut config = GatewayConfig::default();
        config.servername = "svc".to_string();
        config.workspace.statement_wait_timeout = "5s".to_string();
        let credentials = WorkspaceCredentials {
            host: Some("h".to_string()),
            token: None,
            warehouse_id: Some("wh".to_string()),
        };

        let settings = settings_for(&config, &credentials);
        assert_eq!(settings.service_name, "svc");
        assert!(settings.databricks_configured);
        assert_eq!(settings.default_warehouse_id.as_deref(), Some("wh"));
        assert_eq!(settings.statement_wait_timeout, "5s");
    }
}
