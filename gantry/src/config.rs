//! Gateway configuration loaded from an optional `config.yaml`.
//!
//! ```rust
//! use gantry::GatewayConfig;
//!
//! let config = GatewayConfig::from_yaml_str("servername: demo\n", "inline").unwrap();
//! assert_eq!(config.servername, "demo");
//! assert_eq!(config.bind, "127.0.0.1:8000");
//! assert!(config.strict_arguments);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use gtooling::UnknownArguments;
use serde::Deserialize;

use crate::GatewayError;

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const DEFAULT_SERVERNAME: &str = "databricks-mcp-workshop";
pub const DEFAULT_PROMPTS_DIR: &str = "prompts";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

const GATEWAY_KEYS: &[&str] = &[
    "servername",
    "prompts_dir",
    "bind",
    "strict_arguments",
    "workspace",
];
const WORKSPACE_KEYS: &[&str] = &["request_timeout_secs", "statement_wait_timeout"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub servername: String,
    pub prompts_dir: PathBuf,
    pub bind: String,
    /// Reject argument keys the operation does not declare.
    pub strict_arguments: bool,
    pub workspace: WorkspaceConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            servername: DEFAULT_SERVERNAME.to_string(),
            prompts_dir: PathBuf::from(DEFAULT_PROMPTS_DIR),
            bind: DEFAULT_BIND.to_string(),
            strict_arguments: true,
            workspace: WorkspaceConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub request_timeout_secs: u64,
    pub statement_wait_timeout: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            statement_wait_timeout: gworkspace::DEFAULT_STATEMENT_WAIT.to_string(),
        }
    }
}

impl WorkspaceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl GatewayConfig {
    /// Parses YAML text; an empty document yields the defaults. Keys the
    /// gateway does not know are logged and ignored.
    pub fn from_yaml_str(text: &str, source: impl std::fmt::Display) -> Result<Self, GatewayError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|err| GatewayError::config(&source, err))?;
        for key in unknown_keys(&document) {
            tracing::warn!(source = %source, %key, "ignoring unknown configuration key");
        }
        let parsed: Option<Self> =
            serde_yaml::from_value(document).map_err(|err| GatewayError::config(&source, err))?;
        let config = parsed.unwrap_or_default();
        config.validate(source)?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, GatewayError> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            GatewayError::config(path.display(), format!("could not read file: {err}"))
        })?;
        Self::from_yaml_str(&text, path.display())
    }

    /// Loads the first candidate that exists, or the defaults when none do.
    pub fn discover<I, P>(candidates: I) -> Result<Self, GatewayError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for candidate in candidates {
            let path = candidate.as_ref();
            if path.exists() {
                tracing::info!(path = %path.display(), "loading gateway configuration");
                return Self::load(path);
            }
        }
        tracing::debug!("no configuration file found; using defaults");
        Ok(Self::default())
    }

    /// `config.yaml` in the working directory, then next to the executable.
    pub fn default_candidates() -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(dir.join(CONFIG_FILE_NAME));
        }
        candidates
    }

    pub fn unknown_arguments(&self) -> UnknownArguments {
        if self.strict_arguments {
            UnknownArguments::Reject
        } else {
            UnknownArguments::Ignore
        }
    }

    fn validate(&self, source: impl std::fmt::Display) -> Result<(), GatewayError> {
        if self.servername.trim().is_empty() {
            return Err(GatewayError::config(source, "servername must not be empty"));
        }
        if self.workspace.request_timeout_secs == 0 {
            return Err(GatewayError::config(
                source,
                "workspace.request_timeout_secs must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Dotted paths of mapping keys outside the known configuration fields.
fn unknown_keys(document: &serde_yaml::Value) -> Vec<String> {
    let mut unknown = Vec::new();
    let Some(root) = document.as_mapping() else {
        return unknown;
    };
    for (key, value) in root {
        let key = yaml_key(key);
        if !GATEWAY_KEYS.contains(&key.as_str()) {
            unknown.push(key);
        } else if key == "workspace"
            && let Some(workspace) = value.as_mapping()
        {
            unknown.extend(
                workspace
                    .keys()
                    .map(yaml_key)
                    .filter(|key| !WORKSPACE_KEYS.contains(&key.as_str()))
                    .map(|key| format!("workspace.{key}")),
            );
        }
    }
    unknown
}

fn yaml_key(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(text) => text.clone(),
        other => serde_yaml::to_string(other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}
