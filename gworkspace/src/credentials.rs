//! Workspace credentials read from the process environment.

pub const HOST_VAR: &str = "DATABRICKS_HOST";
pub const TOKEN_VAR: &str = "DATABRICKS_TOKEN";
pub const WAREHOUSE_VAR: &str = "DATABRICKS_SQL_WAREHOUSE_ID";

#[derive(Clone, PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceCredentials {
    pub host: Option<String>,
    pub token: Option<SecretString>,
    pub warehouse_id: Option<String>,
}

impl WorkspaceCredentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds credentials from an arbitrary variable source; blank values
    /// count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            host: read(HOST_VAR),
            token: read(TOKEN_VAR).map(SecretString::new),
            warehouse_id: read(WAREHOUSE_VAR),
        }
    }

    /// A host is the only requirement for reporting the backend as configured.
    pub fn is_configured(&self) -> bool {
        self.host.is_some()
    }
}
