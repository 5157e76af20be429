//! Operation descriptors: name, ordered typed parameters, and documentation.
//!
//! ```rust
//! use gtooling::{ParameterKind, ParameterSpec, ToolSchema};
//!
//! let schema = ToolSchema::new("list_clusters", "List clusters by state")
//!     .with_parameter(ParameterSpec::optional("status", ParameterKind::String, "RUNNING"));
//!
//! assert!(schema.validate().is_ok());
//! assert_eq!(schema.input_schema()["properties"]["status"]["default"], "RUNNING");
//! ```

use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use serde_json::{Map, Value, json};

use crate::{ArgValue, RegistryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    String,
    Integer,
    Float,
    Boolean,
}

impl ParameterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
        }
    }

    /// JSON Schema `type` keyword for this kind.
    pub fn json_type(self) -> &'static str {
        match self {
            Self::Float => "number",
            other => other.as_str(),
        }
    }
}

impl Display for ParameterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: ParameterKind,
    pub required: bool,
    pub default: Option<ArgValue>,
    pub description: Option<String>,
}

impl ParameterSpec {
    pub fn required(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            default: None,
            description: None,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        kind: ParameterKind,
        default: impl Into<ArgValue>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default: Some(default.into()),
            description: None,
        }
    }

    /// Optional parameter whose default is "no value supplied".
    pub fn nullable(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self::optional(name, kind, ArgValue::Null)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn check(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("parameter names must not be empty".to_string());
        }
        if self.required {
            return match self.default {
                Some(_) => Err(format!(
                    "required parameter '{}' must not declare a default",
                    self.name
                )),
                None => Ok(()),
            };
        }

        match &self.default {
            None => Err(format!(
                "optional parameter '{}' has no default",
                self.name
            )),
            Some(ArgValue::Null) => Ok(()),
            Some(default) if default.kind() == Some(self.kind) => Ok(()),
            Some(default) => Err(format!(
                "default for parameter '{}' is {}, expected {}",
                self.name,
                default.type_name(),
                self.kind
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
}

impl ToolSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|parameter| parameter.name == name)
    }

    /// Checks the descriptor invariants enforced at registration time.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::invalid_schema(
                self.name.clone(),
                "operation names must not be empty",
            ));
        }

        let mut seen = HashSet::new();
        for parameter in &self.parameters {
            if !seen.insert(parameter.name.as_str()) {
                return Err(RegistryError::invalid_schema(
                    self.name.clone(),
                    format!("parameter '{}' is declared more than once", parameter.name),
                ));
            }
            parameter
                .check()
                .map_err(|message| RegistryError::invalid_schema(self.name.clone(), message))?;
        }

        Ok(())
    }

    /// JSON Schema object describing the accepted arguments.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for parameter in &self.parameters {
            let mut property = Map::new();
            property.insert("type".to_string(), json!(parameter.kind.json_type()));
            if let Some(default) = &parameter.default {
                property.insert("default".to_string(), default.to_json());
            }
            if let Some(description) = &parameter.description {
                property.insert("description".to_string(), json!(description));
            }
            properties.insert(parameter.name.clone(), Value::Object(property));

            if parameter.required {
                required.push(json!(parameter.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Descriptor as listed to clients.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}
