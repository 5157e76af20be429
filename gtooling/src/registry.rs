//! Tool registry populated during bootstrap and frozen before dispatch.

use std::future::Future;
use std::sync::Arc;

use gcommon::Registry;
use serde_json::Value;

use crate::{
    FunctionTool, InvocationContext, RegistryError, Tool, ToolArguments, ToolError, ToolSchema,
};

#[derive(Default)]
pub struct ToolRegistry {
    tools: Registry<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `tool` under its schema name. A taken name or a malformed schema
    /// is a configuration error and leaves the registry untouched.
    pub fn register<T>(&mut self, tool: T) -> Result<(), RegistryError>
    where
        T: Tool + 'static,
    {
        tool.schema().validate()?;
        let name = tool.schema().name.clone();
        self.tools
            .try_insert(name.clone(), Arc::new(tool))
            .map_err(|_| RegistryError::duplicate_operation(name))
    }

    pub fn register_fn<F, Fut>(&mut self, schema: ToolSchema, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(ToolArguments, InvocationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        self.register(FunctionTool::new(schema, handler))
    }

    pub fn register_sync_fn<F>(&mut self, schema: ToolSchema, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(ToolArguments, InvocationContext) -> Result<Value, ToolError>
            + Send
            + Sync
            + 'static,
    {
        self.register_fn(schema, move |args, context| {
            let output = handler(args, context);
            async move { output }
        })
    }

    pub fn register_blocking_fn<F>(
        &mut self,
        schema: ToolSchema,
        handler: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(ToolArguments, InvocationContext) -> Result<Value, ToolError>
            + Send
            + Sync
            + 'static,
    {
        self.register(FunctionTool::blocking(schema, handler))
    }

    pub fn lookup(&self, name: &str) -> Result<Arc<dyn Tool>, ToolError> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| ToolError::not_found(format!("unknown operation: {name}")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered descriptors sorted by operation name.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<_> = self
            .tools
            .values()
            .map(|tool| tool.schema().clone())
            .collect();
        schemas.sort_by(|left, right| left.name.cmp(&right.name));
        schemas
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{ParameterKind, ParameterSpec, RegistryErrorKind, ToolErrorKind};

    fn echo_schema(description: &str) -> ToolSchema {
        ToolSchema::new("echo", description)
            .with_parameter(ParameterSpec::required("msg", ParameterKind::String))
    }

    #[test]
    fn registry_tracks_registered_tools() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry
            .register_sync_fn(echo_schema("Echo"), |args, _| {
                Ok(json!({ "echo": args.string("msg")? }))
            })
            .expect("registration should succeed");

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("echo"));
        assert_eq!(registry.schemas()[0].name, "echo");
    }

    #[test]
    fn duplicate_registration_fails_and_keeps_first_entry() {
        let mut registry = ToolRegistry::new();
        registry
            .register_sync_fn(echo_schema("first"), |_, _| Ok(json!(1)))
            .expect("first registration should succeed");

        let error = registry
            .register_sync_fn(echo_schema("second"), |_, _| Ok(json!(2)))
            .expect_err("second registration should fail");

        assert_eq!(error.kind, RegistryErrorKind::DuplicateOperation);
        assert_eq!(error.operation, "echo");
        assert_eq!(registry.len(), 1);
        let tool = registry.lookup("echo").expect("echo should remain registered");
        assert_eq!(tool.schema().description, "first");
    }

    #[test]
    fn invalid_schema_is_not_registered() {
        let mut registry = ToolRegistry::new();
        let schema = ToolSchema::new("bad", "Bad default")
            .with_parameter(ParameterSpec::optional("limit", ParameterKind::Integer, true));

        let error = registry
            .register_sync_fn(schema, |_, _| Ok(json!(null)))
            .expect_err("schema should be rejected");

        assert_eq!(error.kind, RegistryErrorKind::InvalidSchema);
        assert!(registry.is_empty());
    }

    #[test]
    fn lookup_of_unknown_name_is_not_found() {
        let registry = ToolRegistry::new();
        let error = registry.lookup("noop").err().expect("lookup should fail");

        assert_eq!(error.kind, ToolErrorKind::NotFound);
        assert_eq!(error.message, "unknown operation: noop");
    }

    #[test]
    fn schemas_are_sorted_by_name() {
        let mut registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry
                .register_sync_fn(ToolSchema::new(name, name), |_, _| Ok(json!(null)))
                .expect("registration should succeed");
        }

        let names: Vec<_> = registry.schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
