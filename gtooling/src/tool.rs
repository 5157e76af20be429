//! Tool trait contract for registry-managed operations.
//!
//! ```rust
//! use gtooling::{FunctionTool, ParameterKind, ParameterSpec, Tool, ToolError, ToolSchema};
//! use serde_json::json;
//!
//! let tool = FunctionTool::new(
//!     ToolSchema::new("echo", "Echoes input")
//!         .with_parameter(ParameterSpec::required("msg", ParameterKind::String)),
//!     |args, _ctx| async move { Ok::<_, ToolError>(json!({ "echo": args.string("msg")? })) },
//! );
//!
//! assert_eq!(tool.schema().name, "echo");
//! ```

use std::future::Future;
use std::sync::Arc;

use gcommon::BoxFuture;
use serde_json::Value;

use crate::dispatcher::panic_message;
use crate::{InvocationContext, ToolArguments, ToolError, ToolSchema};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

pub trait Tool: Send + Sync {
    fn schema(&self) -> &ToolSchema;

    fn invoke<'a>(
        &'a self,
        args: ToolArguments,
        context: &'a InvocationContext,
    ) -> ToolFuture<'a, Result<Value, ToolError>>;
}

type ToolHandler = dyn Fn(ToolArguments, InvocationContext) -> ToolFuture<'static, Result<Value, ToolError>>
    + Send
    + Sync;

pub struct FunctionTool {
    schema: ToolSchema,
    handler: Arc<ToolHandler>,
}

impl FunctionTool {
    pub fn new<F, Fut>(schema: ToolSchema, handler: F) -> Self
    where
        F: Fn(ToolArguments, InvocationContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        let handler: Arc<ToolHandler> =
            Arc::new(move |args, context| Box::pin(handler(args, context)));

        Self { schema, handler }
    }

    /// Wraps a handler that may block; each call runs on the blocking pool so
    /// it cannot stall other invocations.
    pub fn blocking<F>(schema: ToolSchema, handler: F) -> Self
    where
        F: Fn(ToolArguments, InvocationContext) -> Result<Value, ToolError>
            + Send
            + Sync
            + 'static,
    {
        let handler = Arc::new(handler);
        Self::new(schema, move |args, context| {
            let handler = Arc::clone(&handler);
            async move {
                tokio::task::spawn_blocking(move || handler(args, context))
                    .await
                    .map_err(|err| {
                        if err.is_panic() {
                            let panic = err.into_panic();
                            ToolError::execution(format!(
                                "handler panicked: {}",
                                panic_message(panic.as_ref())
                            ))
                        } else {
                            ToolError::execution(format!("handler task failed: {err}"))
                        }
                    })?
            }
        })
    }
}

impl Tool for FunctionTool {
    fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    fn invoke<'a>(
        &'a self,
        args: ToolArguments,
        context: &'a InvocationContext,
    ) -> ToolFuture<'a, Result<Value, ToolError>> {
        (self.handler)(args, context.clone())
    }
}
