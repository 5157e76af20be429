//! Registry-backed dispatcher with a single failure-isolation boundary.
//!
//! Every call to [`Dispatcher::invoke`] resolves to an [`Envelope`]: unknown
//! operations, argument errors, handler errors and handler panics all become
//! `Envelope::Failure`.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;
use serde_json::{Map, Value};

use crate::{
    DispatchHooks, Envelope, InvocationContext, NoopDispatchHooks, ToolError, ToolRegistry,
    ToolSchema, UnknownArguments, bind_arguments,
};

#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    hooks: Arc<dyn DispatchHooks>,
    unknown_arguments: UnknownArguments,
}

impl Dispatcher {
    /// Freezes `registry`; no registration is possible past this point.
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            hooks: Arc::new(NoopDispatchHooks),
            unknown_arguments: UnknownArguments::default(),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn DispatchHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_unknown_arguments(mut self, unknown_arguments: UnknownArguments) -> Self {
        self.unknown_arguments = unknown_arguments;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn unknown_arguments(&self) -> UnknownArguments {
        self.unknown_arguments
    }

    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.registry.schemas()
    }

    pub async fn invoke(&self, name: &str, raw_args: Map<String, Value>) -> Envelope {
        self.invoke_with_context(name, raw_args, InvocationContext::default())
            .await
    }

    pub async fn invoke_with_context(
        &self,
        name: &str,
        raw_args: Map<String, Value>,
        context: InvocationContext,
    ) -> Envelope {
        let started = Instant::now();
        self.notify(|hooks| hooks.on_invoke_start(name, &context));

        match self.execute(name, &raw_args, &context).await {
            Ok(payload) => {
                let elapsed = started.elapsed();
                self.notify(|hooks| hooks.on_invoke_success(name, &context, elapsed));
                Envelope::success(payload)
            }
            Err(error) => {
                let error = match &context.call_id {
                    Some(call_id) => error.with_call_id(call_id.clone()),
                    None => error,
                };
                let elapsed = started.elapsed();
                self.notify(|hooks| hooks.on_invoke_failure(name, &context, &error, elapsed));
                Envelope::failure(error.message)
            }
        }
    }

    /// Hook panics are dropped; they never change the envelope.
    fn notify(&self, callback: impl FnOnce(&dyn DispatchHooks)) {
        let _ = catch_unwind(AssertUnwindSafe(|| callback(self.hooks.as_ref())));
    }

    async fn execute(
        &self,
        name: &str,
        raw_args: &Map<String, Value>,
        context: &InvocationContext,
    ) -> Result<Value, ToolError> {
        let tool = self.registry.lookup(name)?;
        let args = bind_arguments(tool.schema(), raw_args, self.unknown_arguments)
            .map_err(|error| error.for_operation(name))?;

        // The handler is called from inside the future so a panic while
        // building it is caught as well.
        let call = async { tool.invoke(args, context).await };
        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(result) => result.map_err(|error| error.for_operation(name)),
            Err(panic) => Err(ToolError::execution(format!(
                "handler panicked: {}",
                panic_message(panic.as_ref())
            ))
            .for_operation(name)),
        }
    }
}

pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
