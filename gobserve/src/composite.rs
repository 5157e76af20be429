use std::sync::Arc;
use std::time::Duration;

use gtooling::{DispatchHooks, InvocationContext, ToolError};

/// Fans each callback out to several hooks in registration order.
#[derive(Clone, Default)]
pub struct CompositeDispatchHooks {
    hooks: Vec<Arc<dyn DispatchHooks>>,
}

impl CompositeDispatchHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<H>(mut self, hooks: H) -> Self
    where
        H: DispatchHooks + 'static,
    {
        self.hooks.push(Arc::new(hooks));
        self
    }

    pub fn push(&mut self, hooks: Arc<dyn DispatchHooks>) {
        self.hooks.push(hooks);
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl DispatchHooks for CompositeDispatchHooks {
    fn on_invoke_start(&self, operation: &str, context: &InvocationContext) {
        for hooks in &self.hooks {
            hooks.on_invoke_start(operation, context);
        }
    }

    fn on_invoke_success(&self, operation: &str, context: &InvocationContext, elapsed: Duration) {
        for hooks in &self.hooks {
            hooks.on_invoke_success(operation, context, elapsed);
        }
    }

    fn on_invoke_failure(
        &self,
        operation: &str,
        context: &InvocationContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        for hooks in &self.hooks {
            hooks.on_invoke_failure(operation, context, error, elapsed);
        }
    }
}
