use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use gtooling::{DispatchHooks, InvocationContext, ToolError};

/// Swallows panics raised by the wrapped hooks so observers never affect a
/// dispatch outcome.
pub struct SafeDispatchHooks<H> {
    inner: H,
}

impl<H> SafeDispatchHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H> DispatchHooks for SafeDispatchHooks<H>
where
    H: DispatchHooks,
{
    fn on_invoke_start(&self, operation: &str, context: &InvocationContext) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_invoke_start(operation, context)
        }));
    }

    fn on_invoke_success(&self, operation: &str, context: &InvocationContext, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_invoke_success(operation, context, elapsed)
        }));
    }

    fn on_invoke_failure(
        &self,
        operation: &str,
        context: &InvocationContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_invoke_failure(operation, context, error, elapsed)
        }));
    }
}
