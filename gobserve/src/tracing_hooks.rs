//! Tracing-based dispatch hooks.

use std::time::Duration;

use gtooling::{DispatchHooks, InvocationContext, ToolError};

/// Logs each invocation with structured fields. Caller mistakes (unknown
/// operation, bad arguments, auth) log at `warn`; everything else at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDispatchHooks;

impl DispatchHooks for TracingDispatchHooks {
    fn on_invoke_start(&self, operation: &str, context: &InvocationContext) {
        tracing::info!(
            phase = "dispatch",
            event = "invoke_start",
            operation,
            call_id = context.call_id.as_ref().map(|id| id.as_str()),
            trace_id = context.trace_id.as_ref().map(|id| id.as_str())
        );
    }

    fn on_invoke_success(&self, operation: &str, context: &InvocationContext, elapsed: Duration) {
        tracing::info!(
            phase = "dispatch",
            event = "invoke_success",
            operation,
            call_id = context.call_id.as_ref().map(|id| id.as_str()),
            trace_id = context.trace_id.as_ref().map(|id| id.as_str()),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_invoke_failure(
        &self,
        operation: &str,
        context: &InvocationContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        if error.is_user_error() {
            tracing::warn!(
                phase = "dispatch",
                event = "invoke_failure",
                operation,
                call_id = context.call_id.as_ref().map(|id| id.as_str()),
                trace_id = context.trace_id.as_ref().map(|id| id.as_str()),
                elapsed_ms = elapsed.as_millis() as u64,
                error_kind = ?error.kind,
                error = %error
            );
        } else {
            tracing::error!(
                phase = "dispatch",
                event = "invoke_failure",
                operation,
                call_id = context.call_id.as_ref().map(|id| id.as_str()),
                trace_id = context.trace_id.as_ref().map(|id| id.as_str()),
                elapsed_ms = elapsed.as_millis() as u64,
                error_kind = ?error.kind,
                retryable = error.retryable,
                error = %error
            );
        }
    }
}
