//! Metrics-based dispatch hooks.
//!
//! ```rust
//! use gobserve::MetricsDispatchHooks;
//! use gtooling::DispatchHooks;
//!
//! fn accepts_dispatch_hooks(_hooks: &dyn DispatchHooks) {}
//!
//! let hooks = MetricsDispatchHooks;
//! accepts_dispatch_hooks(&hooks);
//! ```

use std::time::Duration;

use gtooling::{DispatchHooks, InvocationContext, ToolError};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsDispatchHooks;

impl DispatchHooks for MetricsDispatchHooks {
    fn on_invoke_start(&self, operation: &str, _context: &InvocationContext) {
        metrics::counter!(
            "gantry_tool_invocation_start_total",
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_invoke_success(&self, operation: &str, _context: &InvocationContext, elapsed: Duration) {
        metrics::counter!(
            "gantry_tool_invocation_success_total",
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "gantry_tool_invocation_duration_seconds",
            "operation" => operation.to_string(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_invoke_failure(
        &self,
        operation: &str,
        _context: &InvocationContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "gantry_tool_invocation_failure_total",
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "gantry_tool_invocation_duration_seconds",
            "operation" => operation.to_string(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}
