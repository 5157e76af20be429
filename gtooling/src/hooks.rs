//! Dispatch lifecycle hooks.
//!
//! ```rust
//! use gtooling::{DispatchHooks, NoopDispatchHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn DispatchHooks) {}
//!
//! let hooks = NoopDispatchHooks;
//! assert_hooks_trait(&hooks);
//! ```

use std::time::Duration;

use crate::{InvocationContext, ToolError};

pub trait DispatchHooks: Send + Sync {
    fn on_invoke_start(&self, _operation: &str, _context: &InvocationContext) {}

    fn on_invoke_success(
        &self,
        _operation: &str,
        _context: &InvocationContext,
        _elapsed: Duration,
    ) {
    }

    fn on_invoke_failure(
        &self,
        _operation: &str,
        _context: &InvocationContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDispatchHooks;

impl DispatchHooks for NoopDispatchHooks {}
