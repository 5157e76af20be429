//! Dispatch observability hooks: structured logs, metrics, and panic isolation.
//!
//! ```rust
//! use gobserve::{CompositeDispatchHooks, MetricsDispatchHooks, SafeDispatchHooks, TracingDispatchHooks};
//!
//! let hooks = SafeDispatchHooks::new(
//!     CompositeDispatchHooks::new()
//!         .with(TracingDispatchHooks)
//!         .with(MetricsDispatchHooks),
//! );
//! assert_eq!(hooks.inner().len(), 2);
//! ```

mod composite;
mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use composite::CompositeDispatchHooks;
pub use metrics_hooks::MetricsDispatchHooks;
pub use safe_hooks::SafeDispatchHooks;
pub use tracing_hooks::TracingDispatchHooks;

pub mod prelude {
    pub use crate::{
        CompositeDispatchHooks, MetricsDispatchHooks, SafeDispatchHooks, TracingDispatchHooks,
    };
}
