//! Tool registry, argument validation, and the dispatch boundary.
//!
//! ```rust
//! use gtooling::{Dispatcher, Envelope, ParameterKind, ParameterSpec, ToolRegistry, ToolSchema};
//! use serde_json::{Map, json};
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register_sync_fn(
//!         ToolSchema::new("echo", "Echoes a message")
//!             .with_parameter(ParameterSpec::required("msg", ParameterKind::String)),
//!         |args, _ctx| Ok(json!({ "echo": args.string("msg")? })),
//!     )
//!     .expect("echo registers once");
//!
//! let dispatcher = Dispatcher::new(registry);
//! let runtime = tokio::runtime::Builder::new_current_thread().build().expect("runtime");
//! let envelope = runtime.block_on(dispatcher.invoke("noop", Map::new()));
//! assert_eq!(envelope, Envelope::failure("unknown operation: noop"));
//! ```

mod args;
mod dispatcher;
mod error;
mod hooks;
mod registry;
mod schema;
mod tool;
mod types;

pub mod prelude {
    pub use crate::{
        Dispatcher, Envelope, InvocationContext, ParameterKind, ParameterSpec, Tool,
        ToolArguments, ToolError, ToolErrorKind, ToolRegistry, ToolSchema, UnknownArguments,
    };
}

pub use args::{ArgValue, ToolArguments, UnknownArguments, bind_arguments, coerce_value};
pub use dispatcher::Dispatcher;
pub use error::{RegistryError, RegistryErrorKind, ToolError, ToolErrorKind};
pub use hooks::{DispatchHooks, NoopDispatchHooks};
pub use registry::ToolRegistry;
pub use schema::{ParameterKind, ParameterSpec, ToolSchema};
pub use tool::{FunctionTool, Tool, ToolFuture};
pub use types::{Envelope, InvocationContext};
