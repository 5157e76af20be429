//! Immutable prompt documents loaded once from a directory at startup.
//!
//! ```rust
//! use gprompts::{PromptErrorKind, load_prompts};
//!
//! let catalog = load_prompts("does-not-exist");
//! assert!(catalog.list().is_empty());
//! assert_eq!(
//!     catalog.get("missing").expect_err("nothing loaded").kind,
//!     PromptErrorKind::NotFound
//! );
//! ```

mod catalog;
mod error;
mod loader;
mod types;

pub use catalog::PromptCatalog;
pub use error::{PromptError, PromptErrorKind, PromptLoadWarning, PromptLoadWarningKind};
pub use loader::{PromptLoadReport, PromptLoader, load_prompts};
pub use types::{Prompt, derive_title};
