//! Prompt documents and title derivation.
//!
//! ```rust
//! use gprompts::Prompt;
//!
//! let guide = Prompt::from_document("alpha", "# Alpha Guide\n\nSteps...");
//! let plain = Prompt::from_document("beta", "plain text");
//!
//! assert_eq!(guide.title, "Alpha Guide");
//! assert_eq!(plain.title, "Prompt: beta");
//! ```

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub name: String,
    pub title: String,
    pub body: String,
}

impl Prompt {
    /// Builds a prompt from a document body; the body is kept verbatim.
    pub fn from_document(name: impl Into<String>, body: impl Into<String>) -> Self {
        let name = name.into();
        let body = body.into();
        let title = derive_title(&name, &body);
        Self { name, title, body }
    }
}

/// First line of the trimmed body with leading `#` markers removed when it is
/// a heading, otherwise `Prompt: <name>`. An empty heading also falls back.
pub fn derive_title(name: &str, body: &str) -> String {
    let heading = body
        .trim()
        .lines()
        .next()
        .filter(|line| line.starts_with('#'))
        .map(|line| line.trim_start_matches('#').trim())
        .filter(|title| !title.is_empty());

    match heading {
        Some(title) => title.to_string(),
        None => format!("Prompt: {name}"),
    }
}
