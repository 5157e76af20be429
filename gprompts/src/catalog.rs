//! Read-only prompt catalog keyed by prompt name.

use std::sync::Arc;

use gcommon::Registry;

use crate::{Prompt, PromptError};

#[derive(Debug, Clone, Default)]
pub struct PromptCatalog {
    prompts: Registry<String, Arc<Prompt>>,
}

impl PromptCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the loader populates a catalog; callers get it fully built.
    pub(crate) fn insert(&mut self, prompt: Prompt) -> Result<(), Prompt> {
        let name = prompt.name.clone();
        self.prompts
            .try_insert(name, Arc::new(prompt))
            .map_err(Arc::unwrap_or_clone)
    }

    pub fn get(&self, name: &str) -> Result<Arc<Prompt>, PromptError> {
        self.prompts
            .get(name)
            .cloned()
            .ok_or_else(|| PromptError::not_found(format!("unknown prompt: {name}")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.prompts.contains_key(name)
    }

    /// Prompt names in sorted order.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.prompts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Prompts sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Prompt>> {
        let mut prompts: Vec<_> = self.prompts.values().collect();
        prompts.sort_by(|left, right| left.name.cmp(&right.name));
        prompts.into_iter()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PromptErrorKind;

    fn catalog() -> PromptCatalog {
        let mut catalog = PromptCatalog::new();
        catalog
            .insert(Prompt::from_document("zeta", "# Zeta"))
            .expect("zeta inserts");
        catalog
            .insert(Prompt::from_document("alpha", "# Alpha"))
            .expect("alpha inserts");
        catalog
    }

    #[test]
    fn list_and_iter_are_sorted() {
        let catalog = catalog();
        assert_eq!(catalog.list(), vec!["alpha", "zeta"]);
        let titles: Vec<_> = catalog.iter().map(|prompt| prompt.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn duplicate_insert_returns_rejected_prompt() {
        let mut catalog = catalog();
        let rejected = catalog
            .insert(Prompt::from_document("alpha", "# Other"))
            .expect_err("duplicate should be rejected");

        assert_eq!(rejected.title, "Other");
        assert_eq!(catalog.get("alpha").expect("alpha").title, "Alpha");
    }

    #[test]
    fn get_reports_every_miss_as_not_found() {
        let catalog = catalog();

        let missing = catalog.get("gamma").expect_err("gamma is absent");
        assert_eq!(missing.kind, PromptErrorKind::NotFound);
        assert_eq!(missing.message, "unknown prompt: gamma");

        let blank = catalog.get(" ").expect_err("blank name is absent");
        assert_eq!(blank.kind, PromptErrorKind::NotFound);
        assert_eq!(blank.message, "unknown prompt:  ");
    }
}
