//! One-shot directory loader that turns documents into a prompt catalog.
//!
//! ```rust
//! use gprompts::PromptLoader;
//!
//! let catalog = PromptLoader::new().load("/definitely/not/here");
//! assert!(catalog.is_empty());
//! ```

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Prompt, PromptCatalog, PromptLoadWarning, PromptLoadWarningKind};

#[derive(Debug, Clone)]
pub struct PromptLoader {
    extensions: Vec<String>,
}

impl Default for PromptLoader {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string()],
        }
    }
}

/// Catalog produced by a load along with every file that was skipped.
#[derive(Debug, Clone, Default)]
pub struct PromptLoadReport {
    pub catalog: PromptCatalog,
    pub warnings: Vec<PromptLoadWarning>,
}

impl PromptLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also accept files with `extension` (compared case-insensitively).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into().trim_start_matches('.').to_ascii_lowercase();
        if !self.extensions.contains(&extension) {
            self.extensions.push(extension);
        }
        self
    }

    pub fn load(&self, directory: impl AsRef<Path>) -> PromptCatalog {
        self.load_with_report(directory).catalog
    }

    pub fn load_with_report(&self, directory: impl AsRef<Path>) -> PromptLoadReport {
        let directory = directory.as_ref();
        let mut report = PromptLoadReport::default();

        if !directory.exists() {
            tracing::debug!(
                phase = "prompts",
                event = "directory_missing",
                directory = %directory.display()
            );
            return report;
        }

        let paths = match self.document_paths(directory, &mut report.warnings) {
            Ok(paths) => paths,
            Err(error) => {
                report.warnings.push(PromptLoadWarning::new(
                    PromptLoadWarningKind::Io,
                    directory,
                    format!("failed to list directory: {error}"),
                ));
                log_warnings(&report.warnings);
                return report;
            }
        };

        for path in paths {
            match read_prompt(&path) {
                Ok(prompt) => {
                    if let Err(rejected) = report.catalog.insert(prompt) {
                        report.warnings.push(PromptLoadWarning::new(
                            PromptLoadWarningKind::DuplicateName,
                            &path,
                            format!("prompt '{}' was already loaded", rejected.name),
                        ));
                    }
                }
                Err(warning) => report.warnings.push(warning),
            }
        }

        log_warnings(&report.warnings);
        tracing::info!(
            phase = "prompts",
            event = "loaded",
            directory = %directory.display(),
            prompts = report.catalog.len(),
            skipped = report.warnings.len()
        );
        report
    }

    fn document_paths(
        &self,
        directory: &Path,
        warnings: &mut Vec<PromptLoadWarning>,
    ) -> std::io::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(directory)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    warnings.push(PromptLoadWarning::new(
                        PromptLoadWarningKind::Io,
                        directory,
                        format!("failed to read directory entry: {error}"),
                    ));
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && self.accepts(&path) {
                paths.push(path);
            }
        }

        paths.sort_by(|left, right| left.file_name().cmp(&right.file_name()));
        Ok(paths)
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_ascii_lowercase)
            .is_some_and(|extension| self.extensions.contains(&extension))
    }
}

fn read_prompt(path: &Path) -> Result<Prompt, PromptLoadWarning> {
    let name = path
        .file_stem()
        .and_then(OsStr::to_str)
        .filter(|stem| !stem.trim().is_empty())
        .ok_or_else(|| {
            PromptLoadWarning::new(
                PromptLoadWarningKind::InvalidName,
                path,
                "file name is not a usable prompt name",
            )
        })?;

    let bytes = fs::read(path).map_err(|error| {
        PromptLoadWarning::new(
            PromptLoadWarningKind::Io,
            path,
            format!("failed to read file: {error}"),
        )
    })?;
    let body = String::from_utf8(bytes).map_err(|error| {
        PromptLoadWarning::new(
            PromptLoadWarningKind::Decode,
            path,
            format!("file is not valid UTF-8: {error}"),
        )
    })?;

    Ok(Prompt::from_document(name, body))
}

fn log_warnings(warnings: &[PromptLoadWarning]) {
    for warning in warnings {
        tracing::warn!(
            phase = "prompts",
            event = "skipped",
            path = %warning.path.display(),
            kind = ?warning.kind,
            "{warning}"
        );
    }
}

/// Loads `*.md` documents from `directory` with the default loader.
pub fn load_prompts(directory: impl AsRef<Path>) -> PromptCatalog {
    PromptLoader::new().load(directory)
}
