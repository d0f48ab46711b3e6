//! File and directory ignore pattern handling for starter templates.
//! Entries matching a pattern from the template configuration are left out
//! of the generated project, similar to .gitignore functionality.

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;

/// Decides which template entries are skipped while walking.
///
/// The template configuration file at the root is always skipped.
#[derive(Debug, Clone)]
pub struct TemplateFilter {
    patterns: GlobSet,
}

impl Default for TemplateFilter {
    fn default() -> Self {
        Self { patterns: GlobSet::empty() }
    }
}

impl TemplateFilter {
    /// Compiles glob patterns into a filter.
    ///
    /// # Arguments
    /// * `patterns` - Glob patterns matched against slash-separated relative paths
    ///
    /// # Errors
    /// * `Error::ConfigError` if a pattern is not a valid glob
    ///
    /// # Example
    /// ```ignore
    /// ignore:
    ///   - "*.log"
    ///   - ".git"
    /// ```
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            debug!("Adding ignore pattern '{pattern}'");
            builder.add(Glob::new(pattern).map_err(|e| {
                Error::ConfigError(format!("invalid ignore pattern '{pattern}': {e}"))
            })?);
        }
        let patterns = builder
            .build()
            .map_err(|e| Error::ConfigError(format!("ignore patterns loading failed: {e}")))?;

        Ok(Self { patterns })
    }

    /// Returns true if the slash-separated relative path must not be materialized.
    pub fn is_ignored(&self, relative_path: &str) -> bool {
        if relative_path.is_empty() {
            return false;
        }
        if CONFIG_FILES.contains(&relative_path) {
            return true;
        }
        self.patterns.is_match(relative_path)
    }
}
