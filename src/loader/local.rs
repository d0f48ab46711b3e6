use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;
use crate::loader::{LoadedTemplate, TemplateRoot};

/// Returns the first candidate that is an existing directory.
///
/// # Errors
/// * `Error::TemplateNotFound` listing every probed path if none exists
pub fn discover(candidates: &[PathBuf]) -> Result<PathBuf> {
    for candidate in candidates {
        debug!("Probing template directory '{}'.", candidate.display());
        if candidate.is_dir() {
            return Ok(candidate.clone());
        }
    }

    Err(Error::TemplateNotFound {
        searched: candidates
            .iter()
            .map(|c| format!("'{}'", c.display()))
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Loader for templates from the local filesystem.
pub struct LocalLoader<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    /// Creates a new LocalLoader instance.
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

impl<P: AsRef<Path>> TemplateLoader for LocalLoader<P> {
    /// Loads a template from the local filesystem.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if the path is not a directory
    fn load(&self) -> Result<LoadedTemplate> {
        let path = self.path.as_ref();
        if !path.is_dir() {
            return Err(Error::TemplateNotFound { searched: format!("'{}'", path.display()) });
        }

        Ok(LoadedTemplate::new(TemplateRoot::Directory(path.to_path_buf())))
    }
}
