//! The project being created and the guard against overwriting an existing one.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{Error, Result};

/// Name and location of the project to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    name: String,
    work_dir: PathBuf,
    destination_root: PathBuf,
}

impl ProjectContext {
    /// Validates the project name and computes the destination directory.
    ///
    /// # Arguments
    /// * `name` - Project name given on the command line
    /// * `work_dir` - Directory the project is created in
    ///
    /// # Errors
    /// * `Error::ValidationError` if the name is empty, `.`/`..`, or contains a path separator
    pub fn new<S: Into<String>, P: Into<PathBuf>>(name: S, work_dir: P) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: &str| Error::ValidationError {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.trim().is_empty() {
            return Err(invalid("the name must not be empty"));
        }
        if name == "." || name == ".." {
            return Err(invalid("the name must not be a relative directory marker"));
        }
        if name.contains(['/', '\\']) {
            return Err(invalid("the name must not contain path separators"));
        }
        if name.contains('\0') {
            return Err(invalid("the name must not contain NUL bytes"));
        }

        let work_dir = work_dir.into();
        let destination_root = work_dir.join(&name);
        Ok(Self { name, work_dir, destination_root })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn destination_root(&self) -> &Path {
        &self.destination_root
    }

    /// Fails if the destination already exists. Runs before any write.
    ///
    /// # Errors
    /// * `Error::DestinationExists` if anything is present at the destination path
    pub fn ensure_available(&self) -> Result<()> {
        ensure_output_dir(&self.destination_root)
    }

    /// Creates the destination directory.
    ///
    /// Losing a race against another process that created it in between is
    /// only logged; the walk then writes into the existing directory.
    pub fn create_root(&self) -> Result<()> {
        match fs::create_dir(&self.destination_root) {
            Ok(()) => {
                debug!("Created '{}'", self.destination_root.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                warn!(
                    "Destination '{}' appeared after the collision check, writing into it",
                    self.destination_root.display()
                );
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(&self.destination_root).map_err(|source| Error::WriteError {
                    path: self.destination_root.clone(),
                    source,
                })
            }
            Err(source) => {
                Err(Error::WriteError { path: self.destination_root.clone(), source })
            }
        }
    }
}

/// Ensures the output directory does not exist yet.
///
/// # Errors
/// * `Error::DestinationExists` if the path exists (a broken symlink counts as existing)
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() || output_dir.symlink_metadata().is_ok() {
        return Err(Error::DestinationExists { destination: output_dir.to_path_buf() });
    }
    Ok(())
}
