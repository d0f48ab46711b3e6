//! Maps template entries to destination operations and applies them.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_FILE_MODE;
use crate::error::{Error, Result};
use crate::transform::Transformer;
use crate::walker::Entry;

/// What to do at the destination for one template entry.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOperation {
    /// Create a directory and any missing ancestors.
    CreateDir { target: PathBuf },
    /// Write content to a file, creating missing ancestors.
    Write { target: PathBuf, content: Vec<u8>, mode: u32, binary: bool },
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOperation::CreateDir { target } => write!(f, "mkdir: '{}'", target.display()),
            FileOperation::Write { target, binary: true, .. } => {
                write!(f, "copy: '{}'", target.display())
            }
            FileOperation::Write { target, .. } => write!(f, "write: '{}'", target.display()),
        }
    }
}

/// Joins a slash-separated relative path onto the output root.
pub fn resolve_target_path<P: AsRef<Path>>(relative_path: &str, output_root: P) -> PathBuf {
    relative_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(output_root.as_ref().to_path_buf(), |path, segment| path.join(segment))
}

/// Checks that a (possibly renamed) relative path stays a plain relative path.
pub fn is_rendered_path_valid(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && path.split('/').all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

/// Turns template entries into [`FileOperation`]s for one project.
pub struct Processor<'a> {
    transformer: &'a Transformer,
    output_root: &'a Path,
}

impl<'a> Processor<'a> {
    pub fn new(transformer: &'a Transformer, output_root: &'a Path) -> Self {
        Self { transformer, output_root }
    }

    /// Computes the operation for an entry, reading and transforming file content.
    ///
    /// # Errors
    /// * `Error::WalkError` if path substitution produces an invalid path
    /// * `Error::ReadError` if the file content cannot be read
    pub fn process(&self, entry: &Entry) -> Result<FileOperation> {
        let rendered = self.transformer.transform_path(&entry.relative_path);
        if !is_rendered_path_valid(&rendered) {
            return Err(Error::WalkError(format!(
                "'{}' renders to the invalid path '{rendered}'",
                entry.relative_path
            )));
        }
        let target = resolve_target_path(&rendered, self.output_root);

        if entry.is_dir {
            return Ok(FileOperation::CreateDir { target });
        }

        let raw = entry.read()?;
        let transformed = self.transformer.transform_content(&raw);
        let binary = transformed.is_binary();
        if binary {
            debug!("Binary file '{}' is copied unchanged", entry.relative_path);
        }

        Ok(FileOperation::Write {
            target,
            content: transformed.as_bytes().to_vec(),
            mode: entry.mode.unwrap_or(DEFAULT_FILE_MODE),
            binary,
        })
    }
}

/// Performs a [`FileOperation`] on the file system.
///
/// Existing files are overwritten; existing directories are not an error.
///
/// # Errors
/// * `Error::WriteError` if a directory or file cannot be created
pub fn apply(operation: &FileOperation) -> Result<()> {
    match operation {
        FileOperation::CreateDir { target } => create_dir_all(target),
        FileOperation::Write { target, content, mode, .. } => {
            if let Some(parent) = target.parent() {
                create_dir_all(parent)?;
            }
            fs::write(target, content)
                .map_err(|source| Error::WriteError { path: target.clone(), source })?;
            set_mode(target, *mode)
        }
    }
}

fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|source| Error::WriteError { path: path.to_path_buf(), source })
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .map_err(|source| Error::WriteError { path: path.to_path_buf(), source })
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
