//! Deterministic traversal of a template root.
//!
//! Entries are yielded parents first, siblings sorted by file name, and the
//! root itself is never yielded.

use std::borrow::Cow;
use std::fs;
use std::path::{Component, Path, PathBuf};

use include_dir::{Dir, DirEntry};
use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::ignore::TemplateFilter;
use crate::loader::TemplateRoot;

/// Where an entry's content comes from.
#[derive(Debug, Clone)]
enum ContentSource {
    None,
    Embedded(&'static [u8]),
    Disk(PathBuf),
}

/// One file or directory found under the template root.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Slash-separated path relative to the template root.
    pub relative_path: String,
    pub is_dir: bool,
    /// Permission bits of a file, when the source carries them. Always `None` for directories.
    pub mode: Option<u32>,
    content: ContentSource,
}

impl Entry {
    pub fn directory<S: Into<String>>(relative_path: S) -> Self {
        Self {
            relative_path: relative_path.into(),
            is_dir: true,
            mode: None,
            content: ContentSource::None,
        }
    }

    pub fn embedded_file<S: Into<String>>(relative_path: S, contents: &'static [u8]) -> Self {
        Self {
            relative_path: relative_path.into(),
            is_dir: false,
            mode: None,
            content: ContentSource::Embedded(contents),
        }
    }

    pub fn disk_file<S: Into<String>>(relative_path: S, path: PathBuf, mode: Option<u32>) -> Self {
        Self {
            relative_path: relative_path.into(),
            is_dir: false,
            mode,
            content: ContentSource::Disk(path),
        }
    }

    /// Reads the file content. Directories have no content.
    ///
    /// # Errors
    /// * `Error::ReadError` if the file on disk cannot be read
    pub fn read(&self) -> Result<Cow<'static, [u8]>> {
        match &self.content {
            ContentSource::None => Ok(Cow::Borrowed(&[])),
            ContentSource::Embedded(contents) => Ok(Cow::Borrowed(*contents)),
            ContentSource::Disk(path) => fs::read(path)
                .map(Cow::Owned)
                .map_err(|source| Error::ReadError { path: path.clone(), source }),
        }
    }
}

/// Converts a relative path into its slash-separated form.
///
/// # Errors
/// * `Error::WalkError` if the path is empty or has anything but normal components
pub fn to_relative_string(path: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(
                part.to_str()
                    .ok_or_else(|| {
                        Error::WalkError(format!("non UTF-8 path '{}'", path.display()))
                    })?
                    .to_string(),
            ),
            _ => {
                return Err(Error::WalkError(format!(
                    "path '{}' escapes the template root",
                    path.display()
                )))
            }
        }
    }
    if parts.is_empty() {
        return Err(Error::WalkError("empty relative path".to_string()));
    }
    Ok(parts.join("/"))
}

#[cfg(unix)]
fn mode_of(metadata: &fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn mode_of(_metadata: &fs::Metadata) -> Option<u32> {
    None
}

/// Walks a template root, skipping entries rejected by `filter`.
pub fn walk<'a>(
    root: &'a TemplateRoot,
    filter: &'a TemplateFilter,
) -> Box<dyn Iterator<Item = Result<Entry>> + 'a> {
    debug!("Walking {root}");
    match root {
        TemplateRoot::Embedded(dir) => walk_embedded(*dir, filter),
        TemplateRoot::Directory(path) => walk_directory(path, filter),
    }
}

fn walk_directory<'a>(
    root: &'a Path,
    filter: &'a TemplateFilter,
) -> Box<dyn Iterator<Item = Result<Entry>> + 'a> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| match entry.path().strip_prefix(root) {
            Ok(relative) => !filter.is_ignored(&relative.to_string_lossy().replace('\\', "/")),
            Err(_) => true,
        });

    Box::new(walker.map(move |dir_entry| {
        let dir_entry = dir_entry.map_err(|e| Error::WalkError(e.to_string()))?;
        let path = dir_entry.path();
        let relative = path.strip_prefix(root).map_err(|e| Error::WalkError(e.to_string()))?;
        let relative_path = to_relative_string(relative)?;
        if dir_entry.file_type().is_dir() {
            return Ok(Entry::directory(relative_path));
        }

        let metadata = dir_entry.metadata().map_err(|e| Error::WalkError(e.to_string()))?;
        Ok(Entry::disk_file(relative_path, path.to_path_buf(), mode_of(&metadata)))
    }))
}

fn walk_embedded<'a>(
    root: &'static Dir<'static>,
    filter: &'a TemplateFilter,
) -> Box<dyn Iterator<Item = Result<Entry>> + 'a> {
    let mut entries = Vec::new();
    collect_embedded(root, filter, &mut entries);
    Box::new(entries.into_iter())
}

fn collect_embedded(
    dir: &'static Dir<'static>,
    filter: &TemplateFilter,
    out: &mut Vec<Result<Entry>>,
) {
    let mut children: Vec<&'static DirEntry<'static>> = dir.entries().iter().collect();
    children.sort_by(|a, b| a.path().file_name().cmp(&b.path().file_name()));

    for child in children {
        let relative_path = match to_relative_string(child.path()) {
            Ok(path) => path,
            Err(e) => {
                out.push(Err(e));
                continue;
            }
        };
        if filter.is_ignored(&relative_path) {
            debug!("Skipping ignored entry '{relative_path}'");
            continue;
        }

        match child {
            DirEntry::Dir(subdir) => {
                out.push(Ok(Entry::directory(relative_path)));
                collect_embedded(subdir, filter, out);
            }
            DirEntry::File(file) => {
                out.push(Ok(Entry::embedded_file(relative_path, file.contents())))
            }
        }
    }
}
