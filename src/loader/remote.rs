//! Remote templates: download a zip archive, unpack it into a scratch
//! directory and locate the `template` directory inside it.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, warn};
use tempfile::TempDir;
use url::Url;
use zip::ZipArchive;

use crate::constants::{ARCHIVE_FILE, SCRATCH_PREFIX, TEMPLATE_DIR};
use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;
use crate::loader::{LoadedTemplate, RemoteOptions, TemplateRoot};
use crate::stage::Stage;

/// Downloaded archive on disk. The file is deleted when this value is dropped.
#[derive(Debug)]
pub struct ArchiveFile {
    path: PathBuf,
}

impl ArchiveFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ArchiveFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed archive '{}'.", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove archive '{}': {e}", self.path.display()),
        }
    }
}

/// Temporary artifacts of a remote load: the archive and its extraction directory.
#[derive(Debug)]
pub struct Scratch {
    archive: ArchiveFile,
    dir: TempDir,
}

impl Scratch {
    pub fn new(archive: ArchiveFile, dir: TempDir) -> Self {
        Self { archive, dir }
    }

    /// Deletes the archive and the scratch directory, logging failures.
    pub fn remove(self) {
        let Scratch { archive, dir } = self;
        drop(archive);
        let path = dir.path().to_path_buf();
        match dir.close() {
            Ok(()) => debug!("Removed scratch directory '{}'.", path.display()),
            Err(e) => warn!("Failed to remove scratch directory '{}': {e}", path.display()),
        }
    }
}

/// Downloads `url` into `download_dir/template.zip`.
///
/// # Errors
/// * `Error::DownloadFailed` on transport errors, timeouts and non-success statuses
/// * `Error::WriteError` if the archive file cannot be created
pub fn fetch(url: &str, download_dir: &Path, timeout: Duration) -> Result<ArchiveFile> {
    let failed = |reason: String| Error::DownloadFailed { url: url.to_string(), reason };

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| failed(e.to_string()))?;

    debug!("Downloading template archive from '{url}'.");
    let mut response = client.get(url).send().map_err(|e| failed(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(failed(format!("HTTP status {status}")));
    }

    let archive = ArchiveFile::new(download_dir.join(ARCHIVE_FILE));
    let mut file = File::create(archive.path())
        .map_err(|source| Error::WriteError { path: archive.path().to_path_buf(), source })?;
    let bytes = response.copy_to(&mut file).map_err(|e| failed(e.to_string()))?;
    file.flush()
        .map_err(|source| Error::WriteError { path: archive.path().to_path_buf(), source })?;

    debug!("Saved {bytes} bytes to '{}'.", archive.path().display());
    Ok(archive)
}

/// Unpacks a zip archive into a fresh scratch directory.
///
/// # Errors
/// * `Error::ExtractFailed` if the archive is malformed
/// * `Error::ReadError` / `Error::WriteError` on file system failures
pub fn extract(archive: &Path, scratch_parent: Option<&Path>) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(SCRATCH_PREFIX);
    let dir = match scratch_parent {
        Some(parent) => builder.tempdir_in(parent),
        None => builder.tempdir(),
    }
    .map_err(|source| Error::WriteError {
        path: scratch_parent.map(Path::to_path_buf).unwrap_or_else(std::env::temp_dir),
        source,
    })?;

    let file = File::open(archive)
        .map_err(|source| Error::ReadError { path: archive.to_path_buf(), source })?;
    let mut zip = ZipArchive::new(file)
        .map_err(|source| Error::ExtractFailed { archive: archive.to_path_buf(), source })?;

    debug!("Extracting {} entries into '{}'.", zip.len(), dir.path().display());
    zip.extract(dir.path())
        .map_err(|source| Error::ExtractFailed { archive: archive.to_path_buf(), source })?;

    Ok(dir)
}

/// Repository name and ref encoded in an archive URL, e.g.
/// `https://github.com/owner/repo/archive/refs/heads/main.zip` gives `("repo", "main")`.
pub fn archive_names(url: &str) -> Option<(String, String)> {
    let url = Url::parse(url).ok()?;
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

    let repo = match segments.iter().position(|s| *s == "archive") {
        Some(index) if index > 0 => segments[index - 1],
        _ => *segments.get(1)?,
    };

    let file_name = segments.last()?;
    let reference = file_name
        .strip_suffix(".zip")
        .or_else(|| file_name.strip_suffix(".tar.gz"))
        .unwrap_or(file_name);

    Some((repo.to_string(), reference.to_string()))
}

/// Finds the template directory inside an extracted archive.
///
/// Probes `<repo>-<ref>/template`, `<repo>-main/template`, `template`, then
/// `template` under each top-level directory in name order.
///
/// # Errors
/// * `Error::TemplateDirNotFound` if no candidate is a directory
pub fn discover_template_root(extracted: &Path, url: &str) -> Result<PathBuf> {
    let mut candidates = Vec::new();

    if let Some((repo, reference)) = archive_names(url) {
        candidates.push(extracted.join(format!("{repo}-{reference}")).join(TEMPLATE_DIR));
        // GitHub drops the leading `v` of version tags in archive folder names.
        if let Some(version) = reference.strip_prefix('v') {
            if version.starts_with(|c: char| c.is_ascii_digit()) {
                candidates.push(extracted.join(format!("{repo}-{version}")).join(TEMPLATE_DIR));
            }
        }
        candidates.push(extracted.join(format!("{repo}-main")).join(TEMPLATE_DIR));
    }
    candidates.push(extracted.join(TEMPLATE_DIR));

    let mut nested: Vec<PathBuf> = fs::read_dir(extracted)
        .map_err(|source| Error::ReadError { path: extracted.to_path_buf(), source })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .map(|path| path.join(TEMPLATE_DIR))
        .collect();
    nested.sort();
    candidates.extend(nested);

    for candidate in &candidates {
        if candidate.is_dir() {
            debug!("Found template root at '{}'.", candidate.display());
            return Ok(candidate.clone());
        }
    }

    let mut searched: Vec<String> = Vec::new();
    for candidate in &candidates {
        let shown = candidate
            .strip_prefix(extracted)
            .unwrap_or(candidate)
            .display()
            .to_string();
        if !searched.contains(&shown) {
            searched.push(shown);
        }
    }
    Err(Error::TemplateDirNotFound { searched: searched.join(", ") })
}

/// Loader for templates shipped as a remote zip archive.
pub struct RemoteLoader<S: AsRef<str>> {
    url: S,
    options: RemoteOptions,
}

impl<S: AsRef<str>> RemoteLoader<S> {
    pub fn new(url: S, options: RemoteOptions) -> Self {
        Self { url, options }
    }
}

impl<S: AsRef<str>> TemplateLoader for RemoteLoader<S> {
    /// Downloads, extracts and locates the template.
    ///
    /// The archive and the scratch directory are removed on every error path;
    /// on success they are owned by the returned [`LoadedTemplate`].
    fn load(&self) -> Result<LoadedTemplate> {
        let url = self.url.as_ref();

        debug!("Stage: {}", Stage::Fetching);
        let archive = fetch(url, &self.options.download_dir, self.options.timeout)?;

        debug!("Stage: {}", Stage::Extracting);
        let dir = extract(archive.path(), self.options.scratch_parent.as_deref())?;
        let root = discover_template_root(dir.path(), url)?;

        Ok(LoadedTemplate::with_scratch(TemplateRoot::Directory(root), Scratch::new(archive, dir)))
    }
}
