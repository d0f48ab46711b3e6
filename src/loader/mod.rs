//! Template acquisition for starter.
//! Resolves where the template lives (embedded snapshot, local directory or
//! remote archive) and turns it into a walkable [`TemplateRoot`].

use std::fs;
use std::path::{Path, PathBuf};

use include_dir::Dir;
use log::debug;

use crate::constants::{DEFAULT_TEMPLATE_URL, TEMPLATE_DIR};
use crate::error::{Error, Result};
use crate::loader::embedded::EmbeddedLoader;
use crate::loader::interface::TemplateLoader;
use crate::loader::local::{discover, LocalLoader};
use crate::loader::remote::{RemoteLoader, Scratch};

pub mod embedded;
pub mod interface;
pub mod local;
pub mod remote;

/// Kind of template source selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SourceKind {
    /// Template compiled into the binary
    #[default]
    Embedded,
    /// `template` directory next to the working directory or the executable
    Local,
    /// Zip archive downloaded over HTTP
    Remote,
}

/// Represents the source location of a template.
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Read-only snapshot compiled into the binary
    Embedded(&'static Dir<'static>),
    /// Template directory on disk
    LocalDirectory(PathBuf),
    /// URL of a zip archive containing a `template` directory
    RemoteArchive(String),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::Embedded(_) => write!(f, "embedded template"),
            TemplateSource::LocalDirectory(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::RemoteArchive(url) => write!(f, "remote archive: '{url}'"),
        }
    }
}

/// Where the resolver looks for a template.
#[derive(Debug, Clone, Default)]
pub struct SourceOptions {
    pub kind: SourceKind,
    /// Explicit local template directory, skips probing.
    pub template_dir: Option<PathBuf>,
    /// Archive URL for remote mode.
    pub url: Option<String>,
}

/// Resolves the selected source kind into a [`TemplateSource`].
///
/// # Arguments
/// * `options` - Source selection from the command line
/// * `embedded` - Snapshot compiled into the binary
/// * `work_dir` - Current working directory
///
/// # Errors
/// * `Error::TemplateNotFound` if the embedded snapshot is empty or no local
///   template directory exists
pub fn resolve_source(
    options: &SourceOptions,
    embedded: &'static Dir<'static>,
    work_dir: &Path,
) -> Result<TemplateSource> {
    let source = match options.kind {
        SourceKind::Embedded => {
            EmbeddedLoader::new(embedded).check()?;
            TemplateSource::Embedded(embedded)
        }
        SourceKind::Local => {
            let path = match &options.template_dir {
                Some(dir) => discover(&[dir.clone()])?,
                None => discover(&local_candidates(work_dir))?,
            };
            TemplateSource::LocalDirectory(path)
        }
        SourceKind::Remote => TemplateSource::RemoteArchive(
            options.url.clone().unwrap_or_else(|| DEFAULT_TEMPLATE_URL.to_string()),
        ),
    };
    debug!("Resolved {source}");
    Ok(source)
}

/// Local template directories in probe order: working directory first, then
/// the directory of the running executable.
pub fn local_candidates(work_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![work_dir.join(TEMPLATE_DIR)];
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join(TEMPLATE_DIR));
    }
    candidates
}

/// Walkable root of an acquired template.
#[derive(Debug, Clone)]
pub enum TemplateRoot {
    Embedded(&'static Dir<'static>),
    Directory(PathBuf),
}

impl TemplateRoot {
    /// Reads a file located directly under the root, if it exists.
    pub fn read_root_file(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match self {
            TemplateRoot::Embedded(dir) => {
                Ok(dir.get_file(name).map(|file| file.contents().to_vec()))
            }
            TemplateRoot::Directory(root) => {
                let path = root.join(name);
                if !path.is_file() {
                    return Ok(None);
                }
                fs::read(&path)
                    .map(Some)
                    .map_err(|source| Error::ReadError { path, source })
            }
        }
    }
}

impl std::fmt::Display for TemplateRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateRoot::Embedded(_) => write!(f, "<embedded>"),
            TemplateRoot::Directory(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A template ready for walking, together with the scratch artifacts that
/// must outlive the walk. Scratch files are removed when this value is dropped.
#[derive(Debug)]
pub struct LoadedTemplate {
    pub root: TemplateRoot,
    scratch: Option<Scratch>,
}

impl LoadedTemplate {
    pub fn new(root: TemplateRoot) -> Self {
        Self { root, scratch: None }
    }

    pub fn with_scratch(root: TemplateRoot, scratch: Scratch) -> Self {
        Self { root, scratch: Some(scratch) }
    }

    /// Removes temporary artifacts now instead of waiting for drop.
    pub fn cleanup(mut self) {
        if let Some(scratch) = self.scratch.take() {
            scratch.remove();
        }
    }
}

/// Settings for the remote loader that tests and callers may override.
#[derive(Debug, Clone)]
pub struct RemoteOptions {
    /// Directory receiving the downloaded archive.
    pub download_dir: PathBuf,
    /// Parent of the extraction scratch directory, system temp dir when `None`.
    pub scratch_parent: Option<PathBuf>,
    pub timeout: std::time::Duration,
}

impl RemoteOptions {
    pub fn new<P: Into<PathBuf>>(download_dir: P) -> Self {
        Self {
            download_dir: download_dir.into(),
            scratch_parent: None,
            timeout: crate::constants::DOWNLOAD_TIMEOUT,
        }
    }
}

/// Loads the template for a resolved source.
pub fn load_template(source: &TemplateSource, remote: &RemoteOptions) -> Result<LoadedTemplate> {
    let loader: Box<dyn TemplateLoader + '_> = match source {
        TemplateSource::Embedded(dir) => Box::new(EmbeddedLoader::new(*dir)),
        TemplateSource::LocalDirectory(path) => Box::new(LocalLoader::new(path)),
        TemplateSource::RemoteArchive(url) => Box::new(RemoteLoader::new(url, remote.clone())),
    };

    loader.load()
}
