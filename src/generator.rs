//! End-to-end materialization of a project from a template source.
//!
//! The flow runs through the stages of [`Stage`]. Scratch artifacts of a
//! remote template are removed in the cleaning stage whatever the outcome;
//! files already written to the destination are kept on failure.

use std::path::PathBuf;
use std::time::Duration;

use log::{debug, warn};

use crate::config::get_config;
use crate::error::Result;
use crate::ignore::TemplateFilter;
use crate::loader::{load_template, RemoteOptions, TemplateRoot, TemplateSource};
use crate::processor::{apply, FileOperation, Processor};
use crate::project::ProjectContext;
use crate::stage::Stage;
use crate::transform::{ReplacementSet, Transformer};
use crate::walker::walk;

/// Options for one run that do not come from the template itself.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Substitute placeholders in file and directory names even if the
    /// template configuration does not ask for it.
    pub rename_paths: bool,
    /// Parent of the archive extraction directory, system temp dir when `None`.
    pub scratch_parent: Option<PathBuf>,
    /// Download timeout override.
    pub timeout: Option<Duration>,
}

/// Summary of what was written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    pub directories: usize,
    pub text_files: usize,
    pub binary_files: usize,
}

impl Report {
    fn record(&mut self, operation: &FileOperation) {
        match operation {
            FileOperation::CreateDir { .. } => self.directories += 1,
            FileOperation::Write { binary: true, .. } => self.binary_files += 1,
            FileOperation::Write { .. } => self.text_files += 1,
        }
    }

    pub fn files(&self) -> usize {
        self.text_files + self.binary_files
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} directories, {} files ({} binary)",
            self.directories,
            self.files(),
            self.binary_files
        )
    }
}

fn enter(stage: Stage) {
    debug!("Stage: {stage}");
}

/// Materializes `source` into the project's destination directory.
///
/// # Arguments
/// * `project` - Validated project name and destination
/// * `source` - Resolved template source
/// * `options` - Run options
///
/// # Returns
/// * `Result<Report>` - Counts of created directories and files
///
/// # Errors
/// * `Error::DestinationExists` before anything is written
/// * any acquisition, configuration, walk, read or write error
pub fn generate(
    project: &ProjectContext,
    source: &TemplateSource,
    options: &GenerateOptions,
) -> Result<Report> {
    enter(Stage::Idle);
    project.ensure_available()?;

    enter(Stage::Resolving);
    let mut remote = RemoteOptions::new(project.work_dir());
    remote.scratch_parent = options.scratch_parent.clone();
    if let Some(timeout) = options.timeout {
        remote.timeout = timeout;
    }
    let loaded = match load_template(source, &remote) {
        Ok(loaded) => loaded,
        Err(e) => {
            enter(Stage::Failed);
            return Err(e);
        }
    };

    let result = materialize(project, &loaded.root, options);

    enter(Stage::Cleaning);
    loaded.cleanup();

    enter(if result.is_ok() { Stage::Done } else { Stage::Failed });
    result
}

fn materialize(
    project: &ProjectContext,
    root: &TemplateRoot,
    options: &GenerateOptions,
) -> Result<Report> {
    let config = get_config(root)?;

    let replacements = ReplacementSet::for_project(config.placeholders.as_slice(), project.name())?;
    for token in replacements.tokens() {
        if project.name().contains(token) {
            warn!("Project name '{}' contains the placeholder '{token}'", project.name());
        }
    }
    let transformer = Transformer::new(replacements, config.rename_paths || options.rename_paths);
    let filter = TemplateFilter::new(config.ignore.as_slice())?;

    project.create_root()?;

    enter(Stage::Walking);
    let processor = Processor::new(&transformer, project.destination_root());
    let mut report = Report::default();

    enter(Stage::Writing);
    for entry in walk(root, &filter) {
        let entry = entry?;
        let operation = processor.process(&entry)?;
        apply(&operation)?;
        debug!("{operation}");
        report.record(&operation);
    }

    Ok(report)
}
