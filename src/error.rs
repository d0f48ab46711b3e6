//! Error handling for the starter application.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while materializing a project.
///
/// Every variant maps to a non-zero exit status through [`default_error_handler`].
#[derive(Error, Debug)]
pub enum Error {
    /// Bad or missing command-line arguments.
    #[error("Usage error: {0}.")]
    UsageError(String),

    /// The project name failed validation.
    #[error("Invalid project name '{name}': {reason}.")]
    ValidationError { name: String, reason: String },

    /// No template could be located for the selected source.
    #[error("Template not found (searched: {searched}).")]
    TemplateNotFound { searched: String },

    /// The downloaded archive does not contain a template directory.
    #[error("Template directory not found in archive (searched: {searched}).")]
    TemplateDirNotFound { searched: String },

    /// The template archive could not be downloaded.
    #[error("Failed to download template from '{url}': {reason}.")]
    DownloadFailed { url: String, reason: String },

    /// The template archive could not be unpacked.
    #[error("Failed to extract archive '{}': {source}.", archive.display())]
    ExtractFailed {
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// The destination directory is already present.
    #[error("Destination directory '{}' already exists.", destination.display())]
    DestinationExists { destination: PathBuf },

    /// The template tree became unreadable while walking it.
    #[error("Failed to walk template: {0}.")]
    WalkError(String),

    /// A template file could not be read.
    #[error("Failed to read '{}': {source}.", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A destination file or directory could not be written.
    #[error("Failed to write '{}': {source}.", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The template configuration file is invalid.
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Any other file system failure.
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("Error: {err}");
    std::process::exit(1);
}
