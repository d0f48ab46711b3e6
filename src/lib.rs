//! starter is a project scaffolding tool.
//! It materializes a template (embedded, local or remote) into a new directory,
//! replacing placeholder tokens with the project name.

use include_dir::{include_dir, Dir};

/// Command-line interface module for the starter application
pub mod cli;

/// Template configuration files (starter.json, starter.yml, starter.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for the starter application
pub mod error;

/// End-to-end materialization flow
pub mod generator;

/// Entry exclusion by glob patterns
pub mod ignore;

/// Template acquisition: embedded, local directory or remote archive
pub mod loader;

/// Logger setup
pub mod logger;

/// Destination operations for template entries
pub mod processor;

/// Project name validation and destination collision guard
pub mod project;

/// Stages of a materialization run
pub mod stage;

/// Placeholder substitution and binary detection
pub mod transform;

/// Deterministic template traversal
pub mod walker;

/// Template snapshot compiled into the binary.
pub static EMBEDDED_TEMPLATE: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/template");
