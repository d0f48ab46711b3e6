//! Command-line interface implementation for starter.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::loader::{SourceKind, SourceOptions};

/// Command-line arguments structure for starter.
#[derive(Parser, Debug)]
#[command(author, version, about = "starter: scaffold a new project from a template", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project from the template
    New(NewArgs),
}

/// Arguments of `starter new`.
#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Name of the project directory to create
    #[arg(value_name = "PROJECT_NAME")]
    pub name: String,

    /// Where the template comes from [default: embedded]
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,

    /// Local template directory, implies `--source local`
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    pub template: Option<PathBuf>,

    /// Template archive URL, implies `--source remote`
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Also substitute placeholders in file and directory names
    #[arg(long)]
    pub rename_paths: bool,
}

impl NewArgs {
    /// Source selection. `--template` implies a local source and `--url` a remote one.
    ///
    /// # Errors
    /// * `Error::UsageError` if `--source` names a different kind than those options imply
    pub fn source_options(&self) -> Result<SourceOptions> {
        let implied = if self.template.is_some() {
            Some(("--template", SourceKind::Local))
        } else if self.url.is_some() {
            Some(("--url", SourceKind::Remote))
        } else {
            None
        };

        let kind = match (self.source, implied) {
            (Some(kind), Some((flag, implied))) if kind != implied => {
                return Err(Error::UsageError(format!(
                    "{flag} cannot be combined with --source {}",
                    kind.to_possible_value().map(|v| v.get_name().to_string()).unwrap_or_default()
                )));
            }
            (_, Some((_, implied))) => implied,
            (Some(kind), None) => kind,
            (None, None) => SourceKind::default(),
        };

        Ok(SourceOptions { kind, template_dir: self.template.clone(), url: self.url.clone() })
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the usage text if an argument or the subcommand is missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::MissingRequiredArgument
            | ErrorKind::MissingSubcommand
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                if let Err(print_err) = e.print() {
                    eprintln!("Failed to print usage: {print_err}");
                }
                std::process::exit(1);
            }
            _ => e.exit(),
        },
    }
}
