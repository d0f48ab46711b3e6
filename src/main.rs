//! starter's main application entry point.
//! Parses the command line and dispatches to the selected subcommand.

use starter::{
    cli::{get_args, Args, Command, NewArgs},
    error::{default_error_handler, Result},
    generator::{generate, GenerateOptions},
    loader::resolve_source,
    logger::init_logger,
    project::ProjectContext,
    EMBEDDED_TEMPLATE,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Dispatches the parsed command.
fn run(args: Args) -> Result<()> {
    match args.command {
        Command::New(new_args) => new_project(new_args),
    }
}

/// Creates a new project in the current working directory.
///
/// # Flow
/// 1. Validates the project name
/// 2. Resolves the template source
/// 3. Materializes the template into `./<name>`
fn new_project(args: NewArgs) -> Result<()> {
    println!("Welcome to starter!");

    let work_dir = std::env::current_dir()?;
    let project = ProjectContext::new(args.name.as_str(), &work_dir)?;
    println!("Creating new project '{}'...", project.name());

    let source = resolve_source(&args.source_options()?, &EMBEDDED_TEMPLATE, &work_dir)?;
    println!("Using template from the {source}");

    let options = GenerateOptions { rename_paths: args.rename_paths, ..Default::default() };
    let report = generate(&project, &source, &options)?;

    println!("Project '{}' created successfully: {report}.", project.name());
    println!("Happy coding!");
    Ok(())
}
