/// Initializes `env_logger`: `Debug` when verbose, `Warn` otherwise.
/// `RUST_LOG` takes precedence over both.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .init();
}
