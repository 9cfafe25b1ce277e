/// Installs the global logger.
///
/// Warnings about skipped includes must always reach the user, so the quietest
/// level is `Info`; `--verbose` adds per-entry decisions.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();
}
