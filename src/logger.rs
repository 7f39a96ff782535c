/// Initializes the global logger.
///
/// Warnings are always shown; `debug` additionally enables the merge trace.
pub fn init_logger(debug: bool) {
    env_logger::Builder::new()
        .filter_level(if debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();
}
