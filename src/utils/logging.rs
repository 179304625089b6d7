use log::LevelFilter;

/// Initialize logging using env_logger.
/// `verbosity` picks the default level (0 = warn, 1 = info, 2+ = debug);
/// the RUST_LOG environment variable still overrides it,
/// e.g. `RUST_LOG=tether=debug tether list`.
pub fn init_logging(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(level_for(verbosity))
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}
