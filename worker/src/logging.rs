use env_logger::Env;

/// Console logging filtered by `RUST_LOG`, `info` by default.
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}
