use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Honors the standard `env_logger` filter syntax via `RUST_LOG`
/// (e.g. "info", "glint_engine=debug"); defaults to info-level output.
/// Idempotent; intended usage is early in `main`.
pub fn init() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.init();

        log::debug!("logging initialized");
    });
}
