//! Logger initialisation
//!
//! `RUST_LOG` wins over the configured level, which wins over `info`.

use std::sync::Once;

static INIT: Once = Once::new();

/// Resolve the filter string used by the logger
pub fn resolve_filter(rust_log: Option<&str>, configured: Option<&str>) -> String {
    rust_log
        .filter(|f| !f.trim().is_empty())
        .or(configured.filter(|f| !f.trim().is_empty()))
        .unwrap_or("info")
        .to_string()
}

/// Initialises the global logger once; later calls are ignored
pub fn init_logging(configured_level: Option<&str>) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let filter = resolve_filter(rust_log.as_deref(), configured_level);

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(env_logger::WriteStyle::Auto);
        builder.init();

        log::debug!("logging initialised with filter '{}'", filter);
    });
}
