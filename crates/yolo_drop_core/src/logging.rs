//! Logger setup.
//!
//! The browser build logs to the devtools console through `console_log`, the
//! native build (tests, tooling) through `env_logger`.

use crate::config::LogLevel;

/// Install the global logger. Later calls are ignored.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LogLevel) {
    let filter = level.to_level_filter();
    if let Some(level) = filter.to_level() {
        if console_log::init_with_level(level).is_err() {
            log::debug!("Logger already initialized");
            return;
        }
    }
    log::set_max_level(filter);
}

/// Install the global logger. Later calls are ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LogLevel) {
    let result = env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .is_test(cfg!(test))
        .try_init();

    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}
