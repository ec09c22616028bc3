//! Logging initialisation.
//!
//! Diagnostics go through the `log` facade to stderr via `env_logger`.
//! `RUST_LOG` wins when set; otherwise the `-v` count picks the level.

use env_logger::Builder;
use log::LevelFilter;
use std::env;

pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialises the global logger once; later calls are no-ops.
pub fn init(verbosity: u8) {
    let mut builder = Builder::from_default_env();
    if env::var_os("RUST_LOG").is_none() {
        builder.filter_level(level_for(verbosity));
    }
    if builder.format_timestamp_millis().try_init().is_ok() {
        log::debug!("logging initialised at {}", log::max_level());
    }
}
