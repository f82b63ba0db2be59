//! Explicit logging overrides beat `RUST_LOG` in the installed subscriber.
//!
//! Kept to a single test: it mutates the process environment and installs the
//! global subscriber.

use er_core::logging::{init_logging, LogConfig, LogLevel};
use tracing::level_filters::LevelFilter;

#[test]
fn explicit_off_silences_rust_log_trace() {
    std::env::remove_var("ER_LOG");
    std::env::set_var("RUST_LOG", "trace");

    let config = LogConfig::from_env(Some(LogLevel::Off), None);
    assert_eq!(config.level, LogLevel::Off);
    assert!(init_logging(&config));
    assert_eq!(LevelFilter::current(), LevelFilter::OFF);
}
