//! Console logging for the sticker service
//!
//! - `tracing-subscriber` registry with an `EnvFilter` (RUST_LOG wins over the
//!   configured level)
//! - A compact formatter that keeps structured fields on the same line
//! - Helper functions for pipeline milestones

mod formatter;
mod helpers;

pub use helpers::{log_encode_attempt, log_probe_result, log_upsert_result};

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use formatter::CleanFormatter;

/// Sets up the logging system with the specified configuration
///
/// # Arguments
/// * `level` - Log level (trace, debug, info, warn, error)
/// * `show_timestamps` - Whether to show timestamps in console output
/// * `colored` - Whether to use colored output in console
///
/// # Examples
/// ```no_run
/// use webm_sticker_bot::utils::logging::setup_logging;
///
/// setup_logging("info", false, true).expect("Failed to setup logging");
/// ```
pub fn setup_logging(
    level: &str,
    show_timestamps: bool,
    colored: bool,
) -> crate::utils::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(parse_level(level).into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_target(false)
        .event_format(CleanFormatter::new(show_timestamps, colored));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| crate::utils::Error::validation(format!("logging already initialised: {}", e)))
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("nonsense"), Level::INFO);
    }
}
