//! Logging initialization
//!
//! TUI mode: logs to `<base>/logs/scriber-register-{datetime}.log`
//! CLI mode: logs to stderr

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{RegisterPaths, Settings};
use crate::error::RegisterResult;

/// Result of logging initialization
pub struct LoggingHandle {
    /// Flushes buffered file logs when dropped; keep it alive until exit
    pub _guard: Option<WorkerGuard>,

    /// Path to the log file (only set in TUI mode with file logging enabled)
    pub log_file_path: Option<PathBuf>,
}

/// Initialize the global subscriber
///
/// `RUST_LOG` wins over the configured level; `debug_override` (the
/// `--debug` flag) wins over both.
pub fn init_logging(
    paths: &RegisterPaths,
    settings: &Settings,
    is_tui_mode: bool,
    debug_override: bool,
) -> RegisterResult<LoggingHandle> {
    let filter = tracing_subscriber::EnvFilter::new(filter_directive(
        &settings.logging.level,
        std::env::var("RUST_LOG").ok(),
        debug_override,
    ));

    if let Some(log_file_path) = log_file_target(paths, settings, is_tui_mode, chrono::Utc::now()) {
        let logs_dir = paths.logs_dir();
        std::fs::create_dir_all(&logs_dir)?;

        let file_name = log_file_path.file_name().unwrap_or_default();
        let file_appender = tracing_appender::rolling::never(&logs_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();

        Ok(LoggingHandle {
            _guard: Some(guard),
            log_file_path: Some(log_file_path),
        })
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();

        Ok(LoggingHandle {
            _guard: None,
            log_file_path: None,
        })
    }
}

fn filter_directive(configured: &str, rust_log: Option<String>, debug_override: bool) -> String {
    if debug_override {
        return "debug".to_string();
    }
    rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}

/// Log file for this run, if any
///
/// Only the TUI logs to a file, since stderr belongs to the terminal UI
/// while it runs. Everything else logs to stderr.
fn log_file_target(
    paths: &RegisterPaths,
    settings: &Settings,
    is_tui_mode: bool,
    now: chrono::DateTime<chrono::Utc>,
) -> Option<PathBuf> {
    (is_tui_mode && settings.logging.to_file).then(|| paths.logs_dir().join(log_file_name(now)))
}

fn log_file_name(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("scriber-register-{}.log", now.format("%Y%m%dT%H%M%SZ"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_debug_flag_wins() {
        assert_eq!(filter_directive("warn", Some("trace".into()), true), "debug");
    }

    #[test]
    fn test_rust_log_overrides_configured_level() {
        assert_eq!(filter_directive("info", Some("warn".into()), false), "warn");
        assert_eq!(filter_directive("info", Some("  ".into()), false), "info");
        assert_eq!(filter_directive("info", None, false), "info");
    }

    #[test]
    fn test_log_file_name_format() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(log_file_name(now), "scriber-register-20240309T140500Z.log");
    }

    fn at_noon() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_tui_logs_to_timestamped_file_under_logs_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegisterPaths::with_base_dir(temp_dir.path().to_path_buf());

        let target = log_file_target(&paths, &Settings::default(), true, at_noon()).unwrap();

        assert_eq!(target, paths.logs_dir().join("scriber-register-20240309T120000Z.log"));
    }

    #[test]
    fn test_no_log_file_for_cli_or_when_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegisterPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(log_file_target(&paths, &Settings::default(), false, at_noon()).is_none());

        let mut settings = Settings::default();
        settings.logging.to_file = false;
        assert!(log_file_target(&paths, &settings, true, at_noon()).is_none());
    }
}
