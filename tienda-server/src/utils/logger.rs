//! Logging Infrastructure
//!
//! Structured logging setup for development and production environments.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines (development, staging)
    Full,
    /// One JSON object per line, for log shippers
    Json,
}

impl LogFormat {
    /// Production ships JSON; everything else stays human-readable.
    pub fn for_environment(environment: &str) -> Self {
        if environment == "production" {
            LogFormat::Json
        } else {
            LogFormat::Full
        }
    }
}

/// Initialize the logger with defaults (stdout, info level, plain format)
pub fn init_logger() {
    init_logger_with_file(None, None, LogFormat::Full);
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` still takes precedence over `log_level` through the env filter.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>, format: LogFormat) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Daily rolling file output if log_dir points at an existing directory
    let appender = log_dir
        .map(Path::new)
        .filter(|p| p.exists())
        .map(|p| tracing_appender::rolling::daily(p, "tienda-server"));

    match (format, appender) {
        (LogFormat::Json, Some(writer)) => builder.json().with_writer(writer).init(),
        (LogFormat::Json, None) => builder.json().init(),
        (LogFormat::Full, Some(writer)) => builder.with_writer(writer).init(),
        (LogFormat::Full, None) => builder.init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_logs_json() {
        assert_eq!(LogFormat::for_environment("production"), LogFormat::Json);
    }

    #[test]
    fn other_environments_log_plain() {
        assert_eq!(LogFormat::for_environment("development"), LogFormat::Full);
        assert_eq!(LogFormat::for_environment("staging"), LogFormat::Full);
    }
}
