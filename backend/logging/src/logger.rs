//! Structured Logger
//!
//! Wraps `tracing` with environment-based level control. `RUST_LOG` wins over
//! the level passed in.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_PREFIX: &str = "pic2word.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize the global logger writing to stderr. Safe to call twice; the
/// second call is a no-op.
pub fn init_logger(level: &str, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(env_filter(level));
    let _ = match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
}

/// Daily-rolling appender writing `pic2word.log.YYYY-MM-DD` under `log_dir`.
pub fn file_appender<P: AsRef<Path>>(log_dir: P) -> RollingFileAppender {
    RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX)
}

/// Console logger plus a rolling file logger.
///
/// Writes NDJSON to `<log_dir>/pic2word.log.YYYY-MM-DD`.
pub fn init_logger_with_file<P: AsRef<Path>>(log_dir: P, level: &str) {
    let file_layer = fmt::layer()
        .json()
        .with_writer(file_appender(log_dir))
        .with_ansi(false);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_does_not_panic() {
        init_logger("debug", LogFormat::Pretty);
        init_logger("info", LogFormat::Json);
        tracing::info!("logger initialised twice");
    }

    #[test]
    fn file_appender_writes_into_log_dir() {
        use std::io::Write;

        let dir = std::env::temp_dir().join(format!("pic2word-logs-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let mut appender = file_appender(&dir);
        appender.write_all(b"{\"message\":\"hello\"}\n").unwrap();
        appender.flush().unwrap();

        let files: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        let name = files[0].file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.starts_with(LOG_FILE_PREFIX), "unexpected file {name}");
        let contents = std::fs::read_to_string(&files[0]).unwrap();
        assert!(contents.contains("hello"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
