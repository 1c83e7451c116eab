//! Structured logging for pic2word.
//!
//! Console or JSON output, optional daily-rolling NDJSON files, and URL
//! redaction for anything that ends up in a log line.

pub mod logger;
pub mod redact;

pub use logger::{file_appender, init_logger, init_logger_with_file, LogFormat, LOG_FILE_PREFIX};
pub use redact::redact_url;
