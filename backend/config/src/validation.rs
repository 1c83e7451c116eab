//! Config validation with field paths and user-friendly messages.

use thiserror::Error;
use url::Url;

use crate::schema::ClientConfig;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError { path: path.into(), message: message.into() });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError { path: path.into(), message: message.into() });
    }

    /// Emit every finding through `tracing`.
    pub fn log(&self) {
        for warning in &self.warnings {
            tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
        }
        for error in &self.errors {
            tracing::error!(path = %error.path, message = %error.message, "Config error");
        }
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &ClientConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_base_url(config, &mut report);
    validate_timeout(config, &mut report);
    validate_content_type(config, &mut report);
    report
}

fn validate_base_url(config: &ClientConfig, report: &mut ValidationReport) {
    if config.base_url.is_empty() {
        report.warn("base_url", "No base URL set; requests use relative paths");
        return;
    }
    match Url::parse(&config.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            if url.host_str().is_none() {
                report.error("base_url", "Base URL has no host");
            }
        }
        Ok(url) => report.error("base_url", format!("Unsupported scheme '{}'", url.scheme())),
        Err(e) => report.error("base_url", format!("Not a valid URL: {e}")),
    }
}

fn validate_timeout(config: &ClientConfig, report: &mut ValidationReport) {
    if config.timeout.is_zero() {
        report.error("timeout", "Timeout must be greater than zero");
    }
}

fn validate_content_type(config: &ClientConfig, report: &mut ValidationReport) {
    if !config.content_type.trim().to_ascii_lowercase().starts_with("multipart/") {
        report.warn("content_type", "Submissions are multipart; a non-multipart default is unusual");
    }
}
