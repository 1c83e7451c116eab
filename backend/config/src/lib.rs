//! `pic2word-config` — configuration for the conversion backend client.
//!
//! Provides:
//! - Typed `ClientConfig` with defaults matching the backend's expectations
//! - Environment loading (`PIC2WORD_API_URL`, `PIC2WORD_TIMEOUT_SECS`)
//! - Validation with errors and warnings

pub mod defaults;
pub mod env;
pub mod schema;
pub mod validation;

pub use defaults::{DEFAULT_CONTENT_TYPE, DEFAULT_TIMEOUT};
pub use env::{EnvConfigError, API_URL_VAR, LEGACY_API_URL_VAR, TIMEOUT_VAR};
pub use schema::ClientConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};
