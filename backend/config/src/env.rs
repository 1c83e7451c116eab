//! Environment loading for `ClientConfig`.
//!
//! Empty variables are treated as unset.

use std::collections::HashMap;
use std::time::Duration;

use crate::schema::ClientConfig;

/// Base URL of the conversion API, e.g. `http://localhost:8080/api`.
pub const API_URL_VAR: &str = "PIC2WORD_API_URL";
/// Name used by the web frontend; read when `PIC2WORD_API_URL` is unset.
pub const LEGACY_API_URL_VAR: &str = "VITE_API_URL";
/// Request timeout in whole seconds.
pub const TIMEOUT_VAR: &str = "PIC2WORD_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
#[error("Invalid value {value:?} for env var \"{var_name}\": {reason}")]
pub struct EnvConfigError {
    pub var_name: String,
    pub value: String,
    pub reason: String,
}

impl ClientConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, EnvConfigError> {
        Self::from_env_map(&std::env::vars().collect())
    }

    /// Load configuration from a provided map (useful for testing).
    pub fn from_env_map(env: &HashMap<String, String>) -> Result<Self, EnvConfigError> {
        let mut config = ClientConfig::default();

        if let Some(base_url) = lookup(env, API_URL_VAR).or_else(|| lookup(env, LEGACY_API_URL_VAR)) {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = lookup(env, TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| EnvConfigError {
                var_name: TIMEOUT_VAR.to_string(),
                value: raw.to_string(),
                reason: e.to_string(),
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn lookup<'a>(env: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env.get(key).map(String::as_str).filter(|v| !v.trim().is_empty())
}
