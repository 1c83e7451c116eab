use std::time::Duration;

use crate::defaults::{default_user_agent, DEFAULT_BASE_URL, DEFAULT_CONTENT_TYPE, DEFAULT_TIMEOUT};

/// Static configuration for a conversion client. Read-only once the client
/// is built; per-call overrides are not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every API path. Empty means relative paths.
    pub base_url: String,
    pub timeout: Duration,
    /// Default `Content-Type` header installed on the client.
    pub content_type: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn has_base_url(&self) -> bool {
        !self.base_url.is_empty()
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.content_type, "multipart/form-data");
        assert!(config.user_agent.starts_with("pic2word/"));
        assert!(!config.has_base_url());
    }

    #[test]
    fn base_url_is_trimmed() {
        let config = ClientConfig::new(" http://localhost:8080/api/ ");
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert!(config.has_base_url());
    }
}
