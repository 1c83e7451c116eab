use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

/// Error type for every conversion backend call.
///
/// Errors are surfaced as-is; nothing in this workspace retries or
/// interprets backend error payloads.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {}s", after.as_secs())]
    Timeout { after: Duration },

    /// `body` holds the response bytes exactly as received.
    #[error("backend returned HTTP {status}: {}", String::from_utf8_lossy(body))]
    Status { status: u16, body: Bytes },

    #[error("failed to decode response body: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("no base URL configured, cannot resolve relative path {0}")]
    RelativeUrl(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ConvertError {
    /// HTTP status preserved from a non-success backend response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body of a non-success backend response.
    pub fn status_body(&self) -> Option<&Bytes> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_only_for_status_errors() {
        let err = ConvertError::Status { status: 413, body: Bytes::from_static(b"too large") };
        assert_eq!(err.status_code(), Some(413));
        assert_eq!(err.status_body().map(|b| b.as_ref()), Some(&b"too large"[..]));
        assert_eq!(ConvertError::Transport("reset".into()).status_code(), None);
    }

    #[test]
    fn status_body_keeps_non_utf8_bytes() {
        let raw: &[u8] = &[0xff, 0xfe, b'e', b'r', b'r'];
        let err = ConvertError::Status { status: 500, body: Bytes::copy_from_slice(raw) };
        assert_eq!(err.status_body().unwrap().as_ref(), raw);
        assert!(err.to_string().starts_with("backend returned HTTP 500: "));
        assert!(err.to_string().ends_with("err"));
    }

    #[test]
    fn timeout_message_mentions_duration() {
        let err = ConvertError::Timeout { after: Duration::from_secs(60) };
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "request timed out after 60s");
    }
}
