//! Config defaults.

use std::time::Duration;

/// Conversion can take a while on the backend, so the timeout is generous.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default `Content-Type` for submissions.
pub const DEFAULT_CONTENT_TYPE: &str = "multipart/form-data";

/// Empty base URL: paths stay relative.
pub const DEFAULT_BASE_URL: &str = "";

pub fn default_user_agent() -> String {
    format!("pic2word/{}", env!("CARGO_PKG_VERSION"))
}
