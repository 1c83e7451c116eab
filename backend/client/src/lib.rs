//! Client for the pic2word conversion backend.
//!
//! ```no_run
//! # async fn run() -> Result<(), pic2word_client::ConvertError> {
//! use pic2word_client::{ClientConfig, ConversionClient, ConversionRequest, ConvertOptions, ImageUpload};
//!
//! let client = ConversionClient::new(ClientConfig::new("http://localhost:8080/api"))?;
//! let image = ImageUpload::new(std::fs::read("scan.png").unwrap(), "scan.png");
//! let document = client
//!     .convert_image_to_word(ConversionRequest::new(image, ConvertOptions::new("docx", "en")))
//!     .await?;
//! std::fs::write("scan.docx", &document.bytes).unwrap();
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{ConversionClient, CONVERT_PATH, FORMATS_PATH, HEALTH_PATH, LANGUAGES_PATH};
pub use pic2word_config::ClientConfig;
pub use pic2word_core::{
    ConversionApi, ConversionRequest, ConversionResult, ConvertError, ConvertOptions,
    FormatDescriptor, HealthStatus, ImageUpload, LanguageDescriptor, DEFAULT_FORMAT,
    DEFAULT_LANGUAGE,
};

/// Test utilities shared across modules.
#[cfg(test)]
pub(crate) mod test_utils {
    use std::time::Duration;

    use wiremock::MockServer;

    use crate::{ClientConfig, ConversionClient};

    /// Create a client pointed at `<mock server>/api`, the way the backend
    /// mounts its routes.
    pub fn setup_mock_client(server: &MockServer) -> ConversionClient {
        setup_mock_client_with_timeout(server, Duration::from_secs(5))
    }

    pub fn setup_mock_client_with_timeout(server: &MockServer, timeout: Duration) -> ConversionClient {
        let config = ClientConfig::new(format!("{}/api", server.uri())).with_timeout(timeout);
        ConversionClient::new(config).expect("should build client")
    }
}
