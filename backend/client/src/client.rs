/// Conversion backend HTTP client: image upload in, document bytes out.
use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use pic2word_config::ClientConfig;
use pic2word_core::{
    content_disposition_filename, ConversionApi, ConversionRequest, ConversionResult,
    ConvertError, FormatDescriptor, HealthStatus, LanguageDescriptor,
};
use pic2word_logging::redact_url;

pub const CONVERT_PATH: &str = "/convert";
pub const FORMATS_PATH: &str = "/formats";
pub const LANGUAGES_PATH: &str = "/languages";
/// Served at the backend origin, outside the API prefix.
pub const HEALTH_PATH: &str = "/health";

/// Thin client over one conversion backend.
///
/// Cloning is cheap and clones share the connection pool. Configuration is
/// fixed at construction; nothing else is stored, so concurrent calls are
/// independent.
#[derive(Debug, Clone)]
pub struct ConversionClient {
    config: ClientConfig,
    http: Client,
}

impl ConversionClient {
    pub fn new(config: ClientConfig) -> Result<Self, ConvertError> {
        if config.timeout.is_zero() {
            return Err(ConvertError::Config("timeout must be greater than zero".into()));
        }
        let mut headers = HeaderMap::new();
        let content_type = HeaderValue::from_str(&config.content_type)
            .map_err(|e| ConvertError::Config(format!("invalid content type '{}': {e}", config.content_type)))?;
        headers.insert(CONTENT_TYPE, content_type);

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| ConvertError::Config(format!("failed to build HTTP client: {e}")))?;

        debug!(base_url = %redact_url(&config.base_url), timeout_secs = config.timeout.as_secs(), "Conversion client ready");
        Ok(Self { config, http })
    }

    /// Build a client from `PIC2WORD_API_URL` / `PIC2WORD_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConvertError> {
        let config = ClientConfig::from_env().map_err(|e| ConvertError::Config(e.to_string()))?;
        Self::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `path` prefixed with the base URL; the bare path when none is set.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn resolve(&self, path: &str) -> Result<String, ConvertError> {
        if !self.config.has_base_url() {
            return Err(ConvertError::RelativeUrl(path.to_string()));
        }
        Ok(self.endpoint_url(path))
    }

    /// The health probe lives at the origin, e.g. `http://host:8080/health`
    /// for a base URL of `http://host:8080/api`.
    pub fn health_url(&self) -> Result<String, ConvertError> {
        if !self.config.has_base_url() {
            return Err(ConvertError::RelativeUrl(HEALTH_PATH.to_string()));
        }
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| ConvertError::Config(format!("invalid base URL: {e}")))?;
        url.set_path(HEALTH_PATH);
        url.set_query(None);
        url.set_fragment(None);
        Ok(url.to_string())
    }

    /// Upload an image as `multipart/form-data` (`image`, `format`,
    /// `language`) and return the produced document untouched.
    pub async fn convert_image_to_word(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResult, ConvertError> {
        request.validate()?;
        let url = self.resolve(CONVERT_PATH)?;
        let ConversionRequest { image, options } = request;

        info!(
            file = %image.file_name,
            bytes = image.len(),
            format = %options.format,
            language = %options.language,
            "Submitting image for conversion"
        );

        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(image.content_type())
            .map_err(|e| ConvertError::InvalidRequest(format!("invalid image mime type: {e}")))?;
        let form = Form::new()
            .part("image", part)
            .text("format", options.format)
            .text("language", options.language);

        let response = self.send("POST", &url, self.http.post(&url).multipart(form)).await?;

        let content_type = header_string(&response, CONTENT_TYPE);
        let file_name = header_string(&response, CONTENT_DISPOSITION)
            .as_deref()
            .and_then(content_disposition_filename);
        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;

        info!(bytes = bytes.len(), file = file_name.as_deref().unwrap_or("<unnamed>"), "Conversion finished");
        Ok(ConversionResult { bytes, content_type, file_name })
    }

    /// `/formats` payload exactly as the backend sent it.
    pub async fn get_supported_formats(&self) -> Result<Value, ConvertError> {
        self.get_json(FORMATS_PATH).await
    }

    /// `/languages` payload exactly as the backend sent it.
    pub async fn get_supported_languages(&self) -> Result<Value, ConvertError> {
        self.get_json(LANGUAGES_PATH).await
    }

    /// `/formats` decoded into descriptors.
    pub async fn supported_formats(&self) -> Result<Vec<FormatDescriptor>, ConvertError> {
        let value = self.get_supported_formats().await?;
        serde_json::from_value(value).map_err(|e| ConvertError::Decode(format!("formats: {e}")))
    }

    /// `/languages` decoded into descriptors.
    pub async fn supported_languages(&self) -> Result<Vec<LanguageDescriptor>, ConvertError> {
        let value = self.get_supported_languages().await?;
        serde_json::from_value(value).map_err(|e| ConvertError::Decode(format!("languages: {e}")))
    }

    pub async fn health(&self) -> Result<HealthStatus, ConvertError> {
        let url = self.health_url()?;
        let response = self.send("GET", &url, self.http.get(&url)).await?;
        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&body).map_err(|e| ConvertError::Decode(format!("health: {e}")))
    }

    async fn get_json(&self, path: &str) -> Result<Value, ConvertError> {
        let url = self.resolve(path)?;
        let response = self.send("GET", &url, self.http.get(&url)).await?;
        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&body).map_err(|e| ConvertError::Decode(format!("{path}: {e}")))
    }

    /// Send once. Non-2xx responses become `ConvertError::Status` carrying
    /// the raw body.
    async fn send(&self, method: &str, url: &str, request: RequestBuilder) -> Result<Response, ConvertError> {
        let started = Instant::now();
        let result = request.send().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                let err = self.classify(e);
                warn!(method, url = %redact_url(url), elapsed_ms, error = %err, "Request failed");
                return Err(err);
            }
        };

        let status = response.status();
        debug!(method, url = %redact_url(url), status = status.as_u16(), elapsed_ms, "Response received");
        if !status.is_success() {
            let body = response.bytes().await.map_err(|e| self.classify(e))?;
            warn!(method, url = %redact_url(url), status = status.as_u16(), "Backend returned an error status");
            return Err(ConvertError::Status { status: status.as_u16(), body });
        }
        Ok(response)
    }

    fn classify(&self, err: reqwest::Error) -> ConvertError {
        if err.is_timeout() {
            ConvertError::Timeout { after: self.config.timeout }
        } else {
            ConvertError::Transport(err.to_string())
        }
    }
}

fn header_string(response: &Response, name: reqwest::header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[async_trait]
impl ConversionApi for ConversionClient {
    async fn convert_image_to_word(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResult, ConvertError> {
        ConversionClient::convert_image_to_word(self, request).await
    }

    async fn get_supported_formats(&self) -> Result<Value, ConvertError> {
        ConversionClient::get_supported_formats(self).await
    }

    async fn get_supported_languages(&self) -> Result<Value, ConvertError> {
        ConversionClient::get_supported_languages(self).await
    }

    async fn health(&self) -> Result<HealthStatus, ConvertError> {
        ConversionClient::health(self).await
    }
}
