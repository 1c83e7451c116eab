use async_trait::async_trait;
use serde_json::Value;

use crate::error::ConvertError;
use crate::types::{ConversionRequest, ConversionResult, HealthStatus};

/// Client-side contract of the image-to-document backend.
///
/// Each call is one independent request/response exchange. Implementations
/// must not keep mutable state between calls.
#[async_trait]
pub trait ConversionApi: Send + Sync {
    /// Upload an image and receive the converted document bytes.
    async fn convert_image_to_word(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResult, ConvertError>;

    /// Raw `/formats` payload, unmodified.
    async fn get_supported_formats(&self) -> Result<Value, ConvertError>;

    /// Raw `/languages` payload, unmodified.
    async fn get_supported_languages(&self) -> Result<Value, ConvertError>;

    async fn health(&self) -> Result<HealthStatus, ConvertError>;
}
