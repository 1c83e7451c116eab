pub mod error;
pub mod traits;
pub mod types;

pub use error::ConvertError;
pub use traits::ConversionApi;
pub use types::{
    content_disposition_filename, ConversionRequest, ConversionResult, ConvertOptions,
    FormatDescriptor, FormatDetail, HealthStatus, ImageUpload, LanguageDescriptor,
    DEFAULT_FORMAT, DEFAULT_LANGUAGE,
};
