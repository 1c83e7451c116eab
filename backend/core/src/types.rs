use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// Output format the backend falls back to when none is sent.
pub const DEFAULT_FORMAT: &str = "docx";
/// Recognition language the backend falls back to when none is sent.
pub const DEFAULT_LANGUAGE: &str = "zh";

/// An image to upload: raw bytes plus the filename the multipart part carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub bytes: Bytes,
    pub file_name: String,
    pub mime_type: Option<String>,
}

impl ImageUpload {
    pub fn new(bytes: impl Into<Bytes>, file_name: impl Into<String>) -> Self {
        Self { bytes: bytes.into(), file_name: file_name.into(), mime_type: None }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Read an image from disk, naming the upload after the file.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        Ok(Self::new(bytes, file_name))
    }

    /// Explicit mime type if set, otherwise one guessed from the extension.
    pub fn content_type(&self) -> &str {
        if let Some(mime_type) = &self.mime_type {
            if !mime_type.trim().is_empty() {
                return mime_type;
            }
        }
        guess_image_mime(&self.file_name)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn guess_image_mime(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Conversion settings sent alongside the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Output document format, e.g. `docx`.
    pub format: String,
    /// Recognition language, e.g. `zh` or `en`.
    pub language: String,
}

impl ConvertOptions {
    pub fn new(format: impl Into<String>, language: impl Into<String>) -> Self {
        Self { format: format.into(), language: language.into() }
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT, DEFAULT_LANGUAGE)
    }
}

/// A single image-to-document conversion call.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub image: ImageUpload,
    pub options: ConvertOptions,
}

impl ConversionRequest {
    pub fn new(image: ImageUpload, options: ConvertOptions) -> Self {
        Self { image, options }
    }

    /// Local preconditions only. Whether the backend understands the format
    /// or language is for the backend to decide.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.image.is_empty() {
            return Err(ConvertError::InvalidRequest(format!(
                "image '{}' is empty",
                self.image.file_name
            )));
        }
        if self.options.format.trim().is_empty() {
            return Err(ConvertError::InvalidRequest("format must not be empty".into()));
        }
        if self.options.language.trim().is_empty() {
            return Err(ConvertError::InvalidRequest("language must not be empty".into()));
        }
        Ok(())
    }
}

/// The converted document, passed through byte-for-byte.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub bytes: Bytes,
    pub content_type: Option<String>,
    /// Filename suggested by the backend's `Content-Disposition` header.
    pub file_name: Option<String>,
}

impl ConversionResult {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Extract the filename from a `Content-Disposition` header value.
///
/// `filename*=UTF-8''<percent-encoded>` wins over `filename`. Quoted values
/// may contain `;` and backslash escapes.
pub fn content_disposition_filename(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;
    for param in split_params(header) {
        let Some((key, value)) = param.split_once('=') else { continue };
        let key = key.trim();
        if key.eq_ignore_ascii_case("filename*") {
            extended = decode_ext_value(value.trim());
        } else if key.eq_ignore_ascii_case("filename") {
            plain = Some(unquote(value.trim()));
        }
    }
    extended.or(plain).filter(|name| !name.is_empty())
}

/// Split on `;` outside quoted strings.
fn split_params(header: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in header.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                params.push(&header[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(&header[start..]);
    params
}

fn unquote(value: &str) -> String {
    let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) else {
        return value.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// RFC 8187 `charset'lang'pct-encoded`; only UTF-8 is accepted.
fn decode_ext_value(value: &str) -> Option<String> {
    let mut parts = value.splitn(3, '\'');
    let charset = parts.next()?;
    let _language = parts.next()?;
    let encoded = parts.next()?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }
    urlencoding::decode(encoded).ok().map(|name| name.into_owned())
}

/// An output format as listed by `/formats`.
///
/// The backend currently answers with bare identifiers (`["docx"]`); the
/// object form is accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormatDescriptor {
    Id(String),
    Detailed(FormatDetail),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatDetail {
    #[serde(alias = "code")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl FormatDescriptor {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Detailed(detail) => &detail.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Detailed(detail) => detail.name.as_deref(),
        }
    }
}

/// A recognition language as listed by `/languages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDescriptor {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of the backend's `/health` probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_type_prefers_explicit_mime() {
        let upload = ImageUpload::new(vec![1, 2, 3], "scan.bin").with_mime_type("image/png");
        assert_eq!(upload.content_type(), "image/png");
    }

    #[test]
    fn content_type_guessed_from_extension() {
        assert_eq!(ImageUpload::new(vec![1], "a.PNG").content_type(), "image/png");
        assert_eq!(ImageUpload::new(vec![1], "photo.jpeg").content_type(), "image/jpeg");
        assert_eq!(ImageUpload::new(vec![1], "noext").content_type(), "application/octet-stream");
    }

    #[test]
    fn default_options_match_backend_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.format, "docx");
        assert_eq!(options.language, "zh");
    }

    #[test]
    fn validate_rejects_empty_inputs() {
        let ok = ConversionRequest::new(ImageUpload::new(vec![0xff], "a.png"), ConvertOptions::default());
        assert!(ok.validate().is_ok());

        let empty_image = ConversionRequest::new(ImageUpload::new(Vec::new(), "a.png"), ConvertOptions::default());
        assert!(matches!(empty_image.validate(), Err(ConvertError::InvalidRequest(_))));

        let blank_format = ConversionRequest::new(ImageUpload::new(vec![1], "a.png"), ConvertOptions::new(" ", "en"));
        assert!(matches!(blank_format.validate(), Err(ConvertError::InvalidRequest(_))));

        let blank_language = ConversionRequest::new(ImageUpload::new(vec![1], "a.png"), ConvertOptions::new("docx", ""));
        assert!(matches!(blank_language.validate(), Err(ConvertError::InvalidRequest(_))));
    }

    #[test]
    fn parses_content_disposition() {
        assert_eq!(
            content_disposition_filename(r#"attachment; filename="pic2word_20240101120000.docx""#),
            Some("pic2word_20240101120000.docx".to_string())
        );
        assert_eq!(content_disposition_filename("attachment; filename=out.docx"), Some("out.docx".to_string()));
        assert_eq!(content_disposition_filename("inline"), None);
        assert_eq!(content_disposition_filename(r#"attachment; filename="""#), None);
    }

    #[test]
    fn quoted_filename_may_contain_semicolons() {
        assert_eq!(
            content_disposition_filename(r#"attachment; filename="report; final.docx"; size=10"#),
            Some("report; final.docx".to_string())
        );
        assert_eq!(
            content_disposition_filename(r#"attachment; filename="say \"hi\".docx""#),
            Some(r#"say "hi".docx"#.to_string())
        );
    }

    #[test]
    fn extended_filename_is_preferred() {
        assert_eq!(
            content_disposition_filename(
                r#"attachment; filename="fallback.docx"; filename*=UTF-8''%E8%AF%86%E5%88%AB.docx"#
            ),
            Some("识别.docx".to_string())
        );
        assert_eq!(
            content_disposition_filename("attachment; filename*=utf-8'en'na%C3%AFve%3Bdoc.docx"),
            Some("naïve;doc.docx".to_string())
        );
    }

    #[test]
    fn unsupported_extended_charset_falls_back() {
        assert_eq!(
            content_disposition_filename(r#"attachment; filename="plain.docx"; filename*=ISO-8859-1''caf%E9.docx"#),
            Some("plain.docx".to_string())
        );
    }

    #[test]
    fn format_descriptor_accepts_both_shapes() {
        let formats: Vec<FormatDescriptor> =
            serde_json::from_value(json!(["docx", { "code": "pdf", "name": "PDF" }])).unwrap();
        assert_eq!(formats[0].id(), "docx");
        assert_eq!(formats[0].name(), None);
        assert_eq!(formats[1].id(), "pdf");
        assert_eq!(formats[1].name(), Some("PDF"));
    }

    #[test]
    fn language_descriptor_decodes_backend_shape() {
        let languages: Vec<LanguageDescriptor> =
            serde_json::from_value(json!([{ "code": "zh", "name": "中文" }, { "code": "en" }])).unwrap();
        assert_eq!(languages[0].code, "zh");
        assert_eq!(languages[0].name.as_deref(), Some("中文"));
        assert_eq!(languages[1].name, None);
    }

    #[tokio::test]
    async fn from_path_reads_file_and_name() {
        let path = std::env::temp_dir().join(format!("pic2word-core-{}.png", std::process::id()));
        tokio::fs::write(&path, [0x89, b'P', b'N', b'G']).await.unwrap();
        let upload = ImageUpload::from_path(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
        assert_eq!(upload.len(), 4);
        assert!(upload.file_name.ends_with(".png"));
        assert_eq!(upload.content_type(), "image/png");
    }
}
