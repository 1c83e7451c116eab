//! CLI Convert Command

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pic2word_client::{ConversionClient, ConversionRequest, ConvertOptions, ImageUpload};
use tracing::info;

use crate::terminal_output::note_success;

pub async fn run(
    client: &ConversionClient,
    image: PathBuf,
    format: String,
    language: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let upload = ImageUpload::from_path(&image)
        .await
        .with_context(|| format!("Failed to read image {}", image.display()))?;
    let extension = format.clone();

    let result = client
        .convert_image_to_word(ConversionRequest::new(upload, ConvertOptions::new(format, language)))
        .await
        .context("Conversion failed")?;

    let path = output_path(output.as_deref(), result.file_name.as_deref(), &image, &extension);
    tokio::fs::write(&path, &result.bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), bytes = result.len(), "Document saved");
    note_success(&format!("Saved {} ({} bytes)", path.display(), result.len()));
    Ok(())
}

/// Explicit output, else the server-suggested name, else `<image stem>.<format>`.
/// Suggested names are reduced to their final component.
fn output_path(explicit: Option<&Path>, suggested: Option<&str>, image: &Path, format: &str) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(name) = suggested.and_then(|s| Path::new(s).file_name()) {
        return PathBuf::from(name);
    }
    let stem = image.file_stem().and_then(|s| s.to_str()).unwrap_or("document");
    PathBuf::from(format!("{stem}.{format}"))
}
