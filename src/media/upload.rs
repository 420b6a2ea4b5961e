//! Media uploads - local files turned into self-contained data URLs

use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use tracing::info;

/// Stable key of an exercise row in the workout editor. Survives removal of
/// other rows, unlike the row's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u32);

/// Where an upload result must land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTarget {
    Cover,
    Exercise(RowId),
}

/// Finished upload, still tagged with the slot that requested it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub target: MediaTarget,
    pub data_url: String,
}

pub fn encode_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, B64.encode(bytes))
}

pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" => "video/ogg",
        "mov" => "video/quicktime",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Read `path` and encode it for `target`. The target travels with the
/// future, so overlapping uploads cannot overwrite each other's slot.
pub async fn upload(target: MediaTarget, path: impl AsRef<Path>) -> Result<MediaUpload> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    info!("encoded {} ({} bytes) for {:?}", path.display(), bytes.len(), target);
    Ok(MediaUpload {
        target,
        data_url: encode_data_url(&bytes, mime_for(path)),
    })
}
