//! Media classification - decides how a cover or exercise URL is played back

pub mod upload;

use std::sync::LazyLock;

use regex::Regex;

pub use upload::{MediaTarget, MediaUpload, RowId, encode_data_url, mime_for, upload};

static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").expect("youtube regex")
});

static VIMEO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"vimeo\.com/(\d+)").expect("vimeo regex"));

/// Marker of the bundled demo clip, whose URL has no other video hint
const DEMO_MARKER: &str = "mov_bbb";

/// Playback strategy for a media reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    YouTube(String),
    Vimeo(String),
    DirectVideo,
    Image,
    Missing,
}

impl MediaKind {
    pub fn is_video(&self) -> bool {
        matches!(self, MediaKind::YouTube(_) | MediaKind::Vimeo(_) | MediaKind::DirectVideo)
    }
}

/// Classify a URL. Platform embeds are checked before the generic video
/// heuristics, so a YouTube link with "video" in its query stays an embed.
pub fn classify(url: Option<&str>) -> MediaKind {
    let url = match url {
        Some(u) if !u.is_empty() => u,
        _ => return MediaKind::Missing,
    };

    if let Some(id) = youtube_id(url) {
        return MediaKind::YouTube(id);
    }
    if let Some(id) = vimeo_id(url) {
        return MediaKind::Vimeo(id);
    }
    if looks_like_video(url) {
        return MediaKind::DirectVideo;
    }
    MediaKind::Image
}

pub fn youtube_id(url: &str) -> Option<String> {
    let caps = YOUTUBE_RE.captures(url)?;
    let id = caps.get(2)?.as_str();
    (id.chars().count() == 11).then(|| id.to_string())
}

pub fn vimeo_id(url: &str) -> Option<String> {
    VIMEO_RE.captures(url).map(|caps| caps[1].to_string())
}

fn looks_like_video(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.contains("video")
        || lower.contains(".mp4")
        || lower.contains(".webm")
        || lower.contains(".ogg")
        || lower.contains(DEMO_MARKER)
        || lower.starts_with("data:video")
}

/// Player URL for platform-hosted videos. Embedded players start muted.
pub fn embed_url(kind: &MediaKind, autoplay: bool) -> Option<String> {
    let autoplay = u8::from(autoplay);
    match kind {
        MediaKind::YouTube(id) => Some(format!(
            "https://www.youtube.com/embed/{}?autoplay={}&mute=1&playsinline=1&rel=0",
            id, autoplay
        )),
        MediaKind::Vimeo(id) => Some(format!(
            "https://player.vimeo.com/video/{}?autoplay={}&muted=1&playsinline=1",
            id, autoplay
        )),
        _ => None,
    }
}
