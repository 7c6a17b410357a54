// URL classifier - maps a page URL to a platform + video id, or to a media
// type by file extension
//
// Matching is ordered and first-match-wins; there is no backtracking across
// platforms. DRM-listed hosts and streaming manifests short-circuit to
// terminal errors before any network call is made.

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::GrabError;
use crate::models::{MediaKind, Platform};

/// Hosts whose content is always DRM-protected; classification stops here
pub const DRM_DOMAINS: [&str; 5] = [
    "netflix.com",
    "hulu.com",
    "disneyplus.com",
    "primevideo.com",
    "spotify.com",
];

/// Immutable extension sets - configuration data, never mutated
pub const AUDIO_EXTENSIONS: [&str; 8] = ["mp3", "wav", "ogg", "m4a", "aac", "flac", "wma", "opus"];
pub const VIDEO_EXTENSIONS: [&str; 9] =
    ["mp4", "webm", "mov", "avi", "mkv", "flv", "wmv", "m4v", "3gp"];
pub const STREAM_EXTENSIONS: [&str; 2] = ["m3u8", "mpd"];

lazy_static! {
    // Ordered YouTube alternatives: watch?v=, youtu.be/, /embed/, /shorts/
    static ref YT_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"[?&]v=([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"youtu\.be/([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"/embed/([A-Za-z0-9_-]{11})").unwrap(),
        Regex::new(r"/shorts/([A-Za-z0-9_-]{11})").unwrap(),
    ];
    static ref VIMEO_RE: Regex = Regex::new(r"vimeo\.com/(\d+)").unwrap();
    static ref DAILYMOTION_RE: Regex = Regex::new(r"dailymotion\.com/video/([^_/?#&]+)").unwrap();
}

/// Check the URL against the DRM domain list. Path is irrelevant.
pub fn drm_host(url: &str) -> Option<&'static str> {
    let lower = url.to_lowercase();
    DRM_DOMAINS.iter().find(|d| lower.contains(*d)).copied()
}

/// Extract the 11-character YouTube video id, trying all URL shapes in order
pub fn youtube_video_id(url: &str) -> Option<String> {
    YT_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .map(|caps| caps[1].to_string())
}

/// Map a URL to `(platform, video_id)`. First matching platform wins.
pub fn classify_platform(url: &str) -> Option<(Platform, String)> {
    let lower = url.to_lowercase();

    if lower.contains("youtube.com") || lower.contains("youtu.be") {
        return youtube_video_id(url).map(|id| (Platform::Youtube, id));
    }

    if let Some(caps) = VIMEO_RE.captures(url) {
        return Some((Platform::Vimeo, caps[1].to_string()));
    }

    if let Some(caps) = DAILYMOTION_RE.captures(url) {
        return Some((Platform::Dailymotion, caps[1].to_string()));
    }

    None
}

/// Lowercased extension of the URL path, with query and fragment stripped
pub fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next()?;
    let (_, ext) = segment.rsplit_once('.')?;
    if ext.is_empty() || ext.len() > 5 {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Classify a direct URL by its file extension against the fixed sets
pub fn classify_media_extension(url: &str) -> Option<(MediaKind, String)> {
    let ext = url_extension(url)?;
    if STREAM_EXTENSIONS.contains(&ext.as_str()) {
        return Some((MediaKind::Stream, ext));
    }
    if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        return Some((MediaKind::Audio, ext));
    }
    if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        return Some((MediaKind::Video, ext));
    }
    None
}

/// Last path segment of a URL, used as the suggested filename
pub fn last_path_segment(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("download")
        .to_string()
}

/// Gate every collector: DRM hosts and streaming manifests are terminal
pub fn check_blocked(url: &str) -> Result<(), GrabError> {
    if url.is_empty() {
        return Err(GrabError::MissingUrl);
    }
    if let Some(host) = drm_host(url) {
        return Err(GrabError::DrmProtected(host.to_string()));
    }
    if let Some((MediaKind::Stream, ext)) = classify_media_extension(url) {
        return Err(GrabError::StreamingManifest(format!(".{}", ext)));
    }
    Ok(())
}
