// Stream format selection for scraped YouTube watch pages
//
// Converts raw player-response formats into StreamFormat candidates and picks
// one:
// - audio-only formats ranked by descending bitrate (stable on ties)
// - else any combined audio+video format
// - else the first remaining candidate of any type

use serde::{Deserialize, Serialize};

use crate::player_response::{PlayerResponse, RawFormat};

/// What a stream format carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// Muxed audio+video (streamingData.formats)
    Combined,
    /// Audio-only adaptive format
    Audio,
    /// Video-only adaptive format
    Video,
}

/// One downloadable stream candidate, ephemeral within a single run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamFormat {
    pub url: String,
    pub quality: String,
    pub mime_type: String,
    pub bitrate: Option<u64>,
    pub kind: FormatKind,
    pub has_audio: bool,
    pub has_video: bool,
}

/// Named heuristic for "this URL needs client-side signature decryption".
///
/// A brittle approximation carried over from the original behavior: it may
/// both over- and under-match. Treat it as advisory only - filter and fall
/// back, never report it as DRM.
pub fn looks_signature_guarded(url: &str) -> bool {
    url.contains("signature") || url.contains("&s=")
}

fn from_raw(raw: &RawFormat, kind: FormatKind) -> Option<StreamFormat> {
    // Cipher-protected entries ship signatureCipher instead of url
    let url = raw.url.clone()?;
    let mime_type = raw.mime_type.clone().unwrap_or_default();
    let quality = raw
        .quality_label
        .clone()
        .or_else(|| raw.quality.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let (has_audio, has_video) = match kind {
        FormatKind::Combined => (true, true),
        FormatKind::Audio => (true, false),
        FormatKind::Video => (false, true),
    };

    Some(StreamFormat {
        url,
        quality,
        mime_type,
        bitrate: raw.bitrate,
        kind,
        has_audio,
        has_video,
    })
}

/// Flatten formats + adaptiveFormats, tagging adaptive entries audio/video by
/// MIME substring. Entries without a direct URL are dropped here.
pub fn collect_stream_formats(resp: &PlayerResponse) -> Vec<StreamFormat> {
    let Some(sd) = &resp.streaming_data else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for raw in &sd.formats {
        if let Some(fmt) = from_raw(raw, FormatKind::Combined) {
            out.push(fmt);
        }
    }
    for raw in &sd.adaptive_formats {
        let mime = raw.mime_type.as_deref().unwrap_or("");
        let kind = if mime.contains("audio") {
            FormatKind::Audio
        } else {
            FormatKind::Video
        };
        if let Some(fmt) = from_raw(raw, kind) {
            out.push(fmt);
        }
    }
    out
}

/// Drop everything the signature heuristic flags
pub fn filter_unguarded(formats: Vec<StreamFormat>) -> Vec<StreamFormat> {
    formats
        .into_iter()
        .filter(|f| !looks_signature_guarded(&f.url))
        .collect()
}

/// Selection policy over the remaining candidates
pub fn select_stream(formats: &[StreamFormat]) -> Option<&StreamFormat> {
    // Best audio by bitrate; strict greater-than keeps the earliest on ties
    let mut best_audio: Option<&StreamFormat> = None;
    for fmt in formats.iter().filter(|f| f.kind == FormatKind::Audio) {
        match best_audio {
            Some(best) if fmt.bitrate.unwrap_or(0) <= best.bitrate.unwrap_or(0) => {}
            _ => best_audio = Some(fmt),
        }
    }
    if best_audio.is_some() {
        return best_audio;
    }

    if let Some(combined) = formats.iter().find(|f| f.kind == FormatKind::Combined) {
        return Some(combined);
    }

    formats.first()
}

/// Filename extension by MIME substring
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    if mime_type.contains("mp4") {
        ".m4a"
    } else {
        ".webm"
    }
}
