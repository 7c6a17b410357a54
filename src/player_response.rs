// Best-effort extraction of the ytInitialPlayerResponse blob from a fetched
// watch page
//
// Scraping third-party HTML is inherently fragile, so absence of the blob or
// a failed parse is NOT an error here: callers get None and take their own
// fallback path (thumbnail download). Only an explicit non-OK playability
// status is terminal.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::errors::GrabError;

lazy_static! {
    // Permissive on purpose: first `{...}` after the assignment, up to the
    // closing `};`. Page layout changes routinely break stricter anchors.
    static ref PLAYER_RESPONSE_RE: Regex =
        Regex::new(r"(?s)ytInitialPlayerResponse\s*=\s*(\{.+?\})\s*;").unwrap();
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    #[serde(default)]
    pub playability_status: PlayabilityStatus,
    pub streaming_data: Option<StreamingData>,
    pub video_details: Option<VideoDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayabilityStatus {
    pub status: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingData {
    #[serde(default)]
    pub formats: Vec<RawFormat>,
    #[serde(default)]
    pub adaptive_formats: Vec<RawFormat>,
}

/// One entry of streamingData.formats / .adaptiveFormats, as YouTube ships it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFormat {
    /// Direct stream URL; absent when the format is cipher-protected
    pub url: Option<String>,
    /// Present instead of `url` on protected formats
    pub signature_cipher: Option<String>,
    pub mime_type: Option<String>,
    pub bitrate: Option<u64>,
    pub quality_label: Option<String>,
    pub quality: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub title: Option<String>,
    pub video_id: Option<String>,
}

/// Locate and parse the embedded player response. None means "not found or
/// unparseable" - the caller decides how to degrade.
pub fn extract_player_response(html: &str) -> Option<PlayerResponse> {
    let caps = PLAYER_RESPONSE_RE.captures(html)?;
    match serde_json::from_str::<PlayerResponse>(&caps[1]) {
        Ok(resp) => Some(resp),
        Err(e) => {
            eprintln!("[PlayerResponse] Blob found but did not parse: {}", e);
            None
        }
    }
}

/// Non-OK playability statuses YouTube reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnplayableReason {
    LoginRequired,
    LiveStreamOffline,
    ContentCheckRequired,
    Unplayable,
    Error,
    Other,
}

impl UnplayableReason {
    pub fn from_status(status: &str) -> Self {
        match status {
            "LOGIN_REQUIRED" => Self::LoginRequired,
            "LIVE_STREAM_OFFLINE" => Self::LiveStreamOffline,
            "CONTENT_CHECK_REQUIRED" => Self::ContentCheckRequired,
            "UNPLAYABLE" => Self::Unplayable,
            "ERROR" => Self::Error,
            _ => Self::Other,
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::LoginRequired => "Sign-in required (private or age-restricted video)",
            Self::LiveStreamOffline => "Live stream is offline",
            Self::ContentCheckRequired => "Viewer discretion check required",
            Self::Unplayable => "Video cannot be played",
            Self::Error => "Video unavailable",
            Self::Other => "Video is not playable",
        }
    }
}

/// `playabilityStatus.status == "OK"` or a terminal error carrying the
/// platform-supplied reason string
pub fn check_playability(resp: &PlayerResponse) -> Result<(), GrabError> {
    let status = resp.playability_status.status.as_deref().unwrap_or("OK");
    if status == "OK" {
        return Ok(());
    }

    let reason = UnplayableReason::from_status(status);
    let detail = resp
        .playability_status
        .reason
        .clone()
        .unwrap_or_else(|| reason.description().to_string());
    Err(GrabError::Unplayable(format!("{} ({})", detail, status)))
}
