// Common data models shared by the grab components
//
// Everything here is a short-lived, plain record: a collector produces one
// CollectedData, the paired runner consumes it once and returns one
// ActionResult for the host to execute. Nothing is mutated after creation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::errors::GrabError;

/// Platforms the components know how to classify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Vimeo,
    Dailymotion,
    /// Direct link to a media file (classified by extension)
    Direct,
    /// Unrecognized page; only DOM-based scraping applies
    Generic,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Youtube => write!(f, "youtube"),
            Self::Vimeo => write!(f, "vimeo"),
            Self::Dailymotion => write!(f, "dailymotion"),
            Self::Direct => write!(f, "direct"),
            Self::Generic => write!(f, "generic"),
        }
    }
}

/// Broad media type of a candidate resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
    /// Streaming manifest (m3u8/mpd) - never downloadable
    Stream,
    Image,
}

/// One discoverable media resource on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub url: String,
    pub filename: String,
    pub kind: MediaKind,
    pub extension: String,
    /// Where the candidate was found ("page-url", "og:image", "cdn-template", ...)
    pub source: String,
}

/// Stand-in for the live DOM the host renders.
///
/// The host supplies the current URL always; DOM-scraping variants also get
/// the meta tags (og:image, twitter:image) and the first `<video poster>`
/// attribute it already has in hand.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub url: String,
    pub meta: HashMap<String, String>,
    pub video_poster: Option<String>,
}

impl PageContext {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            meta: HashMap::new(),
            video_poster: None,
        }
    }

    pub fn with_meta(mut self, name: &str, content: &str) -> Self {
        self.meta.insert(name.to_string(), content.to_string());
        self
    }

    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.video_poster = Some(poster.into());
        self
    }
}

/// Output of a collector call, consumed once by the paired runner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedData {
    /// RFC 3339 collection time
    pub timestamp: String,
    pub page_url: String,
    pub platform: Platform,
    pub video_id: Option<String>,
    pub candidates: Vec<Candidate>,
    pub error: Option<String>,
    pub message: String,
}

impl CollectedData {
    pub fn new(platform: Platform, page_url: impl Into<String>) -> Self {
        Self {
            timestamp: now_rfc3339(),
            page_url: page_url.into(),
            platform,
            video_id: None,
            candidates: Vec::new(),
            error: None,
            message: String::new(),
        }
    }

    /// Terminal collector error: the runner must surface it, never retry
    pub fn failed(page_url: impl Into<String>, err: GrabError) -> Self {
        let message = err.to_string();
        Self {
            timestamp: now_rfc3339(),
            page_url: page_url.into(),
            platform: Platform::Generic,
            video_id: None,
            candidates: Vec::new(),
            error: Some(message.clone()),
            message,
        }
    }

    pub fn with_video_id(mut self, id: impl Into<String>) -> Self {
        self.video_id = Some(id.into());
        self
    }

    pub fn with_candidates(mut self, candidates: Vec<Candidate>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn is_errored(&self) -> bool {
        self.error.is_some()
    }
}

/// Action kinds the host knows how to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Download,
    ConvertToMp3,
    YoutubeDownload,
    StartSubtitles,
}

/// Direct file fetch the host performs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadAction {
    pub url: String,
    pub filename: String,
    /// Always prompt for the save location
    pub save_as: bool,
    /// Suggested directory, when the platform exposes one
    pub suggested_dir: Option<String>,
}

impl DownloadAction {
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            save_as: true,
            suggested_dir: dirs::download_dir().map(|p| p.to_string_lossy().to_string()),
        }
    }
}

/// The contract returned to the host, which performs the actual side effect.
///
/// Exactly one payload field is populated per action kind: `download` for
/// Download (and as the fallback carried by ConvertToMp3), `source` for
/// ConvertToMp3, `video_id`/`media_kind` for YoutubeDownload, `page_url` for
/// StartSubtitles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub success: bool,
    pub action: Option<ActionKind>,
    pub download: Option<DownloadAction>,
    pub source: Option<Candidate>,
    pub video_id: Option<String>,
    pub media_kind: Option<MediaKind>,
    pub page_url: Option<String>,
    pub message: String,
    pub error: Option<String>,
}

impl ActionResult {
    fn empty(success: bool) -> Self {
        Self {
            success,
            action: None,
            download: None,
            source: None,
            video_id: None,
            media_kind: None,
            page_url: None,
            message: String::new(),
            error: None,
        }
    }

    /// Terminal error result. Never panics; the host has no exception wrapper.
    pub fn failure(err: GrabError) -> Self {
        Self::failure_text(err.to_string())
    }

    /// Terminal error from an already-formatted message (collector errors)
    pub fn failure_text(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            error: Some(message.clone()),
            message,
            ..Self::empty(false)
        }
    }

    pub fn download(action: DownloadAction, message: impl Into<String>) -> Self {
        Self {
            action: Some(ActionKind::Download),
            download: Some(action),
            message: message.into(),
            ..Self::empty(true)
        }
    }

    pub fn convert_to_mp3(
        source: Candidate,
        fallback: DownloadAction,
        message: impl Into<String>,
    ) -> Self {
        Self {
            action: Some(ActionKind::ConvertToMp3),
            source: Some(source),
            download: Some(fallback),
            message: message.into(),
            ..Self::empty(true)
        }
    }

    pub fn youtube_download(
        video_id: impl Into<String>,
        media_kind: MediaKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            action: Some(ActionKind::YoutubeDownload),
            video_id: Some(video_id.into()),
            media_kind: Some(media_kind),
            message: message.into(),
            ..Self::empty(true)
        }
    }

    pub fn start_subtitles(page_url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            action: Some(ActionKind::StartSubtitles),
            page_url: Some(page_url.into()),
            message: message.into(),
            ..Self::empty(true)
        }
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_data_carries_error_and_message() {
        let data = CollectedData::failed("https://netflix.com/watch/1", GrabError::MissingUrl);
        assert!(data.is_errored());
        assert_eq!(data.message, data.error.clone().unwrap());
    }

    #[test]
    fn test_failure_result_is_not_success() {
        let result = ActionResult::failure(GrabError::MissingCollectedData);
        assert!(!result.success);
        assert!(result.action.is_none());
        assert!(result.error.is_some());
    }

    #[test]
    fn test_download_result_shape() {
        let result = ActionResult::download(
            DownloadAction::new("https://example.com/clip.mp4", "clip.mp4"),
            "Downloading clip.mp4",
        );
        assert!(result.success);
        assert_eq!(result.action, Some(ActionKind::Download));
        assert_eq!(result.download.unwrap().filename, "clip.mp4");
    }

    #[test]
    fn test_action_kind_wire_names() {
        let json = serde_json::to_string(&ActionKind::ConvertToMp3).unwrap();
        assert_eq!(json, "\"convert_to_mp3\"");
        let json = serde_json::to_string(&ActionKind::StartSubtitles).unwrap();
        assert_eq!(json, "\"start_subtitles\"");
    }
}
