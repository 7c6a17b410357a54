// Error types shared by all grab components

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrabError {
    /// No page URL was supplied by the host
    MissingUrl,

    /// Run was invoked without (or with errored) collected data
    MissingCollectedData,

    /// URL belongs to a DRM-protected service (Netflix, Spotify, ...)
    DrmProtected(String),

    /// URL points at a streaming manifest (.m3u8 / .mpd)
    StreamingManifest(String),

    /// Host/platform is not one we can classify
    UnsupportedPlatform(String),

    /// A platform URL matched but no video id could be extracted
    MissingVideoId(String),

    /// Outbound request failed or returned a non-OK status
    Network(String),

    /// Fetched page or API body could not be parsed
    Parse(String),

    /// Platform reported the video as unplayable
    Unplayable(String),

    /// Unknown error with details
    Unknown(String),
}

impl fmt::Display for GrabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUrl => write!(f, "No URL found for the current page"),
            Self::MissingCollectedData => {
                write!(f, "No data collected. Run the collector first.")
            }
            Self::DrmProtected(host) => write!(
                f,
                "{} uses DRM protection. Its content cannot be downloaded.",
                host
            ),
            Self::StreamingManifest(ext) => write!(
                f,
                "This is a streaming manifest ({}). Streaming media cannot be \
                 downloaded directly.",
                ext
            ),
            Self::UnsupportedPlatform(url) => write!(f, "Unsupported page: {}", url),
            Self::MissingVideoId(url) => write!(f, "Could not extract a video id from {}", url),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Unplayable(reason) => write!(f, "Video is not playable: {}", reason),
            Self::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl std::error::Error for GrabError {}

// Convert from String for boundary code that only has message text
impl From<String> for GrabError {
    fn from(s: String) -> Self {
        // Smart detection of error types

        if s.contains("timeout") || s.contains("timed out") || s.contains("connection") {
            return Self::Network(s);
        }

        if s.contains("parse") || s.contains("JSON") || s.contains("expected") {
            return Self::Parse(s);
        }

        if s.contains("Unsupported") || s.contains("unsupported") {
            return Self::UnsupportedPlatform(s);
        }

        Self::Unknown(s)
    }
}

impl From<reqwest::Error> for GrabError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl From<serde_json::Error> for GrabError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_network_detection() {
        let err = GrabError::from("request timed out after 30s".to_string());
        assert!(matches!(err, GrabError::Network(_)));
    }

    #[test]
    fn test_from_string_parse_detection() {
        let err = GrabError::from("invalid JSON at line 1".to_string());
        assert!(matches!(err, GrabError::Parse(_)));
    }

    #[test]
    fn test_from_string_unknown_fallback() {
        let err = GrabError::from("something odd happened".to_string());
        assert!(matches!(err, GrabError::Unknown(_)));
    }
}
