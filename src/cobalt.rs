// cobalt.tools API client - audio rip requests
//
// Primary endpoint first, then exactly one fallback to the legacy co.wuk.sh
// instance (older field names). No retries beyond that, no backoff; timeouts
// come from FetchConfig.

use serde::{Deserialize, Serialize};

use crate::errors::GrabError;

pub const COBALT_PRIMARY: &str = "https://api.cobalt.tools/";
pub const COBALT_FALLBACK: &str = "https://co.wuk.sh/api/json";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CobaltRequest<'a> {
    url: &'a str,
    audio_format: &'a str,
    is_audio_only: bool,
    filename_style: &'a str,
}

/// Legacy body shape the wuk.sh instance expects
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LegacyRequest<'a> {
    url: &'a str,
    a_format: &'a str,
    is_audio_only: bool,
}

#[derive(Debug, Deserialize)]
struct CobaltResponse {
    status: Option<String>,
    url: Option<String>,
    filename: Option<String>,
    text: Option<String>,
}

/// What a successful cobalt call yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CobaltStream {
    pub url: String,
    pub filename: Option<String>,
}

fn stream_from(resp: CobaltResponse) -> Result<CobaltStream, GrabError> {
    match resp.status.as_deref() {
        Some("stream") | Some("redirect") | Some("tunnel") | Some("success") => resp
            .url
            .map(|url| CobaltStream {
                url,
                filename: resp.filename,
            })
            .ok_or_else(|| GrabError::Parse("cobalt response carried no URL".to_string())),
        other => Err(GrabError::Network(format!(
            "cobalt status {:?}: {}",
            other,
            resp.text.unwrap_or_default()
        ))),
    }
}

/// Request an mp3 audio stream for a media page URL
pub async fn request_audio(
    client: &reqwest::Client,
    media_url: &str,
) -> Result<CobaltStream, GrabError> {
    let body = CobaltRequest {
        url: media_url,
        audio_format: "mp3",
        is_audio_only: true,
        filename_style: "basic",
    };

    let primary = async {
        let resp = client
            .post(COBALT_PRIMARY)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;
        let parsed: CobaltResponse = resp.json().await?;
        stream_from(parsed)
    }
    .await;

    let primary_err = match primary {
        Ok(stream) => return Ok(stream),
        Err(e) => {
            eprintln!("[Cobalt] Primary endpoint failed: {}. Trying fallback...", e);
            e
        }
    };

    let legacy = LegacyRequest {
        url: media_url,
        a_format: "mp3",
        is_audio_only: true,
    };

    let fallback = async {
        let resp = client
            .post(COBALT_FALLBACK)
            .header("Accept", "application/json")
            .json(&legacy)
            .send()
            .await?;
        let parsed: CobaltResponse = resp.json().await?;
        stream_from(parsed)
    }
    .await;

    match fallback {
        Ok(stream) => {
            eprintln!("[Cobalt] Fallback endpoint succeeded");
            Ok(stream)
        }
        Err(fallback_err) => Err(GrabError::Network(format!(
            "Both cobalt endpoints failed. Primary: {}. Fallback: {}",
            primary_err, fallback_err
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_field_names() {
        let body = CobaltRequest {
            url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            audio_format: "mp3",
            is_audio_only: true,
            filename_style: "basic",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["audioFormat"], "mp3");
        assert_eq!(json["isAudioOnly"], true);
        assert_eq!(json["filenameStyle"], "basic");
    }

    #[test]
    fn test_legacy_body_uses_a_format() {
        let body = LegacyRequest {
            url: "https://youtu.be/dQw4w9WgXcQ",
            a_format: "mp3",
            is_audio_only: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["aFormat"], "mp3");
        assert!(json.get("audioFormat").is_none());
    }

    #[test]
    fn test_stream_status_yields_url() {
        let resp = CobaltResponse {
            status: Some("stream".to_string()),
            url: Some("https://cdn.cobalt.tools/stream/abc".to_string()),
            filename: Some("clip.mp3".to_string()),
            text: None,
        };
        let stream = stream_from(resp).unwrap();
        assert_eq!(stream.filename.as_deref(), Some("clip.mp3"));
    }

    #[test]
    fn test_error_status_is_rejected() {
        let resp = CobaltResponse {
            status: Some("error".to_string()),
            url: None,
            filename: None,
            text: Some("rate limited".to_string()),
        };
        let err = stream_from(resp).unwrap_err();
        assert!(matches!(err, GrabError::Network(_)));
    }
}
