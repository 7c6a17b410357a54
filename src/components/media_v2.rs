// Media downloader v2 - YouTube watch-page stream scraping
//
// For direct media links this behaves like v1. For YouTube it fetches the
// watch page, extracts ytInitialPlayerResponse and picks a stream format.
// Whenever stream extraction is impossible (blob missing, only
// signature-guarded formats) it degrades to a thumbnail download rather than
// failing - completeness traded for a guaranteed outcome.

use async_trait::async_trait;

use crate::classify;
use crate::errors::GrabError;
use crate::fetch::{build_client, fetch_text, FetchConfig};
use crate::format_select::{
    collect_stream_formats, extension_for_mime, filter_unguarded, select_stream,
};
use crate::models::{
    ActionResult, Candidate, CollectedData, DownloadAction, PageContext, Platform,
};
use crate::player_response::{check_playability, extract_player_response};
use crate::thumbnails;

use super::traits::{require_collected, MediaComponent};

pub struct MediaDownloaderV2 {
    config: FetchConfig,
}

impl MediaDownloaderV2 {
    pub fn new() -> Self {
        Self {
            config: FetchConfig::default(),
        }
    }

    pub fn with_config(config: FetchConfig) -> Self {
        Self { config }
    }
}

impl Default for MediaDownloaderV2 {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}

/// Thumbnail download used whenever stream extraction comes up empty
fn thumbnail_fallback(video_id: &str, message: String) -> ActionResult {
    let urls = thumbnails::youtube_thumbnail_urls(video_id);
    // Lists are ordered best-first
    let best = urls[0].clone();
    ActionResult::download(
        DownloadAction::new(best, format!("{}_thumbnail.jpg", video_id)),
        message,
    )
}

/// External-tool command surfaced as a hint when only guarded formats exist
fn tool_hint(video_id: &str) -> String {
    format!("yt-dlp \"https://www.youtube.com/watch?v={}\"", video_id)
}

/// Pure planning step: fetched watch-page HTML in, host action out.
/// Split from `run` so stream selection is testable without the network.
pub fn plan_youtube_action(html: &str, video_id: &str) -> ActionResult {
    let Some(resp) = extract_player_response(html) else {
        eprintln!("[MediaV2] Player data not found; falling back to thumbnail");
        return thumbnail_fallback(
            video_id,
            "Player data not found on the page. Downloading the thumbnail instead.".to_string(),
        );
    };

    if let Err(e) = check_playability(&resp) {
        return ActionResult::failure(e);
    }

    let all = collect_stream_formats(&resp);
    let usable = filter_unguarded(all);
    let Some(best) = select_stream(&usable) else {
        eprintln!("[MediaV2] Only signature-guarded formats; falling back to thumbnail");
        return thumbnail_fallback(
            video_id,
            format!(
                "All stream formats require signature decryption. Downloading the \
                 thumbnail instead. To get the full video, run: {}",
                tool_hint(video_id)
            ),
        );
    };

    let stem = resp
        .video_details
        .as_ref()
        .and_then(|d| d.title.clone())
        .map(|t| sanitize_filename(&t))
        .unwrap_or_else(|| video_id.to_string());
    let filename = format!("{}{}", stem, extension_for_mime(&best.mime_type));

    ActionResult::download(
        DownloadAction::new(&best.url, &filename),
        format!("Downloading {} ({})", filename, best.quality),
    )
}

#[async_trait]
impl MediaComponent for MediaDownloaderV2 {
    fn name(&self) -> &'static str {
        "media-v2"
    }

    fn collect(&self, page: &PageContext) -> CollectedData {
        if let Err(e) = classify::check_blocked(&page.url) {
            return CollectedData::failed(&page.url, e);
        }

        if let Some((kind, extension)) = classify::classify_media_extension(&page.url) {
            let candidate = Candidate {
                url: page.url.clone(),
                filename: classify::last_path_segment(&page.url),
                kind,
                extension,
                source: "page-url".to_string(),
            };
            return CollectedData::new(Platform::Direct, &page.url)
                .with_candidates(vec![candidate])
                .with_message("Direct media link found");
        }

        if let Some((Platform::Youtube, video_id)) = classify::classify_platform(&page.url) {
            return CollectedData::new(Platform::Youtube, &page.url)
                .with_video_id(video_id)
                .with_message("YouTube video found. Streams will be scraped on run.");
        }

        CollectedData::failed(&page.url, GrabError::UnsupportedPlatform(page.url.clone()))
    }

    async fn run(&self, data: Option<&CollectedData>) -> ActionResult {
        let data = match require_collected(data) {
            Ok(d) => d,
            Err(result) => return result,
        };

        // Direct link: same as v1, no network needed
        if let Some(candidate) = data.candidates.first() {
            return ActionResult::download(
                DownloadAction::new(&candidate.url, &candidate.filename),
                format!("Downloading {}", candidate.filename),
            );
        }

        let Some(video_id) = data.video_id.clone() else {
            return ActionResult::failure(GrabError::MissingVideoId(data.page_url.clone()));
        };

        let client = match build_client(&self.config) {
            Ok(c) => c,
            Err(e) => return ActionResult::failure(e),
        };

        let watch_url = format!("https://www.youtube.com/watch?v={}", video_id);
        eprintln!("[MediaV2] Fetching watch page {}", watch_url);
        match fetch_text(&client, &watch_url).await {
            Ok(html) => plan_youtube_action(&html, &video_id),
            Err(e) => {
                // One degraded fallback, no second fetch attempt
                eprintln!("[MediaV2] Watch page fetch failed: {}", e);
                thumbnail_fallback(
                    &video_id,
                    format!(
                        "Could not fetch the watch page ({}). Downloading the thumbnail instead.",
                        e
                    ),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActionKind;

    const ID: &str = "dQw4w9WgXcQ";

    fn html_with(player_response: &str) -> String {
        format!(
            "<html><script>var ytInitialPlayerResponse = {};</script></html>",
            player_response
        )
    }

    #[test]
    fn test_best_audio_format_selected() {
        let html = html_with(
            r#"{"playabilityStatus":{"status":"OK"},
                "videoDetails":{"title":"Never Gonna"},
                "streamingData":{
                  "formats":[{"url":"https://r1/c","mimeType":"video/mp4","bitrate":900000,"qualityLabel":"360p"}],
                  "adaptiveFormats":[
                    {"url":"https://r1/a128","mimeType":"audio/mp4; codecs=\"mp4a.40.2\"","bitrate":128000},
                    {"url":"https://r1/a256","mimeType":"audio/mp4; codecs=\"mp4a.40.2\"","bitrate":256000}
                  ]}}"#,
        );
        let result = plan_youtube_action(&html, ID);
        assert!(result.success);
        let download = result.download.unwrap();
        assert_eq!(download.url, "https://r1/a256");
        assert_eq!(download.filename, "Never Gonna.m4a");
    }

    #[test]
    fn test_webm_extension_for_non_mp4_mime() {
        let html = html_with(
            r#"{"playabilityStatus":{"status":"OK"},
                "streamingData":{
                  "adaptiveFormats":[
                    {"url":"https://r1/opus","mimeType":"audio/webm; codecs=\"opus\"","bitrate":160000}
                  ]}}"#,
        );
        let result = plan_youtube_action(&html, ID);
        let download = result.download.unwrap();
        assert_eq!(download.filename, format!("{}.webm", ID));
    }

    #[test]
    fn test_signature_only_formats_fall_back_to_thumbnail_with_hint() {
        let html = html_with(
            r#"{"playabilityStatus":{"status":"OK"},
                "streamingData":{
                  "adaptiveFormats":[
                    {"url":"https://r1/a?x=1&s=cipher","mimeType":"audio/mp4","bitrate":128000},
                    {"url":"https://r1/v?signature=abc","mimeType":"video/mp4","bitrate":900000}
                  ]}}"#,
        );
        let result = plan_youtube_action(&html, ID);
        assert!(result.success, "degraded result must still succeed");
        assert_eq!(result.action, Some(ActionKind::Download));
        let download = result.download.unwrap();
        assert!(download.url.contains("img.youtube.com"));
        assert!(result.message.contains("yt-dlp"));
    }

    #[test]
    fn test_missing_blob_falls_back_to_thumbnail() {
        let result = plan_youtube_action("<html>nothing embedded</html>", ID);
        assert!(result.success);
        assert!(result.download.unwrap().url.contains("maxresdefault"));
    }

    #[test]
    fn test_unplayable_status_is_terminal() {
        let html = html_with(
            r#"{"playabilityStatus":{"status":"UNPLAYABLE","reason":"This video is private"}}"#,
        );
        let result = plan_youtube_action(&html, ID);
        assert!(!result.success);
        assert!(result.error.unwrap().contains("This video is private"));
    }

    #[tokio::test]
    async fn test_run_without_data_never_throws() {
        let result = MediaDownloaderV2::new().run(None).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_direct_media_skips_scraping() {
        let page = PageContext::from_url("https://example.com/song.m4a");
        let component = MediaDownloaderV2::new();
        let data = component.collect(&page);
        let result = component.run(Some(&data)).await;
        assert!(result.success);
        assert_eq!(result.download.unwrap().filename, "song.m4a");
    }
}
