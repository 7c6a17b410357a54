// Media downloader v1 - direct links and platform delegation, no network
//
// Direct media URLs become plain download actions; platform videos are
// delegated to the host-side extraction service via youtube_download.

use async_trait::async_trait;

use crate::classify;
use crate::errors::GrabError;
use crate::models::{
    ActionResult, Candidate, CollectedData, DownloadAction, MediaKind, PageContext, Platform,
};

use super::traits::{require_collected, MediaComponent};

pub struct MediaDownloaderV1;

#[async_trait]
impl MediaComponent for MediaDownloaderV1 {
    fn name(&self) -> &'static str {
        "media-v1"
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

        if let Some((platform, video_id)) = classify::classify_platform(&page.url) {
            return CollectedData::new(platform, &page.url)
                .with_video_id(video_id)
                .with_message(format!("{} video found", platform));
        }

        CollectedData::failed(&page.url, GrabError::UnsupportedPlatform(page.url.clone()))
    }

    async fn run(&self, data: Option<&CollectedData>) -> ActionResult {
        let data = match require_collected(data) {
            Ok(d) => d,
            Err(result) => return result,
        };

        if let Some(candidate) = data.candidates.first() {
            return ActionResult::download(
                DownloadAction::new(&candidate.url, &candidate.filename),
                format!("Downloading {}", candidate.filename),
            );
        }

        match (data.platform, &data.video_id) {
            (Platform::Youtube, Some(id)) => ActionResult::youtube_download(
                id,
                MediaKind::Video,
                "Delegating to the host YouTube extraction service",
            ),
            _ => ActionResult::failure(GrabError::UnsupportedPlatform(data.page_url.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActionKind;

    #[tokio::test]
    async fn test_direct_media_roundtrip() {
        // Run(DataCollector(url)) keeps the URL unchanged and names the file
        // after the last path segment
        let page = PageContext::from_url("https://example.com/media/clip.mp4");
        let data = MediaDownloaderV1.collect(&page);
        let result = MediaDownloaderV1.run(Some(&data)).await;

        assert!(result.success);
        assert_eq!(result.action, Some(ActionKind::Download));
        let download = result.download.unwrap();
        assert_eq!(download.url, "https://example.com/media/clip.mp4");
        assert_eq!(download.filename, "clip.mp4");
        assert!(download.save_as);
    }

    #[tokio::test]
    async fn test_youtube_page_delegates_to_host() {
        let page = PageContext::from_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        let data = MediaDownloaderV1.collect(&page);
        let result = MediaDownloaderV1.run(Some(&data)).await;

        assert!(result.success);
        assert_eq!(result.action, Some(ActionKind::YoutubeDownload));
        assert_eq!(result.video_id.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(result.media_kind, Some(MediaKind::Video));
    }

    #[tokio::test]
    async fn test_manifest_url_never_yields_a_candidate() {
        let page = PageContext::from_url("https://cdn.example.com/live/index.m3u8");
        let data = MediaDownloaderV1.collect(&page);
        assert!(data.is_errored());
        assert!(data.candidates.is_empty());
        let result = MediaDownloaderV1.run(Some(&data)).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_run_without_data_never_throws() {
        let result = MediaDownloaderV1.run(None).await;
        assert!(!result.success);
    }
}
