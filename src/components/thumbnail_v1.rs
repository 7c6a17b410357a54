// Thumbnail grabber v1 - platform CDN templates only (YouTube, Vimeo)

use async_trait::async_trait;

use crate::classify;
use crate::errors::GrabError;
use crate::models::{ActionResult, CollectedData, DownloadAction, PageContext, Platform};
use crate::thumbnails;

use super::traits::{require_collected, MediaComponent};

pub struct ThumbnailGrabberV1;

#[async_trait]
impl MediaComponent for ThumbnailGrabberV1 {
    fn name(&self) -> &'static str {
        "thumbnail-v1"
    }

    fn collect(&self, page: &PageContext) -> CollectedData {
        if let Err(e) = classify::check_blocked(&page.url) {
            return CollectedData::failed(&page.url, e);
        }

        let Some((platform, video_id)) = classify::classify_platform(&page.url) else {
            return CollectedData::failed(
                &page.url,
                GrabError::UnsupportedPlatform(page.url.clone()),
            );
        };

        if !matches!(platform, Platform::Youtube | Platform::Vimeo) {
            return CollectedData::failed(
                &page.url,
                GrabError::UnsupportedPlatform(page.url.clone()),
            );
        }

        let urls = thumbnails::platform_thumbnail_urls(platform, &video_id);
        let candidates = thumbnails::to_candidates(&urls, &video_id, "cdn-template");

        CollectedData::new(platform, &page.url)
            .with_video_id(video_id)
            .with_candidates(candidates)
            .with_message(format!("{} thumbnail candidates found", platform))
    }

    async fn run(&self, data: Option<&CollectedData>) -> ActionResult {
        let data = match require_collected(data) {
            Ok(d) => d,
            Err(result) => return result,
        };

        // Candidate lists are ordered best-first; take the head
        let Some(best) = data.candidates.first() else {
            return ActionResult::failure(GrabError::MissingCollectedData);
        };

        ActionResult::download(
            DownloadAction::new(&best.url, &best.filename),
            format!("Downloading thumbnail {}", best.filename),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_youtube_best_is_maxres() {
        let page = PageContext::from_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        let data = ThumbnailGrabberV1.collect(&page);
        assert_eq!(data.candidates.len(), 5);

        let result = ThumbnailGrabberV1.run(Some(&data)).await;
        assert!(result.success);
        assert!(result.download.unwrap().url.contains("maxresdefault"));
    }

    #[tokio::test]
    async fn test_vimeo_uses_vumbnail() {
        let page = PageContext::from_url("https://vimeo.com/76979871");
        let data = ThumbnailGrabberV1.collect(&page);
        let result = ThumbnailGrabberV1.run(Some(&data)).await;
        assert_eq!(
            result.download.unwrap().url,
            "https://vumbnail.com/76979871.jpg"
        );
    }

    #[test]
    fn test_generic_page_is_unsupported_in_v1() {
        let page = PageContext::from_url("https://blog.example.com/post");
        let data = ThumbnailGrabberV1.collect(&page);
        assert!(data.is_errored());
    }

    #[tokio::test]
    async fn test_run_without_data_never_throws() {
        let result = ThumbnailGrabberV1.run(None).await;
        assert!(!result.success);
    }
}
