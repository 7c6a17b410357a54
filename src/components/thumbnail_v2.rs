// Thumbnail grabber v2 - independent variant of v1, kept separate on purpose
//
// Adds the Dailymotion template and a generic-page path that reads og:image,
// twitter:image and <video poster> from the rendered DOM (via PageContext).

use async_trait::async_trait;

use crate::classify;
use crate::errors::GrabError;
use crate::models::{ActionResult, CollectedData, DownloadAction, PageContext, Platform};
use crate::thumbnails;

use super::traits::{require_collected, MediaComponent};

pub struct ThumbnailGrabberV2;

#[async_trait]
impl MediaComponent for ThumbnailGrabberV2 {
    fn name(&self) -> &'static str {
        "thumbnail-v2"
    }

    fn collect(&self, page: &PageContext) -> CollectedData {
        if let Err(e) = classify::check_blocked(&page.url) {
            return CollectedData::failed(&page.url, e);
        }

        if let Some((platform, video_id)) = classify::classify_platform(&page.url) {
            let urls = thumbnails::platform_thumbnail_urls(platform, &video_id);
            let candidates = thumbnails::to_candidates(&urls, &video_id, "cdn-template");
            return CollectedData::new(platform, &page.url)
                .with_video_id(video_id)
                .with_candidates(candidates)
                .with_message(format!("{} thumbnail candidates found", platform));
        }

        // Generic page: only what the DOM already renders
        let urls = thumbnails::page_meta_thumbnail_urls(page);
        if urls.is_empty() {
            return CollectedData::failed(
                &page.url,
                GrabError::UnsupportedPlatform(page.url.clone()),
            );
        }
        let candidates = thumbnails::to_candidates(&urls, "page", "page-meta");
        CollectedData::new(Platform::Generic, &page.url)
            .with_candidates(candidates)
            .with_message("Thumbnail candidates found in page metadata")
    }

    async fn run(&self, data: Option<&CollectedData>) -> ActionResult {
        let data = match require_collected(data) {
            Ok(d) => d,
            Err(result) => return result,
        };

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
    async fn test_dailymotion_template() {
        let page = PageContext::from_url("https://www.dailymotion.com/video/x8abcd_title");
        let data = ThumbnailGrabberV2.collect(&page);
        let result = ThumbnailGrabberV2.run(Some(&data)).await;
        assert_eq!(
            result.download.unwrap().url,
            "https://www.dailymotion.com/thumbnail/video/x8abcd"
        );
    }

    #[tokio::test]
    async fn test_generic_page_prefers_og_image() {
        let page = PageContext::from_url("https://blog.example.com/post")
            .with_meta("og:image", "https://cdn.example.com/cover.png")
            .with_poster("https://cdn.example.com/poster.jpg");
        let data = ThumbnailGrabberV2.collect(&page);
        assert_eq!(data.candidates.len(), 2);

        let result = ThumbnailGrabberV2.run(Some(&data)).await;
        let download = result.download.unwrap();
        assert_eq!(download.url, "https://cdn.example.com/cover.png");
        assert_eq!(download.filename, "page_thumbnail.png");
    }

    #[test]
    fn test_bare_generic_page_is_terminal() {
        let page = PageContext::from_url("https://blog.example.com/post");
        let data = ThumbnailGrabberV2.collect(&page);
        assert!(data.is_errored());
    }

    #[tokio::test]
    async fn test_run_without_data_never_throws() {
        let result = ThumbnailGrabberV2.run(None).await;
        assert!(!result.success);
    }
}
