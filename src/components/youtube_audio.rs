// YouTube audio grabber - rips audio through the cobalt.tools API
//
// Collector classifies the page as a YouTube video; the runner posts the
// watch URL to cobalt (one fallback endpoint, no further retries) and hands
// the returned stream URL back to the host as a plain download.

use async_trait::async_trait;

use crate::cobalt;
use crate::classify;
use crate::errors::GrabError;
use crate::fetch::{build_client, FetchConfig};
use crate::models::{
    ActionResult, Candidate, CollectedData, DownloadAction, MediaKind, PageContext, Platform,
};

use super::traits::{require_collected, MediaComponent};

pub struct YoutubeAudioGrabber {
    config: FetchConfig,
}

impl YoutubeAudioGrabber {
    pub fn new() -> Self {
        Self {
            config: FetchConfig::default(),
        }
    }

    pub fn with_config(config: FetchConfig) -> Self {
        Self { config }
    }
}

impl Default for YoutubeAudioGrabber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaComponent for YoutubeAudioGrabber {
    fn name(&self) -> &'static str {
        "youtube-audio"
    }

    fn collect(&self, page: &PageContext) -> CollectedData {
        if let Err(e) = classify::check_blocked(&page.url) {
            return CollectedData::failed(&page.url, e);
        }

        let Some((Platform::Youtube, video_id)) = classify::classify_platform(&page.url) else {
            return CollectedData::failed(
                &page.url,
                GrabError::UnsupportedPlatform(page.url.clone()),
            );
        };

        let candidate = Candidate {
            url: format!("https://www.youtube.com/watch?v={}", video_id),
            filename: format!("{}.mp3", video_id),
            kind: MediaKind::Audio,
            extension: "mp3".to_string(),
            source: "page-url".to_string(),
        };

        CollectedData::new(Platform::Youtube, &page.url)
            .with_video_id(video_id)
            .with_candidates(vec![candidate])
            .with_message("YouTube video found. Audio can be ripped via cobalt.")
    }

    async fn run(&self, data: Option<&CollectedData>) -> ActionResult {
        let data = match require_collected(data) {
            Ok(d) => d,
            Err(result) => return result,
        };

        let Some(candidate) = data.candidates.first() else {
            return ActionResult::failure(GrabError::MissingCollectedData);
        };

        let client = match build_client(&self.config) {
            Ok(c) => c,
            Err(e) => return ActionResult::failure(e),
        };

        eprintln!("[YoutubeAudio] Requesting audio rip for {}", candidate.url);
        match cobalt::request_audio(&client, &candidate.url).await {
            Ok(stream) => {
                let filename = stream
                    .filename
                    .unwrap_or_else(|| candidate.filename.clone());
                ActionResult::download(
                    DownloadAction::new(stream.url, &filename),
                    format!("Downloading audio as {}", filename),
                )
            }
            Err(e) => {
                eprintln!("[YoutubeAudio] Rip failed: {}", e);
                ActionResult::failure(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_extracts_watch_url_and_mp3_name() {
        let page = PageContext::from_url("https://youtu.be/dQw4w9WgXcQ");
        let data = YoutubeAudioGrabber::new().collect(&page);
        assert!(!data.is_errored());
        assert_eq!(data.video_id.as_deref(), Some("dQw4w9WgXcQ"));
        let candidate = &data.candidates[0];
        assert_eq!(candidate.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(candidate.filename, "dQw4w9WgXcQ.mp3");
    }

    #[test]
    fn test_collect_rejects_non_youtube_page() {
        let page = PageContext::from_url("https://vimeo.com/76979871");
        let data = YoutubeAudioGrabber::new().collect(&page);
        assert!(data.is_errored());
    }

    #[tokio::test]
    async fn test_run_without_data_never_throws() {
        let result = YoutubeAudioGrabber::new().run(None).await;
        assert!(!result.success);
        assert!(result.error.is_some());
    }
}
