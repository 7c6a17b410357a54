// Media downloader v3 - convert-to-mp3 requests
//
// Conversion capability lives in the host, not here. The runner only builds a
// convert_to_mp3 action carrying the source candidate plus a fallback plain
// download for hosts without a converter.

use async_trait::async_trait;

use crate::classify;
use crate::errors::GrabError;
use crate::models::{
    ActionResult, Candidate, CollectedData, DownloadAction, MediaKind, PageContext, Platform,
};

use super::traits::{require_collected, MediaComponent};

pub struct Mp3Converter;

#[async_trait]
impl MediaComponent for Mp3Converter {
    fn name(&self) -> &'static str {
        "media-v3"
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
                .with_message("Media link found. It can be converted to mp3 by the host.");
        }

        if let Some((Platform::Youtube, video_id)) = classify::classify_platform(&page.url) {
            return CollectedData::new(Platform::Youtube, &page.url)
                .with_video_id(video_id)
                .with_message("YouTube video found. Audio extraction is delegated to the host.");
        }

        CollectedData::failed(&page.url, GrabError::UnsupportedPlatform(page.url.clone()))
    }

    async fn run(&self, data: Option<&CollectedData>) -> ActionResult {
        let data = match require_collected(data) {
            Ok(d) => d,
            Err(result) => return result,
        };

        if let Some(candidate) = data.candidates.first() {
            let stem = candidate
                .filename
                .rsplit_once('.')
                .map(|(stem, _)| stem)
                .unwrap_or(candidate.filename.as_str());
            let fallback = DownloadAction::new(&candidate.url, &candidate.filename);
            return ActionResult::convert_to_mp3(
                candidate.clone(),
                fallback,
                format!("Requesting conversion of {} to {}.mp3", candidate.filename, stem),
            );
        }

        match (data.platform, &data.video_id) {
            (Platform::Youtube, Some(id)) => ActionResult::youtube_download(
                id,
                MediaKind::Audio,
                "Delegating audio extraction to the host YouTube service",
            ),
            _ => ActionResult::failure(GrabError::UnsupportedPlatform(data.page_url.clone())),
        }
    }
}
