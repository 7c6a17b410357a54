// Live subtitle starter - delegates transcription to the host service

use async_trait::async_trait;

use crate::classify;
use crate::errors::GrabError;
use crate::models::{ActionResult, CollectedData, PageContext, Platform};

use super::traits::{require_collected, MediaComponent};

pub struct SubtitleStarter;

#[async_trait]
impl MediaComponent for SubtitleStarter {
    fn name(&self) -> &'static str {
        "subtitles"
    }

    fn collect(&self, page: &PageContext) -> CollectedData {
        if let Err(e) = classify::check_blocked(&page.url) {
            return CollectedData::failed(&page.url, e);
        }

        let platform = classify::classify_platform(&page.url)
            .map(|(p, _)| p)
            .unwrap_or(Platform::Generic);

        CollectedData::new(platform, &page.url)
            .with_message("Ready to start live subtitles for this page")
    }

    async fn run(&self, data: Option<&CollectedData>) -> ActionResult {
        let data = match require_collected(data) {
            Ok(d) => d,
            Err(result) => return result,
        };

        if data.page_url.is_empty() {
            return ActionResult::failure(GrabError::MissingUrl);
        }

        eprintln!("[Subtitles] Requesting live transcription for {}", data.page_url);
        ActionResult::start_subtitles(
            &data.page_url,
            "Live subtitles requested. Transcription runs in the host.",
        )
    }
}
