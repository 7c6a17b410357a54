// Thumbnail resolver - ordered candidate URL lists per platform
//
// Lists are already ordered by descending preferred quality, so "best" is
// always the first entry. No scoring or image-dimension verification.

use crate::models::{Candidate, MediaKind, PageContext, Platform};

/// YouTube CDN variants, best first
const YOUTUBE_VARIANTS: [&str; 5] = [
    "maxresdefault",
    "sddefault",
    "hqdefault",
    "mqdefault",
    "default",
];

pub fn youtube_thumbnail_urls(video_id: &str) -> Vec<String> {
    YOUTUBE_VARIANTS
        .iter()
        .map(|v| format!("https://img.youtube.com/vi/{}/{}.jpg", video_id, v))
        .collect()
}

pub fn vimeo_thumbnail_urls(video_id: &str) -> Vec<String> {
    vec![format!("https://vumbnail.com/{}.jpg", video_id)]
}

pub fn dailymotion_thumbnail_urls(video_id: &str) -> Vec<String> {
    vec![format!(
        "https://www.dailymotion.com/thumbnail/video/{}",
        video_id
    )]
}

/// Thumbnails already rendered in the page DOM, in preference order. Used
/// only when no platform template applies.
pub fn page_meta_thumbnail_urls(page: &PageContext) -> Vec<String> {
    let mut urls = Vec::new();
    for key in ["og:image", "twitter:image"] {
        if let Some(url) = page.meta.get(key) {
            if !url.is_empty() {
                urls.push(url.clone());
            }
        }
    }
    if let Some(poster) = &page.video_poster {
        if !poster.is_empty() {
            urls.push(poster.clone());
        }
    }
    urls
}

/// Platform-templated candidate list for a known video id
pub fn platform_thumbnail_urls(platform: Platform, video_id: &str) -> Vec<String> {
    match platform {
        Platform::Youtube => youtube_thumbnail_urls(video_id),
        Platform::Vimeo => vimeo_thumbnail_urls(video_id),
        Platform::Dailymotion => dailymotion_thumbnail_urls(video_id),
        Platform::Direct | Platform::Generic => Vec::new(),
    }
}

/// Wrap ordered thumbnail URLs as image candidates with derived filenames
pub fn to_candidates(urls: &[String], stem: &str, source: &str) -> Vec<Candidate> {
    urls.iter()
        .enumerate()
        .map(|(i, url)| {
            let extension = crate::classify::url_extension(url).unwrap_or_else(|| "jpg".into());
            let filename = if i == 0 {
                format!("{}_thumbnail.{}", stem, extension)
            } else {
                format!("{}_thumbnail_{}.{}", stem, i, extension)
            };
            Candidate {
                url: url.clone(),
                filename,
                kind: MediaKind::Image,
                extension,
                source: source.to_string(),
            }
        })
        .collect()
}
