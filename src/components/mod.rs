// Page-media components - independent {collect, run} strategies
//
// Each component is self-contained; the dual media/thumbnail variants are
// deliberate independent strategies, not halves of a shared abstraction.

mod traits;
mod subtitles;
mod youtube_audio;
mod media_v1;
mod media_v2;
mod media_v3;
mod thumbnail_v1;
mod thumbnail_v2;

pub use traits::{require_collected, MediaComponent};
pub use subtitles::SubtitleStarter;
pub use youtube_audio::YoutubeAudioGrabber;
pub use media_v1::MediaDownloaderV1;
pub use media_v2::{plan_youtube_action, MediaDownloaderV2};
pub use media_v3::Mp3Converter;
pub use thumbnail_v1::ThumbnailGrabberV1;
pub use thumbnail_v2::ThumbnailGrabberV2;

/// Every registered component, for hosts that dispatch by name
pub fn all_components() -> Vec<Box<dyn MediaComponent>> {
    vec![
        Box::new(SubtitleStarter),
        Box::new(YoutubeAudioGrabber::new()),
        Box::new(MediaDownloaderV1),
        Box::new(MediaDownloaderV2::new()),
        Box::new(Mp3Converter),
        Box::new(ThumbnailGrabberV1),
        Box::new(ThumbnailGrabberV2),
    ]
}
