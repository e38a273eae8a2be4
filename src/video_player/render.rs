// SPDX-License-Identifier: MPL-2.0
//! Builds rendered output from resolved media and configuration.

use crate::config::MediaConfiguration;
use crate::domain::media::{ImageElement, RenderedOutput, ResolvedMedia, VideoElement, VideoSource};

/// Describes the video element for `media`.
///
/// The element never loops natively; loop counting is done on the ended
/// event instead.
pub fn video_element(
    id: &str,
    media: &ResolvedMedia,
    config: &MediaConfiguration,
    autoplay: bool,
) -> VideoElement {
    VideoElement {
        id: id.to_string(),
        source: VideoSource {
            url: media.video_url.clone(),
            mime_type: media.mime_type,
        },
        poster: media.poster_url.clone(),
        muted: config.playback.muted,
        plays_inline: config.playback.plays_inline,
        looped: false,
        autoplay,
        preload: config.preload(),
        style: config.media_style(),
    }
}

/// What to show when there is no video: the poster, or nothing.
pub fn fallback(poster_url: Option<&str>, config: &MediaConfiguration) -> RenderedOutput {
    match poster_url {
        Some(src) => RenderedOutput::Image(ImageElement {
            src: src.to_string(),
            style: config.media_style(),
        }),
        None => RenderedOutput::Empty,
    }
}
