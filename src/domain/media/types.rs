// SPDX-License-Identifier: MPL-2.0
//! Resolved media value objects.

use std::fmt;

/// Container format of a video source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    Mp4,
    WebM,
}

impl MimeType {
    /// Returns the MIME type string used in a `<source type>` attribute.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mp4 => "video/mp4",
            Self::WebM => "video/webm",
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A playable video source selected for a breakpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMedia {
    pub video_url: String,
    pub mime_type: MimeType,
    pub poster_url: Option<String>,
}

/// Outcome of source resolution for one breakpoint.
///
/// The poster resolves independently of the video, so [`Resolution::NoSource`]
/// may still carry an image fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Video(ResolvedMedia),
    NoSource { poster_url: Option<String> },
}

impl Resolution {
    /// Returns the video URL, if a source resolved.
    #[must_use]
    pub fn video_url(&self) -> Option<&str> {
        match self {
            Self::Video(media) => Some(&media.video_url),
            Self::NoSource { .. } => None,
        }
    }

    /// Returns the poster URL, whether or not a video resolved.
    #[must_use]
    pub fn poster_url(&self) -> Option<&str> {
        match self {
            Self::Video(media) => media.poster_url.as_deref(),
            Self::NoSource { poster_url } => poster_url.as_deref(),
        }
    }

    /// Returns the resolved video, if any.
    #[must_use]
    pub fn media(&self) -> Option<&ResolvedMedia> {
        match self {
            Self::Video(media) => Some(media),
            Self::NoSource { .. } => None,
        }
    }

    #[must_use]
    pub fn is_no_source(&self) -> bool {
        matches!(self, Self::NoSource { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_strings() {
        assert_eq!(MimeType::Mp4.as_str(), "video/mp4");
        assert_eq!(MimeType::WebM.to_string(), "video/webm");
    }

    #[test]
    fn no_source_still_exposes_poster() {
        let resolution = Resolution::NoSource {
            poster_url: Some("still.jpg".into()),
        };
        assert!(resolution.is_no_source());
        assert_eq!(resolution.video_url(), None);
        assert_eq!(resolution.poster_url(), Some("still.jpg"));
    }
}
