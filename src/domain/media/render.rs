// SPDX-License-Identifier: MPL-2.0
//! Rendered output descriptions.
//!
//! The component never touches markup itself. Mounting or changing breakpoint
//! yields a [`RenderedOutput`] that the host turns into elements; the
//! `Display` impl produces the equivalent markup for logs and the CLI.

use super::types::MimeType;
use std::fmt;

/// How the media box is fitted into its container (`object-fit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectFit {
    #[default]
    Cover,
    Contain,
    Fill,
    Auto,
}

impl ObjectFit {
    /// Parses a configured size value.
    ///
    /// The background-size style value `"100% 100%"` maps to `fill`.
    /// Unknown values fall back to `cover`.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        match value.trim() {
            "contain" => Self::Contain,
            "fill" | "100% 100%" => Self::Fill,
            "auto" | "none" => Self::Auto,
            _ => Self::Cover,
        }
    }

    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::Fill => "fill",
            Self::Auto => "none",
        }
    }
}

/// Media preload hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preload {
    #[default]
    Auto,
    Metadata,
    None,
}

impl Preload {
    #[must_use]
    pub fn from_attr(value: &str) -> Self {
        match value.trim() {
            "metadata" => Self::Metadata,
            "none" => Self::None,
            _ => Self::Auto,
        }
    }

    #[must_use]
    pub fn as_attr(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Metadata => "metadata",
            Self::None => "none",
        }
    }
}

/// Inline style shared by the video and its image fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaStyle {
    pub object_fit: ObjectFit,
    pub object_position: Option<String>,
}

impl fmt::Display for MediaStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "width: 100%; height: 100%; object-fit: {}",
            self.object_fit.as_css()
        )?;
        if let Some(position) = &self.object_position {
            write!(f, "; object-position: {}", position)?;
        }
        Ok(())
    }
}

/// Single `<source>` of a video element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSource {
    pub url: String,
    pub mime_type: MimeType,
}

/// Description of the video element to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoElement {
    pub id: String,
    pub source: VideoSource,
    pub poster: Option<String>,
    pub muted: bool,
    pub plays_inline: bool,
    /// Native loop attribute, only set for an infinite loop cycle.
    pub looped: bool,
    pub autoplay: bool,
    pub preload: Preload,
    pub style: MediaStyle,
}

/// Description of the poster image shown instead of a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageElement {
    pub src: String,
    pub style: MediaStyle,
}

/// What the host should display for the component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedOutput {
    Video(VideoElement),
    Image(ImageElement),
    Empty,
}

impl RenderedOutput {
    #[must_use]
    pub fn video(&self) -> Option<&VideoElement> {
        match self {
            Self::Video(video) => Some(video),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video(_))
    }
}

impl fmt::Display for RenderedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video(video) => {
                write!(f, "<video id=\"{}\" preload=\"{}\"", video.id, video.preload.as_attr())?;
                if let Some(poster) = &video.poster {
                    write!(f, " poster=\"{}\"", poster)?;
                }
                for (flag, name) in [
                    (video.muted, "muted"),
                    (video.plays_inline, "playsinline"),
                    (video.looped, "loop"),
                    (video.autoplay, "autoplay"),
                ] {
                    if flag {
                        write!(f, " {}", name)?;
                    }
                }
                write!(
                    f,
                    " style=\"{}\"><source src=\"{}\" type=\"{}\"></video>",
                    video.style, video.source.url, video.source.mime_type
                )
            }
            Self::Image(image) => {
                write!(f, "<img src=\"{}\" style=\"{}\">", image.src, image.style)
            }
            Self::Empty => Ok(()),
        }
    }
}
