// SPDX-License-Identifier: MPL-2.0
use crate::application::port::media::PlayRejection;
use crate::domain::breakpoint::Breakpoint;
use crate::domain::video::MediaErrorCode;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
}

/// Failure kinds of the playback subsystem.
///
/// None of these is fatal to the host: every one of them degrades to a
/// static poster or empty display. They are surfaced as values so callers
/// and logs can classify what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// An operation was attempted with no media element bound.
    NoMediaBound,

    /// No video source resolves for the breakpoint.
    SourceUnavailable { breakpoint: Breakpoint },

    /// The platform denied a play request.
    PlaybackRejected(PlayRejection),

    /// The platform failed to fetch or decode the source.
    MediaLoadError(MediaErrorCode),
}

impl MediaError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            MediaError::NoMediaBound => "error-no-media-bound",
            MediaError::SourceUnavailable { .. } => "error-source-unavailable",
            MediaError::PlaybackRejected(_) => "error-playback-rejected",
            MediaError::MediaLoadError(_) => "error-media-load",
        }
    }

    /// Returns true for failures that are part of normal operation and only
    /// deserve a debug record.
    pub fn is_expected(&self) -> bool {
        match self {
            MediaError::NoMediaBound | MediaError::SourceUnavailable { .. } => true,
            MediaError::PlaybackRejected(rejection) => rejection.is_expected(),
            MediaError::MediaLoadError(_) => false,
        }
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::NoMediaBound => write!(f, "No media element bound"),
            MediaError::SourceUnavailable { breakpoint } => {
                write!(f, "No video source for breakpoint {}", breakpoint)
            }
            MediaError::PlaybackRejected(rejection) => {
                write!(f, "Playback rejected: {}", rejection)
            }
            MediaError::MediaLoadError(code) => write!(f, "Media failed to load: {}", code),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
