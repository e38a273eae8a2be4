// SPDX-License-Identifier: MPL-2.0
//! Playback state machine states.
//!
//! Lifecycle of one mounted component:
//! - Unmounted: nothing rendered yet, or torn down by the host
//! - Sourceless: mounted, but no video resolves for the current breakpoint
//! - Loading: a media element is bound and fetching its source
//! - Ready: first frame decoded, no play/pause intent applied yet
//! - Playing / Paused: mutually transitional
//! - LoopComplete: loop cycle finished; terminal for automatic playback
//! - Error: the current source failed; cleared by a later successful load

use std::fmt;

/// Media failure reported by the platform, mirroring the standard media
/// error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaErrorCode {
    Aborted,
    Network,
    Decode,
    SourceNotSupported,
    Unknown(u16),
}

impl MediaErrorCode {
    /// Maps a numeric platform code (`1..=4`) to a known variant.
    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::Aborted,
            2 => Self::Network,
            3 => Self::Decode,
            4 => Self::SourceNotSupported,
            other => Self::Unknown(other),
        }
    }

    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            Self::Aborted => 1,
            Self::Network => 2,
            Self::Decode => 3,
            Self::SourceNotSupported => 4,
            Self::Unknown(code) => code,
        }
    }
}

impl fmt::Display for MediaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aborted => write!(f, "fetch aborted"),
            Self::Network => write!(f, "network error"),
            Self::Decode => write!(f, "decode error"),
            Self::SourceNotSupported => write!(f, "source not supported"),
            Self::Unknown(code) => write!(f, "unknown media error ({code})"),
        }
    }
}

/// Represents the current playback state of the component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Unmounted,
    Sourceless,
    Loading,
    Ready,
    Playing,
    Paused,
    LoopComplete,
    Error {
        code: MediaErrorCode,
    },
}

impl PlaybackState {
    /// Returns true if the media is currently playing.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true if bound media is not advancing.
    ///
    /// Loading and Ready count as paused: a media element starts paused until
    /// something asks it to play.
    #[must_use]
    pub fn is_paused(self) -> bool {
        matches!(
            self,
            Self::Loading | Self::Ready | Self::Paused | Self::LoopComplete | Self::Error { .. }
        )
    }

    #[must_use]
    pub fn is_loop_complete(self) -> bool {
        matches!(self, Self::LoopComplete)
    }

    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns true for states that imply a bound media element.
    #[must_use]
    pub fn has_media(self) -> bool {
        !matches!(self, Self::Unmounted | Self::Sourceless)
    }

    /// Returns the error code if in error state.
    #[must_use]
    pub fn error_code(self) -> Option<MediaErrorCode> {
        match self {
            Self::Error { code } => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_unmounted() {
        assert_eq!(PlaybackState::default(), PlaybackState::Unmounted);
        assert!(!PlaybackState::default().has_media());
    }

    #[test]
    fn playing_and_paused_are_exclusive() {
        let states = [
            PlaybackState::Loading,
            PlaybackState::Ready,
            PlaybackState::Playing,
            PlaybackState::Paused,
            PlaybackState::LoopComplete,
            PlaybackState::Error {
                code: MediaErrorCode::Network,
            },
        ];
        for state in states {
            assert_ne!(state.is_playing(), state.is_paused(), "{state:?}");
        }
    }

    #[test]
    fn error_code_mapping() {
        assert_eq!(MediaErrorCode::from_code(3), MediaErrorCode::Decode);
        assert_eq!(MediaErrorCode::from_code(42), MediaErrorCode::Unknown(42));
        assert_eq!(MediaErrorCode::SourceNotSupported.code(), 4);
        let state = PlaybackState::Error {
            code: MediaErrorCode::Decode,
        };
        assert_eq!(state.error_code(), Some(MediaErrorCode::Decode));
        assert!(state.is_error());
    }
}
