// SPDX-License-Identifier: MPL-2.0
//! Media element port definition.
//!
//! This module defines the [`MediaElement`] trait wrapping one platform media
//! element, and the [`MediaPlatform`] trait that creates elements and provides
//! the few platform services the controller needs.
//!
//! # Lifecycle
//!
//! 1. The controller asks the platform to create an element for a binding
//! 2. The host forwards element events as [`MediaEvent`]s tagged with that
//!    binding
//! 3. On teardown the controller calls [`MediaElement::release`] and drops the
//!    element before any replacement is created
//!
//! Events tagged with a binding that is no longer current are ignored, which
//! is how late play rejections after a teardown become no-ops.

use crate::domain::media::VideoElement;
use crate::domain::video::MediaErrorCode;
use std::fmt;
use std::time::Duration;

// =============================================================================
// BindingId
// =============================================================================

/// Identity of one media element binding.
///
/// Every (re)mount gets a fresh id. Asynchronous continuations capture the id
/// at dispatch time and are dropped if it no longer names the live binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BindingId(u64);

impl BindingId {
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the id following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// PlayRejection
// =============================================================================

/// Reason the platform refused a play request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayRejection {
    /// Autoplay policy denied playback without a user gesture.
    NotAllowed,
    /// The request was interrupted by a pause or a new load.
    Aborted,
    /// The source cannot be played.
    NotSupported,
    /// Anything else, with the platform's description.
    Other(String),
}

impl PlayRejection {
    /// Maps a platform exception name (`NotAllowedError`, `AbortError`, ...).
    #[must_use]
    pub fn from_exception_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => Self::NotAllowed,
            "AbortError" => Self::Aborted,
            "NotSupportedError" => Self::NotSupported,
            _ => Self::Other(format!("{name}: {message}")),
        }
    }

    /// Returns true for rejections caused by normal platform policy.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::NotAllowed | Self::Aborted)
    }
}

impl fmt::Display for PlayRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAllowed => write!(f, "not allowed by autoplay policy"),
            Self::Aborted => write!(f, "aborted"),
            Self::NotSupported => write!(f, "source not supported"),
            Self::Other(message) => write!(f, "{message}"),
        }
    }
}

// =============================================================================
// MediaEvent
// =============================================================================

/// Events a media element reports back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Duration is known and the element accepts seeks.
    MetadataLoaded,
    /// The first frame is available.
    LoadedData,
    /// Playback reached the end naturally.
    Ended,
    /// Fetching or decoding failed.
    Error(MediaErrorCode),
    /// A previous play request was refused.
    PlayRejected(PlayRejection),
}

// =============================================================================
// Traits
// =============================================================================

/// Port for one platform media element.
///
/// Implementations are expected to be cheap handles; all state lives in the
/// platform. Position values are in seconds.
pub trait MediaElement {
    /// Requests playback. The outcome arrives later as
    /// [`MediaEvent::PlayRejected`] if the platform refuses.
    fn play(&mut self);

    fn pause(&mut self);

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, secs: f64);

    /// Media duration in seconds, once known.
    fn duration(&self) -> Option<f64>;

    fn is_muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    /// Stops playback, detaches listeners, clears the source and frees the
    /// element's resources. The element is dropped right after.
    fn release(&mut self);
}

/// Port for platform services.
pub trait MediaPlatform {
    type Element: MediaElement;

    /// Creates and attaches a media element described by `element`.
    fn create_element(&mut self, binding: BindingId, element: &VideoElement) -> Self::Element;

    /// Asks the host to call back the controller's settle entry point for
    /// `binding` after `delay`.
    fn schedule_settle(&mut self, binding: BindingId, delay: Duration);

    /// Whether the user asked for reduced motion. Queried once per component.
    fn prefers_reduced_motion(&self) -> bool;
}
