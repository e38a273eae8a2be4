// SPDX-License-Identifier: MPL-2.0
//! Breakpoint transitions.
//!
//! When the breakpoint changes the resolved source may change with it. The
//! plan decides between keeping the element, rebuilding it for a new URL,
//! tearing it down, or mounting one for the first time. A rebuild captures
//! a [`TransitionSnapshot`] of the outgoing element so the replacement picks
//! up where it left off.

use super::session::RestorePlan;
use crate::domain::media::{Resolution, ResolvedMedia};
use crate::domain::video::PlaybackState;

/// How to move from the current binding to a new resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionPlan {
    /// Nothing bound and nothing to bind.
    StaySourceless,
    /// Nothing bound; bind a new element from scratch.
    FreshMount(ResolvedMedia),
    /// Bound, but the new breakpoint has no video.
    Teardown,
    /// Bound to a different URL; replace the element.
    Rebuild(ResolvedMedia),
    /// Same URL; leave the element alone.
    Keep,
}

impl TransitionPlan {
    pub fn plan(current_url: Option<&str>, resolution: &Resolution) -> Self {
        match (current_url, resolution) {
            (None, Resolution::NoSource { .. }) => Self::StaySourceless,
            (None, Resolution::Video(media)) => Self::FreshMount(media.clone()),
            (Some(_), Resolution::NoSource { .. }) => Self::Teardown,
            (Some(url), Resolution::Video(media)) if url == media.video_url => Self::Keep,
            (Some(_), Resolution::Video(media)) => Self::Rebuild(media.clone()),
        }
    }
}

/// State of the outgoing element, captured just before teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSnapshot {
    pub was_playing: bool,
    pub current_time: f64,
    pub was_muted: bool,
    pub previous_url: String,
    pub was_loop_complete: bool,
}

impl TransitionSnapshot {
    pub fn capture(state: PlaybackState, current_time: f64, muted: bool, url: &str) -> Self {
        Self {
            was_playing: state.is_playing(),
            current_time,
            was_muted: muted,
            previous_url: url.to_string(),
            was_loop_complete: state.is_loop_complete(),
        }
    }

    /// Overrides the resume intent while the replacement is still loading.
    pub fn set_resume(&mut self, resume: bool) {
        self.was_playing = resume;
    }

    /// Computes the restoration once the new element knows its duration.
    /// The position is clamped into the new media.
    pub fn restore_plan(&self, duration: Option<f64>, user_paused: bool) -> RestorePlan {
        let mut seek_to = if self.current_time.is_finite() {
            self.current_time.max(0.0)
        } else {
            0.0
        };
        if let Some(duration) = duration.filter(|d| d.is_finite()) {
            seek_to = seek_to.min(duration.max(0.0));
        }
        RestorePlan {
            seek_to,
            muted: self.was_muted,
            resume: self.was_playing && !user_paused,
            loop_complete: self.was_loop_complete,
        }
    }
}
