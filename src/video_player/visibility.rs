// SPDX-License-Identifier: MPL-2.0
//! Visibility decisions.
//!
//! Maps viewport observations to playback actions. The functions here are
//! pure: they look at a [`PlaybackView`] and return what should happen,
//! leaving the actual transitions to the component.

use crate::config::MediaConfiguration;
use crate::domain::video::OnScreenThreshold;

/// One observation from the host's viewport tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilitySignal {
    pub onscreen: bool,
    /// Fraction of the element inside the viewport, `0.0..=1.0`.
    pub fraction_in_view: f64,
}

impl VisibilitySignal {
    pub fn new(onscreen: bool, fraction_in_view: f64) -> Self {
        Self {
            onscreen,
            fraction_in_view,
        }
    }

    /// Off screen when the tracker says so or too little is in view.
    pub fn is_off_screen(&self, threshold: OnScreenThreshold) -> bool {
        !self.onscreen || threshold.is_below(self.fraction_in_view)
    }
}

/// Configuration knobs consulted by the decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityPolicy {
    pub play_first_view_only: bool,
    pub off_screen_pause: bool,
    pub off_screen_rewind: bool,
    /// Effective autoplay, after the reduced-motion preference.
    pub autoplay: bool,
}

impl VisibilityPolicy {
    pub fn from_config(config: &MediaConfiguration, autoplay: bool) -> Self {
        Self {
            play_first_view_only: config.playback.play_first_view_only,
            off_screen_pause: config.visibility.off_screen_pause,
            off_screen_rewind: config.visibility.off_screen_rewind,
            autoplay,
        }
    }
}

/// The parts of the playback state the decisions depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackView {
    pub current_time: f64,
    pub playing: bool,
    pub loop_complete: bool,
    pub user_paused: bool,
    pub started_once: bool,
    pub first_view_spent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffScreenAction {
    /// First view is over: pause for good.
    EndFirstView,
    /// Loops are done; reset the playhead for a later restart.
    RewindCompleted,
    Pause { rewind: bool },
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnScreenAction {
    /// Start playing automatically.
    Play,
    /// Seek to the start and stay paused; once per session.
    Prime,
    /// Show the controls again, playback untouched.
    Reveal,
    Ignore,
}

/// Decides what leaving the viewport means. Rules are checked in order and
/// the first match wins.
pub fn off_screen_action(policy: VisibilityPolicy, view: PlaybackView) -> OffScreenAction {
    if policy.play_first_view_only && view.current_time > 0.0 {
        OffScreenAction::EndFirstView
    } else if !policy.play_first_view_only && view.loop_complete {
        OffScreenAction::RewindCompleted
    } else if !view.playing || view.user_paused || !policy.off_screen_pause {
        OffScreenAction::Ignore
    } else {
        OffScreenAction::Pause {
            rewind: policy.off_screen_rewind,
        }
    }
}

/// Decides what entering the viewport means.
pub fn on_screen_action(policy: VisibilityPolicy, view: PlaybackView) -> OnScreenAction {
    if view.playing || view.loop_complete {
        OnScreenAction::Ignore
    } else if view.user_paused || view.first_view_spent {
        OnScreenAction::Reveal
    } else if policy.autoplay {
        OnScreenAction::Play
    } else if view.started_once {
        OnScreenAction::Reveal
    } else {
        OnScreenAction::Prime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> VisibilityPolicy {
        VisibilityPolicy {
            play_first_view_only: false,
            off_screen_pause: true,
            off_screen_rewind: false,
            autoplay: true,
        }
    }

    fn view() -> PlaybackView {
        PlaybackView {
            current_time: 3.0,
            playing: true,
            loop_complete: false,
            user_paused: false,
            started_once: true,
            first_view_spent: false,
        }
    }

    #[test]
    fn threshold_is_strict() {
        let threshold = OnScreenThreshold::new(0.25);
        assert!(!VisibilitySignal::new(true, 0.25).is_off_screen(threshold));
        assert!(VisibilitySignal::new(true, 0.2).is_off_screen(threshold));
        assert!(VisibilitySignal::new(false, 1.0).is_off_screen(threshold));
    }

    #[test]
    fn first_view_only_wins_over_everything_once_started() {
        let policy = VisibilityPolicy {
            play_first_view_only: true,
            off_screen_rewind: true,
            ..policy()
        };
        let completed = PlaybackView {
            loop_complete: true,
            ..view()
        };
        assert_eq!(off_screen_action(policy, completed), OffScreenAction::EndFirstView);

        let at_start = PlaybackView {
            current_time: 0.0,
            ..view()
        };
        assert_eq!(
            off_screen_action(policy, at_start),
            OffScreenAction::Pause { rewind: true }
        );
    }

    #[test]
    fn completed_loops_rewind() {
        let completed = PlaybackView {
            playing: false,
            loop_complete: true,
            ..view()
        };
        assert_eq!(
            off_screen_action(policy(), completed),
            OffScreenAction::RewindCompleted
        );
    }

    #[test]
    fn first_view_only_at_start_skips_completed_rewind() {
        let policy = VisibilityPolicy {
            play_first_view_only: true,
            ..policy()
        };
        let completed = PlaybackView {
            current_time: 0.0,
            playing: false,
            loop_complete: true,
            ..view()
        };
        assert_eq!(off_screen_action(policy, completed), OffScreenAction::Ignore);
    }

    #[test]
    fn paused_media_is_left_alone() {
        let paused = PlaybackView {
            playing: false,
            ..view()
        };
        assert_eq!(off_screen_action(policy(), paused), OffScreenAction::Ignore);
        let user_paused = PlaybackView {
            user_paused: true,
            ..view()
        };
        assert_eq!(off_screen_action(policy(), user_paused), OffScreenAction::Ignore);
    }

    #[test]
    fn off_screen_pause_can_be_disabled() {
        let policy = VisibilityPolicy {
            off_screen_pause: false,
            off_screen_rewind: true,
            ..policy()
        };
        assert_eq!(off_screen_action(policy, view()), OffScreenAction::Ignore);
        let enabled = VisibilityPolicy {
            off_screen_pause: true,
            ..policy
        };
        assert_eq!(
            off_screen_action(enabled, view()),
            OffScreenAction::Pause { rewind: true }
        );
    }

    #[test]
    fn on_screen_ignores_playing_and_completed_media() {
        assert_eq!(on_screen_action(policy(), view()), OnScreenAction::Ignore);
        let completed = PlaybackView {
            playing: false,
            loop_complete: true,
            ..view()
        };
        assert_eq!(on_screen_action(policy(), completed), OnScreenAction::Ignore);
    }

    #[test]
    fn spent_first_view_only_reveals_controls() {
        let spent = PlaybackView {
            playing: false,
            first_view_spent: true,
            ..view()
        };
        assert_eq!(on_screen_action(policy(), spent), OnScreenAction::Reveal);
    }

    #[test]
    fn on_screen_respects_user_pause() {
        let paused = PlaybackView {
            playing: false,
            user_paused: true,
            ..view()
        };
        assert_eq!(on_screen_action(policy(), paused), OnScreenAction::Reveal);
    }

    #[test]
    fn on_screen_primes_once_without_autoplay() {
        let policy = VisibilityPolicy {
            autoplay: false,
            ..policy()
        };
        let fresh = PlaybackView {
            playing: false,
            started_once: false,
            current_time: 0.0,
            ..view()
        };
        assert_eq!(on_screen_action(policy, fresh), OnScreenAction::Prime);
        let primed = PlaybackView {
            started_once: true,
            ..fresh
        };
        assert_eq!(on_screen_action(policy, primed), OnScreenAction::Reveal);
    }

    #[test]
    fn on_screen_resumes_automatic_pause() {
        let paused = PlaybackView {
            playing: false,
            ..view()
        };
        assert_eq!(on_screen_action(policy(), paused), OnScreenAction::Play);
    }
}
