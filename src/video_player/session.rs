// SPDX-License-Identifier: MPL-2.0
//! Playback state machine for the background video.
//!
//! [`PlaybackSession`] holds the intent of one mounted instance: whether the
//! user paused, whether playback ever started, how many loops are left and
//! whether controls are currently suppressed. [`PlaybackMachine`] pairs that
//! session with the bound media element and applies play, pause, seek and
//! loop transitions to both, so the element and the recorded state never
//! disagree.
//!
//! States:
//! - Unmounted / Sourceless: nothing bound
//! - Loading / Ready: element bound, not yet started
//! - Playing / Paused: normal operation
//! - LoopComplete: configured loops exhausted, terminal for the session
//! - Error: the element reported a load or decode failure

use crate::application::port::{BindingId, MediaElement, PlayRejection};
use crate::domain::breakpoint::Breakpoint;
use crate::domain::video::{LoopCount, MediaErrorCode, PlaybackState};
use crate::error::MediaError;

/// Who asked for a play or pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A press on the play/pause control.
    User,
    /// Visibility handling or restoration.
    Automatic,
}

/// Outcome of a natural end of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndedOutcome {
    /// Rewound and started another pass.
    Replayed,
    /// No passes left; the session is now loop-complete.
    Completed,
    /// Nothing bound or the session was already terminal.
    Ignored,
}

/// What a restored element should look like once its metadata is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestorePlan {
    pub seek_to: f64,
    pub muted: bool,
    pub resume: bool,
    pub loop_complete: bool,
}

/// Per-instance playback intent.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    breakpoint: Breakpoint,
    state: PlaybackState,
    autoplay: bool,
    user_paused: bool,
    started_once: bool,
    loops_remaining: LoopCount,
    first_view_spent: bool,
    controls_suppressed: bool,
}

impl PlaybackSession {
    /// Starts a session. With `reduced_motion` a configured autoplay is
    /// turned off and the session begins as if the user had paused.
    pub fn new(
        breakpoint: Breakpoint,
        auto_play: bool,
        loops: LoopCount,
        reduced_motion: bool,
    ) -> Self {
        let suppress_autoplay = auto_play && reduced_motion;
        Self {
            breakpoint,
            state: PlaybackState::Unmounted,
            autoplay: auto_play && !reduced_motion,
            user_paused: suppress_autoplay,
            started_once: false,
            loops_remaining: loops,
            first_view_spent: false,
            controls_suppressed: false,
        }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Effective autoplay after the reduced-motion preference.
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn user_paused(&self) -> bool {
        self.user_paused
    }

    pub fn has_started_once(&self) -> bool {
        self.started_once
    }

    pub fn loops_remaining(&self) -> LoopCount {
        self.loops_remaining
    }

    pub fn first_view_spent(&self) -> bool {
        self.first_view_spent
    }

    pub fn controls_suppressed(&self) -> bool {
        self.controls_suppressed
    }
}

/// The element currently driven by the machine.
#[derive(Debug)]
pub struct MediaBinding<E> {
    pub id: BindingId,
    pub url: String,
    pub element: E,
}

/// Session plus the element it drives.
#[derive(Debug)]
pub struct PlaybackMachine<E: MediaElement> {
    session: PlaybackSession,
    binding: Option<MediaBinding<E>>,
    show_controls: bool,
    pause_rewinds: bool,
}

impl<E: MediaElement> PlaybackMachine<E> {
    pub fn new(session: PlaybackSession, show_controls: bool, pause_rewinds: bool) -> Self {
        Self {
            session,
            binding: None,
            show_controls,
            pause_rewinds,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn state(&self) -> PlaybackState {
        self.session.state
    }

    /// Replaces the session, keeping the bound element if any.
    pub fn reset_session(&mut self, session: PlaybackSession) {
        self.session = session;
        if self.binding.is_some() {
            self.session.state = PlaybackState::Loading;
        }
    }

    pub fn set_breakpoint(&mut self, breakpoint: Breakpoint) {
        self.session.breakpoint = breakpoint;
    }

    pub fn binding(&self) -> Option<&MediaBinding<E>> {
        self.binding.as_ref()
    }

    pub fn binding_id(&self) -> Option<BindingId> {
        self.binding.as_ref().map(|b| b.id)
    }

    pub fn binding_url(&self) -> Option<&str> {
        self.binding.as_ref().map(|b| b.url.as_str())
    }

    pub fn current_time(&self) -> f64 {
        self.binding
            .as_ref()
            .map_or(0.0, |b| b.element.current_time())
    }

    pub fn duration(&self) -> Option<f64> {
        self.binding.as_ref().and_then(|b| b.element.duration())
    }

    pub fn is_muted(&self) -> bool {
        self.binding.as_ref().is_some_and(|b| b.element.is_muted())
    }

    /// Binds a freshly created element. Any previous binding must have been
    /// taken first.
    pub fn bind(&mut self, binding: MediaBinding<E>) {
        debug_assert!(self.binding.is_none(), "previous binding still attached");
        log::debug!("binding {} to {}", binding.id, binding.url);
        self.binding = Some(binding);
        self.session.state = PlaybackState::Loading;
    }

    /// Detaches the bound element, leaving the machine sourceless.
    pub fn take_binding(&mut self) -> Option<MediaBinding<E>> {
        let taken = self.binding.take();
        if taken.is_some() {
            self.session.state = PlaybackState::Sourceless;
        }
        taken
    }

    pub fn mark_sourceless(&mut self) {
        if self.binding.is_none() {
            self.session.state = PlaybackState::Sourceless;
        }
    }

    pub fn mark_unmounted(&mut self) {
        if self.binding.is_none() {
            self.session.state = PlaybackState::Unmounted;
        }
    }

    /// Marks the current first view as used up.
    pub fn spend_first_view(&mut self) {
        self.session.first_view_spent = true;
    }

    /// Shows the controls again without touching playback.
    pub fn reveal_controls(&mut self) {
        self.session.controls_suppressed = false;
    }

    fn start_element(&mut self) -> Result<(), MediaError> {
        let binding = self.binding.as_mut().ok_or(MediaError::NoMediaBound)?;
        binding.element.play();
        self.session.state = PlaybackState::Playing;
        self.session.started_once = true;
        Ok(())
    }

    /// Starts playback.
    ///
    /// A no-op when already playing, loop-complete or in error. An automatic
    /// play also clears control suppression.
    pub fn play(&mut self, origin: Origin) -> Result<(), MediaError> {
        if self.binding.is_none() {
            return Err(MediaError::NoMediaBound);
        }
        match self.session.state {
            PlaybackState::Error { .. } | PlaybackState::LoopComplete => return Ok(()),
            PlaybackState::Playing => {}
            _ => self.start_element()?,
        }
        if origin == Origin::Automatic {
            self.session.controls_suppressed = false;
        }
        Ok(())
    }

    /// Pauses playback.
    ///
    /// An automatic pause also suppresses the controls, even when the media
    /// was already paused.
    pub fn pause(&mut self, origin: Origin) -> Result<(), MediaError> {
        let binding = self.binding.as_mut().ok_or(MediaError::NoMediaBound)?;
        binding.element.pause();
        if matches!(
            self.session.state,
            PlaybackState::Playing | PlaybackState::Loading | PlaybackState::Ready
        ) {
            self.session.state = PlaybackState::Paused;
        }
        if origin == Origin::Automatic {
            self.session.controls_suppressed = true;
        }
        Ok(())
    }

    /// Moves the playhead to the start. Loop counters are left alone.
    pub fn rewind(&mut self) -> Result<(), MediaError> {
        let binding = self.binding.as_mut().ok_or(MediaError::NoMediaBound)?;
        binding.element.set_current_time(0.0);
        Ok(())
    }

    /// Scrubs to `secs`, clamped to the media duration when known.
    pub fn seek(&mut self, secs: f64) -> Result<(), MediaError> {
        let binding = self.binding.as_mut().ok_or(MediaError::NoMediaBound)?;
        if !self.show_controls || self.session.state.is_error() {
            return Ok(());
        }
        let mut target = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        if let Some(duration) = binding.element.duration() {
            target = target.min(duration);
        }
        binding.element.set_current_time(target);
        Ok(())
    }

    /// Seeks to the start once per session and leaves the media paused.
    /// Returns whether priming happened.
    pub fn prime(&mut self) -> Result<bool, MediaError> {
        let binding = self.binding.as_mut().ok_or(MediaError::NoMediaBound)?;
        if self.session.started_once {
            return Ok(false);
        }
        binding.element.set_current_time(0.0);
        self.session.started_once = true;
        self.session.controls_suppressed = false;
        Ok(true)
    }

    /// The play/pause control was pressed. Returns whether anything changed.
    pub fn toggle_user_intent(&mut self) -> Result<bool, MediaError> {
        if self.binding.is_none() {
            return Err(MediaError::NoMediaBound);
        }
        let state = self.session.state;
        if !self.show_controls || state.is_loop_complete() || state.is_error() {
            return Ok(false);
        }

        if state.is_playing() {
            self.pause(Origin::User)?;
        } else {
            self.play(Origin::User)?;
        }
        self.session.user_paused = self.session.state.is_paused();
        if self.session.user_paused && self.pause_rewinds {
            self.rewind()?;
        }
        Ok(true)
    }

    /// Flips the mute state. Returns the new state, or `None` when controls
    /// are hidden.
    pub fn toggle_mute(&mut self) -> Result<Option<bool>, MediaError> {
        let binding = self.binding.as_mut().ok_or(MediaError::NoMediaBound)?;
        if !self.show_controls {
            return Ok(None);
        }
        let muted = !binding.element.is_muted();
        binding.element.set_muted(muted);
        Ok(Some(muted))
    }

    /// Handles a natural end of playback.
    pub fn on_ended(&mut self) -> EndedOutcome {
        if self.binding.is_none()
            || matches!(
                self.session.state,
                PlaybackState::LoopComplete | PlaybackState::Error { .. }
            )
        {
            return EndedOutcome::Ignored;
        }

        match self.session.loops_remaining {
            LoopCount::Infinite => {}
            LoopCount::Remaining(0) => {
                self.session.state = PlaybackState::LoopComplete;
                return EndedOutcome::Completed;
            }
            remaining @ LoopCount::Remaining(_) => {
                self.session.loops_remaining = remaining.decrement();
            }
        }

        self.session.state = PlaybackState::Paused;
        if self.rewind().and_then(|()| self.start_element()).is_err() {
            return EndedOutcome::Ignored;
        }
        EndedOutcome::Replayed
    }

    pub fn on_loaded_data(&mut self) {
        if matches!(
            self.session.state,
            PlaybackState::Loading | PlaybackState::Error { .. }
        ) && self.binding.is_some()
        {
            self.session.state = PlaybackState::Ready;
        }
    }

    pub fn on_error(&mut self, code: MediaErrorCode) {
        if self.binding.is_some() {
            self.session.state = PlaybackState::Error { code };
        }
    }

    /// The platform refused a play request; the element stays paused.
    pub fn on_play_rejected(&mut self, _rejection: &PlayRejection) {
        if self.session.state.is_playing() {
            self.session.state = PlaybackState::Paused;
        }
    }

    /// Applies a restoration after a rebuild.
    pub fn restore(&mut self, plan: RestorePlan) -> Result<(), MediaError> {
        let binding = self.binding.as_mut().ok_or(MediaError::NoMediaBound)?;
        binding.element.set_current_time(plan.seek_to);
        binding.element.set_muted(plan.muted);

        if self.session.state.is_error() {
            return Ok(());
        }
        if plan.loop_complete {
            self.session.state = PlaybackState::LoopComplete;
        } else if plan.resume {
            self.start_element()?;
        } else {
            binding.element.pause();
            self.session.state = PlaybackState::Paused;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::simulated::{ElementCall, SimulatedElement};
    use crate::test_utils::{assert_abs_diff_eq, F64_EPSILON};

    fn machine(loops: LoopCount) -> PlaybackMachine<SimulatedElement> {
        let session = PlaybackSession::new(Breakpoint::Large, true, loops, false);
        let mut machine = PlaybackMachine::new(session, true, false);
        machine.bind(MediaBinding {
            id: BindingId::new(1),
            url: "a.mp4".into(),
            element: SimulatedElement::new(BindingId::new(1), "a.mp4", Some(20.0), true),
        });
        machine
    }

    fn element(machine: &PlaybackMachine<SimulatedElement>) -> SimulatedElement {
        machine.binding().map(|b| b.element.clone()).unwrap()
    }

    #[test]
    fn new_binding_starts_loading() {
        let machine = machine(LoopCount::Infinite);
        assert_eq!(machine.state(), PlaybackState::Loading);
        assert!(machine.state().is_paused());
    }

    #[test]
    fn reduced_motion_turns_off_autoplay_and_marks_user_paused() {
        let session = PlaybackSession::new(Breakpoint::Small, true, LoopCount::Infinite, true);
        assert!(!session.autoplay());
        assert!(session.user_paused());

        let session = PlaybackSession::new(Breakpoint::Small, false, LoopCount::Infinite, true);
        assert!(!session.user_paused());
    }

    #[test]
    fn play_without_binding_reports_no_media() {
        let session = PlaybackSession::new(Breakpoint::Large, true, LoopCount::Infinite, false);
        let mut machine: PlaybackMachine<SimulatedElement> =
            PlaybackMachine::new(session, true, false);
        assert_eq!(machine.play(Origin::User), Err(MediaError::NoMediaBound));
        assert_eq!(machine.toggle_user_intent(), Err(MediaError::NoMediaBound));
    }

    #[test]
    fn play_is_idempotent_when_already_playing() {
        let mut machine = machine(LoopCount::Infinite);
        machine.play(Origin::Automatic).unwrap();
        machine.play(Origin::Automatic).unwrap();
        assert_eq!(element(&machine).play_count(), 1);
        assert!(machine.session().has_started_once());
    }

    #[test]
    fn automatic_pause_suppresses_controls_and_automatic_play_restores_them() {
        let mut machine = machine(LoopCount::Infinite);
        machine.play(Origin::Automatic).unwrap();
        machine.pause(Origin::Automatic).unwrap();
        assert_eq!(machine.state(), PlaybackState::Paused);
        assert!(machine.session().controls_suppressed());

        machine.play(Origin::User).unwrap();
        assert!(machine.session().controls_suppressed());
        machine.play(Origin::Automatic).unwrap();
        assert!(!machine.session().controls_suppressed());
    }

    #[test]
    fn toggle_tracks_user_intent() {
        let mut machine = machine(LoopCount::Infinite);
        machine.play(Origin::Automatic).unwrap();

        assert_eq!(machine.toggle_user_intent(), Ok(true));
        assert_eq!(machine.state(), PlaybackState::Paused);
        assert!(machine.session().user_paused());

        assert_eq!(machine.toggle_user_intent(), Ok(true));
        assert!(machine.state().is_playing());
        assert!(!machine.session().user_paused());
    }

    #[test]
    fn toggle_rewinds_when_configured() {
        let session = PlaybackSession::new(Breakpoint::Large, true, LoopCount::Infinite, false);
        let mut machine = PlaybackMachine::new(session, true, true);
        let el = SimulatedElement::new(BindingId::new(3), "a.mp4", Some(20.0), true);
        machine.bind(MediaBinding {
            id: BindingId::new(3),
            url: "a.mp4".into(),
            element: el.clone(),
        });
        machine.play(Origin::Automatic).unwrap();
        el.advance_to(7.5);

        machine.toggle_user_intent().unwrap();
        assert_abs_diff_eq!(machine.current_time(), 0.0, epsilon = F64_EPSILON);
        assert_eq!(el.calls().last(), Some(&ElementCall::Seek(0.0)));
    }

    #[test]
    fn toggle_is_ignored_without_controls() {
        let session = PlaybackSession::new(Breakpoint::Large, true, LoopCount::Infinite, false);
        let mut machine = PlaybackMachine::new(session, false, false);
        machine.bind(MediaBinding {
            id: BindingId::new(1),
            url: "a.mp4".into(),
            element: SimulatedElement::new(BindingId::new(1), "a.mp4", None, true),
        });
        machine.play(Origin::Automatic).unwrap();
        assert_eq!(machine.toggle_user_intent(), Ok(false));
        assert!(machine.state().is_playing());
        assert_eq!(machine.toggle_mute(), Ok(None));
    }

    #[test]
    fn finite_loops_count_down_to_completion() {
        let mut machine = machine(LoopCount::Remaining(2));
        machine.play(Origin::Automatic).unwrap();

        assert_eq!(machine.on_ended(), EndedOutcome::Replayed);
        assert_eq!(machine.session().loops_remaining(), LoopCount::Remaining(1));
        assert_eq!(machine.on_ended(), EndedOutcome::Replayed);
        assert_eq!(machine.session().loops_remaining(), LoopCount::Remaining(0));
        assert_eq!(machine.on_ended(), EndedOutcome::Completed);
        assert_eq!(machine.state(), PlaybackState::LoopComplete);
        assert_eq!(element(&machine).play_count(), 3);

        // Terminal: further input changes nothing.
        assert_eq!(machine.on_ended(), EndedOutcome::Ignored);
        machine.play(Origin::Automatic).unwrap();
        assert_eq!(machine.toggle_user_intent(), Ok(false));
        assert_eq!(machine.state(), PlaybackState::LoopComplete);
    }

    #[test]
    fn infinite_loops_never_complete() {
        let mut machine = machine(LoopCount::Infinite);
        machine.play(Origin::Automatic).unwrap();
        for _ in 0..5 {
            assert_eq!(machine.on_ended(), EndedOutcome::Replayed);
        }
        assert!(machine.state().is_playing());
    }

    #[test]
    fn zero_loops_complete_on_first_end() {
        let mut machine = machine(LoopCount::Remaining(0));
        machine.play(Origin::Automatic).unwrap();
        assert_eq!(machine.on_ended(), EndedOutcome::Completed);
    }

    #[test]
    fn prime_happens_once() {
        let mut machine = machine(LoopCount::Infinite);
        assert_eq!(machine.prime(), Ok(true));
        assert_eq!(machine.prime(), Ok(false));
        assert_eq!(machine.state(), PlaybackState::Loading);
        assert_eq!(element(&machine).play_count(), 0);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut machine = machine(LoopCount::Infinite);
        machine.seek(45.0).unwrap();
        assert_abs_diff_eq!(machine.current_time(), 20.0, epsilon = F64_EPSILON);
        machine.seek(-3.0).unwrap();
        assert_abs_diff_eq!(machine.current_time(), 0.0, epsilon = F64_EPSILON);
    }

    #[test]
    fn error_blocks_playback_until_data_loads() {
        let mut machine = machine(LoopCount::Infinite);
        machine.on_error(MediaErrorCode::Network);
        assert!(machine.state().is_error());
        machine.play(Origin::User).unwrap();
        assert!(machine.state().is_error());

        machine.on_loaded_data();
        assert_eq!(machine.state(), PlaybackState::Ready);
    }

    #[test]
    fn rejected_play_falls_back_to_paused() {
        let mut machine = machine(LoopCount::Infinite);
        machine.play(Origin::Automatic).unwrap();
        machine.on_play_rejected(&PlayRejection::NotAllowed);
        assert_eq!(machine.state(), PlaybackState::Paused);
    }

    #[test]
    fn restore_applies_time_mute_and_intent() {
        let mut machine = machine(LoopCount::Infinite);
        machine
            .restore(RestorePlan {
                seek_to: 5.0,
                muted: false,
                resume: true,
                loop_complete: false,
            })
            .unwrap();
        assert!(machine.state().is_playing());
        assert_abs_diff_eq!(machine.current_time(), 5.0, epsilon = F64_EPSILON);
        assert!(!machine.is_muted());
    }

    #[test]
    fn take_binding_leaves_machine_sourceless() {
        let mut machine = machine(LoopCount::Infinite);
        let taken = machine.take_binding().expect("bound");
        assert_eq!(taken.url, "a.mp4");
        assert_eq!(machine.state(), PlaybackState::Sourceless);
        assert_eq!(machine.binding_id(), None);
    }
}
