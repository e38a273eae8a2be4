// SPDX-License-Identifier: MPL-2.0
//! The background video component.
//!
//! [`BackgroundVideo`] is the single entry point a host drives. It owns the
//! configuration, the playback machine and the control sync, and reacts to
//! four kinds of input:
//!
//! - breakpoint changes (mount, rebuild, teardown)
//! - viewport and document visibility
//! - media events, tagged with the [`BindingId`] they were issued for
//! - user presses on the play/pause and sound controls
//!
//! Events carrying a binding other than the current one belong to an
//! element that has already been released and are dropped.

use super::controls::{ControlSnapshot, ControlSync};
use super::document::{DocumentSubscription, DocumentVisibility, DocumentVisibilityHub};
use super::render;
use super::resolver;
use super::session::{
    EndedOutcome, MediaBinding, Origin, PlaybackMachine, PlaybackSession,
};
use super::transition::{TransitionPlan, TransitionSnapshot};
use super::visibility::{
    self, OffScreenAction, OnScreenAction, PlaybackView, VisibilityPolicy, VisibilitySignal,
};
use crate::application::port::media::MediaElement;
use crate::application::port::{BindingId, ControlSurface, MediaEvent, MediaPlatform};
use crate::config::MediaConfiguration;
use crate::domain::breakpoint::Breakpoint;
use crate::domain::media::{RenderedOutput, ResolvedMedia};
use crate::domain::video::PlaybackState;
use crate::error::MediaError;
use crate::i18n::ControlLabels;

/// A responsive background video bound to one host element.
pub struct BackgroundVideo<P: MediaPlatform, S: ControlSurface> {
    id: String,
    config: MediaConfiguration,
    labels: ControlLabels,
    platform: P,
    surface: S,
    reduced_motion: bool,
    machine: PlaybackMachine<P::Element>,
    controls: ControlSync,
    settled: bool,
    last_binding: BindingId,
    pending_restore: Option<(BindingId, TransitionSnapshot)>,
    hub: DocumentVisibilityHub,
    document: Option<DocumentSubscription>,
    rendered: RenderedOutput,
    mounted: bool,
}

impl<P: MediaPlatform, S: ControlSurface> BackgroundVideo<P, S> {
    /// Creates an unmounted component. The reduced-motion preference is read
    /// here, once.
    pub fn new(
        id: impl Into<String>,
        config: MediaConfiguration,
        labels: ControlLabels,
        platform: P,
        surface: S,
        hub: DocumentVisibilityHub,
    ) -> Self {
        let reduced_motion = platform.prefers_reduced_motion();
        if reduced_motion && config.playback.auto_play {
            log::info!("Reduced motion requested, autoplay disabled");
        }
        let session = PlaybackSession::new(
            Breakpoint::default(),
            config.playback.auto_play,
            config.loop_count(),
            reduced_motion,
        );
        let machine = PlaybackMachine::new(
            session,
            config.playback.show_controls,
            config.playback.pause_rewinds_on_user_pause,
        );

        Self {
            id: id.into(),
            config,
            labels,
            platform,
            surface,
            reduced_motion,
            machine,
            controls: ControlSync::new(),
            settled: false,
            last_binding: BindingId::new(0),
            pending_restore: None,
            hub,
            document: None,
            rendered: RenderedOutput::Empty,
            mounted: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &MediaConfiguration {
        &self.config
    }

    pub fn labels(&self) -> &ControlLabels {
        &self.labels
    }

    pub fn state(&self) -> PlaybackState {
        self.machine.state()
    }

    pub fn session(&self) -> &PlaybackSession {
        self.machine.session()
    }

    pub fn rendered(&self) -> &RenderedOutput {
        &self.rendered
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the first control sync for the current element has happened.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn binding_id(&self) -> Option<BindingId> {
        self.machine.binding_id()
    }

    pub fn current_url(&self) -> Option<&str> {
        self.machine.binding_url()
    }

    pub fn current_time(&self) -> f64 {
        self.machine.current_time()
    }

    pub fn is_muted(&self) -> bool {
        self.machine.is_muted()
    }

    /// Whether a rebuilt element is still waiting for its metadata.
    pub fn is_restoring(&self) -> bool {
        self.pending_restore.is_some()
    }

    /// What the controls should currently show. Without an element the
    /// mute control shows the configured default.
    pub fn control_snapshot(&self) -> ControlSnapshot {
        let muted = match self.machine.binding() {
            Some(_) => self.machine.is_muted(),
            None => self.config.playback.muted,
        };
        ControlSnapshot::project(
            self.machine.state(),
            self.machine.session().controls_suppressed(),
            muted,
            &self.labels,
        )
    }

    /// The load failure of the current element, if any.
    pub fn last_error(&self) -> Option<MediaError> {
        self.machine
            .state()
            .error_code()
            .map(MediaError::MediaLoadError)
    }

    /// Image to show in place of the video, when the video cannot be shown.
    pub fn fallback_poster(&self) -> Option<&str> {
        match &self.rendered {
            RenderedOutput::Image(image) => Some(&image.src),
            RenderedOutput::Video(video) if self.machine.state().is_error() => {
                video.poster.as_deref()
            }
            _ => None,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Attaches the component at `breakpoint` and returns what to display.
    /// Mounting an already mounted component acts as a breakpoint change.
    pub fn mount(&mut self, breakpoint: Breakpoint) -> RenderedOutput {
        if self.mounted {
            return self.on_breakpoint_changed(breakpoint);
        }
        log::debug!("Mounting {} at {breakpoint}", self.id);
        self.mounted = true;
        self.document = Some(self.hub.subscribe());
        let session = self.fresh_session(breakpoint);
        self.machine.reset_session(session);
        self.controls.reset();
        self.apply_breakpoint(breakpoint)
    }

    /// Detaches the component, releasing the element and the document
    /// subscription.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        log::debug!("Unmounting {}", self.id);
        self.detach();
        self.document = None;
        self.machine.mark_unmounted();
        self.sync_controls();
        self.controls.reset();
        self.rendered = RenderedOutput::Empty;
        self.mounted = false;
    }

    /// The breakpoint provider reported a new value.
    pub fn on_breakpoint_changed(&mut self, breakpoint: Breakpoint) -> RenderedOutput {
        if !self.mounted {
            log::debug!("Ignoring breakpoint {breakpoint} while unmounted");
            return RenderedOutput::Empty;
        }
        self.apply_breakpoint(breakpoint)
    }

    /// Reloads the current breakpoint's source after a media error.
    pub fn retry(&mut self) -> RenderedOutput {
        if !self.machine.state().is_error() {
            return self.rendered.clone();
        }
        let breakpoint = self.machine.session().breakpoint();
        let resolution = resolver::resolve(breakpoint, &self.config.sources);
        let Some(media) = resolution.media().cloned() else {
            return self.rendered.clone();
        };
        log::info!("Retrying {} after {:?}", media.video_url, self.last_error());

        let snapshot = self.capture_snapshot();
        self.detach();
        self.attach(&media, snapshot);
        self.sync_controls();
        self.rendered.clone()
    }

    fn fresh_session(&self, breakpoint: Breakpoint) -> PlaybackSession {
        PlaybackSession::new(
            breakpoint,
            self.config.playback.auto_play,
            self.config.loop_count(),
            self.reduced_motion,
        )
    }

    fn apply_breakpoint(&mut self, breakpoint: Breakpoint) -> RenderedOutput {
        let resolution = resolver::resolve(breakpoint, &self.config.sources);
        self.machine.set_breakpoint(breakpoint);

        match TransitionPlan::plan(self.machine.binding_url(), &resolution) {
            TransitionPlan::StaySourceless => {
                log::debug!("{}", MediaError::SourceUnavailable { breakpoint });
                self.machine.mark_sourceless();
                self.rendered = render::fallback(resolution.poster_url(), &self.config);
            }
            TransitionPlan::FreshMount(media) => {
                let session = self.fresh_session(breakpoint);
                self.machine.reset_session(session);
                self.controls.reset();
                self.attach(&media, None);
            }
            TransitionPlan::Teardown => {
                log::info!("No video for {breakpoint}, tearing down");
                self.detach();
                self.rendered = render::fallback(resolution.poster_url(), &self.config);
            }
            TransitionPlan::Rebuild(media) => {
                log::info!(
                    "Switching {} to {} at {breakpoint}",
                    self.machine.binding_url().unwrap_or_default(),
                    media.video_url
                );
                let snapshot = self.capture_snapshot();
                self.detach();
                self.attach(&media, snapshot);
            }
            TransitionPlan::Keep => {
                log::debug!("Source unchanged at {breakpoint}");
            }
        }

        self.sync_controls();
        self.rendered.clone()
    }

    /// Captures the outgoing element. A restore still pending for it is
    /// carried forward instead. Leaving an errored element resumes when
    /// autoplay is on and the user has not paused.
    fn capture_snapshot(&mut self) -> Option<TransitionSnapshot> {
        let url = self.machine.binding_url()?.to_string();
        let mut snapshot = match self.pending_restore.take() {
            Some((_, mut pending)) => {
                pending.previous_url = url;
                pending
            }
            None => TransitionSnapshot::capture(
                self.machine.state(),
                self.machine.current_time(),
                self.machine.is_muted(),
                &url,
            ),
        };
        if self.machine.state().is_error() {
            let session = self.machine.session();
            snapshot.set_resume(session.autoplay() && !session.user_paused());
        }
        Some(snapshot)
    }

    fn attach(&mut self, media: &ResolvedMedia, snapshot: Option<TransitionSnapshot>) {
        self.last_binding = self.last_binding.next();
        let id = self.last_binding;

        // Restored elements start paused; the restore decides about playback.
        let autoplay = snapshot.is_none() && self.machine.session().autoplay();
        let description = render::video_element(&self.id, media, &self.config, autoplay);
        let element = self.platform.create_element(id, &description);
        self.machine.bind(MediaBinding {
            id,
            url: media.video_url.clone(),
            element,
        });
        self.pending_restore = snapshot.map(|snapshot| (id, snapshot));
        self.settled = false;
        self.platform
            .schedule_settle(id, self.config.settle_delay().as_duration());
        self.rendered = RenderedOutput::Video(description);

        if autoplay {
            if let Err(err) = self.machine.play(Origin::Automatic) {
                log::warn!("Autoplay failed: {err}");
            }
        }
    }

    fn detach(&mut self) {
        if let Some(mut binding) = self.machine.take_binding() {
            log::debug!("Releasing binding {} ({})", binding.id, binding.url);
            binding.element.release();
        }
        self.pending_restore = None;
        self.settled = false;
    }

    // =========================================================================
    // Media events
    // =========================================================================

    /// Delivers a media event issued for `binding`.
    pub fn handle_media_event(&mut self, binding: BindingId, event: MediaEvent) {
        if self.machine.binding_id() != Some(binding) {
            log::debug!("Dropping {event:?} for stale binding {binding}");
            return;
        }

        match event {
            MediaEvent::MetadataLoaded => self.apply_pending_restore(),
            MediaEvent::LoadedData => {
                self.machine.on_loaded_data();
                self.apply_pending_restore();
            }
            MediaEvent::Ended => match self.machine.on_ended() {
                EndedOutcome::Replayed => {
                    log::debug!("Replaying, {:?} left", self.machine.session().loops_remaining());
                }
                EndedOutcome::Completed => log::info!("Loops complete for {}", self.id),
                EndedOutcome::Ignored => {}
            },
            MediaEvent::Error(code) => {
                log::warn!("{}", MediaError::MediaLoadError(code));
                self.machine.on_error(code);
            }
            MediaEvent::PlayRejected(rejection) => {
                self.machine.on_play_rejected(&rejection);
                let err = MediaError::PlaybackRejected(rejection);
                if err.is_expected() {
                    log::debug!("{err}");
                } else {
                    log::warn!("{err}");
                }
            }
        }

        self.sync_controls();
    }

    /// The settle delay scheduled for `binding` has elapsed.
    pub fn on_settle_elapsed(&mut self, binding: BindingId) {
        if self.machine.binding_id() != Some(binding) {
            log::debug!("Ignoring settle for stale binding {binding}");
            return;
        }
        self.settled = true;
        self.sync_controls();
    }

    fn apply_pending_restore(&mut self) {
        let Some((id, snapshot)) = self.pending_restore.take() else {
            return;
        };
        if self.machine.binding_id() != Some(id) {
            return;
        }
        let plan = snapshot.restore_plan(
            self.machine.duration(),
            self.machine.session().user_paused(),
        );
        log::debug!("Restoring {} from {}: {plan:?}", id, snapshot.previous_url);
        if let Err(err) = self.machine.restore(plan) {
            log::warn!("Restore failed: {err}");
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// The viewport tracker reported a new observation.
    pub fn on_visibility(&mut self, signal: VisibilitySignal) {
        if self.machine.binding().is_none() {
            return;
        }
        if signal.is_off_screen(self.config.on_screen_threshold()) {
            self.handle_off_screen();
        } else {
            self.handle_on_screen();
        }
        self.sync_controls();
    }

    /// The document was shown or hidden. Hidden is handled like leaving
    /// the viewport; shown waits for the next viewport observation.
    pub fn on_document_visibility(&mut self, visibility: DocumentVisibility) {
        if !visibility.is_hidden() || self.machine.binding().is_none() {
            return;
        }
        log::debug!("Document hidden");
        self.handle_off_screen();
        self.sync_controls();
    }

    /// Drains a pending change from the document visibility hub.
    pub fn poll_document_visibility(&mut self) {
        let changed = self.document.as_mut().and_then(DocumentSubscription::poll);
        if let Some(visibility) = changed {
            self.on_document_visibility(visibility);
        }
    }

    fn policy(&self) -> VisibilityPolicy {
        VisibilityPolicy::from_config(&self.config, self.machine.session().autoplay())
    }

    /// While a restore is pending the outgoing element's position and
    /// intent stand in for the new element's.
    fn view(&self) -> PlaybackView {
        let session = self.machine.session();
        let (current_time, playing) = match &self.pending_restore {
            Some((_, snapshot)) => (snapshot.current_time, snapshot.was_playing),
            None => (self.machine.current_time(), self.machine.state().is_playing()),
        };
        PlaybackView {
            current_time,
            playing,
            loop_complete: self.machine.state().is_loop_complete(),
            user_paused: session.user_paused(),
            started_once: session.has_started_once(),
            first_view_spent: session.first_view_spent(),
        }
    }

    fn handle_off_screen(&mut self) {
        let action = visibility::off_screen_action(self.policy(), self.view());
        log::debug!("Off screen: {action:?}");
        let result = match action {
            OffScreenAction::EndFirstView => {
                self.machine.spend_first_view();
                self.pause_automatically()
            }
            OffScreenAction::RewindCompleted => self.machine.rewind(),
            OffScreenAction::Pause { rewind } => {
                let paused = self.pause_automatically();
                if rewind {
                    paused.and_then(|()| self.machine.rewind())
                } else {
                    paused
                }
            }
            OffScreenAction::Ignore => Ok(()),
        };
        if let Err(err) = result {
            log::debug!("Off-screen handling skipped: {err}");
        }
    }

    fn handle_on_screen(&mut self) {
        let action = visibility::on_screen_action(self.policy(), self.view());
        log::debug!("On screen: {action:?}");
        let result = match action {
            OnScreenAction::Play => {
                if let Some((_, snapshot)) = self.pending_restore.as_mut() {
                    snapshot.set_resume(true);
                    self.machine.reveal_controls();
                    Ok(())
                } else {
                    self.machine.play(Origin::Automatic)
                }
            }
            OnScreenAction::Prime => self.machine.prime().map(|_| ()),
            OnScreenAction::Reveal => {
                self.machine.reveal_controls();
                Ok(())
            }
            OnScreenAction::Ignore => Ok(()),
        };
        if let Err(err) = result {
            log::debug!("On-screen handling skipped: {err}");
        }
    }

    fn pause_automatically(&mut self) -> Result<(), MediaError> {
        if let Some((_, snapshot)) = self.pending_restore.as_mut() {
            snapshot.set_resume(false);
        }
        self.machine.pause(Origin::Automatic)
    }

    // =========================================================================
    // User controls
    // =========================================================================

    /// The play/pause control was pressed.
    pub fn toggle_play_pause(&mut self) {
        match self.machine.toggle_user_intent() {
            Ok(true) => {
                let user_paused = self.machine.session().user_paused();
                log::debug!("User {}", if user_paused { "paused" } else { "resumed" });
                if let Some((_, snapshot)) = self.pending_restore.as_mut() {
                    snapshot.set_resume(!user_paused);
                }
            }
            Ok(false) => log::debug!("Play/pause ignored in {:?}", self.machine.state()),
            Err(err) => log::debug!("Play/pause ignored: {err}"),
        }
        self.sync_controls();
    }

    /// The sound control was pressed.
    pub fn toggle_mute(&mut self) {
        match self.machine.toggle_mute() {
            Ok(Some(muted)) => {
                if let Some((_, snapshot)) = self.pending_restore.as_mut() {
                    snapshot.was_muted = muted;
                }
            }
            Ok(None) => log::debug!("Sound toggle ignored, controls hidden"),
            Err(err) => log::debug!("Sound toggle ignored: {err}"),
        }
        self.sync_controls();
    }

    /// Scrubs the current element to `secs`.
    pub fn seek(&mut self, secs: f64) {
        if let Err(err) = self.machine.seek(secs) {
            log::debug!("Seek ignored: {err}");
        }
    }

    /// Pushes the current control state. A bound element waits for its
    /// settle delay; once the element is gone the surface is brought back
    /// to the paused look right away.
    fn sync_controls(&mut self) {
        let bound = self.machine.binding().is_some();
        let stale = !bound && self.controls.applied().is_some();
        if !(bound && self.settled) && !stale {
            return;
        }
        let snapshot = self.control_snapshot();
        let writes = self.controls.sync(snapshot, &mut self.surface);
        if writes > 0 {
            log::debug!("Synced {writes} control value(s)");
        }
    }
}

impl<P, S> std::fmt::Debug for BackgroundVideo<P, S>
where
    P: MediaPlatform,
    S: ControlSurface,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundVideo")
            .field("id", &self.id)
            .field("state", &self.machine.state())
            .field("binding", &self.machine.binding_id())
            .field("url", &self.machine.binding_url())
            .field("mounted", &self.mounted)
            .field("settled", &self.settled)
            .finish_non_exhaustive()
    }
}
