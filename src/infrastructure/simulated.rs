// SPDX-License-Identifier: MPL-2.0
//! In-memory platform adapters.
//!
//! [`SimulatedPlatform`] stands in for a real page: it creates recording
//! media elements, collects settle requests and reports a fixed
//! reduced-motion preference. [`RecordingSurface`] captures every control
//! write. Both are used by the command-line driver and by tests; neither
//! fires events on its own, the caller delivers them.

use crate::application::port::{
    BindingId, ControlFlag, ControlSurface, MediaElement, MediaPlatform,
};
use crate::domain::media::VideoElement;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

/// Duration given to simulated media unless configured otherwise.
pub const DEFAULT_SIMULATED_DURATION_SECS: f64 = 30.0;

/// One call made on a simulated element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementCall {
    Play,
    Pause,
    Seek(f64),
    SetMuted(bool),
    Release,
}

#[derive(Debug)]
struct ElementRecord {
    binding: BindingId,
    url: String,
    autoplay: bool,
    current_time: f64,
    duration: Option<f64>,
    muted: bool,
    paused: bool,
    released: bool,
    calls: Vec<ElementCall>,
}

/// A recording media element.
///
/// Clones share the same record, so the platform can keep a handle for
/// inspection while the controller owns another.
#[derive(Debug, Clone)]
pub struct SimulatedElement(Rc<RefCell<ElementRecord>>);

impl SimulatedElement {
    pub fn new(binding: BindingId, url: impl Into<String>, duration: Option<f64>, muted: bool) -> Self {
        Self(Rc::new(RefCell::new(ElementRecord {
            binding,
            url: url.into(),
            autoplay: false,
            current_time: 0.0,
            duration,
            muted,
            paused: true,
            released: false,
            calls: Vec::new(),
        })))
    }

    fn from_description(binding: BindingId, element: &VideoElement, duration: Option<f64>) -> Self {
        let this = Self::new(binding, element.source.url.clone(), duration, element.muted);
        this.0.borrow_mut().autoplay = element.autoplay;
        this
    }

    pub fn binding(&self) -> BindingId {
        self.0.borrow().binding
    }

    pub fn url(&self) -> String {
        self.0.borrow().url.clone()
    }

    /// Whether the element was created with the autoplay attribute.
    pub fn is_autoplay(&self) -> bool {
        self.0.borrow().autoplay
    }

    pub fn is_paused(&self) -> bool {
        self.0.borrow().paused
    }

    pub fn is_released(&self) -> bool {
        self.0.borrow().released
    }

    pub fn calls(&self) -> Vec<ElementCall> {
        self.0.borrow().calls.clone()
    }

    /// Number of play requests received.
    pub fn play_count(&self) -> usize {
        self.0
            .borrow()
            .calls
            .iter()
            .filter(|call| **call == ElementCall::Play)
            .count()
    }

    /// Moves the playhead as if playback had progressed, without recording
    /// a seek.
    pub fn advance_to(&self, secs: f64) {
        self.0.borrow_mut().current_time = secs;
    }

    pub fn set_duration(&self, duration: Option<f64>) {
        self.0.borrow_mut().duration = duration;
    }
}

impl MediaElement for SimulatedElement {
    fn play(&mut self) {
        let mut record = self.0.borrow_mut();
        record.paused = false;
        record.calls.push(ElementCall::Play);
    }

    fn pause(&mut self) {
        let mut record = self.0.borrow_mut();
        record.paused = true;
        record.calls.push(ElementCall::Pause);
    }

    fn current_time(&self) -> f64 {
        self.0.borrow().current_time
    }

    fn set_current_time(&mut self, secs: f64) {
        let mut record = self.0.borrow_mut();
        record.current_time = secs;
        record.calls.push(ElementCall::Seek(secs));
    }

    fn duration(&self) -> Option<f64> {
        self.0.borrow().duration
    }

    fn is_muted(&self) -> bool {
        self.0.borrow().muted
    }

    fn set_muted(&mut self, muted: bool) {
        let mut record = self.0.borrow_mut();
        record.muted = muted;
        record.calls.push(ElementCall::SetMuted(muted));
    }

    fn release(&mut self) {
        let mut record = self.0.borrow_mut();
        record.paused = true;
        record.released = true;
        record.calls.push(ElementCall::Release);
    }
}

/// Platform that records instead of rendering.
#[derive(Debug)]
pub struct SimulatedPlatform {
    reduced_motion: bool,
    duration: Option<f64>,
    elements: Vec<SimulatedElement>,
    settles: Vec<(BindingId, Duration)>,
}

impl Default for SimulatedPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedPlatform {
    pub fn new() -> Self {
        Self {
            reduced_motion: false,
            duration: Some(DEFAULT_SIMULATED_DURATION_SECS),
            elements: Vec::new(),
            settles: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_reduced_motion(mut self, reduced_motion: bool) -> Self {
        self.reduced_motion = reduced_motion;
        self
    }

    /// Duration reported by elements created from now on.
    #[must_use]
    pub fn with_duration(mut self, duration: Option<f64>) -> Self {
        self.duration = duration;
        self
    }

    /// Every element created so far, oldest first.
    pub fn elements(&self) -> &[SimulatedElement] {
        &self.elements
    }

    /// The most recently created element that has not been released.
    pub fn live_element(&self) -> Option<&SimulatedElement> {
        self.elements.iter().rev().find(|el| !el.is_released())
    }

    pub fn settle_requests(&self) -> &[(BindingId, Duration)] {
        &self.settles
    }

    /// Removes and returns pending settle requests.
    pub fn take_settle_requests(&mut self) -> Vec<(BindingId, Duration)> {
        std::mem::take(&mut self.settles)
    }
}

impl MediaPlatform for SimulatedPlatform {
    type Element = SimulatedElement;

    fn create_element(&mut self, binding: BindingId, element: &VideoElement) -> SimulatedElement {
        let created = SimulatedElement::from_description(binding, element, self.duration);
        if element.autoplay {
            created.0.borrow_mut().paused = false;
        }
        self.elements.push(created.clone());
        created
    }

    fn schedule_settle(&mut self, binding: BindingId, delay: Duration) {
        self.settles.push((binding, delay));
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

/// Control surface that remembers the last value of everything written.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    flags: BTreeSet<ControlFlag>,
    toggle: Option<(String, bool)>,
    mute: Option<(String, bool)>,
    region: Option<String>,
    writes: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_flag(&self, flag: ControlFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn flags(&self) -> impl Iterator<Item = ControlFlag> + '_ {
        self.flags.iter().copied()
    }

    /// Label and pressed state of the play/pause toggle.
    pub fn toggle(&self) -> Option<(&str, bool)> {
        self.toggle.as_ref().map(|(label, pressed)| (label.as_str(), *pressed))
    }

    pub fn mute(&self) -> Option<(&str, bool)> {
        self.mute.as_ref().map(|(label, pressed)| (label.as_str(), *pressed))
    }

    pub fn region_label(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Total number of writes received.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ControlSurface for RecordingSurface {
    fn set_flag(&mut self, flag: ControlFlag, enabled: bool) {
        self.writes += 1;
        if enabled {
            self.flags.insert(flag);
        } else {
            self.flags.remove(&flag);
        }
    }

    fn set_toggle_accessibility(&mut self, label: &str, pressed: bool) {
        self.writes += 1;
        self.toggle = Some((label.to_string(), pressed));
    }

    fn set_mute_accessibility(&mut self, label: &str, pressed: bool) {
        self.writes += 1;
        self.mute = Some((label.to_string(), pressed));
    }

    fn set_region_label(&mut self, label: &str) {
        self.writes += 1;
        self.region = Some(label.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::{MediaStyle, MimeType, Preload, VideoSource};

    fn description(autoplay: bool) -> VideoElement {
        VideoElement {
            id: "hero".into(),
            source: VideoSource {
                url: "a.mp4".into(),
                mime_type: MimeType::Mp4,
            },
            poster: None,
            muted: true,
            plays_inline: true,
            looped: false,
            autoplay,
            preload: Preload::Auto,
            style: MediaStyle::default(),
        }
    }

    #[test]
    fn clones_share_the_same_record() {
        let mut platform = SimulatedPlatform::new();
        let mut element = platform.create_element(BindingId::new(1), &description(false));
        element.play();
        element.set_current_time(4.0);

        let seen = platform.live_element().expect("element was created");
        assert!(!seen.is_paused());
        assert_eq!(seen.current_time(), 4.0);
        assert_eq!(seen.calls(), vec![ElementCall::Play, ElementCall::Seek(4.0)]);
    }

    #[test]
    fn released_elements_are_not_live() {
        let mut platform = SimulatedPlatform::new().with_duration(None);
        let mut element = platform.create_element(BindingId::new(1), &description(true));
        assert!(element.is_autoplay());
        assert_eq!(element.duration(), None);
        element.release();
        assert!(platform.live_element().is_none());
        assert_eq!(platform.elements().len(), 1);
    }

    #[test]
    fn recording_surface_tracks_flags_and_writes() {
        let mut surface = RecordingSurface::new();
        surface.set_flag(ControlFlag::Playing, true);
        surface.set_flag(ControlFlag::Paused, false);
        surface.set_toggle_accessibility("Pause", true);
        assert!(surface.has_flag(ControlFlag::Playing));
        assert!(!surface.has_flag(ControlFlag::Paused));
        assert_eq!(surface.toggle(), Some(("Pause", true)));
        assert_eq!(surface.writes(), 3);
    }
}
