// SPDX-License-Identifier: MPL-2.0
//! Control surface synchronization.
//!
//! [`ControlSnapshot`] is the complete visual and accessible state the
//! controls should show, projected from playback state. [`ControlSync`]
//! remembers what it last wrote and only pushes differences, so syncing
//! twice in a row writes nothing the second time.

use crate::application::port::{ControlFlag, ControlSurface};
use crate::domain::video::PlaybackState;
use crate::i18n::ControlLabels;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSnapshot {
    pub playing: bool,
    pub loops_complete: bool,
    pub suppressed: bool,
    pub muted: bool,
    pub toggle_label: String,
    pub toggle_pressed: bool,
    pub mute_label: String,
    pub mute_pressed: bool,
    pub region_label: String,
}

impl ControlSnapshot {
    pub fn project(
        state: PlaybackState,
        suppressed: bool,
        muted: bool,
        labels: &ControlLabels,
    ) -> Self {
        let playing = state.is_playing();
        Self {
            playing,
            loops_complete: state.is_loop_complete(),
            suppressed,
            muted,
            toggle_label: (if playing { &labels.pause } else { &labels.play }).clone(),
            toggle_pressed: playing,
            mute_label: (if muted { &labels.unmute } else { &labels.mute }).clone(),
            mute_pressed: muted,
            region_label: labels.region.clone(),
        }
    }

    pub fn flag(&self, flag: ControlFlag) -> bool {
        match flag {
            ControlFlag::Playing => self.playing,
            ControlFlag::Paused => !self.playing,
            ControlFlag::LoopsComplete => self.loops_complete,
            ControlFlag::ControlsSuppressed => self.suppressed,
            ControlFlag::Muted => self.muted,
        }
    }
}

/// Writes snapshots to a surface, skipping unchanged values.
#[derive(Debug, Default)]
pub struct ControlSync {
    applied: Option<ControlSnapshot>,
}

impl ControlSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets what was written; the next sync writes everything.
    pub fn reset(&mut self) {
        self.applied = None;
    }

    pub fn applied(&self) -> Option<&ControlSnapshot> {
        self.applied.as_ref()
    }

    /// Applies `snapshot`. The loop-complete marker is sticky: once written
    /// it stays until [`reset`](Self::reset). Returns the number of writes.
    pub fn sync<S: ControlSurface>(
        &mut self,
        mut snapshot: ControlSnapshot,
        surface: &mut S,
    ) -> usize {
        let previous = self.applied.take();
        if previous.as_ref().is_some_and(|p| p.loops_complete) {
            snapshot.loops_complete = true;
        }

        let mut writes = 0;
        for flag in ControlFlag::ALL {
            let wanted = snapshot.flag(flag);
            if previous.as_ref().map(|p| p.flag(flag)) != Some(wanted) {
                surface.set_flag(flag, wanted);
                writes += 1;
            }
        }

        let toggle_changed = previous.as_ref().map_or(true, |p| {
            p.toggle_label != snapshot.toggle_label || p.toggle_pressed != snapshot.toggle_pressed
        });
        if toggle_changed {
            surface.set_toggle_accessibility(&snapshot.toggle_label, snapshot.toggle_pressed);
            writes += 1;
        }
        let mute_changed = previous.as_ref().map_or(true, |p| {
            p.mute_label != snapshot.mute_label || p.mute_pressed != snapshot.mute_pressed
        });
        if mute_changed {
            surface.set_mute_accessibility(&snapshot.mute_label, snapshot.mute_pressed);
            writes += 1;
        }
        if previous
            .as_ref()
            .map_or(true, |p| p.region_label != snapshot.region_label)
        {
            surface.set_region_label(&snapshot.region_label);
            writes += 1;
        }

        self.applied = Some(snapshot);
        writes
    }
}
