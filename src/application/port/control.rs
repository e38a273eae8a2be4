// SPDX-License-Identifier: MPL-2.0
//! Control surface port definition.
//!
//! The control surface is the host's play/pause and sound buttons plus the
//! container they live in. The controller only ever sets flags and
//! accessibility text on it; how those map to markup is the host's concern.

/// Visual state markers toggled on the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ControlFlag {
    /// Media is playing.
    Playing,
    /// Media is paused. Always the negation of [`ControlFlag::Playing`].
    Paused,
    /// The loop cycle is complete; no further controls are offered.
    LoopsComplete,
    /// Controls are hidden while an automatic pause is in effect.
    ControlsSuppressed,
    /// Sound is muted.
    Muted,
}

impl ControlFlag {
    pub const ALL: [ControlFlag; 5] = [
        ControlFlag::Playing,
        ControlFlag::Paused,
        ControlFlag::LoopsComplete,
        ControlFlag::ControlsSuppressed,
        ControlFlag::Muted,
    ];

    /// CSS class conventionally used for this flag.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Playing => "is-backgroundvideo-playing",
            Self::Paused => "is-backgroundvideo-paused",
            Self::LoopsComplete => "is-backgroundvideo-nocontrols",
            Self::ControlsSuppressed => "is-video-nocontrols",
            Self::Muted => "backgroundvideo__mute",
        }
    }
}

/// Port for the host's control surface.
pub trait ControlSurface {
    fn set_flag(&mut self, flag: ControlFlag, enabled: bool);

    /// Accessible label and pressed state of the play/pause toggle.
    fn set_toggle_accessibility(&mut self, label: &str, pressed: bool);

    /// Accessible label and pressed state of the sound toggle.
    fn set_mute_accessibility(&mut self, label: &str, pressed: bool);

    /// Accessible name of the region hosting the media.
    fn set_region_label(&mut self, label: &str);
}
