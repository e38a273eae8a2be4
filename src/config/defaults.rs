// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Playback**: Autoplay, looping and control defaults
//! - **Visibility**: Off-screen behavior defaults
//! - **Display**: Fit, position and preload defaults
//! - **Labels**: Built-in control labels used when no translation exists

use crate::domain::video::newtypes::{settle_bounds, threshold_bounds};

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Start playing as soon as the media is ready.
pub const DEFAULT_AUTO_PLAY: bool = true;

/// Raw loop count (`-1` loops forever).
pub const DEFAULT_LOOP_COUNT: i64 = -1;

/// Show the play/pause and sound controls.
pub const DEFAULT_SHOW_CONTROLS: bool = true;

/// Start muted; most platforms refuse unmuted autoplay.
pub const DEFAULT_MUTED: bool = true;

/// Play inline instead of going fullscreen on mobile platforms.
pub const DEFAULT_PLAYS_INLINE: bool = true;

pub const DEFAULT_PLAY_FIRST_VIEW_ONLY: bool = false;

pub const DEFAULT_PAUSE_REWINDS_ON_USER_PAUSE: bool = false;

/// Delay in milliseconds before the first control sync after a (re)mount.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = settle_bounds::DEFAULT_MS;

// ==========================================================================
// Visibility Defaults
// ==========================================================================

/// Fraction of the element that must be in view to count as on screen.
pub const DEFAULT_ON_SCREEN_THRESHOLD: f64 = threshold_bounds::DEFAULT;

pub const DEFAULT_OFF_SCREEN_PAUSE: bool = true;

pub const DEFAULT_OFF_SCREEN_REWIND: bool = false;

// ==========================================================================
// Display Defaults
// ==========================================================================

pub const DEFAULT_OBJECT_FIT: &str = "cover";

pub const DEFAULT_PRELOAD: &str = "auto";

// ==========================================================================
// Label Defaults
// ==========================================================================

pub const DEFAULT_PLAY_LABEL: &str = "Play";

pub const DEFAULT_PAUSE_LABEL: &str = "Pause";

pub const DEFAULT_REGION_LABEL: &str = "Background video";

pub const DEFAULT_MUTE_LABEL: &str = "Mute";

pub const DEFAULT_UNMUTE_LABEL: &str = "Unmute";
