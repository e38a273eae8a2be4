// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! This module provides localization capabilities using the Fluent localization system.
//! It handles language detection, translation file loading, and string formatting.
//!
//! # Features
//!
//! - Automatic locale detection from CLI, config, or system settings
//! - Embedded `.ftl` translation files
//! - Control labels resolved override → translation → built-in default

pub mod fluent;

use crate::config::{self, LabelOverrides};
use fluent::I18n;

/// Text shown on, and announced for, the control surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlLabels {
    pub play: String,
    pub pause: String,
    pub region: String,
    pub mute: String,
    pub unmute: String,
}

impl Default for ControlLabels {
    fn default() -> Self {
        Self {
            play: config::DEFAULT_PLAY_LABEL.to_string(),
            pause: config::DEFAULT_PAUSE_LABEL.to_string(),
            region: config::DEFAULT_REGION_LABEL.to_string(),
            mute: config::DEFAULT_MUTE_LABEL.to_string(),
            unmute: config::DEFAULT_UNMUTE_LABEL.to_string(),
        }
    }
}

impl ControlLabels {
    /// Resolves every label from the overrides first, then the translation
    /// table, then the built-in defaults.
    pub fn resolve(overrides: &LabelOverrides, i18n: Option<&I18n>) -> Self {
        let pick = |over: &Option<String>, key: &str, default: &str| {
            over.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .or_else(|| i18n.and_then(|t| t.lookup(key)))
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            play: pick(&overrides.play, "play-button-label", config::DEFAULT_PLAY_LABEL),
            pause: pick(&overrides.pause, "pause-button-label", config::DEFAULT_PAUSE_LABEL),
            region: pick(
                &overrides.region,
                "accessible-region-label",
                config::DEFAULT_REGION_LABEL,
            ),
            mute: pick(&overrides.mute, "mute-button-label", config::DEFAULT_MUTE_LABEL),
            unmute: pick(
                &overrides.unmute,
                "unmute-button-label",
                config::DEFAULT_UNMUTE_LABEL,
            ),
        }
    }
}
