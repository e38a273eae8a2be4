// SPDX-License-Identifier: MPL-2.0
//! This module handles the media configuration of a background video,
//! loaded from and saved to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[sources]` - Fallback policy, global poster and one `[sources.<breakpoint>]`
//!   table per breakpoint with `mp4`, `webm` and `poster` URLs
//! - `[playback]` - Autoplay, looping, controls and mute
//! - `[visibility]` - On-screen threshold and off-screen behavior
//! - `[display]` - Object fit, position and preload hint
//! - `[labels]` - Control label overrides
//!
//! Every field is optional; missing fields take the values in [`defaults`].
//! Empty URL strings are treated as absent.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `BACKGROUND_VIDEO_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use background_video::config::{self, MediaConfiguration};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.playback.auto_play = false;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::breakpoint::Breakpoint;
use crate::domain::media::{MediaStyle, ObjectFit, Preload};
use crate::domain::video::{LoopCount, OnScreenThreshold, SettleDelay};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "BackgroundVideo";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "BACKGROUND_VIDEO_CONFIG_DIR";

// =============================================================================
// Sources
// =============================================================================

/// Media URLs configured for one breakpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MediaSources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mp4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl MediaSources {
    /// Creates sources with only an mp4 URL.
    #[must_use]
    pub fn mp4(url: impl Into<String>) -> Self {
        Self {
            mp4: Some(url.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn mp4_url(&self) -> Option<&str> {
        non_empty(&self.mp4)
    }

    #[must_use]
    pub fn webm_url(&self) -> Option<&str> {
        non_empty(&self.webm)
    }

    #[must_use]
    pub fn poster_url(&self) -> Option<&str> {
        non_empty(&self.poster)
    }
}

/// Per-breakpoint media table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BreakpointTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xlarge: Option<MediaSources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large: Option<MediaSources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<MediaSources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small: Option<MediaSources>,
}

impl BreakpointTable {
    #[must_use]
    pub fn get(&self, breakpoint: Breakpoint) -> Option<&MediaSources> {
        match breakpoint {
            Breakpoint::XLarge => self.xlarge.as_ref(),
            Breakpoint::Large => self.large.as_ref(),
            Breakpoint::Medium => self.medium.as_ref(),
            Breakpoint::Small => self.small.as_ref(),
        }
    }

    pub fn set(&mut self, breakpoint: Breakpoint, sources: MediaSources) {
        let slot = match breakpoint {
            Breakpoint::XLarge => &mut self.xlarge,
            Breakpoint::Large => &mut self.large,
            Breakpoint::Medium => &mut self.medium,
            Breakpoint::Small => &mut self.small,
        };
        *slot = Some(sources);
    }
}

/// How the resolver behaves when the requested breakpoint has no entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Only the requested breakpoint is consulted.
    #[default]
    Exact,
    /// Larger breakpoints are tried nearest first, then smaller ones.
    Cascade,
}

/// Media sources and resolution policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourcesConfig {
    pub fallback: FallbackPolicy,

    /// Poster used when the breakpoint entry has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,

    #[serde(flatten)]
    pub table: BreakpointTable,
}

impl SourcesConfig {
    #[must_use]
    pub fn global_poster(&self) -> Option<&str> {
        non_empty(&self.poster)
    }
}

// =============================================================================
// Section Structs
// =============================================================================

/// General settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Playback behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    pub auto_play: bool,
    /// `-1` loops forever, `0` plays once, `n` replays `n` more times.
    pub loop_count: i64,
    pub show_controls: bool,
    pub muted: bool,
    pub plays_inline: bool,
    /// Play only during the first view; once paused off screen it never
    /// resumes automatically.
    pub play_first_view_only: bool,
    pub pause_rewinds_on_user_pause: bool,
    pub settle_delay_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            auto_play: DEFAULT_AUTO_PLAY,
            loop_count: DEFAULT_LOOP_COUNT,
            show_controls: DEFAULT_SHOW_CONTROLS,
            muted: DEFAULT_MUTED,
            plays_inline: DEFAULT_PLAYS_INLINE,
            play_first_view_only: DEFAULT_PLAY_FIRST_VIEW_ONLY,
            pause_rewinds_on_user_pause: DEFAULT_PAUSE_REWINDS_ON_USER_PAUSE,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

/// Scroll visibility behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Fraction (0.0–1.0) of the element that must be in view.
    pub on_screen_threshold: f64,
    pub off_screen_pause: bool,
    pub off_screen_rewind: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            on_screen_threshold: DEFAULT_ON_SCREEN_THRESHOLD,
            off_screen_pause: DEFAULT_OFF_SCREEN_PAUSE,
            off_screen_rewind: DEFAULT_OFF_SCREEN_REWIND,
        }
    }
}

/// Presentation of the media box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// `cover`, `contain`, `fill`, `auto` or the legacy `100% 100%`.
    pub object_fit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_position: Option<String>,
    pub preload: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            object_fit: DEFAULT_OBJECT_FIT.to_string(),
            object_position: None,
            preload: DEFAULT_PRELOAD.to_string(),
        }
    }
}

/// Control label overrides, taking precedence over translations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LabelOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmute: Option<String>,
}

// =============================================================================
// Main Config Struct
// =============================================================================

/// Complete configuration of one background video component.
///
/// Immutable once handed to a component; runtime counters live in the
/// playback session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MediaConfiguration {
    pub general: GeneralConfig,
    pub sources: SourcesConfig,
    pub playback: PlaybackConfig,
    pub visibility: VisibilityConfig,
    pub display: DisplayConfig,
    pub labels: LabelOverrides,
}

impl MediaConfiguration {
    #[must_use]
    pub fn loop_count(&self) -> LoopCount {
        LoopCount::from_raw(self.playback.loop_count)
    }

    #[must_use]
    pub fn on_screen_threshold(&self) -> OnScreenThreshold {
        OnScreenThreshold::new(self.visibility.on_screen_threshold)
    }

    #[must_use]
    pub fn settle_delay(&self) -> SettleDelay {
        SettleDelay::from_millis(self.playback.settle_delay_ms)
    }

    #[must_use]
    pub fn media_style(&self) -> MediaStyle {
        MediaStyle {
            object_fit: ObjectFit::from_css(&self.display.object_fit),
            object_position: non_empty(&self.display.object_position).map(str::to_string),
        }
    }

    #[must_use]
    pub fn preload(&self) -> Preload {
        Preload::from_attr(&self.display.preload)
    }
}

// =============================================================================
// Path Resolution
// =============================================================================

/// Resolves the config directory: explicit override, then the
/// `BACKGROUND_VIDEO_CONFIG_DIR` environment variable, then the platform default.
pub fn config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (MediaConfiguration, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (MediaConfiguration, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("Ignoring invalid config {}: {}", path.display(), err);
                    return (
                        MediaConfiguration::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (MediaConfiguration::default(), None)
}

/// Parses a configuration from TOML text.
pub fn from_toml_str(content: &str) -> Result<MediaConfiguration> {
    Ok(toml::from_str(content)?)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<MediaConfiguration> {
    let content = fs::read_to_string(path)?;
    from_toml_str(&content)
}

/// Saves the configuration to the default path.
pub fn save(config: &MediaConfiguration) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &MediaConfiguration, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &MediaConfiguration, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tempfile::tempdir;

    #[test]
    fn default_config_matches_defaults_module() {
        let config = MediaConfiguration::default();
        assert_eq!(config.playback.auto_play, DEFAULT_AUTO_PLAY);
        assert_eq!(config.loop_count(), LoopCount::Infinite);
        assert!(config.visibility.off_screen_pause);
        assert_eq!(config.sources.fallback, FallbackPolicy::Exact);
        assert_abs_diff_eq!(
            config.on_screen_threshold().value(),
            DEFAULT_ON_SCREEN_THRESHOLD
        );
    }

    #[test]
    fn parses_sectioned_toml_with_breakpoint_tables() {
        let config = from_toml_str(
            r#"
            [sources]
            fallback = "cascade"
            poster = "global.jpg"

            [sources.medium]
            mp4 = "a.mp4"
            webm = "a.webm"

            [sources.small]
            mp4 = ""
            poster = "small.jpg"

            [playback]
            loop_count = 2
            auto_play = false

            [visibility]
            on_screen_threshold = 0.5
            "#,
        )
        .expect("valid config");

        assert_eq!(config.sources.fallback, FallbackPolicy::Cascade);
        assert_eq!(config.sources.global_poster(), Some("global.jpg"));
        let medium = config.sources.table.get(Breakpoint::Medium).unwrap();
        assert_eq!(medium.mp4_url(), Some("a.mp4"));
        assert_eq!(medium.webm_url(), Some("a.webm"));
        let small = config.sources.table.get(Breakpoint::Small).unwrap();
        assert_eq!(small.mp4_url(), None);
        assert_eq!(small.poster_url(), Some("small.jpg"));
        assert!(config.sources.table.get(Breakpoint::Large).is_none());
        assert_eq!(config.loop_count(), LoopCount::Remaining(2));
        assert!(!config.playback.auto_play);
        assert!(config.playback.show_controls);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = from_toml_str(
            r#"
            [playback]
            loop_count = -5
            settle_delay_ms = 999999

            [visibility]
            on_screen_threshold = 3.0
            "#,
        )
        .unwrap();
        assert_eq!(config.loop_count(), LoopCount::Infinite);
        assert_abs_diff_eq!(config.on_screen_threshold().value(), 1.0);
        assert_eq!(config.settle_delay().as_millis(), 5_000);
    }

    #[test]
    fn display_section_maps_to_media_style() {
        let config = from_toml_str(
            r#"
            [display]
            object_fit = "100% 100%"
            object_position = "center top"
            preload = "metadata"
            "#,
        )
        .unwrap();
        let style = config.media_style();
        assert_eq!(style.object_fit, ObjectFit::Fill);
        assert_eq!(style.object_position.as_deref(), Some("center top"));
        assert_eq!(config.preload(), Preload::Metadata);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = from_toml_str("not = valid = toml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn save_and_load_round_trip_preserves_sources() {
        let mut config = MediaConfiguration::default();
        config.general.language = Some("fr".to_string());
        config
            .sources
            .table
            .set(Breakpoint::Large, MediaSources::mp4("large.mp4"));
        config.labels.play = Some("Lecture".to_string());

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(config, MediaConfiguration::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join("settings.toml"), "not = valid = toml").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
        assert_eq!(config, MediaConfiguration::default());
    }
}
