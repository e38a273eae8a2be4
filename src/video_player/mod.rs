// SPDX-License-Identifier: MPL-2.0
//! Background video playback controller.
//!
//! This module resolves per-breakpoint sources, drives the playback state
//! machine, reacts to viewport and document visibility, and keeps the
//! control surface in sync. [`BackgroundVideo`] is the entry point; the
//! other modules are the pure pieces it is assembled from.

mod component;
pub mod controls;
pub mod document;
pub mod render;
pub mod resolver;
pub mod session;
pub mod transition;
pub mod visibility;

pub use component::BackgroundVideo;
pub use controls::{ControlSnapshot, ControlSync};
pub use document::{DocumentSubscription, DocumentVisibility, DocumentVisibilityHub};
pub use resolver::resolve;
pub use session::{EndedOutcome, MediaBinding, Origin, PlaybackMachine, PlaybackSession, RestorePlan};
pub use transition::{TransitionPlan, TransitionSnapshot};
pub use visibility::{
    off_screen_action, on_screen_action, OffScreenAction, OnScreenAction, PlaybackView,
    VisibilityPolicy, VisibilitySignal,
};

use crate::application::port::{ControlSurface, MediaPlatform};
use crate::config::MediaConfiguration;
use crate::i18n::{fluent::I18n, ControlLabels};

/// Creates a component with labels resolved from the configuration's
/// overrides and the given translations.
pub fn create_component<P: MediaPlatform, S: ControlSurface>(
    id: impl Into<String>,
    config: MediaConfiguration,
    i18n: Option<&I18n>,
    platform: P,
    surface: S,
    hub: DocumentVisibilityHub,
) -> BackgroundVideo<P, S> {
    let labels = ControlLabels::resolve(&config.labels, i18n);
    BackgroundVideo::new(id, config, labels, platform, surface, hub)
}
