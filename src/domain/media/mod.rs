// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! This module contains the derived, never-stored description of which media
//! a component should display for a given breakpoint, and how to display it.

pub mod render;
pub mod types;

// Re-export commonly used types
pub use render::{
    ImageElement, MediaStyle, ObjectFit, Preload, RenderedOutput, VideoElement, VideoSource,
};
pub use types::{MimeType, Resolution, ResolvedMedia};
