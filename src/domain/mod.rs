// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`breakpoint`]: Viewport size categories ([`Breakpoint`](breakpoint::Breakpoint))
//! - [`media`]: Resolved media types ([`MimeType`](media::MimeType),
//!   [`ResolvedMedia`](media::ResolvedMedia), [`Resolution`](media::Resolution))
//! - [`video`]: Playback types ([`PlaybackState`](video::PlaybackState),
//!   [`LoopCount`](video::LoopCount), [`OnScreenThreshold`](video::OnScreenThreshold))

pub mod breakpoint;
pub mod media;
pub mod video;
