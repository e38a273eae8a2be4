// SPDX-License-Identifier: MPL-2.0
//! `background_video` is a responsive background video playback controller.
//!
//! It picks a video source per viewport breakpoint, plays, pauses and loops
//! it according to viewport and document visibility, carries playback state
//! across source swaps, and keeps an accessible play/pause and sound control
//! surface in sync. Page integration happens through the ports in
//! [`application::port`].

#![doc(html_root_url = "https://docs.rs/background_video/0.3.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod video_player;

#[cfg(test)]
pub(crate) mod test_utils;
