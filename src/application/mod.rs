// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports the playback controller is written against.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The controller in [`crate::video_player`] only talks to ports
//!
//! # Example
//!
//! ```ignore
//! use background_video::application::port::{MediaElement, MediaPlatform};
//!
//! // A host adapter implements the port traits
//! struct DomVideo { /* ... */ }
//! impl MediaElement for DomVideo { /* ... */ }
//! ```

pub mod port;
