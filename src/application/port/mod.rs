// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that host adapters implement.
//! These traits use only domain types, ensuring the controller remains
//! independent of any concrete DOM or player binding.
//!
//! # Available Ports
//!
//! - [`media`]: Media element operations and platform services
//! - [`control`]: Play/pause/mute control surface
//!
//! # Design Notes
//!
//! - Methods are synchronous; asynchronous platform outcomes come back as
//!   [`MediaEvent`](media::MediaEvent)s tagged with the [`BindingId`](media::BindingId)
//!   they were dispatched for
//! - No method returns an error: media failures are events, not results

pub mod control;
pub mod media;

// Re-export main types for convenience
pub use control::{ControlFlag, ControlSurface};
pub use media::{BindingId, MediaElement, MediaEvent, MediaPlatform, PlayRejection};
