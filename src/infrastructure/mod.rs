// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`simulated`]: In-memory platform and control surface (implements
//!   [`MediaPlatform`] and [`ControlSurface`])
//!
//! [`MediaPlatform`]: crate::application::port::MediaPlatform
//! [`ControlSurface`]: crate::application::port::ControlSurface

pub mod simulated;

pub use simulated::{
    ElementCall, RecordingSurface, SimulatedElement, SimulatedPlatform,
    DEFAULT_SIMULATED_DURATION_SECS,
};
