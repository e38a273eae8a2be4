// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and shared fixtures.
//!
//! This module re-exports the `approx` crate's assertion macros for float
//! comparison, and builds the configurations most unit tests start from.

pub use approx::assert_abs_diff_eq;

use crate::config::{MediaConfiguration, MediaSources};
use crate::domain::breakpoint::Breakpoint;

/// Default epsilon for f64 comparisons of playback positions.
pub const F64_EPSILON: f64 = 1e-10;

/// A configuration with an mp4 source for each listed breakpoint, named
/// after the breakpoint (`medium.mp4`, ...).
pub fn config_with_videos(breakpoints: &[Breakpoint]) -> MediaConfiguration {
    let mut config = MediaConfiguration::default();
    for bp in breakpoints {
        config
            .sources
            .table
            .set(*bp, MediaSources::mp4(format!("{}.mp4", bp.label())));
    }
    config
}
