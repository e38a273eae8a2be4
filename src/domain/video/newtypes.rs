// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for playback values,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// LoopCount
// =============================================================================

/// Number of automatic replays left in the loop cycle.
///
/// The raw configuration value uses `-1` for "loop forever", `0` for "play
/// once" and `n > 0` for "play `n` additional times". The enum makes a
/// negative finite count unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCount {
    Infinite,
    Remaining(u32),
}

impl LoopCount {
    /// Creates a loop count from its raw configuration value.
    ///
    /// Any negative value is treated as infinite.
    #[must_use]
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            Self::Infinite
        } else {
            Self::Remaining(u32::try_from(raw).unwrap_or(u32::MAX))
        }
    }

    /// Returns the raw configuration value (`-1` for infinite).
    #[must_use]
    pub fn as_raw(self) -> i64 {
        match self {
            Self::Infinite => -1,
            Self::Remaining(n) => i64::from(n),
        }
    }

    #[must_use]
    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// Returns true when no automatic replay is left.
    #[must_use]
    pub fn is_exhausted(self) -> bool {
        matches!(self, Self::Remaining(0))
    }

    /// Consumes one replay. Infinite and exhausted counts are unchanged.
    #[must_use]
    pub fn decrement(self) -> Self {
        match self {
            Self::Remaining(n) => Self::Remaining(n.saturating_sub(1)),
            Self::Infinite => Self::Infinite,
        }
    }
}

impl Default for LoopCount {
    fn default() -> Self {
        Self::Remaining(0)
    }
}

// =============================================================================
// OnScreenThreshold
// =============================================================================

/// On-screen threshold bounds (fraction of the element area in view).
pub mod threshold_bounds {
    /// Minimum threshold (any visible pixel counts).
    pub const MIN: f64 = 0.0;
    /// Maximum threshold (fully in view).
    pub const MAX: f64 = 1.0;
    /// Default threshold (1% of the element in view).
    pub const DEFAULT: f64 = 0.01;
}

/// Minimum fraction of the bound element that must be in view for it to
/// count as on screen, guaranteed to be within `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnScreenThreshold(f64);

impl OnScreenThreshold {
    /// Creates a threshold, clamping to the valid range. `NaN` yields the default.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(threshold_bounds::MIN, threshold_bounds::MAX))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true if `fraction_in_view` is below the threshold.
    #[must_use]
    pub fn is_below(self, fraction_in_view: f64) -> bool {
        fraction_in_view < self.0
    }
}

impl Default for OnScreenThreshold {
    fn default() -> Self {
        Self(threshold_bounds::DEFAULT)
    }
}

// =============================================================================
// SettleDelay
// =============================================================================

/// Settle delay bounds in milliseconds.
pub mod settle_bounds {
    /// Minimum delay (sync on the next timer turn).
    pub const MIN_MS: u64 = 0;
    /// Maximum delay.
    pub const MAX_MS: u64 = 5_000;
    /// Default delay.
    pub const DEFAULT_MS: u64 = 250;
}

/// Delay between a (re)mount and the first control-surface sync, letting
/// autoplay decisions settle first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleDelay(u64);

impl SettleDelay {
    /// Creates a settle delay, clamping to the valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(settle_bounds::MIN_MS, settle_bounds::MAX_MS))
    }

    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for SettleDelay {
    fn default() -> Self {
        Self(settle_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Tests
// =============================================================================
