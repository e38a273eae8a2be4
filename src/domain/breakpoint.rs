// SPDX-License-Identifier: MPL-2.0
//! Viewport breakpoints.
//!
//! A breakpoint is a discrete, named viewport size category. The host's
//! breakpoint provider emits labels; this module turns them into a closed
//! enumeration so every lookup keyed by breakpoint is an exhaustive match.

use std::fmt;
use std::str::FromStr;

/// Discrete viewport size category used to select per-size media assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Breakpoint {
    Small,
    Medium,
    #[default]
    Large,
    XLarge,
}

impl Breakpoint {
    /// All breakpoints, ordered from smallest to largest.
    pub const ALL: [Breakpoint; 4] = [
        Breakpoint::Small,
        Breakpoint::Medium,
        Breakpoint::Large,
        Breakpoint::XLarge,
    ];

    /// Parses a provider label, falling back to [`Breakpoint::Large`] for
    /// anything unrecognized.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }

    /// Returns the canonical label for this breakpoint.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::XLarge => "xlarge",
        }
    }

    /// Breakpoints strictly larger than this one, nearest first.
    pub fn larger(self) -> impl Iterator<Item = Breakpoint> {
        Self::ALL.into_iter().filter(move |bp| *bp > self)
    }

    /// Breakpoints strictly smaller than this one, nearest first.
    pub fn smaller(self) -> impl Iterator<Item = Breakpoint> {
        Self::ALL.into_iter().rev().filter(move |bp| *bp < self)
    }
}

/// Error returned when a label does not name a known breakpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBreakpoint(pub String);

impl fmt::Display for UnknownBreakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown breakpoint label: {}", self.0)
    }
}

impl FromStr for Breakpoint {
    type Err = UnknownBreakpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            "xlarge" => Ok(Self::XLarge),
            _ => Err(UnknownBreakpoint(s.to_string())),
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
