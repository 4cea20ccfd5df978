//! # Version-Range Patterns
//!
//! A matrix row names the versions it covers with a prefix pattern
//! (`1.2.x`, `1.x`) or a catch-all lower bound (`<1.0`). Matching against a
//! concrete version is an explicit ordered rule: patterns carry a
//! specificity rank and the most specific matching pattern always wins,
//! independent of table order.

use crate::types::SupportError;
use semver::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// =============================================================================
// VERSION PATTERN
// =============================================================================

/// A version-range pattern from the support table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionPattern {
    /// `MAJOR.MINOR.x` — covers one minor line.
    MinorLine { major: u64, minor: u64 },
    /// `MAJOR.x` — covers a whole major line.
    MajorLine { major: u64 },
    /// `<MAJOR.MINOR` — covers everything older than the bound.
    Below { major: u64, minor: u64 },
}

impl VersionPattern {
    /// Check whether a concrete version falls inside this pattern.
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            VersionPattern::MinorLine { major, minor } => {
                version.major == *major && version.minor == *minor
            }
            VersionPattern::MajorLine { major } => version.major == *major,
            VersionPattern::Below { major, minor } => {
                (version.major, version.minor) < (*major, *minor)
            }
        }
    }

    /// Specificity rank for the longest-prefix-wins tie-break.
    ///
    /// A minor-line prefix beats a major-line prefix, which beats the
    /// catch-all lower bound. Higher rank wins.
    #[must_use]
    pub const fn specificity(&self) -> u8 {
        match self {
            VersionPattern::MinorLine { .. } => 2,
            VersionPattern::MajorLine { .. } => 1,
            VersionPattern::Below { .. } => 0,
        }
    }

    /// Check whether two patterns of equal specificity cover a common
    /// version. Overlap across different specificities is legal (the
    /// tie-break resolves it); overlap at equal specificity is a table bug.
    #[must_use]
    pub fn overlaps(&self, other: &VersionPattern) -> bool {
        if self.specificity() != other.specificity() {
            return false;
        }
        match (self, other) {
            (
                VersionPattern::MinorLine { major, minor },
                VersionPattern::MinorLine {
                    major: other_major,
                    minor: other_minor,
                },
            ) => major == other_major && minor == other_minor,
            (
                VersionPattern::MajorLine { major },
                VersionPattern::MajorLine { major: other_major },
            ) => major == other_major,
            // Two lower bounds always share 0.0.z.
            (VersionPattern::Below { .. }, VersionPattern::Below { .. }) => true,
            _ => false,
        }
    }

    /// Recency key: newer lines sort first within a specificity rank.
    #[must_use]
    pub const fn recency(&self) -> (u64, u64) {
        match self {
            VersionPattern::MinorLine { major, minor } | VersionPattern::Below { major, minor } => {
                (*major, *minor)
            }
            VersionPattern::MajorLine { major } => (*major, 0),
        }
    }
}

impl FromStr for VersionPattern {
    type Err = SupportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SupportError::InvalidPattern(s.to_string());

        if let Some(bound) = s.strip_prefix('<') {
            let mut parts = bound.split('.');
            let major: u64 = parts
                .next()
                .and_then(|p| p.parse().ok())
                .ok_or_else(invalid)?;
            let minor: u64 = match parts.next() {
                Some(p) => p.parse().map_err(|_| invalid())?,
                None => 0,
            };
            if parts.next().is_some() {
                return Err(invalid());
            }
            return Ok(VersionPattern::Below { major, minor });
        }

        let parts: Vec<&str> = s.split('.').collect();
        let is_wildcard = |p: &str| p == "x" || p == "*";
        match parts.as_slice() {
            [major, wild] if is_wildcard(wild) => Ok(VersionPattern::MajorLine {
                major: major.parse().map_err(|_| invalid())?,
            }),
            [major, minor, wild] if is_wildcard(wild) => Ok(VersionPattern::MinorLine {
                major: major.parse().map_err(|_| invalid())?,
                minor: minor.parse().map_err(|_| invalid())?,
            }),
            _ => Err(invalid()),
        }
    }
}

impl std::fmt::Display for VersionPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionPattern::MinorLine { major, minor } => write!(f, "{major}.{minor}.x"),
            VersionPattern::MajorLine { major } => write!(f, "{major}.x"),
            VersionPattern::Below { major, minor } => write!(f, "<{major}.{minor}"),
        }
    }
}

// Patterns serialize as their textual form so config files and JSON output
// show "1.2.x", not a struct.
impl Serialize for VersionPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a concrete dotted numeric version (major.minor.patch).
pub fn parse_version(text: &str) -> Result<Version, SupportError> {
    Version::parse(text.trim()).map_err(|_| SupportError::InvalidVersion(text.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================
