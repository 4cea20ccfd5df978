//! # Core Type Definitions
//!
//! This module contains the vocabulary types for the Tierline support matrix:
//! - Support tiers (`SupportTier`)
//! - Severity scores (`CvssScore`)
//! - Patch servicing policies (`PatchPolicy`)
//! - Error types (`SupportError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (CVSS scores are stored as tenths, no floats)
//! - Implement `Ord` where ordering is meaningful, so tier comparisons and
//!   monotonicity checks are plain `<`/`>=` expressions

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// SUPPORT TIER
// =============================================================================

/// A named level of maintenance commitment for a version line.
///
/// Variants are declared in ascending order of commitment so that the derived
/// `Ord` makes "the tier never upgrades over time" expressible as a plain
/// comparison: `later_tier <= earlier_tier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SupportTier {
    /// The version line receives nothing.
    NoSupport,
    /// Only fixes for vulnerabilities at or above the critical CVSS floor.
    CriticalFixesOnly,
    /// Security fixes of any severity, no feature or bugfix backports.
    SecurityFixesOnly,
    /// Full maintenance: features, bugfixes, and security patches.
    ActiveSupport,
}

impl SupportTier {
    /// Get the human-readable tier name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SupportTier::ActiveSupport => "Active Support",
            SupportTier::SecurityFixesOnly => "Security Fixes Only",
            SupportTier::CriticalFixesOnly => "Critical Fixes Only",
            SupportTier::NoSupport => "No Support",
        }
    }

    /// Get the next tier one step toward `NoSupport`, if any.
    ///
    /// Tier movement over calendar time is monotonic: a line only ever steps
    /// down this ladder, never back up.
    #[must_use]
    pub fn next_down(&self) -> Option<SupportTier> {
        match self {
            SupportTier::ActiveSupport => Some(SupportTier::SecurityFixesOnly),
            SupportTier::SecurityFixesOnly => Some(SupportTier::CriticalFixesOnly),
            SupportTier::CriticalFixesOnly => Some(SupportTier::NoSupport),
            SupportTier::NoSupport => None,
        }
    }

    /// Check if this tier is terminal (`NoSupport`).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, SupportTier::NoSupport)
    }

    /// Derive the patch policy in force under this tier.
    ///
    /// `critical_floor` is the configured CVSS floor for "critical" servicing;
    /// it only materializes in the `CriticalFixesOnly` tier.
    #[must_use]
    pub fn patch_policy(&self, critical_floor: CvssScore) -> PatchPolicy {
        match self {
            SupportTier::ActiveSupport => PatchPolicy::AllChanges,
            SupportTier::SecurityFixesOnly => PatchPolicy::SecurityOnly,
            SupportTier::CriticalFixesOnly => PatchPolicy::CriticalOnly {
                min_cvss: critical_floor,
            },
            SupportTier::NoSupport => PatchPolicy::NoPatches,
        }
    }
}

impl FromStr for SupportTier {
    type Err = SupportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active-support" => Ok(SupportTier::ActiveSupport),
            "security-fixes-only" => Ok(SupportTier::SecurityFixesOnly),
            "critical-fixes-only" => Ok(SupportTier::CriticalFixesOnly),
            "no-support" => Ok(SupportTier::NoSupport),
            other => Err(SupportError::ConfigLoad(format!(
                "unknown support tier '{other}' (expected active-support, \
                 security-fixes-only, critical-fixes-only, or no-support)"
            ))),
        }
    }
}

impl std::fmt::Display for SupportTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =============================================================================
// CVSS SCORE
// =============================================================================

/// A CVSS severity score stored as integer tenths (8.0 is stored as 80).
///
/// CVSS scores range 0.0..=10.0 with one decimal digit, so tenths cover the
/// full domain exactly. Integer representation keeps the core float-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CvssScore(u16);

impl CvssScore {
    /// Maximum representable score (10.0).
    pub const MAX_TENTHS: u16 = 100;

    /// Default floor for "critical" servicing: CVSS 8.0.
    pub const DEFAULT_CRITICAL_FLOOR: CvssScore = CvssScore(80);

    /// Create a score from tenths. Fails outside 0..=100.
    pub fn from_tenths(tenths: u16) -> Result<Self, SupportError> {
        if tenths > Self::MAX_TENTHS {
            return Err(SupportError::InvalidScore(format!(
                "CVSS tenths {tenths} exceeds maximum {}",
                Self::MAX_TENTHS
            )));
        }
        Ok(Self(tenths))
    }

    /// Get the raw tenths value.
    #[must_use]
    pub const fn tenths(self) -> u16 {
        self.0
    }
}

impl FromStr for CvssScore {
    type Err = SupportError;

    /// Parse decimal score text like `"8.0"`, `"7.5"`, or `"9"`.
    ///
    /// At most one fractional digit is accepted, matching the CVSS scale.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SupportError::InvalidScore(format!("invalid CVSS score '{s}'"));

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, "0"),
        };
        if frac.len() != 1 {
            return Err(invalid());
        }
        let whole: u16 = whole.parse().map_err(|_| invalid())?;
        let frac: u16 = frac.parse().map_err(|_| invalid())?;

        Self::from_tenths(whole.saturating_mul(10).saturating_add(frac))
    }
}

impl std::fmt::Display for CvssScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

// =============================================================================
// PATCH POLICY
// =============================================================================

/// Which changes a version line is serviced with under its tier.
///
/// The critical threshold is a first-class field, not prose: a
/// `CriticalOnly` policy carries the exact CVSS floor it enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum PatchPolicy {
    /// Features, bugfixes, and security patches.
    AllChanges,
    /// Security fixes of any severity.
    SecurityOnly,
    /// Only vulnerabilities scoring at or above `min_cvss`.
    CriticalOnly { min_cvss: CvssScore },
    /// Nothing is serviced.
    NoPatches,
}

impl PatchPolicy {
    /// Check whether a vulnerability of the given severity is serviced.
    #[must_use]
    pub fn services(&self, severity: CvssScore) -> bool {
        match self {
            PatchPolicy::AllChanges | PatchPolicy::SecurityOnly => true,
            PatchPolicy::CriticalOnly { min_cvss } => severity >= *min_cvss,
            PatchPolicy::NoPatches => false,
        }
    }
}

impl std::fmt::Display for PatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatchPolicy::AllChanges => write!(f, "all changes"),
            PatchPolicy::SecurityOnly => write!(f, "security fixes, any severity"),
            PatchPolicy::CriticalOnly { min_cvss } => {
                write!(f, "security fixes with CVSS >= {min_cvss}")
            }
            PatchPolicy::NoPatches => write!(f, "none"),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while loading a matrix or resolving support.
///
/// - No silent failures
/// - Use `Result<T, SupportError>` for fallible operations
/// - Resolution is deterministic: a failure replays identically on the same
///   inputs, so nothing here is retryable
#[derive(Debug, Error)]
pub enum SupportError {
    /// The version string is not a dotted numeric major.minor.patch version.
    #[error("invalid version '{0}': expected major.minor.patch")]
    InvalidVersion(String),

    /// No matrix entry covers the version.
    #[error("no support entry covers version '{0}'")]
    UnknownVersion(String),

    /// A version-range pattern in the matrix could not be parsed.
    #[error("invalid version pattern '{0}'")]
    InvalidPattern(String),

    /// Two patterns of equal specificity match the same versions.
    #[error("overlapping version patterns '{0}' and '{1}'")]
    OverlappingPatterns(String, String),

    /// A CVSS score was malformed or out of the 0.0..=10.0 range.
    #[error("invalid CVSS score: {0}")]
    InvalidScore(String),

    /// A date string was not a calendar date in YYYY-MM-DD form.
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The matrix configuration could not be loaded. Fatal at startup.
    #[error("config load error: {0}")]
    ConfigLoad(String),

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================
