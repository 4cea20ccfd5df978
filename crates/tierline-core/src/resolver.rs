//! # Support Resolution
//!
//! Pure resolution of (version, date) to a support verdict over an immutable
//! matrix. The resolver holds no mutable state and performs no I/O, so any
//! number of callers may resolve concurrently without synchronization, and
//! identical inputs always produce identical outputs.

use crate::matrix::SupportMatrix;
use crate::pattern::parse_version;
use crate::types::{CvssScore, PatchPolicy, SupportError, SupportTier};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// SUPPORT RESULT
// =============================================================================

/// The verdict for one version at one evaluation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportResult {
    /// The concrete version that was resolved.
    pub version: String,
    /// The effective tier at the evaluation date.
    pub tier: SupportTier,
    /// Which severities are serviced under the effective tier.
    pub patch_policy: PatchPolicy,
    /// The matched row's end-of-life date, if one is configured.
    pub end_of_life: Option<NaiveDate>,
}

impl SupportResult {
    /// Process exit status for this verdict:
    /// 0 for supported tiers, 1 for critical-only, 2 for no support.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self.tier {
            SupportTier::ActiveSupport | SupportTier::SecurityFixesOnly => 0,
            SupportTier::CriticalFixesOnly => 1,
            SupportTier::NoSupport => 2,
        }
    }
}

/// One window of a version line's tier schedule: the line holds `tier`
/// until `until` (exclusive); `None` means forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierWindow {
    pub tier: SupportTier,
    pub until: Option<NaiveDate>,
}

// =============================================================================
// RESOLVER
// =============================================================================

/// Resolves support verdicts against a validated matrix.
///
/// Construction fixes the matrix and the critical-CVSS floor for the
/// lifetime of the process; resolution is a pure function from there on.
#[derive(Debug, Clone)]
pub struct Resolver {
    matrix: SupportMatrix,
    critical_floor: CvssScore,
}

impl Resolver {
    /// Create a resolver with the default critical floor (CVSS 8.0).
    #[must_use]
    pub fn new(matrix: SupportMatrix) -> Self {
        Self::with_critical_floor(matrix, CvssScore::DEFAULT_CRITICAL_FLOOR)
    }

    /// Create a resolver with an explicit critical floor.
    #[must_use]
    pub const fn with_critical_floor(matrix: SupportMatrix, critical_floor: CvssScore) -> Self {
        Self {
            matrix,
            critical_floor,
        }
    }

    /// Resolver over the built-in published table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(SupportMatrix::builtin())
    }

    /// The matrix this resolver answers from.
    #[must_use]
    pub const fn matrix(&self) -> &SupportMatrix {
        &self.matrix
    }

    /// The configured floor for "critical" servicing.
    #[must_use]
    pub const fn critical_floor(&self) -> CvssScore {
        self.critical_floor
    }

    /// Resolve the support verdict for `version` as of `as_of`.
    ///
    /// - Malformed versions fail with [`SupportError::InvalidVersion`].
    /// - Versions no row covers fail with [`SupportError::UnknownVersion`].
    /// - Reaching a row's end-of-life terminates support outright: on and
    ///   after that date the effective tier is `NoSupport` regardless of the
    ///   row's nominal tier, since the table encodes terminal dates per tier.
    pub fn resolve(&self, version: &str, as_of: NaiveDate) -> Result<SupportResult, SupportError> {
        let parsed = parse_version(version)?;

        let entry = self
            .matrix
            .find(&parsed)
            .ok_or_else(|| SupportError::UnknownVersion(version.trim().to_string()))?;

        let tier = match entry.end_of_life {
            Some(eol) if as_of >= eol => SupportTier::NoSupport,
            _ => entry.tier,
        };

        Ok(SupportResult {
            version: parsed.to_string(),
            tier,
            patch_policy: tier.patch_policy(self.critical_floor),
            end_of_life: entry.end_of_life,
        })
    }

    /// The tier schedule for `version`'s line over calendar time.
    ///
    /// The schedule is monotonic by construction: the nominal tier until
    /// end-of-life, then `NoSupport` forever. Lines with no end-of-life, or
    /// already at `NoSupport`, have a single open-ended window.
    pub fn timeline(&self, version: &str) -> Result<Vec<TierWindow>, SupportError> {
        let parsed = parse_version(version)?;

        let entry = self
            .matrix
            .find(&parsed)
            .ok_or_else(|| SupportError::UnknownVersion(version.trim().to_string()))?;

        let mut windows = Vec::with_capacity(2);
        match entry.end_of_life {
            Some(eol) if !entry.tier.is_terminal() => {
                windows.push(TierWindow {
                    tier: entry.tier,
                    until: Some(eol),
                });
                windows.push(TierWindow {
                    tier: SupportTier::NoSupport,
                    until: None,
                });
            }
            _ => windows.push(TierWindow {
                tier: entry.tier,
                until: None,
            }),
        }
        Ok(windows)
    }
}

// =============================================================================
// TESTS
// =============================================================================
