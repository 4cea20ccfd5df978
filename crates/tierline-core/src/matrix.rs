//! # Support Matrix
//!
//! The support matrix is the static table at the heart of the system: each
//! row binds a version-range pattern to a support tier and an optional
//! end-of-life date. The table is validated once at construction and
//! immutable thereafter; amendments happen by shipping a new policy file,
//! never at runtime.

use crate::pattern::VersionPattern;
use crate::types::{SupportError, SupportTier};
use chrono::NaiveDate;
use semver::Version;
use serde::{Deserialize, Serialize};

// =============================================================================
// SUPPORT ENTRY
// =============================================================================

/// One row of the support table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportEntry {
    /// The version range this row covers.
    pub pattern: VersionPattern,
    /// The nominal tier while the row is in effect.
    pub tier: SupportTier,
    /// Date on and after which the row's tier no longer applies.
    /// `None` means open-ended ("TBD").
    pub end_of_life: Option<NaiveDate>,
}

impl SupportEntry {
    /// Create a new entry.
    #[must_use]
    pub const fn new(
        pattern: VersionPattern,
        tier: SupportTier,
        end_of_life: Option<NaiveDate>,
    ) -> Self {
        Self {
            pattern,
            tier,
            end_of_life,
        }
    }
}

// =============================================================================
// SUPPORT MATRIX
// =============================================================================

/// A validated, immutable collection of support entries.
///
/// Invariant: entries are held sorted by descending pattern specificity
/// (then by descending recency), so `find` implements "most specific prefix
/// wins" as an explicit ordered scan rather than relying on incidental
/// table order. Entries of equal specificity never overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportMatrix {
    entries: Vec<SupportEntry>,
}

impl SupportMatrix {
    /// Build a matrix from raw entries, validating table invariants:
    ///
    /// - at least one entry
    /// - no two entries of equal specificity cover a common version
    ///
    /// Entries are re-sorted into match order; input order carries no meaning.
    pub fn new(mut entries: Vec<SupportEntry>) -> Result<Self, SupportError> {
        if entries.is_empty() {
            return Err(SupportError::ConfigLoad(
                "support matrix has no entries".to_string(),
            ));
        }

        for (i, a) in entries.iter().enumerate() {
            for b in entries.iter().skip(i + 1) {
                if a.pattern.overlaps(&b.pattern) {
                    return Err(SupportError::OverlappingPatterns(
                        a.pattern.to_string(),
                        b.pattern.to_string(),
                    ));
                }
            }
        }

        // Most specific first; within a rank, newest line first.
        entries.sort_by(|a, b| {
            b.pattern
                .specificity()
                .cmp(&a.pattern.specificity())
                .then(b.pattern.recency().cmp(&a.pattern.recency()))
        });

        Ok(Self { entries })
    }

    /// The default matrix shipped with the binary, encoding the published
    /// support table for the module family:
    ///
    /// | Versions | Tier                | End of life |
    /// |----------|---------------------|-------------|
    /// | 1.2.x    | Active Support      | TBD         |
    /// | 1.1.x    | Security Fixes Only | 2025-12-31  |
    /// | 1.0.x    | Critical Fixes Only | 2025-06-30  |
    /// | <1.0     | No Support          | —           |
    #[must_use]
    pub fn builtin() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).expect("builtin date is valid");
        let entries = vec![
            SupportEntry::new(
                VersionPattern::MinorLine { major: 1, minor: 2 },
                SupportTier::ActiveSupport,
                None,
            ),
            SupportEntry::new(
                VersionPattern::MinorLine { major: 1, minor: 1 },
                SupportTier::SecurityFixesOnly,
                Some(date(2025, 12, 31)),
            ),
            SupportEntry::new(
                VersionPattern::MinorLine { major: 1, minor: 0 },
                SupportTier::CriticalFixesOnly,
                Some(date(2025, 6, 30)),
            ),
            SupportEntry::new(
                VersionPattern::Below { major: 1, minor: 0 },
                SupportTier::NoSupport,
                None,
            ),
        ];
        Self::new(entries).expect("builtin matrix is well-formed")
    }

    /// Find the entry covering a concrete version: first match in
    /// specificity order. Exactly one entry can win because equal-specificity
    /// overlap is rejected at construction.
    #[must_use]
    pub fn find(&self, version: &Version) -> Option<&SupportEntry> {
        self.entries.iter().find(|e| e.pattern.matches(version))
    }

    /// Iterate entries in match order (most specific first).
    pub fn entries(&self) -> impl Iterator<Item = &SupportEntry> {
        self.entries.iter()
    }

    /// Number of rows in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the matrix has no rows. Always false for a validated
    /// matrix; present for API completeness alongside `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parse_version;

    fn entry(pattern: &str, tier: SupportTier) -> SupportEntry {
        SupportEntry::new(pattern.parse().expect("pattern"), tier, None)
    }

    #[test]
    fn builtin_has_four_rows_in_match_order() {
        let matrix = SupportMatrix::builtin();
        let patterns: Vec<String> = matrix.entries().map(|e| e.pattern.to_string()).collect();
        assert_eq!(patterns, vec!["1.2.x", "1.1.x", "1.0.x", "<1.0"]);
    }

    #[test]
    fn empty_matrix_is_rejected() {
        assert!(matches!(
            SupportMatrix::new(vec![]),
            Err(SupportError::ConfigLoad(_))
        ));
    }

    #[test]
    fn equal_specificity_overlap_is_rejected() {
        let result = SupportMatrix::new(vec![
            entry("1.2.x", SupportTier::ActiveSupport),
            entry("1.2.x", SupportTier::NoSupport),
        ]);
        assert!(matches!(
            result,
            Err(SupportError::OverlappingPatterns(_, _))
        ));
    }

    #[test]
    fn two_catch_alls_are_rejected() {
        let result = SupportMatrix::new(vec![
            entry("<1.0", SupportTier::NoSupport),
            entry("<2.0", SupportTier::CriticalFixesOnly),
        ]);
        assert!(matches!(
            result,
            Err(SupportError::OverlappingPatterns(_, _))
        ));
    }

    #[test]
    fn most_specific_prefix_wins_regardless_of_input_order() {
        // Catch-all listed first on purpose; sorting must ignore input order.
        let matrix = SupportMatrix::new(vec![
            entry("<9.0", SupportTier::NoSupport),
            entry("1.x", SupportTier::SecurityFixesOnly),
            entry("1.2.x", SupportTier::ActiveSupport),
        ])
        .expect("matrix");

        let hit = matrix
            .find(&parse_version("1.2.7").expect("version"))
            .expect("entry");
        assert_eq!(hit.tier, SupportTier::ActiveSupport);

        // 1.3.0 falls through 1.2.x to the major-line row.
        let hit = matrix
            .find(&parse_version("1.3.0").expect("version"))
            .expect("entry");
        assert_eq!(hit.tier, SupportTier::SecurityFixesOnly);

        // 0.5.0 only matches the catch-all.
        let hit = matrix
            .find(&parse_version("0.5.0").expect("version"))
            .expect("entry");
        assert_eq!(hit.tier, SupportTier::NoSupport);
    }

    #[test]
    fn uncovered_version_finds_nothing() {
        let matrix = SupportMatrix::builtin();
        assert!(matrix.find(&parse_version("2.0.0").expect("version")).is_none());
        assert!(matrix.find(&parse_version("1.3.0").expect("version")).is_none());
    }

    #[test]
    fn exactly_one_entry_matches_any_covered_version() {
        let matrix = SupportMatrix::builtin();
        for text in ["0.1.0", "0.9.9", "1.0.0", "1.1.5", "1.2.0"] {
            let version = parse_version(text).expect("version");
            let winners = matrix
                .entries()
                .filter(|e| e.pattern.matches(&version))
                .count();
            assert_eq!(winners, 1, "version {text} matched {winners} entries");
        }
    }
}
