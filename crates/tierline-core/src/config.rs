//! # Matrix Configuration
//!
//! TOML schema for support-matrix files and the load path that turns a file
//! into a validated [`Resolver`]. Configuration is read once at process
//! start; any malformed input is a fatal startup error.
//!
//! ## File format
//!
//! ```toml
//! critical_cvss_floor = "8.0"
//!
//! [[entry]]
//! versions = "1.2.x"
//! tier = "active-support"
//!
//! [[entry]]
//! versions = "1.1.x"
//! tier = "security-fixes-only"
//! end_of_life = "2025-12-31"
//!
//! [[entry]]
//! versions = "<1.0"
//! tier = "no-support"
//! ```
//!
//! The CVSS floor is decimal text, not a TOML float: the core is float-free
//! and parses it straight into tenths.

use crate::matrix::{SupportEntry, SupportMatrix};
use crate::pattern::VersionPattern;
use crate::resolver::Resolver;
use crate::types::{CvssScore, SupportError, SupportTier};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// RAW SCHEMA
// =============================================================================

/// Top-level TOML document. Raw shape only; validation happens in
/// [`MatrixConfig::build`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMatrix {
    /// Decimal CVSS text, e.g. `"8.0"`. Defaults to 8.0 when absent.
    critical_cvss_floor: Option<String>,
    #[serde(default, rename = "entry")]
    entries: Vec<RawEntry>,
}

/// One `[[entry]]` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    /// Version-range pattern text: `"1.2.x"`, `"1.x"`, or `"<1.0"`.
    versions: String,
    /// Kebab-case tier name, e.g. `"security-fixes-only"`.
    tier: String,
    /// `"YYYY-MM-DD"`; absent means open-ended.
    end_of_life: Option<String>,
}

// =============================================================================
// MATRIX CONFIG
// =============================================================================

/// Loader for support-matrix configuration.
pub struct MatrixConfig;

impl MatrixConfig {
    /// Parse and validate TOML text into a ready [`Resolver`].
    pub fn from_toml_str(text: &str) -> Result<Resolver, SupportError> {
        let raw: RawMatrix =
            toml::from_str(text).map_err(|e| SupportError::ConfigLoad(e.to_string()))?;
        Self::build(raw)
    }

    /// Load a matrix file from disk.
    pub fn from_path(path: &Path) -> Result<Resolver, SupportError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SupportError::Io(format!("cannot read '{}': {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    fn build(raw: RawMatrix) -> Result<Resolver, SupportError> {
        let floor = match raw.critical_cvss_floor {
            Some(text) => text.parse::<CvssScore>()?,
            None => CvssScore::DEFAULT_CRITICAL_FLOOR,
        };

        let mut entries = Vec::with_capacity(raw.entries.len());
        for row in raw.entries {
            let pattern: VersionPattern = row.versions.parse()?;
            let tier: SupportTier = row.tier.parse()?;
            let end_of_life = match row.end_of_life {
                Some(text) => Some(parse_date(&text)?),
                None => None,
            };
            entries.push(SupportEntry::new(pattern, tier, end_of_life));
        }

        let matrix = SupportMatrix::new(entries)?;
        Ok(Resolver::with_critical_floor(matrix, floor))
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate, SupportError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| SupportError::InvalidDate(text.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BUILTIN_EQUIVALENT: &str = r#"
        critical_cvss_floor = "8.0"

        [[entry]]
        versions = "1.2.x"
        tier = "active-support"

        [[entry]]
        versions = "1.1.x"
        tier = "security-fixes-only"
        end_of_life = "2025-12-31"

        [[entry]]
        versions = "1.0.x"
        tier = "critical-fixes-only"
        end_of_life = "2025-06-30"

        [[entry]]
        versions = "<1.0"
        tier = "no-support"
    "#;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    #[test]
    fn builtin_equivalent_file_resolves_identically() {
        let from_file = MatrixConfig::from_toml_str(BUILTIN_EQUIVALENT).expect("load");
        let builtin = Resolver::builtin();

        for version in ["0.9.0", "1.0.5", "1.1.0", "1.2.0"] {
            for day in [date(2025, 1, 1), date(2025, 7, 1), date(2026, 1, 1)] {
                assert_eq!(
                    from_file.resolve(version, day).expect("resolve"),
                    builtin.resolve(version, day).expect("resolve"),
                    "diverged on {version} at {day}"
                );
            }
        }
    }

    #[test]
    fn floor_defaults_to_eight_when_absent() {
        let resolver = MatrixConfig::from_toml_str(
            r#"
            [[entry]]
            versions = "1.0.x"
            tier = "critical-fixes-only"
            "#,
        )
        .expect("load");
        assert_eq!(resolver.critical_floor(), CvssScore::DEFAULT_CRITICAL_FLOOR);
    }

    #[test]
    fn malformed_toml_is_fatal() {
        assert!(matches!(
            MatrixConfig::from_toml_str("entry = not toml"),
            Err(SupportError::ConfigLoad(_))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = MatrixConfig::from_toml_str(
            r#"
            [[entry]]
            versions = "1.0.x"
            tier = "active-support"
            end_of_live = "2025-01-01"
            "#,
        );
        assert!(matches!(result, Err(SupportError::ConfigLoad(_))));
    }

    #[test]
    fn bad_tier_name_is_fatal() {
        let result = MatrixConfig::from_toml_str(
            r#"
            [[entry]]
            versions = "1.0.x"
            tier = "platinum"
            "#,
        );
        assert!(matches!(result, Err(SupportError::ConfigLoad(_))));
    }

    #[test]
    fn bad_pattern_is_fatal() {
        let result = MatrixConfig::from_toml_str(
            r#"
            [[entry]]
            versions = "1.0.0"
            tier = "active-support"
            "#,
        );
        assert!(matches!(result, Err(SupportError::InvalidPattern(_))));
    }

    #[test]
    fn bad_date_is_fatal() {
        let result = MatrixConfig::from_toml_str(
            r#"
            [[entry]]
            versions = "1.0.x"
            tier = "active-support"
            end_of_life = "soon"
            "#,
        );
        assert!(matches!(result, Err(SupportError::InvalidDate(_))));
    }

    #[test]
    fn overlapping_rows_are_fatal() {
        let result = MatrixConfig::from_toml_str(
            r#"
            [[entry]]
            versions = "1.0.x"
            tier = "active-support"

            [[entry]]
            versions = "1.0.x"
            tier = "no-support"
            "#,
        );
        assert!(matches!(result, Err(SupportError::OverlappingPatterns(_, _))));
    }

    #[test]
    fn empty_document_is_fatal() {
        assert!(matches!(
            MatrixConfig::from_toml_str(""),
            Err(SupportError::ConfigLoad(_))
        ));
    }

    #[test]
    fn custom_floor_is_loaded() {
        let resolver = MatrixConfig::from_toml_str(
            r#"
            critical_cvss_floor = "9.5"

            [[entry]]
            versions = "2.0.x"
            tier = "critical-fixes-only"
            "#,
        )
        .expect("load");
        assert_eq!(resolver.critical_floor().tenths(), 95);

        let result = resolver
            .resolve("2.0.1", date(2025, 1, 1))
            .expect("resolve");
        assert_eq!(result.tier, SupportTier::CriticalFixesOnly);
        assert!(!result.patch_policy.services("9.0".parse().expect("score")));
    }

    #[test]
    fn load_from_disk() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(BUILTIN_EQUIVALENT.as_bytes()).expect("write");

        let resolver = MatrixConfig::from_path(file.path()).expect("load");
        assert_eq!(resolver.matrix().len(), 4);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = MatrixConfig::from_path(Path::new("/nonexistent/matrix.toml"));
        assert!(matches!(result, Err(SupportError::Io(_))));
    }
}
