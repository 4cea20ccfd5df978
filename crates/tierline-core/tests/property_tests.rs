//! # Property-Based Tests
//!
//! Verification of the resolver's determinism and monotonicity invariants
//! with proptest, against the built-in support matrix.

use chrono::NaiveDate;
use proptest::prelude::*;
use tierline_core::{Resolver, SupportMatrix, SupportTier, parse_version};

// =============================================================================
// STRATEGIES
// =============================================================================

/// Any calendar date the policy could plausibly be evaluated at.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2040, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d).expect("generated date is valid")
    })
}

/// A version string the built-in matrix covers.
fn covered_version() -> impl Strategy<Value = String> {
    prop_oneof![
        // Pre-1.0 catch-all territory
        (0u64..1, 0u64..20, 0u64..50).prop_map(|(ma, mi, p)| format!("{ma}.{mi}.{p}")),
        // The three published 1.x lines
        (0u64..3, 0u64..50).prop_map(|(mi, p)| format!("1.{mi}.{p}")),
    ]
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Same inputs produce identical outputs, any number of times.
    #[test]
    fn resolution_is_deterministic(version in covered_version(), day in any_date()) {
        let resolver = Resolver::builtin();
        let first = resolver.resolve(&version, day).expect("covered version resolves");
        let second = resolver.resolve(&version, day).expect("covered version resolves");
        prop_assert_eq!(first, second);
    }

    /// Two independently constructed resolvers agree on every verdict.
    #[test]
    fn independent_resolvers_agree(version in covered_version(), day in any_date()) {
        let a = Resolver::builtin();
        let b = Resolver::builtin();
        prop_assert_eq!(
            a.resolve(&version, day).expect("resolve"),
            b.resolve(&version, day).expect("resolve")
        );
    }

    /// For a fixed version, a later evaluation date never raises the tier.
    #[test]
    fn tier_never_upgrades_over_time(
        version in covered_version(),
        first_day in any_date(),
        second_day in any_date()
    ) {
        let (earlier, later) = if first_day <= second_day {
            (first_day, second_day)
        } else {
            (second_day, first_day)
        };

        let resolver = Resolver::builtin();
        let at_earlier = resolver.resolve(&version, earlier).expect("resolve");
        let at_later = resolver.resolve(&version, later).expect("resolve");

        prop_assert!(
            at_later.tier <= at_earlier.tier,
            "{} upgraded from {} at {} to {} at {}",
            version, at_earlier.tier, earlier, at_later.tier, later
        );
    }

    /// Exactly one table row matches any covered version.
    #[test]
    fn exactly_one_row_matches(version in covered_version()) {
        let matrix = SupportMatrix::builtin();
        let parsed = parse_version(&version).expect("version");
        let winners = matrix.entries().filter(|e| e.pattern.matches(&parsed)).count();
        prop_assert_eq!(winners, 1);
    }

    /// The patch policy always corresponds to the effective tier: a
    /// no-support verdict services nothing, supported tiers service CVSS 10.
    #[test]
    fn policy_is_consistent_with_tier(version in covered_version(), day in any_date()) {
        let resolver = Resolver::builtin();
        let result = resolver.resolve(&version, day).expect("resolve");

        let worst_case = "10.0".parse().expect("score");
        match result.tier {
            SupportTier::NoSupport => prop_assert!(!result.patch_policy.services(worst_case)),
            _ => prop_assert!(result.patch_policy.services(worst_case)),
        }
    }

    /// The exit code is a function of the tier alone.
    #[test]
    fn exit_code_tracks_tier(version in covered_version(), day in any_date()) {
        let resolver = Resolver::builtin();
        let result = resolver.resolve(&version, day).expect("resolve");
        let expected = match result.tier {
            SupportTier::ActiveSupport | SupportTier::SecurityFixesOnly => 0,
            SupportTier::CriticalFixesOnly => 1,
            SupportTier::NoSupport => 2,
        };
        prop_assert_eq!(result.exit_code(), expected);
    }

    /// The timeline's windows never step upward.
    #[test]
    fn timeline_is_monotonic(version in covered_version()) {
        let resolver = Resolver::builtin();
        let windows = resolver.timeline(&version).expect("timeline");
        prop_assert!(!windows.is_empty());
        for pair in windows.windows(2) {
            prop_assert!(pair[1].tier <= pair[0].tier);
        }
        // The last window is always open-ended.
        prop_assert_eq!(windows.last().expect("window").until, None);
    }
}
