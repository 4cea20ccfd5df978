//! # tierline-core
//!
//! The deterministic version-support engine for Tierline - THE LOGIC.
//!
//! This crate answers one question: given a module version and a calendar
//! date, which support tier applies and which fixes are serviced? The answer
//! comes from a small immutable table (the support matrix) loaded once at
//! process start, so resolution is a pure function with no side effects.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Holds the matrix immutable after validation; rows change only by
//!   shipping a new policy file
//! - Uses integer arithmetic only (CVSS scores are stored as tenths)
//! - Has NO async, NO network dependencies (pure Rust)
//! - Never guesses: a version the table does not cover is an error, not a
//!   default tier

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod matrix;
pub mod pattern;
pub mod resolver;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CvssScore, PatchPolicy, SupportError, SupportTier};

// =============================================================================
// RE-EXPORTS: Matrix & Resolution
// =============================================================================

pub use matrix::{SupportEntry, SupportMatrix};
pub use pattern::{VersionPattern, parse_version};
pub use resolver::{Resolver, SupportResult, TierWindow};

// =============================================================================
// RE-EXPORTS: Configuration
// =============================================================================

pub use config::{MatrixConfig, parse_date};
