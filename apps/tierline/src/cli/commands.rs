//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use chrono::{NaiveDate, Utc};
use std::path::Path;
use tierline_core::{MatrixConfig, Resolver, SupportError, parse_date};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size for a matrix configuration file (1 MB).
///
/// A support table is a handful of rows; anything larger is a mistake, and
/// refusing it up front prevents reading arbitrarily large files.
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), SupportError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| SupportError::Io(format!("cannot read metadata for '{}': {e}", path.display())))?;

    if metadata.len() > max_size {
        return Err(SupportError::ConfigLoad(format!(
            "config file '{}' is {} bytes, exceeding the {} byte limit",
            path.display(),
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Load the resolver: a matrix file when `--config` is given, the built-in
/// table otherwise.
fn load_resolver(config: Option<&Path>) -> Result<Resolver, SupportError> {
    match config {
        Some(path) => {
            validate_file_size(path, MAX_CONFIG_FILE_SIZE)?;
            let resolver = MatrixConfig::from_path(path)?;
            tracing::debug!(
                path = %path.display(),
                rows = resolver.matrix().len(),
                "loaded support matrix"
            );
            Ok(resolver)
        }
        None => Ok(Resolver::builtin()),
    }
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Resolve the support tier for a version as of a date.
pub fn cmd_check(
    config: Option<&Path>,
    json: bool,
    version: &str,
    as_of: Option<&str>,
) -> Result<i32, SupportError> {
    let resolver = load_resolver(config)?;

    let day = match as_of {
        Some(text) => parse_date(text)?,
        None => Utc::now().date_naive(),
    };

    let result = resolver.resolve(version, day)?;

    if json {
        let output = serde_json::json!({
            "version": result.version,
            "as_of": day.to_string(),
            "tier": result.tier,
            "tier_name": result.tier.name(),
            "patch_policy": result.patch_policy,
            "end_of_life": result.end_of_life.map(|d| d.to_string()),
            "exit_code": result.exit_code(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(result.exit_code());
    }

    println!("Support Verdict");
    println!("===============");
    println!("Version:      {}", result.version);
    println!("As of:        {}", day);
    println!();
    println!("Tier:         {}", result.tier);
    println!("Serviced:     {}", result.patch_policy);
    println!(
        "End of life:  {}",
        end_of_life_text(result.end_of_life)
    );

    Ok(result.exit_code())
}

// =============================================================================
// MATRIX COMMAND
// =============================================================================

/// Show the loaded support table in match order.
pub fn cmd_matrix(config: Option<&Path>, json: bool) -> Result<i32, SupportError> {
    let resolver = load_resolver(config)?;
    let matrix = resolver.matrix();

    if json {
        let rows: Vec<serde_json::Value> = matrix
            .entries()
            .map(|e| {
                serde_json::json!({
                    "versions": e.pattern.to_string(),
                    "tier": e.tier,
                    "tier_name": e.tier.name(),
                    "end_of_life": e.end_of_life.map(|d| d.to_string()),
                })
            })
            .collect();
        let output = serde_json::json!({
            "critical_cvss_floor": resolver.critical_floor().to_string(),
            "entries": rows,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(0);
    }

    println!("Support Matrix");
    println!("==============");
    println!("Critical CVSS floor: {}", resolver.critical_floor());
    println!();
    println!("{:<10} {:<22} {}", "Versions", "Tier", "End of life");
    println!("{:<10} {:<22} {}", "--------", "----", "-----------");
    for entry in matrix.entries() {
        println!(
            "{:<10} {:<22} {}",
            entry.pattern.to_string(),
            entry.tier.name(),
            end_of_life_text(entry.end_of_life)
        );
    }

    Ok(0)
}

// =============================================================================
// TIMELINE COMMAND
// =============================================================================

/// Show the tier schedule for a version's line.
pub fn cmd_timeline(config: Option<&Path>, json: bool, version: &str) -> Result<i32, SupportError> {
    let resolver = load_resolver(config)?;
    let windows = resolver.timeline(version)?;

    if json {
        let rows: Vec<serde_json::Value> = windows
            .iter()
            .map(|w| {
                serde_json::json!({
                    "tier": w.tier,
                    "tier_name": w.tier.name(),
                    "until": w.until.map(|d| d.to_string()),
                })
            })
            .collect();
        let output = serde_json::json!({
            "version": version,
            "windows": rows,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(0);
    }

    println!("Tier Schedule for {}", version);
    println!("==================");
    for window in &windows {
        match window.until {
            Some(until) => println!("{:<22} until {}", window.tier.name(), until),
            None => println!("{:<22} open-ended", window.tier.name()),
        }
    }

    Ok(0)
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Validate a support-matrix configuration file.
pub fn cmd_validate(file: &Path, json: bool) -> Result<i32, SupportError> {
    validate_file_size(file, MAX_CONFIG_FILE_SIZE)?;
    let resolver = MatrixConfig::from_path(file)?;

    if json {
        let output = serde_json::json!({
            "file": file.display().to_string(),
            "valid": true,
            "rows": resolver.matrix().len(),
            "critical_cvss_floor": resolver.critical_floor().to_string(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(0);
    }

    println!(
        "ok: '{}' is a valid support matrix ({} rows, critical floor {})",
        file.display(),
        resolver.matrix().len(),
        resolver.critical_floor()
    );

    Ok(0)
}

/// Render an optional end-of-life date the way the policy table does.
fn end_of_life_text(end_of_life: Option<NaiveDate>) -> String {
    match end_of_life {
        Some(date) => date.to_string(),
        None => "TBD".to_string(),
    }
}
