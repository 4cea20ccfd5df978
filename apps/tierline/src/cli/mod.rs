//! # Tierline CLI Module
//!
//! This module implements the CLI interface for Tierline.
//!
//! ## Available Commands
//!
//! - `check` - Resolve a version's support tier as of a date
//! - `matrix` - Show the loaded support table
//! - `timeline` - Show the tier schedule for a version line
//! - `validate` - Validate a matrix configuration file

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tierline_core::SupportError;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Tierline - Version Support Checker
///
/// Resolves a module version and a date to the support tier in force,
/// from a static, validated support matrix.
#[derive(Parser, Debug)]
#[command(name = "tierline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a support-matrix TOML file (defaults to the built-in table)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the support tier for a version
    Check {
        /// Concrete version to check (major.minor.patch)
        version: String,

        /// Evaluation date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Show the loaded support table in match order
    Matrix,

    /// Show the tier schedule for a version's line
    Timeline {
        /// Concrete version whose line to inspect
        version: String,
    },

    /// Validate a support-matrix configuration file
    Validate {
        /// Path to the TOML file to validate
        #[arg(short, long)]
        file: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments, returning the process exit code.
pub fn execute(cli: Cli) -> Result<i32, SupportError> {
    let json = cli.json;
    let config = cli.config.as_deref();

    match cli.command {
        Some(Commands::Check { version, as_of }) => {
            cmd_check(config, json, &version, as_of.as_deref())
        }
        Some(Commands::Matrix) => cmd_matrix(config, json),
        Some(Commands::Timeline { version }) => cmd_timeline(config, json, &version),
        Some(Commands::Validate { file }) => cmd_validate(&file, json),
        None => {
            // No subcommand - show the table by default
            cmd_matrix(config, json)
        }
    }
}
