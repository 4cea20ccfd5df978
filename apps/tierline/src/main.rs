//! # Tierline - Version Support Checker
//!
//! The main binary for the Tierline support-matrix resolver.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │              apps/tierline (THE BINARY)           │
//! │                                                   │
//! │  ┌─────────────┐        ┌────────────────────┐   │
//! │  │   CLI       │        │  Matrix loader     │   │
//! │  │  (clap)     │        │  (TOML config)     │   │
//! │  └──────┬──────┘        └─────────┬──────────┘   │
//! │         │                         │              │
//! │         └────────────┬────────────┘              │
//! │                      ▼                           │
//! │             ┌─────────────────┐                  │
//! │             │  tierline-core  │                  │
//! │             │  (THE LOGIC)    │                  │
//! │             └─────────────────┘                  │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Resolve a version against the built-in matrix
//! tierline check 1.1.0 --as-of 2025-06-01
//!
//! # Use a custom matrix file
//! tierline --config matrix.toml check 1.1.0
//!
//! # Show the loaded table
//! tierline matrix
//! ```
//!
//! ## Exit codes
//!
//! - 0: active support or security fixes only
//! - 1: critical fixes only
//! - 2: no support
//! - 3: invalid input or configuration failure

mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status for invalid input, unknown versions, and config failures.
const EXIT_INVALID_INPUT: i32 = 3;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — TIERLINE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("TIERLINE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tierline=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Display startup banner
    if !args.quiet {
        print_banner();
    }

    // Execute command; the resolved tier carries the exit status.
    match cli::execute(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(EXIT_INVALID_INPUT);
        }
    }
}

/// Print the Tierline startup banner.
fn print_banner() {
    println!(
        r#"
  ████████╗██╗███████╗██████╗ ██╗     ██╗███╗   ██╗███████╗
  ╚══██╔══╝██║██╔════╝██╔══██╗██║     ██║████╗  ██║██╔════╝
     ██║   ██║█████╗  ██████╔╝██║     ██║██╔██╗ ██║█████╗
     ██║   ██║██╔══╝  ██╔══██╗██║     ██║██║╚██╗██║██╔══╝
     ██║   ██║███████╗██║  ██║███████╗██║██║ ╚████║███████╗
     ╚═╝   ╚═╝╚══════╝╚═╝  ╚═╝╚══════╝╚═╝╚═╝  ╚═══╝╚══════╝

  Version Support Checker v{}

  Deterministic • Table-Driven • Date-Aware
"#,
        env!("CARGO_PKG_VERSION")
    );
}
