//! # Tierline Application Library
//!
//! Exposes the CLI layer for integration tests. The binary in `main.rs` is
//! a thin wrapper over [`cli::execute`].

pub mod cli;
