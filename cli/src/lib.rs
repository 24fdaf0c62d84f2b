//! Command-line shell around the `ica-detect` core library.
//!
//! This crate loads configuration, fetches the vendor download page, runs the
//! core locator and extractor, and renders the detected release. It backs the
//! `ica-detect` binary and can be driven programmatically for testing.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - TOML configuration and per-user file resolution
//! - [`error`] - Error types for the detection run
//! - [`fetch`] - Page retrieval over HTTP(S)
//! - [`output`] - Human, JSON, and shell renderings of a release
//! - [`pipeline`] - Page loading and release extraction

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod pipeline;
