//! goup - Go binary upgrade checker library
//!
//! This library provides the core functionality for finding installed Go
//! binaries that have newer versions available:
//! - Build info extraction from Go executables
//! - Version listing from a Go module proxy, rate limited
//! - Semantic version filtering and selection
//! - `go install` command derivation
//! - Plain, command and JSON output

pub mod buildinfo;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod install;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod version;
