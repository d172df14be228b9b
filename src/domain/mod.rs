//! Core domain models for goup
//!
//! This module contains the fundamental types used throughout the application:
//! - Build metadata extracted from a Go binary
//! - Per-binary check results and their upgrade status
//! - Run summary counters

mod build_metadata;
mod check_result;
mod summary;

pub use build_metadata::BuildMetadata;
pub use check_result::{CheckResult, UpgradeStatus};
pub use summary::RunSummary;
