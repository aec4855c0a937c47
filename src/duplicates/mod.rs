//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Recording hashed files in a [`FingerprintIndex`]
//! - Extracting [`DuplicateGroup`]s (fingerprints shared by 2+ files)
//! - Driving the walk → hash → group scan via [`DuplicateFinder`]

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary, SCAN_PHASE};
pub use groups::{DuplicateGroup, FileRecord, FingerprintIndex};
