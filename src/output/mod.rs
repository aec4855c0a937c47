//! Output formatters for the operator.
//!
//! The only format is plain text written to the operator stream (stdout in
//! the binary). Log records and progress go to stderr.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::actions::DeletionPlan;
//! use dupsweep::duplicates::DuplicateFinder;
//! use dupsweep::output::TextOutput;
//! use std::path::Path;
//!
//! let (groups, summary) = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("."))
//!     .unwrap();
//! let mut output = TextOutput::new(std::io::stdout());
//! output.scan_summary(&summary).unwrap();
//! output.plan(&DeletionPlan::from_groups(groups)).unwrap();
//! ```

pub mod text;

pub use text::{confirmation_prompt, DeletionEcho, TextOutput};
