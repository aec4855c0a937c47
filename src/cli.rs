//! Command-line interface definitions for dupsweep.
//!
//! The tool takes exactly one positional argument, the directory to clean.
//! Missing or extra arguments make clap print usage and exit with code 2
//! before anything is scanned.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory, list duplicates, ask before deleting
//! dupsweep ~/Downloads
//!
//! # Include dotfiles in the scan
//! dupsweep --include-hidden ~/Downloads
//!
//! # Verbose mode for debugging
//! dupsweep -v ~/Downloads
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Find byte-identical files and delete all but one copy.
///
/// dupsweep hashes every file under PATH with SHA-256, lists each group of
/// identical files, keeps the first one found and, after you confirm with
/// "y", permanently deletes the others.
#[derive(Debug, Parser)]
#[command(name = "dupsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan for duplicate files
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress and informational logs
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Do not show the scan progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Plain progress output without animation (for screen readers)
    #[arg(long)]
    pub accessible: bool,

    /// Include hidden files (dotfiles) in the scan
    #[arg(long)]
    pub include_hidden: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}
