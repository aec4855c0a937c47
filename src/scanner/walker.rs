//! Directory walker implementation using walkdir for sequential traversal.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for enumerating the candidate
//! files under a root directory. Traversal is single-threaded and children
//! are visited in file-name order, so the discovery order is deterministic
//! within a run. The first-discovered copy of a duplicate is the one kept,
//! which makes this ordering load-bearing.
//!
//! # Filtering
//!
//! Entries are silently excluded (never reported as skips) when they are:
//! - directories (they are descended into, not yielded)
//! - symbolic links (not followed)
//! - hidden (Unix: name starts with `.`; Windows: `FILE_ATTRIBUTE_HIDDEN`)
//! - system-level (Windows: `FILE_ATTRIBUTE_SYSTEM`; Unix: sockets, FIFOs,
//!   block and character devices)
//!
//! Hidden filtering looks at the file's own attributes only. Files inside a
//! hidden directory are still candidates.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! match walker.walk() {
//!     Ok(entries) => {
//!         for entry in entries {
//!             match entry {
//!                 Ok(path) => println!("{}", path.display()),
//!                 Err(e) => eprintln!("Enumeration failed: {}", e),
//!             }
//!         }
//!     }
//!     Err(e) => eprintln!("Cannot scan: {}", e),
//! };
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::{DirEntry, WalkDir};

use super::{ScanError, WalkerConfig};

#[cfg(windows)]
const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
#[cfg(windows)]
const FILE_ATTRIBUTE_SYSTEM: u32 = 0x4;

/// Directory walker for sequential file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// Once the flag is set, the iterator returned by [`Walker::walk`]
    /// ends at the next entry.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Walk the directory tree, yielding candidate file paths.
    ///
    /// The root is validated eagerly: if it is missing or not a directory,
    /// an error is returned before anything is enumerated. The returned
    /// iterator is lazy and single-pass; enumeration failures inside the
    /// tree are yielded as `Err` items and are meant to end the run.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the root does not exist
    /// - `NotADirectory` if the root is not a directory
    /// - `PermissionDenied` / `Io` if the root cannot be inspected
    pub fn walk(
        &self,
    ) -> Result<impl Iterator<Item = Result<PathBuf, ScanError>> + '_, ScanError> {
        let metadata = fs::metadata(&self.root).map_err(|e| {
            log::debug!("Cannot inspect scan root {}: {}", self.root.display(), e);
            ScanError::from_io(&self.root, e)
        })?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        let entries = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Ok(entries
            .take_while(move |_| {
                if self.is_shutdown_requested() {
                    log::debug!("Walker: Shutdown requested, stopping iteration");
                    false
                } else {
                    true
                }
            })
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.candidate(entry).map(Ok),
                Err(e) => Some(Err(self.handle_walkdir_error(e))),
            }))
    }

    /// Decide whether a directory entry is a candidate file.
    fn candidate(&self, entry: DirEntry) -> Option<PathBuf> {
        if entry.depth() == 0 {
            return None;
        }

        let file_type = entry.file_type();
        if file_type.is_dir() {
            return None;
        }
        if file_type.is_symlink() {
            log::trace!("Skipping symlink: {}", entry.path().display());
            return None;
        }
        if !file_type.is_file() {
            log::trace!("Skipping special file: {}", entry.path().display());
            return None;
        }
        if self.is_system(&entry) {
            log::trace!("Skipping system file: {}", entry.path().display());
            return None;
        }
        if self.config.skip_hidden && is_hidden(&entry) {
            log::trace!("Skipping hidden file: {}", entry.path().display());
            return None;
        }

        Some(entry.into_path())
    }

    #[cfg(windows)]
    fn is_system(&self, entry: &DirEntry) -> bool {
        windows_attributes(entry) & FILE_ATTRIBUTE_SYSTEM != 0
    }

    #[cfg(not(windows))]
    fn is_system(&self, _entry: &DirEntry) -> bool {
        // Special files never reach here; regular files carry no system bit.
        false
    }

    /// Convert a walkdir error into a fatal scan error.
    fn handle_walkdir_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::warn!("Walker error for {}: {}", path.display(), error);

        let message = error.to_string();
        match error.into_io_error() {
            Some(io) => ScanError::from_io(&path, io),
            None => ScanError::Io {
                path,
                source: std::io::Error::other(message),
            },
        }
    }
}

#[cfg(windows)]
fn windows_attributes(entry: &DirEntry) -> u32 {
    use std::os::windows::fs::MetadataExt;

    // An entry whose metadata vanished is passed on; the hasher reports it.
    entry.metadata().map(|m| m.file_attributes()).unwrap_or(0)
}

#[cfg(windows)]
fn is_hidden(entry: &DirEntry) -> bool {
    windows_attributes(entry) & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().as_encoded_bytes().first() == Some(&b'.')
}
