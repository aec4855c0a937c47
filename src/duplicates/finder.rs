//! Duplicate finder: walk, hash and group.
//!
//! # Overview
//!
//! [`DuplicateFinder`] drives the scan phase of the pipeline:
//! 1. The [`Walker`] enumerates candidate files in discovery order
//! 2. The [`Hasher`] fingerprints each candidate
//! 3. Successful hashes go into a [`FingerprintIndex`]; failures are
//!    recorded as skips and the scan continues
//! 4. The index is consumed into [`DuplicateGroup`]s
//!
//! Enumeration failures are fatal: the scan stops and no groups are
//! returned.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//! println!(
//!     "{} files, {} duplicate groups, {} skipped",
//!     summary.files_found,
//!     groups.len(),
//!     summary.skipped.len()
//! );
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::progress::ProgressCallback;
use crate::scanner::{HashError, Hasher, ScanError, Walker, WalkerConfig, DEFAULT_BUFFER_SIZE};

use super::{DuplicateGroup, FileRecord, FingerprintIndex};

/// Phase name reported to progress callbacks.
pub const SCAN_PHASE: &str = "scanning";

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Directory walker configuration.
    pub walker_config: WalkerConfig,
    /// Read buffer size for the hasher.
    pub buffer_size: usize,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("walker_config", &self.walker_config)
            .field("buffer_size", &self.buffer_size)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            walker_config: WalkerConfig::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the hasher read buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Summary of a completed scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Candidate files yielded by the walker
    pub files_found: usize,
    /// Files hashed successfully
    pub files_hashed: usize,
    /// Total bytes hashed
    pub bytes_hashed: u64,
    /// Files excluded because hashing failed, in discovery order
    pub skipped: Vec<HashError>,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Number of files that would be removed (all copies minus one per group)
    pub duplicate_files: usize,
    /// Bytes reclaimable by removing the duplicates
    pub reclaimable_bytes: u64,
}

impl ScanSummary {
    /// Whether any file had to be skipped.
    #[must_use]
    pub fn has_skips(&self) -> bool {
        !self.skipped.is_empty()
    }

    fn record_groups(&mut self, groups: &[DuplicateGroup]) {
        self.duplicate_groups = groups.len();
        self.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        self.reclaimable_bytes = groups.iter().map(DuplicateGroup::wasted_space).sum();
    }
}

/// Errors that end a scan without a result.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// The directory tree could not be enumerated.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Shutdown was requested while scanning.
    #[error("Scan interrupted")]
    Interrupted,
}

/// Walks a directory, hashes every candidate and groups identical content.
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::with_buffer_size(config.buffer_size);
        Self { config, hasher }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Scan `root` and return its duplicate groups.
    ///
    /// # Errors
    ///
    /// - `FinderError::Scan` if the root is missing, not a directory, or the
    ///   tree cannot be enumerated
    /// - `FinderError::Interrupted` if the shutdown flag was set
    pub fn find_duplicates(
        &self,
        root: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let mut walker = Walker::new(root, self.config.walker_config.clone());
        if let Some(flag) = &self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(Arc::clone(flag));
        }

        log::debug!("Scanning {}", root.display());
        let entries = walker.walk()?;
        self.group_paths(entries)
    }

    /// Hash and group an already-enumerated sequence of candidates.
    ///
    /// Consumes the sequence in order; the first `Err` ends the scan.
    ///
    /// # Errors
    ///
    /// Same as [`DuplicateFinder::find_duplicates`].
    pub fn group_paths<I>(&self, entries: I) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError>
    where
        I: IntoIterator<Item = Result<PathBuf, ScanError>>,
    {
        let callback = self.config.progress_callback.as_deref();
        let mut index = FingerprintIndex::new();
        let mut summary = ScanSummary::default();

        if let Some(cb) = callback {
            cb.on_phase_start(SCAN_PHASE, 0);
        }

        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    log::error!("Scan aborted: {}", e);
                    if let Some(cb) = callback {
                        cb.on_phase_end(SCAN_PHASE);
                    }
                    return Err(FinderError::Scan(e));
                }
            };

            summary.files_found += 1;
            if let Some(cb) = callback {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default();
                cb.on_progress(summary.files_found, &name);
            }

            let record = match self.hasher.hash(&path) {
                Ok(outcome) => {
                    summary.files_hashed += 1;
                    summary.bytes_hashed += outcome.bytes;
                    if let Some(cb) = callback {
                        cb.on_item_completed(outcome.bytes);
                    }
                    FileRecord::hashed(path, outcome.fingerprint, outcome.bytes)
                }
                Err(e) => {
                    log::warn!("Skipping {}", e);
                    summary.skipped.push(e);
                    FileRecord::skipped(path)
                }
            };
            index.insert(record);
        }

        if let Some(cb) = callback {
            cb.on_phase_end(SCAN_PHASE);
        }

        if self.config.is_shutdown_requested() {
            log::info!("Scan interrupted after {} files", summary.files_found);
            return Err(FinderError::Interrupted);
        }

        let groups = index.into_duplicate_groups();
        summary.record_groups(&groups);

        log::debug!(
            "Scan complete: {} files, {} hashed, {} skipped, {} duplicate groups",
            summary.files_found,
            summary.files_hashed,
            summary.skipped.len(),
            summary.duplicate_groups
        );

        Ok((groups, summary))
    }
}
