//! Plan execution: permanent removal of duplicate copies.
//!
//! # Overview
//!
//! [`execute`] walks a [`DeletionPlan`] and removes every delete path with
//! [`permanent_delete`]. A failure on one file is recorded in the
//! [`ExecutionReport`] and the batch carries on with the next file; nothing
//! is retried or rolled back.
//!
//! # Safety
//!
//! Removal is irreversible. Callers must only execute a plan after the
//! operator has confirmed it. The kept copy of each group is never part of
//! the plan's delete list.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::actions::{execute, DeletionPlan};
//! use dupsweep::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let (groups, _) = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("/tmp/photos"))
//!     .unwrap();
//! let plan = DeletionPlan::from_groups(groups);
//! let report = execute(&plan, None);
//! println!("{}", report.summary());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use thiserror::Error;

use super::plan::DeletionPlan;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }

    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// A delete that did not happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    /// Path that could not be removed.
    pub path: PathBuf,
    /// Human-readable reason.
    pub reason: String,
}

/// Outcome of executing a deletion plan.
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    /// Successfully deleted files, in plan order.
    pub deleted: Vec<PathBuf>,
    /// Failed deletions with their reasons, in plan order.
    pub failures: Vec<DeleteFailure>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl ExecutionReport {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.deleted.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        let freed = ByteSize::b(self.bytes_freed);
        if self.all_succeeded() {
            format!("Deleted {} file(s), freed {}", self.success_count(), freed)
        } else {
            format!(
                "Deleted {} file(s), {} failed, freed {}",
                self.success_count(),
                self.failure_count(),
                freed
            )
        }
    }
}

/// Callback trait for deletion progress reporting.
pub trait DeleteProgressCallback {
    /// Called before each file deletion.
    fn on_before_delete(&self, path: &Path, index: usize, total: usize);

    /// Called after successful deletion.
    fn on_delete_success(&self, path: &Path, size: u64);

    /// Called after failed deletion.
    fn on_delete_failure(&self, path: &Path, error: &str);

    /// Called when the whole plan has been processed.
    fn on_complete(&self, report: &ExecutionReport);
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file no longer exists
/// - `PermissionDenied` if deletion is not allowed
/// - `Io` for any other failure
pub fn permanent_delete(path: &Path) -> Result<(), DeleteError> {
    fs::remove_file(path).map_err(|e| DeleteError::from_io(path, e))?;
    log::debug!("Permanently deleted: {}", path.display());
    Ok(())
}

/// Execute a deletion plan.
///
/// Every delete path is attempted, in plan order, regardless of earlier
/// failures.
pub fn execute(plan: &DeletionPlan, callback: Option<&dyn DeleteProgressCallback>) -> ExecutionReport {
    let mut report = ExecutionReport::default();
    let total = plan.delete_count();
    let mut index = 0;

    for group in plan.groups() {
        for path in &group.delete {
            if let Some(cb) = callback {
                cb.on_before_delete(path, index, total);
            }
            index += 1;

            match permanent_delete(path) {
                Ok(()) => {
                    report.bytes_freed += group.size;
                    if let Some(cb) = callback {
                        cb.on_delete_success(path, group.size);
                    }
                    report.deleted.push(path.clone());
                }
                Err(e) => {
                    let reason = e.to_string();
                    log::warn!("Failed to delete {}: {}", path.display(), reason);
                    if let Some(cb) = callback {
                        cb.on_delete_failure(path, &reason);
                    }
                    report.failures.push(DeleteFailure {
                        path: path.clone(),
                        reason,
                    });
                }
            }
        }
    }

    if let Some(cb) = callback {
        cb.on_complete(&report);
    }

    log::debug!("{}", report.summary());

    report
}
