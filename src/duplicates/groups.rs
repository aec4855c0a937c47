//! Fingerprint index and duplicate groups.
//!
//! # Overview
//!
//! Every successfully hashed file is recorded in a [`FingerprintIndex`],
//! which maps a content fingerprint to the paths that share it. Both levels
//! keep insertion order: paths within a fingerprint in discovery order, and
//! fingerprints in the order they were first seen. Extracting the groups of
//! two or more paths gives the [`DuplicateGroup`]s.
//!
//! # Example
//!
//! ```
//! use dupsweep::duplicates::{FileRecord, FingerprintIndex};
//! use dupsweep::scanner::hash_bytes;
//! use std::path::PathBuf;
//!
//! let mut index = FingerprintIndex::new();
//! index.insert(FileRecord::hashed(PathBuf::from("/a/x.txt"), hash_bytes(b"hello"), 5));
//! index.insert(FileRecord::hashed(PathBuf::from("/a/y.txt"), hash_bytes(b"hello"), 5));
//! index.insert(FileRecord::hashed(PathBuf::from("/b/z.txt"), hash_bytes(b"world"), 5));
//!
//! let groups = index.into_duplicate_groups();
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].paths[0], PathBuf::from("/a/x.txt"));
//! ```

use std::path::PathBuf;

use indexmap::IndexMap;

use crate::scanner::Fingerprint;

/// A file seen during traversal.
///
/// `fingerprint` is `None` when hashing the file failed and it was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path as discovered by the walker
    pub path: PathBuf,
    /// Content fingerprint, absent for skipped files
    pub fingerprint: Option<Fingerprint>,
    /// Bytes hashed (0 for skipped files)
    pub size: u64,
}

impl FileRecord {
    /// Record for a file that was hashed successfully.
    #[must_use]
    pub fn hashed(path: PathBuf, fingerprint: Fingerprint, size: u64) -> Self {
        Self {
            path,
            fingerprint: Some(fingerprint),
            size,
        }
    }

    /// Record for a file whose hashing failed.
    #[must_use]
    pub fn skipped(path: PathBuf) -> Self {
        Self {
            path,
            fingerprint: None,
            size: 0,
        }
    }
}

/// Paths sharing one fingerprint.
#[derive(Debug, Clone, Default)]
struct Bucket {
    size: u64,
    paths: Vec<PathBuf>,
}

/// Fingerprint → paths mapping, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FingerprintIndex {
    buckets: IndexMap<Fingerprint, Bucket>,
}

impl FingerprintIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record to the index.
    ///
    /// Skipped records (no fingerprint) are ignored and `false` is returned.
    pub fn insert(&mut self, record: FileRecord) -> bool {
        let Some(fingerprint) = record.fingerprint else {
            return false;
        };

        let bucket = self.buckets.entry(fingerprint).or_default();
        bucket.size = record.size;
        bucket.paths.push(record.path);
        true
    }

    /// Consume the index and return the fingerprints shared by 2+ files.
    ///
    /// Groups come out in the order their fingerprint was first seen.
    #[must_use]
    pub fn into_duplicate_groups(self) -> Vec<DuplicateGroup> {
        self.buckets
            .into_iter()
            .filter(|(_, bucket)| bucket.paths.len() > 1)
            .map(|(fingerprint, bucket)| DuplicateGroup::new(fingerprint, bucket.size, bucket.paths))
            .collect()
    }
}

/// Confirmed duplicate group of files.
///
/// All members share a fingerprint and are treated as byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// SHA-256 fingerprint shared by every member
    pub fingerprint: Fingerprint,
    /// Size of each member in bytes
    pub size: u64,
    /// Member paths, in discovery order
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(fingerprint: Fingerprint, size: u64, paths: Vec<PathBuf>) -> Self {
        Self {
            fingerprint,
            size,
            paths,
        }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of redundant copies (every member but one).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Total wasted space (all copies minus one).
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }
}
