//! Deletion planning.
//!
//! Turns duplicate groups into a [`DeletionPlan`]: in each group the
//! first-discovered path is kept and every other path is marked for
//! deletion, preserving discovery order. Planning is pure; nothing on disk
//! is touched until the plan is executed.

use std::path::{Path, PathBuf};

use crate::duplicates::DuplicateGroup;
use crate::scanner::Fingerprint;

/// One duplicate group with its keep/delete decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedGroup {
    /// Fingerprint shared by every member
    pub fingerprint: Fingerprint,
    /// Size of each member in bytes
    pub size: u64,
    /// The surviving copy (first discovered)
    pub keep: PathBuf,
    /// Copies to remove, in discovery order
    pub delete: Vec<PathBuf>,
}

impl PlannedGroup {
    /// Plan a single group. Returns `None` for groups with fewer than two paths.
    #[must_use]
    pub fn from_group(group: DuplicateGroup) -> Option<Self> {
        if group.len() < 2 {
            return None;
        }

        let mut paths = group.paths.into_iter();
        let keep = paths.next()?;
        let delete: Vec<PathBuf> = paths.filter(|p| *p != keep).collect();

        Some(Self {
            fingerprint: group.fingerprint,
            size: group.size,
            keep,
            delete,
        })
    }

    /// All members, keep first, in discovery order.
    pub fn members(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.keep.as_path()).chain(self.delete.iter().map(PathBuf::as_path))
    }

    /// Number of members (keep + deletes).
    #[must_use]
    pub fn len(&self) -> usize {
        self.delete.len() + 1
    }

    /// A planned group always has a keep path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Bytes freed if every delete succeeds.
    #[must_use]
    pub fn reclaimable_bytes(&self) -> u64 {
        self.size * self.delete.len() as u64
    }
}

/// Ordered keep/delete decisions for every duplicate group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionPlan {
    groups: Vec<PlannedGroup>,
}

impl DeletionPlan {
    /// Build a plan from duplicate groups, keeping their order.
    ///
    /// Never fails: groups with fewer than two paths contribute nothing.
    #[must_use]
    pub fn from_groups(groups: Vec<DuplicateGroup>) -> Self {
        let groups: Vec<PlannedGroup> = groups
            .into_iter()
            .filter_map(PlannedGroup::from_group)
            .collect();
        log::debug!(
            "Planned {} group(s), {} file(s) to delete",
            groups.len(),
            groups.iter().map(|g| g.delete.len()).sum::<usize>()
        );
        Self { groups }
    }

    /// Planned groups, in order.
    #[must_use]
    pub fn groups(&self) -> &[PlannedGroup] {
        &self.groups
    }

    /// Whether there is nothing to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of planned groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of files marked for deletion across all groups.
    #[must_use]
    pub fn delete_count(&self) -> usize {
        self.groups.iter().map(|g| g.delete.len()).sum()
    }

    /// Total bytes freed if every delete succeeds.
    #[must_use]
    pub fn reclaimable_bytes(&self) -> u64 {
        self.groups.iter().map(PlannedGroup::reclaimable_bytes).sum()
    }

    /// Every delete path, group by group, in plan order.
    pub fn delete_paths(&self) -> impl Iterator<Item = &Path> {
        self.groups
            .iter()
            .flat_map(|g| g.delete.iter().map(PathBuf::as_path))
    }
}
