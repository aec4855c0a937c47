use dupsweep::actions::{execute, DeleteError, DeletionPlan};
use dupsweep::duplicates::{DuplicateFinder, DuplicateGroup};
use dupsweep::scanner::{hash_bytes, HashError, ScanError};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_hash_failures_are_skipped_not_fatal() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "dup").unwrap();
    fs::write(dir.path().join("b.txt"), "dup").unwrap();

    // Files that vanish between enumeration and hashing
    let entries: Vec<Result<PathBuf, ScanError>> = vec![
        Ok(dir.path().join("a.txt")),
        Ok(dir.path().join("gone_1.txt")),
        Ok(dir.path().join("b.txt")),
        Ok(dir.path().join("gone_2.txt")),
    ];

    let (groups, summary) = DuplicateFinder::with_defaults()
        .group_paths(entries)
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(summary.files_found, 4);
    assert_eq!(summary.files_hashed, 2);
    assert_eq!(summary.skipped.len(), 2);
    for err in &summary.skipped {
        match err {
            HashError::NotFound(_) => {}
            other => panic!("Expected NotFound HashError, got: {:?}", other),
        }
    }
    assert!(summary.skipped[0].path().ends_with("gone_1.txt"));
    assert!(summary.skipped[1].path().ends_with("gone_2.txt"));
}

#[test]
fn test_enumeration_error_stops_scan() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "dup").unwrap();

    let entries: Vec<Result<PathBuf, ScanError>> = vec![
        Ok(dir.path().join("a.txt")),
        Err(ScanError::PermissionDenied(dir.path().join("locked"))),
        Ok(dir.path().join("a.txt")),
    ];

    let result = DuplicateFinder::with_defaults().group_paths(entries);

    assert!(result.is_err());
}

#[test]
fn test_deletion_failure_does_not_stop_later_deletions() {
    let dir = tempdir().unwrap();
    let keep = dir.path().join("keep.txt");
    let first = dir.path().join("first.txt");
    let missing = dir.path().join("already_gone.txt");
    let last = dir.path().join("last.txt");
    for path in [&keep, &first, &last] {
        fs::write(path, "dup").unwrap();
    }

    let plan = DeletionPlan::from_groups(vec![DuplicateGroup::new(
        hash_bytes(b"dup"),
        3,
        vec![keep.clone(), first.clone(), missing.clone(), last.clone()],
    )]);

    let report = execute(&plan, None);

    assert_eq!(report.deleted, vec![first.clone(), last.clone()]);
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.failures[0].path, missing);
    assert_eq!(report.bytes_freed, 6);
    assert!(keep.exists());
    assert!(!first.exists());
    assert!(!last.exists());
}

#[test]
fn test_delete_error_names_path() {
    let err = DeleteError::NotFound(PathBuf::from("/x/y"));
    assert_eq!(err.path(), PathBuf::from("/x/y").as_path());
}
