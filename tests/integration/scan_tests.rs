use dupsweep::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use dupsweep::scanner::{hash_bytes, ScanError, WalkerConfig};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_identical_files_across_directories_share_one_group() {
    let dir = tempdir().unwrap();
    write(dir.path(), "one/deep/nested/a.txt", "same bytes");
    write(dir.path(), "two/b.txt", "same bytes");
    write(dir.path(), "c.txt", "same bytes");
    write(dir.path(), "unique.txt", "different bytes");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.files_found, 4);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 3);
    assert_eq!(groups[0].fingerprint, hash_bytes(b"same bytes"));
    assert!(!groups[0]
        .paths
        .iter()
        .any(|p| p.ends_with("unique.txt")));
}

#[test]
fn test_distinct_content_never_grouped() {
    let dir = tempdir().unwrap();
    for i in 0..20 {
        write(dir.path(), &format!("f{i}.txt"), &format!("content {i}"));
    }

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.files_hashed, 20);
    assert_eq!(summary.duplicate_files, 0);
}

#[test]
fn test_group_members_in_discovery_order() {
    let dir = tempdir().unwrap();
    write(dir.path(), "b/2.txt", "dup");
    write(dir.path(), "a/1.txt", "dup");
    write(dir.path(), "a/3.txt", "dup");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(
        groups[0].paths,
        vec![
            dir.path().join("a/1.txt"),
            dir.path().join("a/3.txt"),
            dir.path().join("b/2.txt"),
        ]
    );
}

#[test]
fn test_empty_files_are_duplicates_of_each_other() {
    let dir = tempdir().unwrap();
    write(dir.path(), "empty1", "");
    write(dir.path(), "empty2", "");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 0);
    assert_eq!(summary.reclaimable_bytes, 0);
}

#[cfg(unix)]
#[test]
fn test_hidden_files_respect_config() {
    let dir = tempdir().unwrap();
    write(dir.path(), "visible.txt", "dup");
    write(dir.path(), ".hidden.txt", "dup");

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    assert!(groups.is_empty());

    let config = FinderConfig::default()
        .with_walker_config(WalkerConfig::default().with_skip_hidden(false));
    let (groups, _) = DuplicateFinder::new(config)
        .find_duplicates(dir.path())
        .unwrap();
    assert_eq!(groups.len(), 1);
}

#[test]
fn test_missing_root_fails_before_scanning() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = DuplicateFinder::with_defaults().find_duplicates(&missing);

    match result {
        Err(FinderError::Scan(ScanError::NotFound(path))) => assert_eq!(path, missing),
        other => panic!("Expected NotFound, got: {:?}", other),
    }
}

#[test]
fn test_file_root_is_rejected() {
    let dir = tempdir().unwrap();
    write(dir.path(), "file.txt", "x");

    let result = DuplicateFinder::with_defaults().find_duplicates(&dir.path().join("file.txt"));

    assert!(matches!(
        result,
        Err(FinderError::Scan(ScanError::NotADirectory(_)))
    ));
}
