use dupsweep::actions::{AutoAnswer, LineConfirm};
use dupsweep::config::Config;
use dupsweep::error::ExitCode;
use dupsweep::exit_code_for;
use dupsweep::pipeline::{Outcome, Pipeline, PipelineError, PipelineState};
use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};
use walkdir::WalkDir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn sample_tree() -> TempDir {
    let dir = tempdir().unwrap();
    write(dir.path(), "a/x.txt", b"hello");
    write(dir.path(), "a/y.txt", b"hello");
    write(dir.path(), "b/z.txt", b"world");
    dir
}

/// Every file under `root` with its contents.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| (e.path().to_path_buf(), fs::read(e.path()).unwrap()))
        .collect()
}

fn run_with(root: &Path, answer: bool) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = Pipeline::new(Config::default())
        .run(root, &mut AutoAnswer(answer), &mut out)
        .unwrap();
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn test_confirm_deletes_second_copy_only() {
    let dir = sample_tree();

    let (outcome, text) = run_with(dir.path(), true);

    assert_eq!(outcome.state(), PipelineState::Done);
    assert_eq!(exit_code_for(&outcome), ExitCode::Success);
    let remaining: Vec<_> = snapshot(dir.path()).into_keys().collect();
    assert_eq!(
        remaining,
        vec![dir.path().join("a/x.txt"), dir.path().join("b/z.txt")]
    );
    assert!(text.contains("Found 1 duplicate group(s)"));
    assert!(text.contains("1 duplicate file(s) will be deleted"));
    let deleted_line = format!("Deleted: {}", dir.path().join("a/y.txt").display());
    let deleted_at = text.find(&deleted_line).unwrap();
    assert!(deleted_at < text.find("Deleted 1 file(s)").unwrap());
}

#[test]
fn test_declined_run_leaves_tree_identical() {
    let dir = sample_tree();
    write(dir.path(), "c/deep/copy.txt", b"hello");
    write(dir.path(), "c/w.txt", b"world");
    let before = snapshot(dir.path());

    let (outcome, _) = run_with(dir.path(), false);

    assert_eq!(outcome.state(), PipelineState::Cancelled);
    assert_eq!(exit_code_for(&outcome), ExitCode::Success);
    assert_eq!(snapshot(dir.path()), before);
}

#[test]
fn test_second_run_finds_nothing() {
    let dir = sample_tree();
    write(dir.path(), "c/copy1.bin", &[0u8, 1, 2, 3]);
    write(dir.path(), "c/copy2.bin", &[0u8, 1, 2, 3]);
    write(dir.path(), "c/copy3.bin", &[0u8, 1, 2, 3]);

    let (first, _) = run_with(dir.path(), true);
    match first {
        Outcome::Done { report, .. } => assert_eq!(report.success_count(), 3),
        other => panic!("Expected Done, got: {:?}", other),
    }

    let (second, text) = run_with(dir.path(), true);
    assert_eq!(second.state(), PipelineState::NoDuplicates);
    assert!(text.contains("No duplicate files found."));
}

#[test]
fn test_empty_root_reports_no_duplicates() {
    let dir = tempdir().unwrap();

    let (outcome, _) = run_with(dir.path(), true);

    assert_eq!(outcome.state(), PipelineState::NoDuplicates);
    assert_eq!(exit_code_for(&outcome), ExitCode::Success);
}

#[test]
fn test_missing_root_is_fatal_and_scans_nothing() {
    let dir = tempdir().unwrap();

    let result = Pipeline::new(Config::default()).run(
        &dir.path().join("missing"),
        &mut AutoAnswer(true),
        &mut Vec::new(),
    );

    match result {
        Err(err @ PipelineError::Finder(_)) => {
            assert!(err.to_string().contains("missing"));
        }
        other => panic!("Expected fatal scan error, got: {:?}", other),
    }
}

#[test]
fn test_typed_answers() {
    let cases = [
        ("y\n", true),
        ("Y\n", true),
        (" y \n", true),
        ("yes\n", false),
        ("n\n", false),
        ("", false),
    ];
    for (answer, deletes) in cases {
        let dir = sample_tree();
        let mut prompt = Vec::new();
        let mut confirm = LineConfirm::new(Cursor::new(answer.as_bytes()), &mut prompt);

        let outcome = Pipeline::new(Config::default())
            .run(dir.path(), &mut confirm, &mut std::io::sink())
            .unwrap();

        assert_eq!(
            outcome.state() == PipelineState::Done,
            deletes,
            "answer {:?}",
            answer
        );
        assert_eq!(!dir.path().join("a/y.txt").exists(), deletes);
        assert_eq!(
            String::from_utf8(prompt).unwrap(),
            "Delete these 1 file(s)? (y/n): "
        );
    }
}

#[test]
fn test_non_utf8_answer_cancels() {
    let dir = sample_tree();
    let before = snapshot(dir.path());
    let mut confirm = LineConfirm::new(Cursor::new(vec![0xff, 0xfe, b'\n']), Vec::new());

    let outcome = Pipeline::new(Config::default())
        .run(dir.path(), &mut confirm, &mut std::io::sink())
        .unwrap();

    assert_eq!(outcome.state(), PipelineState::Cancelled);
    assert_eq!(exit_code_for(&outcome), ExitCode::Success);
    assert_eq!(snapshot(dir.path()), before);
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped_and_run_completes() {
    use std::os::unix::fs::PermissionsExt;

    let dir = sample_tree();
    let locked = dir.path().join("b/locked.txt");
    fs::write(&locked, "hello").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::File::open(&locked).is_ok() {
        // Running privileged; permissions are not enforced.
        return;
    }

    let (outcome, text) = run_with(dir.path(), true);

    assert_eq!(outcome.summary().skipped.len(), 1);
    assert_eq!(outcome.state(), PipelineState::Done);
    assert_eq!(exit_code_for(&outcome), ExitCode::PartialSuccess);
    assert!(text.contains("Warning: skipped"));
    assert!(!dir.path().join("a/y.txt").exists());
    assert!(locked.exists());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}
