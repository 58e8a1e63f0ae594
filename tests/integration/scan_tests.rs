use dupescan::duplicates::identify_duplicates;
use dupescan::scanner::{build_signatures, ScanError, Walker, WalkerConfig};
use filetime::FileTime;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(dir: &Path, name: &str, content: &[u8], mtime_secs: i64) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).unwrap().write_all(content).unwrap();
    filetime::set_file_mtime(&path, FileTime::from_unix_time(mtime_secs, 0)).unwrap();
    path
}

fn duplicate_paths(root: &Path, recursive: bool) -> Vec<PathBuf> {
    let result = build_signatures(root, recursive);
    identify_duplicates(&result.signatures)
        .map(|s| s.path().to_path_buf())
        .collect()
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let result = build_signatures(dir.path(), true);

    assert!(result.signatures.is_empty());
    assert!(result.errors.is_empty());
    assert_eq!(identify_duplicates(&result.signatures).count(), 0);
}

#[test]
fn test_same_size_different_content() {
    let dir = tempdir().unwrap();
    let b = dir.path().join("b");
    fs::create_dir(&b).unwrap();
    write_file(&b, "same", b"0123456789", 1_000);
    write_file(&b, "different", b"abcdefghij", 2_000);

    let result = build_signatures(&b, false);

    assert_eq!(result.signatures.len(), 2);
    assert!(result.errors.is_empty());
    assert_eq!(identify_duplicates(&result.signatures).count(), 0);
    assert!(result.signatures.iter().all(|s| s.is_hashed()));
}

#[test]
fn test_later_copy_is_the_duplicate() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "original", b"payload", 1_000);
    let copy = write_file(dir.path(), "copy", b"payload", 5_000);
    write_file(dir.path(), "other", b"something else entirely", 3_000);

    assert_eq!(duplicate_paths(dir.path(), false), vec![copy]);
}

#[test]
fn test_distinct_sizes_are_never_hashed() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "a", b"1", 1);
    write_file(dir.path(), "b", b"22", 2);
    write_file(dir.path(), "c", b"333", 3);

    let result = build_signatures(dir.path(), false);
    let found = identify_duplicates(&result.signatures).count();

    assert_eq!(found, 0);
    assert!(result.signatures.iter().all(|s| !s.is_hashed()));
}

#[test]
fn test_three_copies_yield_two_oldest_first() {
    let dir = tempdir().unwrap();
    let newest = write_file(dir.path(), "a", b"triplicate", 9_000);
    write_file(dir.path(), "b", b"triplicate", 1_000);
    let middle = write_file(dir.path(), "c", b"triplicate", 5_000);

    assert_eq!(duplicate_paths(dir.path(), false), vec![middle, newest]);
}

#[test]
fn test_flat_scan_ignores_subdirectories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("nested");
    fs::create_dir(&sub).unwrap();
    write_file(dir.path(), "top", b"shared", 1_000);
    let nested_copy = write_file(&sub, "deep", b"shared", 2_000);

    let flat = build_signatures(dir.path(), false);
    assert_eq!(flat.signatures.len(), 1);
    assert!(duplicate_paths(dir.path(), false).is_empty());

    let recursive = build_signatures(dir.path(), true);
    assert_eq!(recursive.signatures.len(), 2);
    assert_eq!(duplicate_paths(dir.path(), true), vec![nested_copy]);
}

#[test]
fn test_deeply_nested_recursive_scan() {
    let dir = tempdir().unwrap();
    let mut current = dir.path().to_path_buf();
    for level in 0..5 {
        current = current.join(format!("level{level}"));
        fs::create_dir(&current).unwrap();
        write_file(&current, "file.txt", format!("level {level}").as_bytes(), 1_000);
    }

    let result = build_signatures(dir.path(), true);

    assert_eq!(result.signatures.len(), 5);
    assert!(result.errors.is_empty());
}

#[test]
fn test_nonexistent_root() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let result = build_signatures(&missing, false);

    assert!(result.signatures.is_empty());
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(&result.errors[0], ScanError::NotFound(p) if p == &missing));
    assert_eq!(result.errors[0].label(), "NotFound");
}

#[test]
fn test_root_is_a_file() {
    let dir = tempdir().unwrap();
    let file = write_file(dir.path(), "plain", b"x", 1);

    let result = build_signatures(&file, true);

    assert!(result.signatures.is_empty());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].label(), "NotADirectory");
}

#[test]
fn test_signature_paths_are_absolute() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "abs", b"abs", 1);

    let result = Walker::new(dir.path(), WalkerConfig::default()).walk();

    assert!(result.signatures.iter().all(|s| s.path().is_absolute()));
}

#[test]
fn test_empty_files_are_duplicates_of_each_other() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "empty1", b"", 1_000);
    let later = write_file(dir.path(), "empty2", b"", 2_000);

    assert_eq!(duplicate_paths(dir.path(), false), vec![later]);
}

#[test]
fn test_results_are_stable_across_runs() {
    let dir = tempdir().unwrap();
    for i in 0..6 {
        write_file(dir.path(), &format!("f{i}"), b"same bytes", 1_000 + i);
    }

    let result = build_signatures(dir.path(), false);
    let first: Vec<_> = identify_duplicates(&result.signatures)
        .map(|s| s.path().to_path_buf())
        .collect();
    let second: Vec<_> = identify_duplicates(&result.signatures)
        .map(|s| s.path().to_path_buf())
        .collect();

    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
}

#[cfg(unix)]
#[test]
fn test_symlinks_resolve_to_their_targets() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("real");
    fs::create_dir(&real).unwrap();
    let target = write_file(&real, "a", b"linked", 1_000);
    let link_to_file = dir.path().join("link_to_file");
    let link_to_dir = dir.path().join("link_to_dir");
    std::os::unix::fs::symlink(&target, &link_to_file).unwrap();
    std::os::unix::fs::symlink(&real, &link_to_dir).unwrap();

    let flat = build_signatures(dir.path(), false);
    let flat_paths: Vec<_> = flat.signatures.iter().map(|s| s.path()).collect();
    assert_eq!(flat_paths, vec![link_to_file.as_path()]);

    // Equal mtimes: discovery order decides, and link_to_dir sorts first
    assert_eq!(
        duplicate_paths(dir.path(), true),
        vec![link_to_file, target]
    );
}

#[cfg(unix)]
#[test]
fn test_skip_symlinks_ignores_links() {
    let dir = tempdir().unwrap();
    let target = write_file(dir.path(), "target", b"linked", 1_000);
    std::os::unix::fs::symlink(&target, dir.path().join("link")).unwrap();

    let result = Walker::new(dir.path(), WalkerConfig::new(false, true)).walk();

    assert_eq!(result.signatures.len(), 1);
    assert!(identify_duplicates(&result.signatures).next().is_none());
}
