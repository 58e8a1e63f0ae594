//! Absolute path resolution.
//!
//! Every path the scanner reports is absolute and lexically normalized:
//! relative paths are joined onto the current directory, `.` components are
//! dropped and `..` components remove their parent. No symlinks are resolved,
//! so the result names the entry the way it was reached during the walk.
//!
//! # Example
//!
//! ```
//! use dupescan::scanner::path_utils::normalize_lexically;
//! use std::path::{Path, PathBuf};
//!
//! let path = normalize_lexically(Path::new("/data/./photos/../music/song.mp3"));
//! assert_eq!(path, PathBuf::from("/data/music/song.mp3"));
//! ```

use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve `path` to an absolute, lexically normalized path.
///
/// An empty path resolves to the current directory.
///
/// # Errors
///
/// Returns an error if `path` is relative and the current directory
/// cannot be determined.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize_lexically(path));
    }
    let cwd = std::env::current_dir()?;
    Ok(normalize_lexically(&cwd.join(path)))
}

/// Remove `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                normalized.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::Prefix(_) | Component::RootDir) => {}
                _ => normalized.push(".."),
            },
            Component::Normal(name) => normalized.push(name),
        }
    }
    normalized
}
