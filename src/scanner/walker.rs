//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for enumerating the regular
//! files under a root directory and turning each of them into a
//! [`FileSignature`]. Per-file failures are collected next to the
//! signatures instead of aborting the walk.
//!
//! # Features
//!
//! - Flat (direct children only) or recursive traversal
//! - Deterministic order: entries sorted by file name within each directory
//! - Symlinks resolved to their targets (or skipped), with walkdir's loop detection
//! - Graceful shutdown via atomic flag
//!
//! Paths are built by joining entry names onto the directory being walked,
//! never by changing the process working directory.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig {
//!     recursive: true,
//!     ..Default::default()
//! };
//!
//! let result = Walker::new(Path::new("/home/user/Downloads"), config).walk();
//! println!("{} files, {} errors", result.signatures.len(), result.errors.len());
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::WalkDir;

use super::path_utils::absolutize;
use super::{FileSignature, ScanError, ScanResult, WalkerConfig};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk, as given
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// An empty path walks the current directory.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        let root = if path.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            path.to_path_buf()
        };
        Self {
            root,
            config,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set to `true`, the walker stops before the next
    /// entry and marks the result as interrupted.
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

    /// Walk the directory tree and collect signatures and errors.
    ///
    /// If the root itself cannot be listed the result holds no signatures
    /// and exactly one error, keyed by the absolute root path. Otherwise
    /// every regular file yields either a signature or an error, and
    /// non-file entries are skipped silently.
    #[must_use]
    pub fn walk(&self) -> ScanResult {
        let root = match absolutize(&self.root) {
            Ok(root) => root,
            Err(e) => {
                log::warn!("Cannot resolve {}: {}", self.root.display(), e);
                return ScanResult::root_failure(ScanError::from_io(&self.root, e));
            }
        };

        if let Err(error) = check_root(&root) {
            log::warn!("Cannot list {}: {}", root.display(), error);
            return ScanResult::root_failure(error);
        }

        log::debug!(
            "Walking {} ({})",
            root.display(),
            if self.config.recursive {
                "recursive"
            } else {
                "flat"
            }
        );

        let max_depth = if self.config.recursive { usize::MAX } else { 1 };
        let walk_dir = WalkDir::new(&root)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(!self.config.skip_symlinks)
            .sort_by_file_name();

        let mut result = ScanResult::default();

        for entry_result in walk_dir {
            if self.is_shutdown_requested() {
                log::debug!("Walker: Shutdown requested, stopping iteration");
                result.interrupted = true;
                break;
            }

            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    if let Some(error) = self.handle_walkdir_error(&root, e) {
                        result.errors.push(error);
                    }
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                log::trace!("Skipping non-file entry: {}", entry.path().display());
                continue;
            }

            match FileSignature::new(entry.path()) {
                Ok(signature) => result.signatures.push(signature),
                Err(e) => {
                    log::warn!("Skipping {}: {}", entry.path().display(), e);
                    result.errors.push(e);
                }
            }
        }

        log::debug!(
            "Walk of {} found {} files ({} errors)",
            root.display(),
            result.signatures.len(),
            result.errors.len()
        );

        result
    }

    /// Convert a walkdir error into a [`ScanError`] keyed by the failing path.
    ///
    /// A dangling symlink resolves to neither a file nor a directory and is
    /// skipped like any other non-file entry.
    fn handle_walkdir_error(&self, root: &Path, error: walkdir::Error) -> Option<ScanError> {
        let path = error
            .path()
            .map_or_else(|| root.to_path_buf(), Path::to_path_buf);

        if is_dangling_symlink(&path) {
            log::debug!("Skipping dangling symlink: {}", path.display());
            return None;
        }

        if let Some(ancestor) = error.loop_ancestor() {
            log::warn!(
                "Symlink loop at {} (points back to {})",
                path.display(),
                ancestor.display()
            );
            return Some(ScanError::Io {
                path,
                source: std::io::Error::other(format!(
                    "symlink loop back to {}",
                    ancestor.display()
                )),
            });
        }

        log::warn!("Walker error for {}: {}", path.display(), error);
        Some(match error.into_io_error() {
            Some(io_error) => ScanError::from_io(&path, io_error),
            None => ScanError::Io {
                path,
                source: std::io::Error::other("directory walk failed"),
            },
        })
    }
}

fn is_dangling_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
        && fs::metadata(path).is_err()
}

/// Make sure `root` is a directory whose entries can be listed.
fn check_root(root: &Path) -> Result<(), ScanError> {
    let metadata = fs::metadata(root).map_err(|e| ScanError::from_io(root, e))?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    fs::read_dir(root).map_err(|e| ScanError::from_io(root, e))?;
    Ok(())
}

/// Scan `directory` and build a signature for every regular file in it.
///
/// With `recursive` set, files in subdirectories at any depth are included.
/// An empty path scans the current directory.
///
/// # Example
///
/// ```no_run
/// use dupescan::scanner::build_signatures;
///
/// let result = build_signatures("b", false);
/// assert!(result.errors.is_empty());
/// ```
#[must_use]
pub fn build_signatures(directory: impl AsRef<Path>, recursive: bool) -> ScanResult {
    Walker::new(directory.as_ref(), WalkerConfig::new(recursive, false)).walk()
}
