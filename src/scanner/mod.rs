//! Scanner module for directory traversal and file signatures.
//!
//! This module provides functionality for:
//! - Directory walking using walkdir, recursive or flat
//! - File signatures with a lazily computed BLAKE3 content hash
//! - Absolute path resolution
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`signature`]: Per-file metadata with a memoized content hash
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//! - [`walker`]: Directory traversal producing a [`ScanResult`]
//! - [`path_utils`]: Absolute, lexically normalized paths
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
//! let result = Walker::new(Path::new("."), config).walk();
//! for signature in &result.signatures {
//!     println!("{}: {} bytes", signature.path().display(), signature.size());
//! }
//! for error in &result.errors {
//!     eprintln!("Warning: {}", error);
//! }
//! ```

pub mod hasher;
pub mod path_utils;
pub mod signature;
pub mod walker;

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

// Re-export main types
pub use hasher::{hash_to_hex, Hash, Hasher};
pub use signature::FileSignature;
pub use walker::{build_signatures, Walker};

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Descend into subdirectories at any depth.
    pub recursive: bool,

    /// Ignore symbolic links instead of resolving them.
    ///
    /// By default a link to a file is scanned under the link's own path and
    /// a link to a directory is descended into; walkdir reports loops as
    /// errors.
    pub skip_symlinks: bool,
}

impl WalkerConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(recursive: bool, skip_symlinks: bool) -> Self {
        Self {
            recursive,
            skip_symlinks,
        }
    }
}

/// Outcome of a directory walk.
///
/// Holds one signature per successfully processed file and one error per
/// file (or directory) that could not be processed. Both are in discovery
/// order.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Signatures of regular files, in discovery order
    pub signatures: Vec<FileSignature>,
    /// Per-path failures collected during the walk
    pub errors: Vec<ScanError>,
    /// Whether the walk stopped early because shutdown was requested
    pub interrupted: bool,
}

impl ScanResult {
    /// A result describing a root that could not be listed at all.
    #[must_use]
    pub fn root_failure(error: ScanError) -> Self {
        Self {
            signatures: Vec::new(),
            errors: vec![error],
            interrupted: false,
        }
    }

    /// Total size in bytes of all scanned files.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.signatures.iter().map(FileSignature::size).sum()
    }
}

/// Broad classification of a collected failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The path is missing, inaccessible, or not the expected kind of entry.
    InvalidTarget,
    /// The file existed but its content could not be read.
    UnreadableContent,
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The specified path is not a regular file.
    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The content of a file could not be hashed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

impl ScanError {
    /// Map an I/O error on `path` to the matching variant.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path the failure is keyed by.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(path)
            | Self::NotFound(path)
            | Self::NotADirectory(path)
            | Self::NotAFile(path)
            | Self::Io { path, .. } => path,
            Self::Hash(err) => err.path(),
        }
    }

    /// Broad classification of this failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Hash(_) => ErrorKind::UnreadableContent,
            _ => ErrorKind::InvalidTarget,
        }
    }

    /// Short name of the failure cause, as shown in reports.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::PermissionDenied(_) => "PermissionDenied",
            Self::NotFound(_) => "NotFound",
            Self::NotADirectory(_) => "NotADirectory",
            Self::NotAFile(_) => "NotAFile",
            Self::Io { .. } => "IoError",
            Self::Hash(err) => err.label(),
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    /// Map an I/O error on `path` to the matching variant.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path of the file that could not be hashed.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) | Self::Io { path, .. } => path,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::PermissionDenied(_) => "PermissionDenied",
            Self::Io { .. } => "IoError",
        }
    }
}
