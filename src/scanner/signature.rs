//! File signatures: the identity-relevant metadata of one file.
//!
//! A [`FileSignature`] captures a file's absolute path, size and
//! modification time once, when it is created. The content hash is not
//! computed up front: the first call to [`FileSignature::hash`] reads the
//! whole file and the digest is cached for the lifetime of the signature.
//! Later calls return the cached value without touching the filesystem,
//! even if the file has changed since.
//!
//! The cache sits behind a mutex, so concurrent first accesses from several
//! threads still hash the file exactly once.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::FileSignature;
//!
//! let signature = FileSignature::new("notes.txt").unwrap();
//! assert!(!signature.is_hashed());
//!
//! let hash = signature.hash().unwrap();
//! assert!(signature.is_hashed());
//! assert_eq!(signature.hash().unwrap(), hash); // served from the cache
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::SystemTime;

use super::hasher::{hash_to_hex, Hash, Hasher};
use super::path_utils::absolutize;
use super::{HashError, ScanError};

/// Size, modification time and lazily computed content hash of one file.
pub struct FileSignature {
    path: PathBuf,
    size: u64,
    modified: SystemTime,
    hash: Mutex<Option<Hash>>,
}

impl FileSignature {
    /// Create a signature for the regular file at `path`.
    ///
    /// Relative paths are resolved against the current directory. Size and
    /// modification time are read here and never again.
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] classified as
    /// [`ErrorKind::InvalidTarget`](super::ErrorKind::InvalidTarget) if the
    /// path does not exist, cannot be accessed, or is not a regular file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let path = absolutize(path).map_err(|e| ScanError::from_io(path, e))?;

        let metadata = fs::metadata(&path).map_err(|e| ScanError::from_io(&path, e))?;
        if !metadata.is_file() {
            return Err(ScanError::NotAFile(path));
        }

        let modified = modified_time(&path, metadata.modified())?;

        Ok(Self {
            path,
            size: metadata.len(),
            modified,
            hash: Mutex::new(None),
        })
    }

    /// Absolute path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File size in bytes, as seen at construction.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Last modification time, as seen at construction.
    #[must_use]
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Content hash of the file, computed on first access.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file can no longer be read. Nothing is
    /// cached in that case, so a later call tries again.
    pub fn hash(&self) -> Result<Hash, HashError> {
        let mut cached = self.hash.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hash) = *cached {
            log::trace!("Hash cache hit: {}", self.path.display());
            return Ok(hash);
        }

        let hash = Hasher::new().full_hash(&self.path)?;
        log::trace!("Hashed {} ({} bytes)", self.path.display(), self.size);
        *cached = Some(hash);
        Ok(hash)
    }

    /// The hash if it has already been computed.
    #[must_use]
    pub fn cached_hash(&self) -> Option<Hash> {
        *self.hash.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether the content hash has been computed.
    #[must_use]
    pub fn is_hashed(&self) -> bool {
        self.cached_hash().is_some()
    }
}

/// Fails when the platform reports no modification time for the file.
fn modified_time(
    path: &Path,
    modified: io::Result<SystemTime>,
) -> Result<SystemTime, ScanError> {
    modified.map_err(|e| {
        log::warn!("No modification time for {}: {}", path.display(), e);
        ScanError::from_io(path, e)
    })
}

impl Clone for FileSignature {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            size: self.size,
            modified: self.modified,
            hash: Mutex::new(self.cached_hash()),
        }
    }
}

impl fmt::Debug for FileSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("FileSignature");
        debug
            .field("path", &self.path)
            .field("modified", &self.modified)
            .field("size", &self.size);
        if let Some(hash) = self.cached_hash() {
            debug.field("hash", &hash_to_hex(&hash));
        }
        debug.finish()
    }
}
