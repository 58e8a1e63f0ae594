//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "root": "/home/user/photos",
//!   "errors": [
//!     {
//!       "kind": "invalid_target",
//!       "label": "PermissionDenied",
//!       "path": "/home/user/photos/private.jpg",
//!       "message": "Permission denied: /home/user/photos/private.jpg"
//!     }
//!   ],
//!   "duplicates": [
//!     {
//!       "path": "/home/user/photos/copy of beach.jpg",
//!       "size": 1024,
//!       "modified": "2024-05-01T12:00:00Z",
//!       "modified_unix": 1714564800,
//!       "hash": "abc123..."
//!     }
//!   ],
//!   "summary": {
//!     "files_scanned": 100,
//!     "errors": 1,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "reclaimable_space": 1024,
//!     "interrupted": false
//!   }
//! }
//! ```

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use super::ScanReport;
use crate::scanner::{hash_to_hex, ErrorKind, FileSignature, ScanError};

/// A collected failure in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonError {
    /// Broad classification
    pub kind: ErrorKind,
    /// Short cause name
    pub label: String,
    /// Absolute path the failure is keyed by
    pub path: String,
    /// Human-readable message
    pub message: String,
}

impl JsonError {
    #[must_use]
    pub fn from_scan_error(error: &ScanError) -> Self {
        Self {
            kind: error.kind(),
            label: error.label().to_string(),
            path: error.path().to_string_lossy().into_owned(),
            message: error.to_string(),
        }
    }
}

/// A reported duplicate in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicate {
    /// Absolute path
    pub path: String,
    /// File size in bytes
    pub size: u64,
    /// Last modified time (RFC 3339), `null` if chrono cannot represent it
    pub modified: Option<DateTime<Utc>>,
    /// Last modified time as seconds relative to the Unix epoch
    pub modified_unix: i64,
    /// BLAKE3 hash as hexadecimal string, if computed
    pub hash: Option<String>,
}

impl JsonDuplicate {
    #[must_use]
    pub fn from_signature(signature: &FileSignature) -> Self {
        Self {
            path: signature.path().to_string_lossy().into_owned(),
            size: signature.size(),
            modified: to_datetime(signature.modified()),
            modified_unix: unix_seconds(signature.modified()),
            hash: signature.cached_hash().as_ref().map(hash_to_hex),
        }
    }
}

fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_secs()).map_or(i64::MIN, |s| -s),
    }
}

fn to_datetime(time: SystemTime) -> Option<DateTime<Utc>> {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            let secs = i64::try_from(after.as_secs()).ok()?;
            DateTime::from_timestamp(secs, after.subsec_nanos())
        }
        Err(before) => {
            let before = before.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            let delta = TimeDelta::try_seconds(secs)?
                .checked_add(&TimeDelta::nanoseconds(i64::from(before.subsec_nanos())))?;
            DateTime::UNIX_EPOCH.checked_sub_signed(delta)
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Files that produced a signature
    pub files_scanned: usize,
    /// Number of collected failures
    pub errors: usize,
    /// Hash groups with two or more members
    pub duplicate_groups: usize,
    /// Number of duplicates (originals excluded)
    pub duplicate_files: usize,
    /// Bytes held by the duplicates
    pub reclaimable_space: u64,
    /// Whether the scan was interrupted
    pub interrupted: bool,
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Absolute root that was scanned
    pub root: String,
    /// Collected failures
    pub errors: Vec<JsonError>,
    /// Duplicates in report order
    pub duplicates: Vec<JsonDuplicate>,
    /// Scan summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the JSON document for a report.
    #[must_use]
    pub fn new(report: &ScanReport<'_>) -> Self {
        Self {
            root: report.root.to_string_lossy().into_owned(),
            errors: report.errors.iter().map(JsonError::from_scan_error).collect(),
            duplicates: report
                .duplicates
                .iter()
                .map(|d| JsonDuplicate::from_signature(d))
                .collect(),
            summary: JsonSummary {
                files_scanned: report.files_scanned,
                errors: report.errors.len(),
                duplicate_groups: report.stats.duplicate_groups,
                duplicate_files: report.duplicates.len(),
                reclaimable_space: report.reclaimable_space(),
                interrupted: report.interrupted,
            },
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
