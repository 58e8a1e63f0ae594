//! Output formatters for duplicate scan results.
//!
//! This module renders a finished scan:
//! - Plain text for people (the default)
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::identify_duplicates;
//! use dupescan::output::{ScanReport, TextOutput};
//! use dupescan::scanner::build_signatures;
//! use std::path::Path;
//!
//! let root = Path::new("/data");
//! let result = build_signatures(root, true);
//! let mut duplicates = identify_duplicates(&result.signatures);
//! let found: Vec<_> = duplicates.by_ref().collect();
//!
//! let report = ScanReport::new(root, &result.errors, &found)
//!     .with_stats(duplicates.stats())
//!     .with_files_scanned(result.signatures.len());
//! TextOutput::new(&report).write_to(&mut std::io::stdout()).unwrap();
//! ```

pub mod json;
pub mod text;

use std::path::Path;

use crate::duplicates::GroupingStats;
use crate::scanner::{FileSignature, ScanError};

// Re-export main types
pub use json::{JsonOutput, JsonOutputError};
pub use text::{write_header, TextOutput};

/// Everything a formatter needs to render one scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanReport<'a> {
    /// Absolute root that was scanned
    pub root: &'a Path,
    /// Per-path failures, walk errors first, then hashing failures
    pub errors: &'a [ScanError],
    /// Duplicates in the order the grouping algorithm produced them
    pub duplicates: &'a [&'a FileSignature],
    /// Number of files that produced a signature
    pub files_scanned: usize,
    /// Grouping statistics
    pub stats: GroupingStats,
    /// Whether the scan stopped early
    pub interrupted: bool,
}

impl<'a> ScanReport<'a> {
    /// Create a report with empty statistics.
    #[must_use]
    pub fn new(
        root: &'a Path,
        errors: &'a [ScanError],
        duplicates: &'a [&'a FileSignature],
    ) -> Self {
        Self {
            root,
            errors,
            duplicates,
            files_scanned: 0,
            stats: GroupingStats::default(),
            interrupted: false,
        }
    }

    /// Attach grouping statistics.
    #[must_use]
    pub fn with_stats(mut self, stats: GroupingStats) -> Self {
        self.stats = stats;
        self
    }

    /// Record how many files were scanned.
    #[must_use]
    pub fn with_files_scanned(mut self, count: usize) -> Self {
        self.files_scanned = count;
        self
    }

    /// Mark the report as coming from an interrupted scan.
    #[must_use]
    pub fn with_interrupted(mut self, interrupted: bool) -> Self {
        self.interrupted = interrupted;
        self
    }

    /// Bytes held by the reported duplicates.
    #[must_use]
    pub fn reclaimable_space(&self) -> u64 {
        self.duplicates.iter().map(|d| d.size()).sum()
    }
}
