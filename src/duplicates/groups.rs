//! Size-based partitioning of file signatures.
//!
//! # Overview
//!
//! Size grouping is the first tier of duplicate detection. Files with
//! different sizes cannot be duplicates, so a size-sorted sequence of
//! signatures is cut into maximal runs of equal size and runs of length one
//! are dropped without ever hashing their file.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::SizeGroups;
//! use dupescan::scanner::build_signatures;
//!
//! let mut signatures = build_signatures(".", false).signatures;
//! signatures.sort_by_key(|s| s.size());
//!
//! for group in SizeGroups::new(signatures.iter()) {
//!     println!("{} files of {} bytes", group.len(), group[0].size());
//! }
//! ```

use std::borrow::Borrow;
use std::iter::Peekable;

use serde::Serialize;

use crate::scanner::FileSignature;

/// Iterator over the size groups of a size-sorted signature sequence.
///
/// Yields only groups with two or more members; singletons are counted in
/// [`SizeGroups::skipped`] and discarded.
pub struct SizeGroups<I: Iterator> {
    inner: Peekable<I>,
    skipped: usize,
}

impl<I, S> SizeGroups<I>
where
    I: Iterator<Item = S>,
    S: Borrow<FileSignature>,
{
    /// Wrap a sequence that is already sorted by size.
    pub fn new(sorted: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            inner: sorted.into_iter().peekable(),
            skipped: 0,
        }
    }

    /// Number of singleton size groups dropped so far.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<I, S> Iterator for SizeGroups<I>
where
    I: Iterator<Item = S>,
    S: Borrow<FileSignature>,
{
    type Item = Vec<S>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let first = self.inner.next()?;
            let size = first.borrow().size();

            let mut group = vec![first];
            while let Some(member) = self.inner.next_if(|s| s.borrow().size() == size) {
                group.push(member);
            }

            if group.len() > 1 {
                log::debug!("Size group {} bytes: {} candidates", size, group.len());
                return Some(group);
            }

            self.skipped += 1;
            log::trace!(
                "Eliminated unique size {}: {}",
                size,
                group[0].borrow().path().display()
            );
        }
    }
}

/// Statistics from a run of the grouping algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupingStats {
    /// Size groups with two or more members
    pub size_groups: usize,
    /// Sizes held by a single file, eliminated without hashing
    pub unique_sizes: usize,
    /// Signatures whose hash was requested
    pub hashed_files: usize,
    /// Signatures dropped because their content could not be read
    pub failed_files: usize,
    /// Hash groups with two or more members
    pub duplicate_groups: usize,
    /// Duplicates yielded (originals excluded)
    pub duplicate_files: usize,
    /// Bytes occupied by the yielded duplicates
    pub reclaimable_space: u64,
}
