//! Duplicate identification over file signatures.
//!
//! # Overview
//!
//! [`identify_duplicates`] turns a collection of [`FileSignature`]s into a
//! lazy stream of duplicates:
//! 1. **Size tier**: stable-sort by size and cut into size groups (see
//!    [`crate::duplicates::groups`]). Sizes held by a single file are dropped
//!    without hashing.
//! 2. **Hash tier**: when the stream reaches a size group, each member is
//!    hashed once and the group is stable-sorted by `(hash, modified)`.
//! 3. **Selection**: within each run of equal hashes the earliest-modified
//!    file is the original; every later member is yielded as a duplicate,
//!    oldest first.
//!
//! Nothing beyond the current size group is resolved until the caller asks
//! for the next duplicate.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::identify_duplicates;
//! use dupescan::scanner::build_signatures;
//!
//! let result = build_signatures(".", true);
//! for duplicate in identify_duplicates(&result.signatures) {
//!     println!("{}", duplicate.path().display());
//! }
//! ```

use std::borrow::Borrow;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::groups::{GroupingStats, SizeGroups};
use crate::scanner::{FileSignature, Hash, ScanError};

/// Find the duplicates among `signatures`.
///
/// Accepts owned signatures or anything that borrows as one (such as
/// `&FileSignature`). An empty input yields an empty stream without any
/// hashing. An absent collection can be passed as
/// `None::<Vec<FileSignature>>.into_iter().flatten()`.
///
/// Running this twice over the same collection yields the same duplicates
/// in the same order.
pub fn identify_duplicates<I, S>(signatures: I) -> Duplicates<S>
where
    I: IntoIterator<Item = S>,
    S: Borrow<FileSignature>,
{
    let mut sorted: Vec<S> = signatures.into_iter().collect();
    sorted.sort_by_key(|s| s.borrow().size());
    log::debug!("Grouping {} signatures by size", sorted.len());

    Duplicates {
        size_groups: SizeGroups::new(sorted),
        ready: VecDeque::new(),
        failures: Vec::new(),
        stats: GroupingStats::default(),
        shutdown_flag: None,
    }
}

/// Lazy, single-pass stream of duplicate signatures.
///
/// Created by [`identify_duplicates`].
pub struct Duplicates<S> {
    size_groups: SizeGroups<std::vec::IntoIter<S>>,
    ready: VecDeque<S>,
    failures: Vec<ScanError>,
    stats: GroupingStats,
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl<S: Borrow<FileSignature>> Duplicates<S> {
    /// Set the shutdown flag for graceful termination.
    ///
    /// Once the flag is set the stream ends before resolving another
    /// size group.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Files whose content could not be read while hashing.
    ///
    /// These signatures were left out of their size group; duplicates
    /// already yielded are unaffected.
    #[must_use]
    pub fn failures(&self) -> &[ScanError] {
        &self.failures
    }

    /// Take ownership of the collected hashing failures.
    pub fn take_failures(&mut self) -> Vec<ScanError> {
        std::mem::take(&mut self.failures)
    }

    /// Statistics for the part of the stream consumed so far.
    #[must_use]
    pub fn stats(&self) -> GroupingStats {
        GroupingStats {
            unique_sizes: self.size_groups.skipped(),
            ..self.stats
        }
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Hash one size group and queue everything but each hash group's original.
    fn resolve(&mut self, group: Vec<S>) {
        self.stats.size_groups += 1;

        let mut keyed: Vec<(Hash, S)> = Vec::with_capacity(group.len());
        for signature in group {
            self.stats.hashed_files += 1;
            match signature.borrow().hash() {
                Ok(hash) => keyed.push((hash, signature)),
                Err(e) => {
                    log::warn!("Cannot hash {}: {}", signature.borrow().path().display(), e);
                    self.stats.failed_files += 1;
                    self.failures.push(e.into());
                }
            }
        }

        keyed.sort_by(|(hash_a, a), (hash_b, b)| {
            hash_a
                .cmp(hash_b)
                .then_with(|| a.borrow().modified().cmp(&b.borrow().modified()))
        });

        let mut current: Option<Hash> = None;
        let mut run_len = 0usize;
        for (hash, signature) in keyed {
            if current == Some(hash) {
                run_len += 1;
                if run_len == 2 {
                    self.stats.duplicate_groups += 1;
                }
                log::debug!(
                    "Duplicate: {} ({} bytes)",
                    signature.borrow().path().display(),
                    signature.borrow().size()
                );
                self.ready.push_back(signature);
            } else {
                current = Some(hash);
                run_len = 1;
            }
        }
    }
}

impl<S: Borrow<FileSignature>> Iterator for Duplicates<S> {
    type Item = S;

    fn next(&mut self) -> Option<S> {
        loop {
            if let Some(duplicate) = self.ready.pop_front() {
                self.stats.duplicate_files += 1;
                self.stats.reclaimable_space += duplicate.borrow().size();
                return Some(duplicate);
            }

            if self.is_shutdown_requested() {
                log::debug!("Duplicates: Shutdown requested, stopping iteration");
                return None;
            }

            let group = self.size_groups.next()?;
            self.resolve(group);
        }
    }
}
