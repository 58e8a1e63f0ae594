//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based grouping (first tier, no I/O)
//! - Content hash comparison within size groups (second tier)
//! - Original/duplicate selection by modification time

pub mod finder;
pub mod groups;

pub use finder::{identify_duplicates, Duplicates};
pub use groups::{GroupingStats, SizeGroups};
