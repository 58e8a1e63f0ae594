//! Plain text output formatter.
//!
//! ```text
//! Working directory is '/home/user'
//! Searching for duplicates in '/home/user/photos'
//! Errors:
//!   PermissionDenied: '/home/user/photos/private.jpg'
//! Duplicates:
//!    /home/user/photos/copy of beach.jpg
//! ```
//!
//! The `Errors:` and `Duplicates:` blocks are omitted when empty.

use std::io::{self, Write};
use std::path::Path;

use super::ScanReport;

/// Write the two lines printed before a scan starts.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_header<W: Write>(writer: &mut W, cwd: &Path, root: &Path) -> io::Result<()> {
    writeln!(writer, "Working directory is '{}'", cwd.display())?;
    writeln!(writer, "Searching for duplicates in '{}'", root.display())
}

/// Text renderer for a finished scan.
#[derive(Debug, Clone, Copy)]
pub struct TextOutput<'a> {
    report: &'a ScanReport<'a>,
}

impl<'a> TextOutput<'a> {
    #[must_use]
    pub fn new(report: &'a ScanReport<'a>) -> Self {
        Self { report }
    }

    /// Write the error and duplicate blocks.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if !self.report.errors.is_empty() {
            writeln!(writer, "Errors:")?;
            for error in self.report.errors {
                writeln!(writer, "  {}: '{}'", error.label(), error.path().display())?;
            }
        }

        if !self.report.duplicates.is_empty() {
            writeln!(writer, "Duplicates:")?;
            for duplicate in self.report.duplicates {
                writeln!(writer, "   {}", duplicate.path().display())?;
            }
        }

        writer.flush()
    }
}
