//! Plain-text operator output.
//!
//! Renders each stage of a run for the person at the terminal: scan
//! summary, skipped files, the duplicate listing with keep/delete marks,
//! and the deletion results.
//!
//! # Example
//!
//! ```
//! use dupsweep::output::TextOutput;
//!
//! let mut buf = Vec::new();
//! TextOutput::new(&mut buf).no_duplicates().unwrap();
//! assert_eq!(String::from_utf8(buf).unwrap(), "No duplicate files found.\n");
//! ```

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::Path;

use bytesize::ByteSize;

use crate::actions::{DeleteProgressCallback, DeletionPlan, ExecutionReport};
use crate::duplicates::ScanSummary;

/// Length of the fingerprint prefix shown in group headers.
const FINGERPRINT_PREFIX: usize = 12;

/// Question handed to the confirmation provider.
#[must_use]
pub fn confirmation_prompt(plan: &DeletionPlan) -> String {
    format!("Delete these {} file(s)? (y/n): ", plan.delete_count())
}

/// Writes operator-facing text to any writer.
#[derive(Debug)]
pub struct TextOutput<W> {
    out: W,
}

impl<W: Write> TextOutput<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Banner printed before scanning starts.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn scan_started(&mut self, root: &Path) -> io::Result<()> {
        writeln!(self.out, "Scanning '{}' for duplicate files...", root.display())
    }

    /// Counts from the scan, followed by one warning per skipped file.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn scan_summary(&mut self, summary: &ScanSummary) -> io::Result<()> {
        writeln!(
            self.out,
            "Scan complete: {} file(s) processed, {} hashed ({}).",
            summary.files_found,
            summary.files_hashed,
            ByteSize::b(summary.bytes_hashed)
        )?;
        for skip in &summary.skipped {
            writeln!(self.out, "Warning: skipped {}: {}", skip.path().display(), skip)?;
        }
        Ok(())
    }

    /// Notice for a scan with no duplicate groups.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn no_duplicates(&mut self) -> io::Result<()> {
        writeln!(self.out, "No duplicate files found.")
    }

    /// Every group with its members, then the aggregate delete count.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn plan(&mut self, plan: &DeletionPlan) -> io::Result<()> {
        writeln!(
            self.out,
            "\nFound {} duplicate group(s):",
            plan.group_count()
        )?;

        for (n, group) in plan.groups().iter().enumerate() {
            writeln!(
                self.out,
                "\n--- Group {} [{}] {} each ---",
                n + 1,
                group.fingerprint.short(FINGERPRINT_PREFIX),
                ByteSize::b(group.size)
            )?;
            for (i, path) in group.members().enumerate() {
                let mark = if i == 0 { "(keep)" } else { "(delete)" };
                writeln!(self.out, "  [{}] {} {}", i + 1, path.display(), mark)?;
            }
        }

        writeln!(
            self.out,
            "\n{} duplicate file(s) will be deleted ({} reclaimable).",
            plan.delete_count(),
            ByteSize::b(plan.reclaimable_bytes())
        )?;
        self.out.flush()
    }

    /// Notice for a declined confirmation.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn cancelled(&mut self) -> io::Result<()> {
        writeln!(self.out, "Deletion cancelled. No files were removed.")
    }

    /// Line for one removed file.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn deleted(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "Deleted: {}", path.display())
    }

    /// Line for one file that could not be removed.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn delete_failed(&mut self, path: &Path, reason: &str) -> io::Result<()> {
        writeln!(self.out, "Failed: {}: {}", path.display(), reason)
    }

    /// Final count after execution.
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn report(&mut self, report: &ExecutionReport) -> io::Result<()> {
        writeln!(self.out, "\n{}.", report.summary())?;
        self.out.flush()
    }
}

/// Prints each deletion result as it happens.
///
/// Write errors do not interrupt execution; the first one is kept and
/// returned by [`DeletionEcho::finish`].
pub struct DeletionEcho<'a, W> {
    output: RefCell<&'a mut TextOutput<W>>,
    error: RefCell<Option<io::Error>>,
}

impl<'a, W: Write> DeletionEcho<'a, W> {
    /// Echo results to `output`.
    pub fn new(output: &'a mut TextOutput<W>) -> Self {
        Self {
            output: RefCell::new(output),
            error: RefCell::new(None),
        }
    }

    /// First write error seen while echoing, if any.
    ///
    /// # Errors
    ///
    /// Returns that write error.
    pub fn finish(self) -> io::Result<()> {
        match self.error.into_inner() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn write(&self, f: impl FnOnce(&mut TextOutput<W>) -> io::Result<()>) {
        if self.error.borrow().is_some() {
            return;
        }
        let mut output = self.output.borrow_mut();
        if let Err(e) = f(&mut **output) {
            *self.error.borrow_mut() = Some(e);
        }
    }
}

impl<W: Write> DeleteProgressCallback for DeletionEcho<'_, W> {
    fn on_before_delete(&self, path: &Path, index: usize, total: usize) {
        log::trace!("Deleting {}/{}: {}", index + 1, total, path.display());
    }

    fn on_delete_success(&self, path: &Path, _size: u64) {
        self.write(|o| o.deleted(path));
    }

    fn on_delete_failure(&self, path: &Path, error: &str) {
        self.write(|o| o.delete_failed(path, error));
    }

    fn on_complete(&self, _report: &ExecutionReport) {
        self.write(|o| o.out.flush());
    }
}
