use crate::cli::OutputFormat;
use crate::errors::Result;
use crate::replacer::{ReplaceStatus, ReplacementResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Running totals for one invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Files that passed every filter and were handed to the replacer.
    pub files_scanned: usize,
    /// Files modified, or that would be modified in a dry run.
    pub files_changed: usize,
    /// Occurrences replaced, or that would be replaced in a dry run.
    pub total_replacements: usize,
    /// Files left untouched because they could not be updated.
    pub files_failed: usize,
}

impl RunSummary {
    /// Folds one file's result into the totals.
    pub fn record(&mut self, result: &ReplacementResult) {
        self.files_scanned += 1;
        match result.status {
            ReplaceStatus::WouldReplace | ReplaceStatus::Replaced => {
                self.files_changed += 1;
                self.total_replacements += result.occurrences;
            }
            ReplaceStatus::Failed { .. } => self.files_failed += 1,
            ReplaceStatus::Skipped => {}
        }
    }
}

/// Writes per-file lines and the final summary in the chosen format.
///
/// Normal output goes to `out`; failure lines in text mode go to `err`.
pub struct Reporter<O, E> {
    format: OutputFormat,
    dry_run: bool,
    out: O,
    err: E,
}

#[derive(Serialize)]
struct FileEvent<'a> {
    event: &'static str,
    #[serde(flatten)]
    result: &'a ReplacementResult,
}

#[derive(Serialize)]
struct SummaryEvent<'a> {
    event: &'static str,
    dry_run: bool,
    #[serde(flatten)]
    summary: &'a RunSummary,
    finished_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct CancelledEvent {
    event: &'static str,
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(format: OutputFormat, dry_run: bool, out: O, err: E) -> Self {
        Self {
            format,
            dry_run,
            out,
            err,
        }
    }

    /// Reports one file. Skipped files produce no output.
    pub fn file(&mut self, result: &ReplacementResult) -> Result<()> {
        if result.status == ReplaceStatus::Skipped {
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => self.json_line(&FileEvent {
                event: "file",
                result,
            }),
            OutputFormat::Text => {
                let path = result.path.display();
                let n = result.occurrences;
                match &result.status {
                    ReplaceStatus::WouldReplace => {
                        writeln!(self.out, "Would replace {n} occurrence(s) in: {path}")?
                    }
                    ReplaceStatus::Replaced => {
                        writeln!(self.out, "Replaced {n} occurrence(s) in: {path}")?
                    }
                    ReplaceStatus::Failed { reason } => {
                        writeln!(self.err, "Error: failed to update {path}: {reason}")?
                    }
                    ReplaceStatus::Skipped => {}
                }
                Ok(())
            }
        }
    }

    /// Prints the closing summary block.
    pub fn summary(&mut self, summary: &RunSummary) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json_line(&SummaryEvent {
                event: "summary",
                dry_run: self.dry_run,
                summary,
                finished_at: Utc::now(),
            }),
            OutputFormat::Text => {
                writeln!(self.out, "\n{}", "-".repeat(50))?;
                if self.dry_run {
                    writeln!(self.out, "Dry run complete. No files were modified.")?;
                    writeln!(self.out, "Files that would be modified : {}", summary.files_changed)?;
                    writeln!(
                        self.out,
                        "Occurrences that would change: {}",
                        summary.total_replacements
                    )?;
                } else {
                    writeln!(self.out, "Replacement complete.")?;
                    writeln!(self.out, "Files modified      : {}", summary.files_changed)?;
                    writeln!(self.out, "Occurrences replaced: {}", summary.total_replacements)?;
                }
                writeln!(self.out, "Files scanned       : {}", summary.files_scanned)?;
                if summary.files_failed > 0 {
                    writeln!(self.out, "Files failed        : {}", summary.files_failed)?;
                }
                Ok(())
            }
        }
    }

    /// Reports a run the user declined to start.
    pub fn cancelled(&mut self) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.json_line(&CancelledEvent { event: "cancelled" }),
            OutputFormat::Text => {
                writeln!(self.out, "Operation cancelled. No files were modified.")?;
                Ok(())
            }
        }
    }

    fn json_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }
}
