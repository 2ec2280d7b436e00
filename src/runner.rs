//! Drives a whole run: validation, confirmation, traversal and reporting.

use crate::classifier::{TextDetector, is_text_file, should_include_extension};
use crate::config::RunConfig;
use crate::errors::Result;
use crate::prompt::Confirm;
use crate::replacer::{Replacer, is_backup_of_sibling};
use crate::report::{Reporter, RunSummary};
use crate::validate::{ValueKind, classify};
use crate::walker::walk;
use std::io::Write;
use tracing::{debug, info, warn};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every candidate file was processed.
    Completed(RunSummary),
    /// The user declined the confirmation; nothing was touched.
    Cancelled,
}

/// The main entry point for a replacement run.
///
/// This function orchestrates the entire process:
/// 1. It classifies both values and warns about anything that is neither an
///    IPv4 address nor a hostname.
/// 2. Unless this is a dry run or `assume_yes` is set, it asks `confirm`.
/// 3. It walks the directory, keeps files that pass the extension filter and
///    the text check, and hands each one to the [`Replacer`].
/// 4. It reports every changed or failed file and the final totals.
///
/// Per-file failures are reported and counted but never abort the run.
pub fn run_replace<O: Write, E: Write>(
    config: &RunConfig,
    detector: &dyn TextDetector,
    confirm: &mut dyn Confirm,
    reporter: &mut Reporter<O, E>,
) -> Result<Outcome> {
    check_value("OLD_VALUE", &config.old_value);
    check_value("NEW_VALUE", &config.new_value);

    let replacer = Replacer::new(&config.old_value, &config.new_value)?;

    if !config.dry_run && !config.assume_yes {
        let question = format!(
            "Replace '{}' with '{}' in files under {}?",
            config.old_value,
            config.new_value,
            config.root_directory.display()
        );
        if !confirm.confirm(&question) {
            info!("run cancelled at confirmation");
            reporter.cancelled()?;
            return Ok(Outcome::Cancelled);
        }
    }

    debug!(
        root = %config.root_directory.display(),
        recursive = config.recursive,
        detector = detector.name(),
        "starting walk"
    );

    let options = config.apply_options();
    let mut summary = RunSummary::default();

    for path in walk(
        &config.root_directory,
        config.recursive,
        &config.excluded_dir_names,
    ) {
        if !should_include_extension(&path, &config.allowed_extensions) {
            continue;
        }
        // Backups written by this run (or an earlier one) must keep the old content
        if config.backup && is_backup_of_sibling(&path) {
            debug!(path = %path.display(), "skipping backup artifact");
            continue;
        }
        if !is_text_file(&path, detector) {
            debug!(path = %path.display(), "skipping non-text file");
            continue;
        }

        let result = replacer.apply(&path, options);
        summary.record(&result);
        reporter.file(&result)?;
    }

    reporter.summary(&summary)?;
    Ok(Outcome::Completed(summary))
}

fn check_value(label: &str, value: &str) {
    match classify(value) {
        ValueKind::Unknown => warn!(
            "{label} '{value}' does not look like an IPv4 address or hostname; \
             replacing it literally"
        ),
        kind => info!("{label} '{value}' is a {kind}"),
    }
}
