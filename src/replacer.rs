use crate::errors::{Error, Result};
use regex::bytes::{NoExpand, Regex};
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Suffix appended to a file's full name to form its backup path.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Core engine for swapping one literal value for another inside files.
///
/// The value is matched as raw bytes, so files that are mostly text but carry
/// odd encodings are rewritten without any lossy conversion. Counting and
/// replacing share the same matcher, so a dry run always reports exactly what
/// a real run would change.
#[derive(Debug, Clone)]
pub struct Replacer {
    matcher: Regex,
    replacement: Vec<u8>,
}

/// Options for processing a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// If `true`, changes will be counted but not written to disk.
    pub dry_run: bool,
    /// If `true`, a `.bak` copy is written before a file is modified.
    pub backup: bool,
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReplaceStatus {
    /// The file does not contain the old value.
    Skipped,
    /// Dry run: the file would have been rewritten.
    WouldReplace,
    /// The file was rewritten.
    Replaced,
    /// The file could not be updated and was left as it was.
    Failed { reason: String },
}

/// The result of processing a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacementResult {
    pub path: PathBuf,
    /// Number of non-overlapping occurrences of the old value.
    pub occurrences: usize,
    #[serde(flatten)]
    pub status: ReplaceStatus,
}

impl Replacer {
    /// Creates a new `Replacer` swapping `old` for `new`.
    ///
    /// `old` is escaped before compilation so it is always matched literally.
    pub fn new(old: &str, new: &str) -> Result<Self> {
        if old.is_empty() {
            return Err("the value to replace must not be empty".into());
        }

        Ok(Self {
            matcher: Regex::new(&regex::escape(old))?,
            replacement: new.as_bytes().to_vec(),
        })
    }

    /// Counts the non-overlapping occurrences of the old value in `content`.
    pub fn count(&self, content: &[u8]) -> usize {
        self.matcher.find_iter(content).count()
    }

    /// Returns `content` with every occurrence replaced in a single left-to-right pass.
    pub fn substitute(&self, content: &[u8]) -> Vec<u8> {
        self.matcher
            .replace_all(content, NoExpand(self.replacement.as_slice()))
            .into_owned()
    }

    /// Processes a single file.
    ///
    /// Never returns an error: anything that goes wrong is reported as
    /// [`ReplaceStatus::Failed`] and the file keeps its original content.
    pub fn apply(&self, path: &Path, options: ApplyOptions) -> ReplacementResult {
        match self.try_apply(path, options) {
            Ok(result) => result,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "failed to update file");
                ReplacementResult {
                    path: path.to_path_buf(),
                    occurrences: 0,
                    status: ReplaceStatus::Failed {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    fn try_apply(&self, path: &Path, options: ApplyOptions) -> Result<ReplacementResult> {
        let content = fs::read(path)?;

        let occurrences = self.count(&content);
        let status = if occurrences == 0 {
            ReplaceStatus::Skipped
        } else if options.dry_run {
            ReplaceStatus::WouldReplace
        } else {
            if options.backup {
                let backup = backup_path(path);
                fs::copy(path, &backup).map_err(|e| Error::processing(&backup, e))?;
                debug!(backup = %backup.display(), "wrote backup");
            }
            write_atomically(path, &self.substitute(&content))?;
            ReplaceStatus::Replaced
        };

        Ok(ReplacementResult {
            path: path.to_path_buf(),
            occurrences,
            status,
        })
    }
}

/// The sibling path a backup of `path` is written to.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Returns `true` if `path` is the backup of a sibling file, i.e. `X.bak` next
/// to an existing `X`.
pub fn is_backup_of_sibling(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(BACKUP_SUFFIX))
        .is_some_and(|original| !original.is_empty() && path.with_file_name(original).is_file())
}

/// Replaces the content of `path` with `bytes` so readers only ever see the old
/// or the new content.
///
/// The data goes to a temporary file in the same directory, is flushed to disk,
/// takes over the original permissions and is then renamed over the original.
/// On any error the temporary file is removed when it is dropped.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(bytes)?;
    temp_file.as_file().sync_all()?;

    // Preserve file permissions
    let perms = fs::metadata(path)?.permissions();
    fs::set_permissions(temp_file.path(), perms)?;

    temp_file.persist(path)?;
    Ok(())
}
