use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Number of leading bytes inspected by the NUL-byte heuristic.
const SNIFF_LEN: usize = 1024;

/// Decides whether a readable file holds text.
///
/// Implementations only see files that could already be opened for reading.
pub trait TextDetector {
    /// Returns `true` if the file at `path` should be treated as text.
    fn is_text(&self, path: &Path) -> bool;

    /// A short name used in diagnostics.
    fn name(&self) -> &'static str;
}

/// In-process heuristic: a file is text unless its first 1 KiB contains a NUL byte.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullByteDetector;

impl TextDetector for NullByteDetector {
    fn is_text(&self, path: &Path) -> bool {
        let Ok(file) = File::open(path) else {
            return false;
        };

        let mut head = Vec::with_capacity(SNIFF_LEN);
        match file.take(SNIFF_LEN as u64).read_to_end(&mut head) {
            Ok(_) => !head.contains(&0),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "could not sniff file");
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        "null-byte"
    }
}

/// Asks the platform's `file(1)` utility for the MIME type.
///
/// Falls back to [`NullByteDetector`] for any file `file` cannot be run on.
#[derive(Debug, Default, Clone, Copy)]
pub struct MimeDetector {
    fallback: NullByteDetector,
}

impl MimeDetector {
    /// Returns a detector if `file` is installed and runnable.
    pub fn probe() -> Option<Self> {
        let status = Command::new("file")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .ok()?;
        status.success().then(Self::default)
    }
}

impl TextDetector for MimeDetector {
    fn is_text(&self, path: &Path) -> bool {
        let output = Command::new("file")
            .args(["--brief", "--mime", "--"])
            .arg(path)
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(out) if out.status.success() => {
                is_text_mime(String::from_utf8_lossy(&out.stdout).trim())
            }
            _ => self.fallback.is_text(path),
        }
    }

    fn name(&self) -> &'static str {
        "mime"
    }
}

/// Picks the best detector available on this machine.
pub fn detector_for_platform() -> Box<dyn TextDetector> {
    match MimeDetector::probe() {
        Some(mime) => Box::new(mime),
        None => Box::new(NullByteDetector),
    }
}

/// Interprets a `file --mime` answer such as `text/plain; charset=us-ascii`.
///
/// Only `text/*` types count as text.
pub fn is_text_mime(answer: &str) -> bool {
    answer
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().starts_with("text/"))
}

/// Returns `true` if `path` can be opened and `detector` considers it text.
///
/// Unreadable files are rejected quietly.
pub fn is_text_file(path: &Path, detector: &dyn TextDetector) -> bool {
    if let Err(e) = File::open(path) {
        debug!(path = %path.display(), error = %e, "skipping unreadable file");
        return false;
    }
    detector.is_text(path)
}

/// The extension as defined for filtering: everything after the final `.` of
/// the file name, or `""` when there is no `.`.
///
/// Unlike [`Path::extension`], a leading dot counts, so `.env` has the
/// extension `env`.
pub fn file_extension(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .unwrap_or("")
}

/// Determines if a file should be processed based on its extension.
///
/// An empty allow-list admits everything. Matching is case-sensitive.
pub fn should_include_extension(path: &Path, allowed: &BTreeSet<String>) -> bool {
    if allowed.is_empty() {
        return true;
    }
    allowed.contains(file_extension(path))
}
