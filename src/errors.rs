use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in the `hostswap` application.
///
/// Only [`Error::Usage`] and [`Error::TargetMissing`] ever abort a run. Every
/// other variant is caught at the file boundary and turned into a failed
/// [`crate::replacer::ReplacementResult`].
#[derive(Error, Debug)]
pub enum Error {
    /// An error related to file system I/O.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An error that occurred while compiling the literal matcher.
    #[error("Pattern compilation failed: {0}")]
    Regex(#[from] regex::Error),

    /// Invalid command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// An invalid setting reached the library.
    #[error("Config error: {0}")]
    Config(String),

    /// The directory to process does not exist or is not a directory.
    #[error("Directory not found: {}", .0.display())]
    TargetMissing(PathBuf),

    /// An error that occurred during the processing of a single file.
    #[error("File processing failed for {}: {source}", .path.display())]
    Processing {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An error from the `ignore` crate, which is used for directory traversal.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// An error related to persisting a temporary file.
    #[error("Tempfile error: {0}")]
    TempFile(#[from] tempfile::PersistError),

    /// An error related to JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wraps any error with the path of the file it happened on.
    pub fn processing<E>(path: impl Into<PathBuf>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Error::Processing {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// A convenient type alias for `Result<T, hostswap::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Config(s.to_string())
    }
}
