use crate::cli::{Args, OutputFormat};
use crate::errors::{Error, Result};
use crate::replacer::ApplyOptions;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Everything a run needs, fixed before the first file is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// The directory to walk.
    pub root_directory: PathBuf,
    /// The literal value to look for. Never empty.
    pub old_value: String,
    /// The value written in its place.
    pub new_value: String,
    /// Report only, never modify files.
    pub dry_run: bool,
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Extensions to process, without the leading dot. Empty means all.
    pub allowed_extensions: BTreeSet<String>,
    /// Directory names whose subtrees are skipped.
    pub excluded_dir_names: BTreeSet<String>,
    /// Write a `.bak` copy before modifying a file.
    pub backup: bool,
    /// Skip the confirmation prompt.
    pub assume_yes: bool,
    /// How results are reported.
    pub format: OutputFormat,
}

impl RunConfig {
    /// Builds and checks a `RunConfig` from parsed command-line arguments.
    ///
    /// Fails with [`Error::TargetMissing`] if the directory does not exist and
    /// with [`Error::Usage`] if the old value is empty.
    pub fn from_args(args: Args) -> Result<Self> {
        if args.old_value.is_empty() {
            return Err(Error::Usage("OLD_VALUE must not be empty".to_string()));
        }
        if !args.directory.is_dir() {
            return Err(Error::TargetMissing(args.directory));
        }

        Ok(Self {
            root_directory: args.directory,
            old_value: args.old_value,
            new_value: args.new_value,
            dry_run: args.dry_run,
            recursive: !args.no_recursive,
            allowed_extensions: normalize_extensions(&args.extensions),
            excluded_dir_names: args
                .exclude
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            backup: args.backup,
            assume_yes: args.yes,
            format: args.format,
        })
    }

    /// The per-file options handed to the replacer.
    pub fn apply_options(&self) -> ApplyOptions {
        ApplyOptions {
            dry_run: self.dry_run,
            backup: self.backup,
        }
    }
}

/// Trims entries and strips a leading `.`, keeping case intact.
fn normalize_extensions(extensions: &[String]) -> BTreeSet<String> {
    extensions
        .iter()
        .map(|s| s.trim().trim_start_matches('.'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_from_args_normalizes_lists() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_str().unwrap();
        let args = parse(&[
            "hostswap",
            "-e",
            ".conf, YAML,",
            "-x",
            "vendor,,dist",
            "-n",
            dir,
            "a.example",
            "b.example",
        ]);

        let config = RunConfig::from_args(args).unwrap();
        assert!(!config.recursive);
        assert_eq!(
            config.allowed_extensions,
            BTreeSet::from(["YAML".to_string(), "conf".to_string()])
        );
        assert_eq!(
            config.excluded_dir_names,
            BTreeSet::from(["dist".to_string(), "vendor".to_string()])
        );
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let args = parse(&["hostswap", missing.to_str().unwrap(), "a", "b"]);

        let err = RunConfig::from_args(args).unwrap_err();
        assert!(matches!(err, Error::TargetMissing(p) if p == missing));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("hosts");
        std::fs::write(&file, "x").unwrap();
        let args = parse(&["hostswap", file.to_str().unwrap(), "a", "b"]);

        assert!(matches!(
            RunConfig::from_args(args),
            Err(Error::TargetMissing(_))
        ));
    }

    #[test]
    fn test_apply_options_follow_flags() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_str().unwrap();
        let args = parse(&["hostswap", "-d", "-b", dir, "a", "b"]);
        let config = RunConfig::from_args(args).unwrap();

        let options = config.apply_options();
        assert!(options.dry_run);
        assert!(options.backup);
    }
}
