use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use std::path::PathBuf;

/// Directory names skipped unless `--exclude` says otherwise.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".svn",
    "__pycache__",
    "node_modules",
    ".DS_Store",
];

/// Swap a hostname or IP address across every text file in a directory tree.
///
/// `hostswap` walks DIRECTORY, picks out the text files that pass the
/// extension and exclusion filters, and replaces every literal occurrence of
/// OLD_VALUE with NEW_VALUE. Nothing is written before you confirm, and
/// `--dry-run` only reports what would change.
#[derive(Parser, Debug)]
#[command(
    name = "hostswap",
    author,
    version,
    about = "Swap a hostname or IP address across every text file in a directory tree",
    long_about = None,
    after_help = "EXAMPLES:
  hostswap --dry-run /etc/nginx old.example.com new.example.com
  hostswap -b -e conf,yaml ./deploy 10.0.0.12 10.0.4.12
  hostswap -n -x vendor,dist . db1.internal db2.internal"
)]
pub struct Args {
    /// Report intended changes without modifying any file.
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Recurse into subdirectories (the default).
    #[arg(short = 'r', long, overrides_with = "no_recursive")]
    pub recursive: bool,

    /// Only process files directly inside DIRECTORY.
    #[arg(short = 'n', long, overrides_with = "recursive")]
    pub no_recursive: bool,

    /// A comma-separated allow-list of file extensions (e.g. `conf,yaml`).
    #[arg(
        short = 'e',
        long = "extensions",
        value_delimiter = ',',
        env = "HOSTSWAP_EXTENSIONS"
    )]
    pub extensions: Vec<String>,

    /// A comma-separated list of directory names to skip.
    #[arg(
        short = 'x',
        long = "exclude",
        value_delimiter = ',',
        env = "HOSTSWAP_EXCLUDE",
        default_values_t = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect::<Vec<_>>()
    )]
    pub exclude: Vec<String>,

    /// Write `<file>.bak` before modifying a file.
    #[arg(short = 'b', long)]
    pub backup: bool,

    /// Do not ask for confirmation before modifying files.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Report format.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print debug diagnostics on stderr (overridden by `RUST_LOG`).
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// The directory to process.
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// The hostname or IP address to replace.
    #[arg(value_name = "OLD_VALUE", value_parser = NonEmptyStringValueParser::new())]
    pub old_value: String,

    /// The hostname or IP address to put in its place.
    #[arg(value_name = "NEW_VALUE")]
    pub new_value: String,
}

/// Defines the possible report formats.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines and a summary block.
    #[default]
    Text,
    /// One JSON object per line, ending with a summary object.
    Json,
}

/// Parses command-line arguments, leaving error handling to the caller.
pub fn parse_args() -> Result<Args, clap::Error> {
    Args::try_parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["hostswap", "dir", "a.example", "b.example"]).unwrap();
        assert!(!args.dry_run);
        assert!(!args.no_recursive);
        assert!(!args.backup);
        assert!(args.extensions.is_empty());
        assert_eq!(args.exclude, DEFAULT_EXCLUDES);
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_last_recursion_flag_wins() {
        let args =
            Args::try_parse_from(["hostswap", "-r", "-n", "dir", "a", "b"]).unwrap();
        assert!(args.no_recursive);
        assert!(!args.recursive);

        let args =
            Args::try_parse_from(["hostswap", "-n", "-r", "dir", "a", "b"]).unwrap();
        assert!(!args.no_recursive);
    }

    #[test]
    fn test_comma_separated_lists() {
        let args = Args::try_parse_from([
            "hostswap", "-e", "conf,.yaml", "-x", "vendor,dist", "dir", "a", "b",
        ])
        .unwrap();
        assert_eq!(args.extensions, vec!["conf", ".yaml"]);
        assert_eq!(args.exclude, vec!["vendor", "dist"]);
    }

    #[test]
    fn test_empty_old_value_is_a_usage_error() {
        assert!(Args::try_parse_from(["hostswap", "dir", "", "b"]).is_err());
    }

    #[test]
    fn test_missing_positionals_is_a_usage_error() {
        let err = Args::try_parse_from(["hostswap", "dir", "a"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
