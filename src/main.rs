//! The main entry point for the `hostswap` command-line application.
//!
//! This file is responsible for parsing command-line arguments, setting up
//! logging, and handing a validated `RunConfig` to the library.
//!
//! Logging: set `RUST_LOG=hostswap=debug` (or pass `--verbose`) to see
//! diagnostics on stderr.

use hostswap::classifier::detector_for_platform;
use hostswap::cli::{self, Args};
use hostswap::errors::{Error, Result};
use hostswap::prompt::PromptConfirm;
use hostswap::{Reporter, RunConfig, runner};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            // Help and version go to stdout and succeed; everything else is a usage error.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, Error::Usage(_)) {
                eprintln!("\nFor more information, try 'hostswap --help'.");
            }
            ExitCode::FAILURE
        }
    }
}

/// RUST_LOG overrides; --verbose => debug; else warnings only.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "hostswap=debug"
        } else {
            "hostswap=warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

fn run(args: Args) -> Result<()> {
    let config = RunConfig::from_args(args)?;
    let detector = detector_for_platform();
    let mut confirm = PromptConfirm::stdio();
    let mut reporter = Reporter::new(
        config.format,
        config.dry_run,
        io::stdout().lock(),
        io::stderr(),
    );

    runner::run_replace(&config, detector.as_ref(), &mut confirm, &mut reporter)?;
    Ok(())
}
