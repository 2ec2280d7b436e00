//! `hostswap` is a library for swapping a hostname or IP address across a directory tree.
//!
//! It provides the core logic for the `hostswap` command-line tool but can also be
//! used on its own. The main components are:
//!
//! - `validate`: Syntactic checks that tell IPv4 addresses and hostnames apart.
//! - `classifier`: Text detection and extension filtering for candidate files.
//! - `walker`: Lazy directory traversal with depth limits and name-based pruning.
//! - `Replacer`: Literal find-and-replace inside one file, with dry runs,
//!   backups and atomic writes.
//! - `runner`: Ties the pieces together for a single run and reports the results.
//!
//! Processing is deliberately sequential: one file at a time, in traversal order.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod errors;
pub mod prompt;
pub mod replacer;
pub mod report;
pub mod runner;
pub mod validate;
pub mod walker;

// Re-export main types for easier access by library users.
pub use config::RunConfig;
pub use errors::{Error, Result};
pub use replacer::{ReplaceStatus, ReplacementResult, Replacer};
pub use report::{Reporter, RunSummary};
pub use runner::{Outcome, run_replace};
