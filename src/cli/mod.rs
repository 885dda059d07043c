//! cli
//!
//! Command-line interface layer for Modelex.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and flags
//! - Delegate to the export command handler
//! - Does NOT touch the tree source or the filesystem directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! [`commands::export`], which owns the async runtime for the duration of
//! the run.

pub mod args;
pub mod commands;

pub use args::Cli;

use anyhow::Result;
use std::path::PathBuf;

/// Per-invocation context derived from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Directory to treat as the working directory (output lands here)
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled
    pub debug: bool,
    /// Minimal output
    pub quiet: bool,
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::export(&ctx, &cli.tree, cli.branch.as_deref())
}
