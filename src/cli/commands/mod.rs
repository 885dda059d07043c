//! cli::commands
//!
//! Command handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Runs the operation against the configured source
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! The export command is async because it involves network I/O. The sync
//! wrapper owns a tokio runtime and runs the async implementation to
//! completion with `block_on`.

mod export;

pub use export::{export, export_with_source};
