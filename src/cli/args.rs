//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory (output lands there)
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::Parser;
use std::path::PathBuf;

/// Modelex - export a versioned design-model repository
///
/// Walks the tree and writes, for every node, a canonical structural
/// snapshot (`.json`) and a regeneration script (`.js`) into `Output/`.
#[derive(Parser, Debug)]
#[command(name = "mx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Identifier of the tree to export (from the hosting service)
    pub tree: String,

    /// Branch to export; omitted, empty, `trunk`, or `main` selects the
    /// repository's default branch
    pub branch: Option<String>,

    /// Run as if modelex was started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tree_and_branch() {
        let cli = Cli::try_parse_from(["mx", "acme-crm", "release/2.4"]).unwrap();
        assert_eq!(cli.tree, "acme-crm");
        assert_eq!(cli.branch.as_deref(), Some("release/2.4"));
        assert!(!cli.quiet);
    }

    #[test]
    fn branch_is_optional() {
        let cli = Cli::try_parse_from(["mx", "acme-crm"]).unwrap();
        assert!(cli.branch.is_none());
    }

    #[test]
    fn tree_is_required() {
        assert!(Cli::try_parse_from(["mx"]).is_err());
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from(["mx", "--quiet", "--debug", "--cwd", "/tmp", "t1"]).unwrap();
        assert!(cli.quiet);
        assert!(cli.debug);
        assert_eq!(cli.cwd.as_deref(), Some(std::path::Path::new("/tmp")));
    }
}
