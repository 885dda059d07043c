//! source
//!
//! Abstraction for remote tree-hosting services.
//!
//! # Architecture
//!
//! The `Source` trait defines the interface for acquiring a working copy of
//! a versioned design-model tree and projecting its structure. The export
//! command uses the [`create_source`] factory function rather than importing
//! specific source implementations directly.
//!
//! Source operations never mutate the tree: the exporter only reads
//! projections and produces local artifacts.
//!
//! # Modules
//!
//! - `traits`: Core `Source`/`TreeModel` traits and projection types
//! - [`http`]: REST implementation against a tree-hosting service
//! - [`mock`]: In-memory implementation for deterministic testing

pub mod http;
pub mod mock;
mod traits;

pub use traits::*;

use crate::core::config::Config;
use crate::core::types::{BranchName, TreeId};

/// Branch selectors treated as "use the repository's default branch".
pub const DEFAULT_BRANCH_ALIASES: [&str; 2] = ["trunk", "main"];

/// Create the configured source.
///
/// # Errors
///
/// Returns `SourceError::NotConfigured` when no remote base URL is set.
pub fn create_source(config: &Config) -> Result<Box<dyn Source>, SourceError> {
    let base_url = config.base_url().ok_or_else(|| {
        SourceError::NotConfigured(
            "no remote.base_url configured; set it in the modelex config file".into(),
        )
    })?;
    Ok(Box::new(http::HttpSource::new(base_url, config.token())))
}

/// Resolve a branch selector into a concrete branch name.
///
/// An absent or empty selector, or one of the [`DEFAULT_BRANCH_ALIASES`],
/// resolves by querying the repository's versioning-system kind and
/// substituting its concrete default branch. Any other selector is validated
/// and used as-is; the kind query is only issued when actually needed.
pub async fn resolve_branch(
    source: &dyn Source,
    tree: &TreeId,
    selector: Option<&str>,
) -> Result<BranchName, SourceError> {
    match selector {
        Some(name) if !name.is_empty() && !DEFAULT_BRANCH_ALIASES.contains(&name) => {
            BranchName::new(name).map_err(|e| SourceError::InvalidSelector(e.to_string()))
        }
        _ => {
            let kind = source.repository_kind(tree).await?;
            BranchName::new(kind.default_branch())
                .map_err(|e| SourceError::InvalidSelector(e.to_string()))
        }
    }
}
