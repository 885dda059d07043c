//! cli::commands::export
//!
//! Export a tree into snapshot and regeneration-script artifacts.
//!
//! # Algorithm
//!
//! 1. Resolve the branch selector (default-branch aliases query the
//!    repository kind)
//! 2. Create a temporary working copy - a refusal here is the one caught
//!    failure class: it is logged and the run exits cleanly with zero
//!    artifacts written
//! 3. Open the model projection
//! 4. Create `Output/`, take the output lock, and run the export engine
//!
//! Any failure after working-copy acquisition aborts the run; there is no
//! partial-state cleanup and no retry.
//!
//! # Example
//!
//! ```bash
//! # Export the default branch
//! mx acme-crm
//!
//! # Export a specific branch
//! mx acme-crm release/2.4
//! ```

use anyhow::Result;

use crate::cli::Context;
use crate::core::config::Config;
use crate::core::types::TreeId;
use crate::export::{self, ArtifactWriter, OutputLock};
use crate::source::{self, Source};
use crate::ui::output::{self, Verbosity};

/// Run the export command.
///
/// This is a synchronous wrapper that uses tokio to run the async
/// implementation.
pub fn export(ctx: &Context, tree: &str, branch: Option<&str>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(export_async(ctx, tree, branch))
}

async fn export_async(ctx: &Context, tree: &str, branch: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let source = source::create_source(&config)?;
    export_with_source(ctx, source.as_ref(), tree, branch).await
}

/// Export against an explicit source (also used by integration tests).
pub async fn export_with_source(
    ctx: &Context,
    source: &dyn Source,
    tree: &str,
    branch: Option<&str>,
) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);

    let tree = TreeId::new(tree)?;
    let derived_name = format!("Tree-{}", tree);
    let branch = source::resolve_branch(source, &tree, branch).await?;

    let working_copy = match source.create_working_copy(&tree, &branch).await {
        Ok(wc) => wc,
        Err(err) => {
            output::error(format!(
                "failed to create working copy for tree {}, {}, branch {}: {}",
                tree, derived_name, branch, err
            ));
            return Ok(());
        }
    };

    output::print(format!("Opening {}, {}", tree, derived_name), verbosity);
    output::debug(
        format!(
            "working copy {} created at {}",
            working_copy.id, working_copy.created_at
        ),
        verbosity,
    );

    let model = source.open_model(&working_copy).await?;

    let root = match &ctx.cwd {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };
    let writer = ArtifactWriter::create(&root)?;
    let _lock = OutputLock::acquire(writer.dir())?;

    output::print("Load documents", verbosity);
    let summary = export::run(model.as_ref(), &writer, verbosity).await?;
    output::print(format!("Exported {}", summary), verbosity);

    Ok(())
}
