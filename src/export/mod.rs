//! export
//!
//! The traversal/export engine.
//!
//! # Architecture
//!
//! [`run`] drives the whole export: for each module of the tree, in sequence
//! order, it exports the domain model, walks top-level documents and folders
//! while accumulating the module's regeneration script, flushes that script,
//! and exports the module security document. After all modules it exports
//! the tree's positional collections (navigation and project security).
//!
//! Everything is sequential and order-preserving: every load-and-export step
//! completes before the next begins, and the per-module script buffer is
//! exclusively owned by the running traversal.
//!
//! # Modules
//!
//! - [`script`] - Per-module script accumulation and identifier tracking
//! - [`serialize`] - Dual serialization of one loaded unit
//! - `walker` - Depth-first folder traversal
//! - [`artifacts`] - File naming and writing
//! - [`lock`] - Exclusive output-directory lock

pub mod artifacts;
pub mod lock;
pub mod script;
pub mod serialize;
mod walker;

pub use artifacts::{ArtifactKind, ArtifactWriter, OUTPUT_DIR_NAME};
pub use lock::{LockError, OutputLock};
pub use script::{ScriptBuffer, ScriptError, SCRIPT_PREAMBLE};
pub use serialize::{serialize, DualArtifact};

use thiserror::Error;

use crate::core::naming::synthetic_fn_name;
use crate::source::{SourceError, TreeModel, UnitHandle};
use crate::ui::output::{self, Verbosity};

/// Errors from an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The tree collaborator failed (document load, model projection).
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Script accumulation failed (identifier collision).
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// A unit's content could not be rendered as a snapshot.
    #[error("snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Output locking failed.
    #[error(transparent)]
    Lock(#[from] LockError),

    /// Artifact writing failed.
    #[error("artifact write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Counts of what one export run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Modules exported (one `MOD-` script each)
    pub modules: usize,
    /// Documents exported (top level and inside folders)
    pub documents: usize,
    /// Navigation documents exported
    pub navigation_documents: usize,
    /// Project-security documents exported
    pub project_securities: usize,
}

impl std::fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} modules, {} documents, {} navigation documents, {} project securities",
            self.modules, self.documents, self.navigation_documents, self.project_securities
        )
    }
}

/// Export a whole tree model into the output directory.
///
/// # Errors
///
/// The first failure aborts the run; artifacts already written stay on disk
/// (correctness of the exported set is all-or-nothing per run).
pub async fn run(
    model: &dyn TreeModel,
    writer: &ArtifactWriter,
    verbosity: Verbosity,
) -> Result<ExportSummary, ExportError> {
    let mut walker = walker::Walker {
        model,
        writer,
        verbosity,
        documents: 0,
    };
    let mut summary = ExportSummary::default();

    for module in model.modules() {
        output::print(format!("Module: {}", module.name), verbosity);

        let domain_model = model.load(&module.domain_model).await?;
        let artifact = serialize(&domain_model, &synthetic_fn_name("DM", &module.name))?;
        writer.write_pair(ArtifactKind::DomainModel, &module.name, &artifact)?;

        let mut buffer = ScriptBuffer::for_module(&module.name);

        for document in &module.documents {
            // Top-level documents live in an implicit root folder equal to
            // the module itself.
            walker
                .export_document(document, &module.name, &mut buffer, 1)
                .await?;
        }

        for folder in &module.folders {
            walker
                .walk_folder(folder, &module.name, &mut buffer, 1)
                .await?;
        }

        writer.write_script(ArtifactKind::ModuleScript, &module.name, buffer.as_str())?;

        let module_security = model.load(&module.module_security).await?;
        let artifact = serialize(&module_security, &synthetic_fn_name("MSC", &module.name))?;
        writer.write_pair(ArtifactKind::ModuleSecurity, &module.name, &artifact)?;

        summary.modules += 1;
    }

    summary.navigation_documents = export_positional(
        model,
        writer,
        model.navigation_documents(),
        ArtifactKind::Navigation,
        "navigation document",
        verbosity,
    )
    .await?;

    summary.project_securities = export_positional(
        model,
        writer,
        model.project_securities(),
        ArtifactKind::ProjectSecurity,
        "project security",
        verbosity,
    )
    .await?;

    summary.documents = walker.documents;
    Ok(summary)
}

/// Export a flat, order-significant collection addressed by position.
async fn export_positional(
    model: &dyn TreeModel,
    writer: &ArtifactWriter,
    handles: &[UnitHandle],
    kind: ArtifactKind,
    label: &str,
    verbosity: Verbosity,
) -> Result<usize, ExportError> {
    for (position, handle) in handles.iter().enumerate() {
        output::print(format!("Opening {} {}", label, position), verbosity);
        let unit = model.load(handle).await?;
        let name = position.to_string();
        let artifact = serialize(&unit, &synthetic_fn_name(kind.prefix(), &name))?;
        writer.write_pair(kind, &name, &artifact)?;
    }
    Ok(handles.len())
}
