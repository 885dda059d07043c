//! export::walker
//!
//! Depth-first traversal of a module's folder tree.
//!
//! # Algorithm
//!
//! For each folder: emit its creation statement, export every document in
//! sequence order, then recurse into child folders. Documents are always
//! processed strictly before sibling folders, so the accumulated script
//! never references a folder identifier before it has been created. There
//! is no backtracking and no early exit; the first failure aborts the walk.

use std::future::Future;
use std::pin::Pin;

use crate::core::naming::replay_fn_name;
use crate::source::{DocumentRef, FolderRef, TreeModel};
use crate::ui::output::{self, Verbosity};

use super::artifacts::{ArtifactKind, ArtifactWriter};
use super::script::ScriptBuffer;
use super::serialize::serialize;
use super::ExportError;

/// Traversal state shared across one export run.
pub(crate) struct Walker<'a> {
    pub model: &'a dyn TreeModel,
    pub writer: &'a ArtifactWriter,
    pub verbosity: Verbosity,
    /// Documents exported so far (folders and top level).
    pub documents: usize,
}

impl<'a> Walker<'a> {
    /// Export one document and append its replay call to the module script.
    pub async fn export_document(
        &mut self,
        document: &DocumentRef,
        parent_folder_name: &str,
        buffer: &mut ScriptBuffer,
        depth: usize,
    ) -> Result<(), ExportError> {
        output::print(
            format!("{}Document: {}", output::indent(depth), document.name),
            self.verbosity,
        );
        let unit = self.model.load(&document.handle).await?;
        let artifact = serialize(&unit, document.qualified_name.as_str())?;
        output::debug(
            format!(
                "{} snapshot fingerprint {}",
                document.qualified_name,
                artifact.fingerprint()
            ),
            self.verbosity,
        );
        self.writer.write_pair(
            ArtifactKind::Document,
            document.qualified_name.as_str(),
            &artifact,
        )?;
        buffer.replay_call(
            &replay_fn_name(&document.qualified_name),
            parent_folder_name,
        )?;
        self.documents += 1;
        Ok(())
    }

    /// Walk one folder: creation statement, documents, then child folders.
    ///
    /// Boxed because the recursion depth follows the tree's folder nesting.
    pub fn walk_folder<'b>(
        &'b mut self,
        folder: &'b FolderRef,
        parent_name: &'b str,
        buffer: &'b mut ScriptBuffer,
        depth: usize,
    ) -> Pin<Box<dyn Future<Output = Result<(), ExportError>> + Send + 'b>> {
        Box::pin(async move {
            output::print(
                format!("{}Folder: {}", output::indent(depth), folder.name),
                self.verbosity,
            );
            buffer.declare_folder(&folder.name, parent_name)?;

            for document in &folder.documents {
                self.export_document(document, &folder.name, buffer, depth + 1)
                    .await?;
            }

            for child in &folder.folders {
                self.walk_folder(child, &folder.name, buffer, depth + 1)
                    .await?;
            }

            Ok(())
        })
    }
}
