//! source::traits
//!
//! Source trait definition for interacting with remote tree-hosting services.
//!
//! # Design
//!
//! The `Source` trait is async because source operations involve network I/O.
//! All methods return `Result` to handle API errors gracefully.
//!
//! A source hands out an isolated [`WorkingCopy`] of a tree at a branch, and
//! opening that working copy yields a [`TreeModel`]: a read-only projection
//! of the tree's modules, folders, and documents. Document content is loaded
//! on demand through opaque [`UnitHandle`]s and never written back.
//!
//! # Example
//!
//! ```ignore
//! use modelex::source::{Source, TreeModel};
//! use modelex::core::types::{BranchName, TreeId};
//!
//! async fn open(source: &dyn Source) -> Result<(), SourceError> {
//!     let tree = TreeId::new("acme-crm").unwrap();
//!     let branch = BranchName::new("main").unwrap();
//!     let wc = source.create_working_copy(&tree, &branch).await?;
//!     let model = source.open_model(&wc).await?;
//!     for module in model.modules() {
//!         println!("{}", module.name);
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::core::replay::{render_replay_body, Replay};
use crate::core::types::{BranchName, QualifiedName, TreeId, UtcTimestamp, VcsKind};

/// Errors from source operations.
///
/// These error types map to common failure modes when interacting with a
/// remote tree-hosting service.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// Authentication is required but not available.
    #[error("authentication required")]
    AuthRequired,

    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The service refused to create a working copy.
    #[error("working copy creation failed: {0}")]
    WorkingCopyFailed(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The service returned a payload this client could not decode.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// The source is not configured.
    #[error("source not configured: {0}")]
    NotConfigured(String),

    /// The branch selector is not usable.
    #[error("invalid branch selector: {0}")]
    InvalidSelector(String),
}

/// Opaque load token for a unit, minted by the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitHandle(String);

impl UnitHandle {
    /// Wrap a source-assigned unit id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UnitHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document reference within a module or folder.
#[derive(Debug, Clone)]
pub struct DocumentRef {
    /// Local display name
    pub name: String,
    /// Repository-unique dotted name
    pub qualified_name: QualifiedName,
    /// Load token for the document's content
    pub handle: UnitHandle,
}

/// A folder reference, owning ordered documents and child folders.
#[derive(Debug, Clone)]
pub struct FolderRef {
    /// Display name
    pub name: String,
    /// Documents in sequence order
    pub documents: Vec<DocumentRef>,
    /// Child folders in sequence order
    pub folders: Vec<FolderRef>,
}

/// A module reference: a named top-level container.
#[derive(Debug, Clone)]
pub struct ModuleRef {
    /// Module name
    pub name: String,
    /// Load token for the module's domain model
    pub domain_model: UnitHandle,
    /// Load token for the module's security document
    pub module_security: UnitHandle,
    /// Top-level documents in sequence order
    pub documents: Vec<DocumentRef>,
    /// Top-level folders in sequence order
    pub folders: Vec<FolderRef>,
}

/// A loaded unit: kind tag plus opaque structural content.
///
/// The content's internal structure is not modeled here; the export engine
/// only requires the two [`Replay`] capabilities.
#[derive(Debug, Clone)]
pub struct LoadedUnit {
    /// Unit kind tag (e.g. `DomainModel`, `Document`)
    pub kind: String,
    /// Opaque structural content
    pub content: Value,
}

impl Replay for LoadedUnit {
    fn snapshot(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.content)
    }

    fn replay_body(&self) -> String {
        render_replay_body(&self.kind, &self.content)
    }
}

/// A temporary, isolated materialization of a tree at a branch.
#[derive(Debug, Clone)]
pub struct WorkingCopy {
    /// Source-assigned working copy id
    pub id: String,
    /// The tree this working copy was taken from
    pub tree: TreeId,
    /// The branch it materializes
    pub branch: BranchName,
    /// When the working copy was created
    pub created_at: UtcTimestamp,
}

/// The Source trait for interacting with remote tree-hosting services.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SourceError>`. Callers should handle:
/// - `AuthRequired` / `AuthFailed`: configure a token
/// - `NotFound`: the tree or branch doesn't exist
/// - `WorkingCopyFailed`: retried manually by the user; the run exits cleanly
/// - `NetworkError`: check connectivity
#[async_trait]
pub trait Source: Send + Sync {
    /// Get the source name (e.g., "http", "mock").
    fn name(&self) -> &'static str;

    /// Query the versioning-system kind behind a tree's repository.
    async fn repository_kind(&self, tree: &TreeId) -> Result<VcsKind, SourceError>;

    /// Create a temporary working copy of a tree at a branch.
    async fn create_working_copy(
        &self,
        tree: &TreeId,
        branch: &BranchName,
    ) -> Result<WorkingCopy, SourceError>;

    /// Open the model projection of a working copy.
    async fn open_model(&self, wc: &WorkingCopy) -> Result<Box<dyn TreeModel>, SourceError>;
}

/// A read-only projection of a working copy's tree.
///
/// Structure (modules, folders, document references) is available
/// synchronously; unit content is loaded on demand.
#[async_trait]
pub trait TreeModel: Send + Sync {
    /// The tree's modules, in sequence order.
    fn modules(&self) -> &[ModuleRef];

    /// The tree's navigation documents, in collection order.
    ///
    /// These carry no stable name and are addressed by position.
    fn navigation_documents(&self) -> &[UnitHandle];

    /// The tree's project-security documents, in collection order.
    fn project_securities(&self) -> &[UnitHandle];

    /// Load a unit's content.
    async fn load(&self, handle: &UnitHandle) -> Result<LoadedUnit, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn source_error_display() {
        assert_eq!(
            format!("{}", SourceError::AuthRequired),
            "authentication required"
        );
        assert_eq!(
            format!("{}", SourceError::NotFound("tree 'x'".into())),
            "not found: tree 'x'"
        );
        assert_eq!(
            format!(
                "{}",
                SourceError::ApiError {
                    status: 422,
                    message: "bad branch".into()
                }
            ),
            "API error: 422 - bad branch"
        );
        assert_eq!(
            format!("{}", SourceError::WorkingCopyFailed("branch gone".into())),
            "working copy creation failed: branch gone"
        );
    }

    #[test]
    fn loaded_unit_snapshot_is_pretty_json() {
        let unit = LoadedUnit {
            kind: "Document".into(),
            content: json!({"name": "Customer"}),
        };
        let snapshot = unit.snapshot().unwrap();
        assert_eq!(snapshot, "{\n  \"name\": \"Customer\"\n}");
    }

    #[test]
    fn loaded_unit_replay_body_uses_kind() {
        let unit = LoadedUnit {
            kind: "Document".into(),
            content: json!({}),
        };
        assert!(unit
            .replay_body()
            .contains("model.create('Document', parent)"));
    }
}
