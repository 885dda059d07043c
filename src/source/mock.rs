//! source::mock
//!
//! Mock source implementation for deterministic testing.
//!
//! # Design
//!
//! The mock source provides a deterministic implementation of the `Source`
//! trait for use in tests. Trees are registered through a builder API, stored
//! in memory, and served without any I/O. Failure scenarios are configurable
//! per operation via [`FailOn`].
//!
//! # Example
//!
//! ```
//! use modelex::source::mock::{MockSource, ModuleBuilder, TreeBuilder};
//! use modelex::source::{Source, TreeModel};
//! use modelex::core::types::{BranchName, TreeId, VcsKind};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let source = MockSource::new();
//! let tree = TreeId::new("acme-crm").unwrap();
//! source.register(
//!     &tree,
//!     TreeBuilder::new(VcsKind::Git).module(
//!         ModuleBuilder::new("Sales").document("Customer", json!({"name": "Customer"})),
//!     ),
//! );
//!
//! let branch = BranchName::new("main").unwrap();
//! let wc = source.create_working_copy(&tree, &branch).await.unwrap();
//! let model = source.open_model(&wc).await.unwrap();
//! assert_eq!(model.modules().len(), 1);
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::traits::{
    DocumentRef, FolderRef, LoadedUnit, ModuleRef, Source, SourceError, TreeModel, UnitHandle,
    WorkingCopy,
};
use crate::core::types::{BranchName, QualifiedName, TreeId, UtcTimestamp, VcsKind};

/// Mock source for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    inner: Arc<Mutex<MockSourceInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockSourceInner {
    /// Registered trees by id.
    trees: HashMap<String, CompiledTree>,
    /// Loadable unit content by handle id.
    units: HashMap<String, LoadedUnit>,
    /// Operation to fail (for testing error paths).
    fail_on: Option<FailOn>,
}

/// A registered tree compiled into model references.
#[derive(Debug, Clone)]
struct CompiledTree {
    kind: VcsKind,
    modules: Vec<ModuleRef>,
    navigation: Vec<UnitHandle>,
    project_securities: Vec<UnitHandle>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail repository_kind with the given error.
    RepositoryKind(SourceError),
    /// Fail create_working_copy with the given error.
    CreateWorkingCopy(SourceError),
    /// Fail open_model with the given error.
    OpenModel(SourceError),
    /// Fail load of the given handle with the given error.
    Load(UnitHandle, SourceError),
}

impl MockSource {
    /// Create an empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tree under an id, compiling the builder into model refs.
    pub fn register(&self, tree: &TreeId, builder: TreeBuilder) {
        let mut inner = self.inner.lock().unwrap();
        let compiled = builder.compile(&mut inner.units);
        inner.trees.insert(tree.as_str().to_string(), compiled);
    }

    /// Configure an operation to fail.
    pub fn fail_on(&self, fail: FailOn) {
        self.inner.lock().unwrap().fail_on = Some(fail);
    }
}

#[async_trait]
impl Source for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn repository_kind(&self, tree: &TreeId) -> Result<VcsKind, SourceError> {
        let inner = self.inner.lock().unwrap();
        if let Some(FailOn::RepositoryKind(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        inner
            .trees
            .get(tree.as_str())
            .map(|t| t.kind)
            .ok_or_else(|| SourceError::NotFound(format!("tree '{}'", tree)))
    }

    async fn create_working_copy(
        &self,
        tree: &TreeId,
        branch: &BranchName,
    ) -> Result<WorkingCopy, SourceError> {
        let inner = self.inner.lock().unwrap();
        if let Some(FailOn::CreateWorkingCopy(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        if !inner.trees.contains_key(tree.as_str()) {
            return Err(SourceError::NotFound(format!("tree '{}'", tree)));
        }
        Ok(WorkingCopy {
            id: Uuid::new_v4().to_string(),
            tree: tree.clone(),
            branch: branch.clone(),
            created_at: UtcTimestamp::now(),
        })
    }

    async fn open_model(&self, wc: &WorkingCopy) -> Result<Box<dyn TreeModel>, SourceError> {
        let inner = self.inner.lock().unwrap();
        if let Some(FailOn::OpenModel(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        let tree = inner
            .trees
            .get(wc.tree.as_str())
            .ok_or_else(|| SourceError::NotFound(format!("tree '{}'", wc.tree)))?;
        Ok(Box::new(MockModel {
            modules: tree.modules.clone(),
            navigation: tree.navigation.clone(),
            project_securities: tree.project_securities.clone(),
            inner: Arc::clone(&self.inner),
        }))
    }
}

/// Model projection served from the registered tree.
#[derive(Debug)]
struct MockModel {
    modules: Vec<ModuleRef>,
    navigation: Vec<UnitHandle>,
    project_securities: Vec<UnitHandle>,
    inner: Arc<Mutex<MockSourceInner>>,
}

#[async_trait]
impl TreeModel for MockModel {
    fn modules(&self) -> &[ModuleRef] {
        &self.modules
    }

    fn navigation_documents(&self) -> &[UnitHandle] {
        &self.navigation
    }

    fn project_securities(&self) -> &[UnitHandle] {
        &self.project_securities
    }

    async fn load(&self, handle: &UnitHandle) -> Result<LoadedUnit, SourceError> {
        let inner = self.inner.lock().unwrap();
        if let Some(FailOn::Load(target, err)) = &inner.fail_on {
            if target == handle {
                return Err(err.clone());
            }
        }
        inner
            .units
            .get(handle.as_str())
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("unit '{}'", handle)))
    }
}

/// Builder for a registered tree.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    kind: Option<VcsKind>,
    modules: Vec<ModuleBuilder>,
    navigation: Vec<Value>,
    project_securities: Vec<Value>,
}

impl TreeBuilder {
    /// Start a tree backed by the given versioning-system kind.
    pub fn new(kind: VcsKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Append a module (sequence order is registration order).
    pub fn module(mut self, module: ModuleBuilder) -> Self {
        self.modules.push(module);
        self
    }

    /// Append a navigation document (addressed by position).
    pub fn navigation(mut self, content: Value) -> Self {
        self.navigation.push(content);
        self
    }

    /// Append a project-security document (addressed by position).
    pub fn project_security(mut self, content: Value) -> Self {
        self.project_securities.push(content);
        self
    }

    fn compile(self, units: &mut HashMap<String, LoadedUnit>) -> CompiledTree {
        let modules = self
            .modules
            .into_iter()
            .map(|module| module.compile(units))
            .collect();
        let navigation = self
            .navigation
            .into_iter()
            .map(|content| mint(units, "Navigation", content))
            .collect();
        let project_securities = self
            .project_securities
            .into_iter()
            .map(|content| mint(units, "ProjectSecurity", content))
            .collect();
        CompiledTree {
            kind: self.kind.unwrap_or(VcsKind::Git),
            modules,
            navigation,
            project_securities,
        }
    }
}

/// Builder for one module.
#[derive(Debug)]
pub struct ModuleBuilder {
    name: String,
    domain_model: Value,
    module_security: Value,
    documents: Vec<(String, Value)>,
    folders: Vec<FolderBuilder>,
}

impl ModuleBuilder {
    /// Start a module with empty domain model and security documents.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain_model: Value::Object(Default::default()),
            module_security: Value::Object(Default::default()),
            documents: Vec::new(),
            folders: Vec::new(),
        }
    }

    /// Set the module's domain model content.
    pub fn domain_model(mut self, content: Value) -> Self {
        self.domain_model = content;
        self
    }

    /// Set the module's security document content.
    pub fn module_security(mut self, content: Value) -> Self {
        self.module_security = content;
        self
    }

    /// Append a top-level document by local name.
    pub fn document(mut self, name: impl Into<String>, content: Value) -> Self {
        self.documents.push((name.into(), content));
        self
    }

    /// Append a top-level folder.
    pub fn folder(mut self, folder: FolderBuilder) -> Self {
        self.folders.push(folder);
        self
    }

    fn compile(self, units: &mut HashMap<String, LoadedUnit>) -> ModuleRef {
        let domain_model = mint(units, "DomainModel", self.domain_model);
        let module_security = mint(units, "ModuleSecurity", self.module_security);
        let documents = compile_documents(&self.name, self.documents, units);
        let folders = self
            .folders
            .into_iter()
            .map(|folder| folder.compile(&self.name, units))
            .collect();
        ModuleRef {
            name: self.name,
            domain_model,
            module_security,
            documents,
            folders,
        }
    }
}

/// Builder for one folder.
#[derive(Debug)]
pub struct FolderBuilder {
    name: String,
    documents: Vec<(String, Value)>,
    folders: Vec<FolderBuilder>,
}

impl FolderBuilder {
    /// Start an empty folder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Vec::new(),
            folders: Vec::new(),
        }
    }

    /// Append a document by local name.
    pub fn document(mut self, name: impl Into<String>, content: Value) -> Self {
        self.documents.push((name.into(), content));
        self
    }

    /// Append a child folder.
    pub fn folder(mut self, folder: FolderBuilder) -> Self {
        self.folders.push(folder);
        self
    }

    fn compile(self, module: &str, units: &mut HashMap<String, LoadedUnit>) -> FolderRef {
        let documents = compile_documents(module, self.documents, units);
        let folders = self
            .folders
            .into_iter()
            .map(|folder| folder.compile(module, units))
            .collect();
        FolderRef {
            name: self.name,
            documents,
            folders,
        }
    }
}

fn compile_documents(
    module: &str,
    documents: Vec<(String, Value)>,
    units: &mut HashMap<String, LoadedUnit>,
) -> Vec<DocumentRef> {
    documents
        .into_iter()
        .map(|(name, content)| {
            let qualified_name = QualifiedName::from_parts(module, &name)
                .expect("mock document names must form valid qualified names");
            let handle = mint(units, "Document", content);
            DocumentRef {
                name,
                qualified_name,
                handle,
            }
        })
        .collect()
}

fn mint(units: &mut HashMap<String, LoadedUnit>, kind: &str, content: Value) -> UnitHandle {
    let id = Uuid::new_v4().to_string();
    units.insert(
        id.clone(),
        LoadedUnit {
            kind: kind.to_string(),
            content,
        },
    );
    UnitHandle::new(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sales_tree() -> (MockSource, TreeId) {
        let source = MockSource::new();
        let tree = TreeId::new("acme-crm").unwrap();
        source.register(
            &tree,
            TreeBuilder::new(VcsKind::Svn)
                .module(ModuleBuilder::new("Sales").document("Customer", json!({"a": 1})))
                .navigation(json!({"menu": []})),
        );
        (source, tree)
    }

    #[tokio::test]
    async fn registered_tree_reports_kind() {
        let (source, tree) = sales_tree();
        assert_eq!(source.repository_kind(&tree).await.unwrap(), VcsKind::Svn);
    }

    #[tokio::test]
    async fn unknown_tree_is_not_found() {
        let source = MockSource::new();
        let tree = TreeId::new("nope").unwrap();
        assert!(matches!(
            source.repository_kind(&tree).await,
            Err(SourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn model_projects_registered_structure() {
        let (source, tree) = sales_tree();
        let branch = BranchName::new("trunk").unwrap();
        let wc = source.create_working_copy(&tree, &branch).await.unwrap();
        let model = source.open_model(&wc).await.unwrap();

        assert_eq!(model.modules().len(), 1);
        let module = &model.modules()[0];
        assert_eq!(module.name, "Sales");
        assert_eq!(module.documents.len(), 1);
        assert_eq!(
            module.documents[0].qualified_name.as_str(),
            "Sales.Customer"
        );
        assert_eq!(model.navigation_documents().len(), 1);
        assert!(model.project_securities().is_empty());

        let unit = model.load(&module.documents[0].handle).await.unwrap();
        assert_eq!(unit.kind, "Document");
        assert_eq!(unit.content, json!({"a": 1}));
    }

    #[tokio::test]
    async fn fail_on_create_working_copy() {
        let (source, tree) = sales_tree();
        source.fail_on(FailOn::CreateWorkingCopy(SourceError::WorkingCopyFailed(
            "branch is locked".into(),
        )));
        let branch = BranchName::new("main").unwrap();
        assert!(matches!(
            source.create_working_copy(&tree, &branch).await,
            Err(SourceError::WorkingCopyFailed(_))
        ));
    }

    #[tokio::test]
    async fn fail_on_load_targets_one_handle() {
        let (source, tree) = sales_tree();
        let branch = BranchName::new("main").unwrap();
        let wc = source.create_working_copy(&tree, &branch).await.unwrap();
        let model = source.open_model(&wc).await.unwrap();
        let handle = model.modules()[0].documents[0].handle.clone();

        source.fail_on(FailOn::Load(
            handle.clone(),
            SourceError::NetworkError("connection reset".into()),
        ));
        assert!(matches!(
            model.load(&handle).await,
            Err(SourceError::NetworkError(_))
        ));
        // Other handles still load.
        let dm = model.modules()[0].domain_model.clone();
        assert!(model.load(&dm).await.is_ok());
    }
}
