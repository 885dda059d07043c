//! source::http
//!
//! HTTP source implementation against a tree-hosting service REST API.
//!
//! # Design
//!
//! This module implements the `Source` trait over REST:
//!
//! - `GET  /api/trees/{id}/repository` - versioning-system info
//! - `POST /api/trees/{id}/working-copies` - create a working copy
//! - `GET  /api/working-copies/{id}/model` - tree structure projection
//! - `GET  /api/working-copies/{id}/units/{unit}` - unit content
//!
//! # Authentication
//!
//! A bearer token is attached when configured. The service decides whether
//! anonymous reads are allowed; 401/403 responses surface as auth errors.
//!
//! # Example
//!
//! ```ignore
//! use modelex::source::http::HttpSource;
//! use modelex::source::Source;
//!
//! let source = HttpSource::new("https://models.example.com", Some("mex_xxx".into()));
//! let kind = source.repository_kind(&tree).await?;
//! ```

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::traits::{
    DocumentRef, FolderRef, LoadedUnit, ModuleRef, Source, SourceError, TreeModel, UnitHandle,
    WorkingCopy,
};
use crate::core::types::{BranchName, QualifiedName, TreeId, UtcTimestamp, VcsKind};

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "modelex-cli";

/// HTTP source implementation.
#[derive(Clone)]
pub struct HttpSource {
    /// HTTP client for making requests
    client: Client,
    /// API base URL
    base_url: String,
    /// Bearer token, if configured
    token: Option<String>,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl HttpSource {
    /// Create a new HTTP source.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API base URL (trailing slash is trimmed)
    /// * `token` - Optional bearer token
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            token,
        }
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Decode a success response or map an error status to a `SourceError`.
async fn handle_response<T: for<'de> Deserialize<'de>>(
    response: Response,
) -> Result<T, SourceError> {
    let status = response.status();
    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| SourceError::DecodeError(e.to_string()))
    } else {
        Err(error_for_status(status, response).await)
    }
}

async fn error_for_status(status: StatusCode, response: Response) -> SourceError {
    // Try to get an error message from the body
    let message = match response.json::<ApiErrorResponse>().await {
        Ok(err) => err.message,
        Err(_) => "Unknown error".to_string(),
    };
    match status {
        StatusCode::UNAUTHORIZED => SourceError::AuthFailed("invalid or expired token".into()),
        StatusCode::FORBIDDEN => SourceError::AuthFailed(format!("permission denied: {}", message)),
        StatusCode::NOT_FOUND => SourceError::NotFound(message),
        _ => SourceError::ApiError {
            status: status.as_u16(),
            message,
        },
    }
}

/// Error payload returned by the service.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: String,
}

/// Repository info payload.
#[derive(Debug, Deserialize)]
struct RepositoryInfo {
    kind: VcsKind,
}

/// Working-copy creation payload.
#[derive(Debug, Deserialize)]
struct WorkingCopyCreated {
    id: String,
}

/// Tree model payload.
#[derive(Debug, Deserialize)]
struct ModelPayload {
    #[serde(default)]
    modules: Vec<ModulePayload>,
    #[serde(default)]
    navigation_documents: Vec<String>,
    #[serde(default)]
    project_securities: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ModulePayload {
    name: String,
    domain_model: String,
    module_security: String,
    #[serde(default)]
    documents: Vec<DocumentPayload>,
    #[serde(default)]
    folders: Vec<FolderPayload>,
}

#[derive(Debug, Deserialize)]
struct DocumentPayload {
    name: String,
    qualified_name: String,
    unit: String,
}

#[derive(Debug, Deserialize)]
struct FolderPayload {
    name: String,
    #[serde(default)]
    documents: Vec<DocumentPayload>,
    #[serde(default)]
    folders: Vec<FolderPayload>,
}

/// Unit content payload.
#[derive(Debug, Deserialize)]
struct UnitPayload {
    kind: String,
    content: Value,
}

impl DocumentPayload {
    fn into_ref(self) -> Result<DocumentRef, SourceError> {
        let qualified_name = QualifiedName::new(self.qualified_name)
            .map_err(|e| SourceError::DecodeError(e.to_string()))?;
        Ok(DocumentRef {
            name: self.name,
            qualified_name,
            handle: UnitHandle::new(self.unit),
        })
    }
}

impl FolderPayload {
    fn into_ref(self) -> Result<FolderRef, SourceError> {
        Ok(FolderRef {
            name: self.name,
            documents: collect(self.documents, DocumentPayload::into_ref)?,
            folders: collect(self.folders, FolderPayload::into_ref)?,
        })
    }
}

impl ModulePayload {
    fn into_ref(self) -> Result<ModuleRef, SourceError> {
        Ok(ModuleRef {
            name: self.name,
            domain_model: UnitHandle::new(self.domain_model),
            module_security: UnitHandle::new(self.module_security),
            documents: collect(self.documents, DocumentPayload::into_ref)?,
            folders: collect(self.folders, FolderPayload::into_ref)?,
        })
    }
}

fn collect<P, R>(
    payloads: Vec<P>,
    convert: impl Fn(P) -> Result<R, SourceError>,
) -> Result<Vec<R>, SourceError> {
    payloads.into_iter().map(convert).collect()
}

#[async_trait]
impl Source for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn repository_kind(&self, tree: &TreeId) -> Result<VcsKind, SourceError> {
        let url = self.url(&format!("/api/trees/{}/repository", tree));
        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;
        let info: RepositoryInfo = handle_response(response).await?;
        Ok(info.kind)
    }

    async fn create_working_copy(
        &self,
        tree: &TreeId,
        branch: &BranchName,
    ) -> Result<WorkingCopy, SourceError> {
        let url = self.url(&format!("/api/trees/{}/working-copies", tree));
        let body = serde_json::json!({ "branch": branch.as_str() });
        let response = self
            .request(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;
        let created: WorkingCopyCreated = handle_response(response).await.map_err(|err| {
            // A refused creation (bad branch, locked tree) is the caught
            // top-level failure class, not a generic API error.
            match err {
                SourceError::ApiError { message, .. } => SourceError::WorkingCopyFailed(message),
                other => other,
            }
        })?;
        Ok(WorkingCopy {
            id: created.id,
            tree: tree.clone(),
            branch: branch.clone(),
            created_at: UtcTimestamp::now(),
        })
    }

    async fn open_model(&self, wc: &WorkingCopy) -> Result<Box<dyn TreeModel>, SourceError> {
        let url = self.url(&format!("/api/working-copies/{}/model", wc.id));
        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;
        let payload: ModelPayload = handle_response(response).await?;
        Ok(Box::new(HttpModel {
            source: self.clone(),
            working_copy: wc.id.clone(),
            modules: collect(payload.modules, ModulePayload::into_ref)?,
            navigation: payload
                .navigation_documents
                .into_iter()
                .map(UnitHandle::new)
                .collect(),
            project_securities: payload
                .project_securities
                .into_iter()
                .map(UnitHandle::new)
                .collect(),
        }))
    }
}

/// Model projection backed by the remote working copy.
#[derive(Debug)]
struct HttpModel {
    source: HttpSource,
    working_copy: String,
    modules: Vec<ModuleRef>,
    navigation: Vec<UnitHandle>,
    project_securities: Vec<UnitHandle>,
}

#[async_trait]
impl TreeModel for HttpModel {
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
        let url = self.source.url(&format!(
            "/api/working-copies/{}/units/{}",
            self.working_copy, handle
        ));
        let response = self
            .source
            .request(self.source.client.get(&url))
            .send()
            .await
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;
        let payload: UnitPayload = handle_response(response).await?;
        Ok(LoadedUnit {
            kind: payload.kind,
            content: payload.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let source = HttpSource::new("https://models.example.com/", None);
        assert_eq!(
            source.url("/api/trees/t1/repository"),
            "https://models.example.com/api/trees/t1/repository"
        );
    }

    #[test]
    fn debug_does_not_expose_token() {
        let source = HttpSource::new("https://models.example.com", Some("secret".into()));
        let debug = format!("{:?}", source);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("has_token: true"));
    }
}
