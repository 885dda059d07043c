//! Integration tests for the HTTP source against a mock server.
//!
//! These tests verify the REST request shapes, payload decoding, and the
//! status-code to `SourceError` mapping.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use modelex::core::types::{BranchName, TreeId, VcsKind};
use modelex::source::http::HttpSource;
use modelex::source::{Source, SourceError};

fn tree() -> TreeId {
    TreeId::new("acme-crm").unwrap()
}

#[tokio::test]
async fn repository_kind_decodes_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/trees/acme-crm/repository"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "svn"})))
        .mount(&server)
        .await;

    let source = HttpSource::new(server.uri(), None);
    assert_eq!(
        source.repository_kind(&tree()).await.unwrap(),
        VcsKind::Svn
    );
}

#[tokio::test]
async fn bearer_token_is_attached_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/trees/acme-crm/repository"))
        .and(header("authorization", "Bearer mex_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "git"})))
        .mount(&server)
        .await;

    let source = HttpSource::new(server.uri(), Some("mex_secret".into()));
    assert_eq!(
        source.repository_kind(&tree()).await.unwrap(),
        VcsKind::Git
    );
}

#[tokio::test]
async fn working_copy_model_and_unit_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/trees/acme-crm/working-copies"))
        .and(body_json(json!({"branch": "main"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "wc-42"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/working-copies/wc-42/model"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "modules": [{
                "name": "Sales",
                "domain_model": "u-dm",
                "module_security": "u-msc",
                "documents": [{
                    "name": "Customer",
                    "qualified_name": "Sales.Customer",
                    "unit": "u-doc"
                }],
                "folders": [{
                    "name": "Admin Tools",
                    "documents": [],
                    "folders": []
                }]
            }],
            "navigation_documents": ["u-nav"],
            "project_securities": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/working-copies/wc-42/units/u-doc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "Document",
            "content": {"name": "Customer", "persistent": true}
        })))
        .mount(&server)
        .await;

    let source = HttpSource::new(server.uri(), None);
    let branch = BranchName::new("main").unwrap();
    let wc = source.create_working_copy(&tree(), &branch).await.unwrap();
    assert_eq!(wc.id, "wc-42");
    assert_eq!(wc.branch, branch);

    let model = source.open_model(&wc).await.unwrap();
    assert_eq!(model.modules().len(), 1);
    let module = &model.modules()[0];
    assert_eq!(module.name, "Sales");
    assert_eq!(module.documents[0].qualified_name.as_str(), "Sales.Customer");
    assert_eq!(module.folders[0].name, "Admin Tools");
    assert_eq!(model.navigation_documents().len(), 1);

    let unit = model.load(&module.documents[0].handle).await.unwrap();
    assert_eq!(unit.kind, "Document");
    assert_eq!(unit.content, json!({"name": "Customer", "persistent": true}));
}

#[tokio::test]
async fn missing_tree_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/trees/acme-crm/repository"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "tree not found"})),
        )
        .mount(&server)
        .await;

    let source = HttpSource::new(server.uri(), None);
    match source.repository_kind(&tree()).await {
        Err(SourceError::NotFound(message)) => assert_eq!(message, "tree not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn unauthorized_maps_to_auth_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/trees/acme-crm/repository"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let source = HttpSource::new(server.uri(), Some("expired".into()));
    assert!(matches!(
        source.repository_kind(&tree()).await,
        Err(SourceError::AuthFailed(_))
    ));
}

#[tokio::test]
async fn refused_working_copy_maps_to_working_copy_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/trees/acme-crm/working-copies"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "branch is locked"})),
        )
        .mount(&server)
        .await;

    let source = HttpSource::new(server.uri(), None);
    let branch = BranchName::new("main").unwrap();
    match source.create_working_copy(&tree(), &branch).await {
        Err(SourceError::WorkingCopyFailed(message)) => assert_eq!(message, "branch is locked"),
        other => panic!("expected WorkingCopyFailed, got {:?}", other),
    }
}
