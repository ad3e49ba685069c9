//! Generation pipeline integration tests
//!
//! Tests for complete runs:
//! - Tree layout and navigation index of a first run
//! - Versioning and change detection across runs
//! - Skipped endpoints and omitted categories
//! - Failure before any output is written
//! - Write failures and version reclaim

use std::collections::BTreeSet;
use std::sync::Arc;

use pretty_assertions::assert_eq;

use lumen_docs::generate::synthesizer::FALLBACK_INTRODUCTION;
use lumen_docs::spec::OperationId;
use lumen_docs::{AppError, Config, GenerationError, OpenAIClient, Pipeline, PipelineState};

use crate::common::{read_tree, shop_spec, test_config, StubGenerator, TestProject, SHOP_OPERATIONS};
use crate::mocks::MockOpenAIServer;

fn pipeline(project: &TestProject, generator: StubGenerator) -> Pipeline {
    Pipeline::new(Config::default(), project.paths(), Arc::new(generator))
}

fn ids(items: &[(&str, &str)]) -> BTreeSet<OperationId> {
    items.iter().map(|(m, p)| OperationId::new(m, p)).collect()
}

#[tokio::test]
async fn test_first_run_builds_full_tree() {
    let project = TestProject::new();
    let spec_path = project.write_spec(&shop_spec());
    let mut pipeline = pipeline(&project, StubGenerator::new());

    let report = pipeline.run(&spec_path).await.unwrap();

    assert_eq!(pipeline.state(), PipelineState::Done);
    assert_eq!(report.version, 1);
    assert_eq!(report.changed.len(), SHOP_OPERATIONS);
    assert_eq!(report.categories, vec!["Users", "Orders", "Uncategorized"]);
    assert_eq!(report.documented, SHOP_OPERATIONS);
    assert!(report.skipped.is_empty());

    let tree = read_tree(&report.current_dir);
    let files: Vec<&str> = tree.keys().map(String::as_str).collect();
    assert_eq!(
        files,
        vec![
            "SUMMARY.md",
            "api-reference/README.md",
            "api-reference/orders/README.md",
            "api-reference/orders/get-all-orders.md",
            "api-reference/uncategorized/README.md",
            "api-reference/uncategorized/get-all-root.md",
            "api-reference/users/README.md",
            "api-reference/users/create-users.md",
            "api-reference/users/delete-users.md",
            "api-reference/users/get-all-users.md",
            "api-reference/users/get-single-users.md",
            "getting-started/README.md",
            "getting-started/authentication.md",
            "getting-started/installation.md",
            "getting-started/making-requests.md",
            "introduction.md",
        ]
    );
    assert_eq!(report.pages_written, tree.len());
    assert_eq!(
        tree["api-reference/users/get-single-users.md"],
        "# GET /users/{id}\n\nReference for GET /users/{id}.\n"
    );
    assert_eq!(tree["api-reference/orders/README.md"], "# Orders\n\nOverview of Orders.\n");

    let summary = &tree["SUMMARY.md"];
    assert!(summary.contains("  * [Users](api-reference/users/README.md)\n"));
    assert!(summary.contains("    * [Create user](api-reference/users/create-users.md)\n"));
    assert!(summary.contains("    * [GET /](api-reference/uncategorized/get-all-root.md)\n"));
    assert!(summary.find("[Users]").unwrap() < summary.find("[Orders]").unwrap());

    let version_dir = report.version_dir.clone().unwrap();
    assert_eq!(read_tree(&version_dir), tree);
    assert!(pipeline.store().snapshot_path(1).exists());

    let history = pipeline.store().history().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].version, 1);
    assert_eq!(history[0].changed, SHOP_OPERATIONS);
    assert_eq!(history[0].pages, tree.len());
}

#[tokio::test]
async fn test_rerun_on_same_spec_is_stable() {
    let project = TestProject::new();
    let spec_path = project.write_spec(&shop_spec());

    let first = pipeline(&project, StubGenerator::new())
        .run(&spec_path)
        .await
        .unwrap();
    let first_tree = read_tree(&first.current_dir);

    let second = pipeline(&project, StubGenerator::new())
        .run(&spec_path)
        .await
        .unwrap();

    assert_eq!(second.version, 2);
    assert!(second.changed.is_empty());
    assert_eq!(read_tree(&second.current_dir), first_tree);

    let paths = project.paths();
    assert!(paths.versioned_docs_for(1).is_dir());
    assert!(paths.versioned_docs_for(2).is_dir());
}

#[tokio::test]
async fn test_changed_operations_are_reported() {
    let project = TestProject::new();
    let mut spec = shop_spec();
    project.write_spec(&spec);
    let mut pipeline = pipeline(&project, StubGenerator::new());
    pipeline.run(&project.root().join("openapi.json")).await.unwrap();

    spec["paths"]["/orders"]["get"]["summary"] = "All orders".into();
    spec["paths"]["/orders/{id}"] = serde_json::json!({
        "get": { "tags": ["orders"], "summary": "Get order", "responses": {} }
    });
    let spec_path = project.write_spec(&spec);

    let report = pipeline.run(&spec_path).await.unwrap();

    assert_eq!(report.version, 2);
    assert_eq!(
        report.changed,
        ids(&[("GET", "/orders"), ("GET", "/orders/{id}")])
    );
    let tree = read_tree(&report.current_dir);
    assert!(tree.contains_key("api-reference/orders/get-single-orders.md"));
}

#[tokio::test]
async fn test_failed_endpoints_are_skipped() {
    let project = TestProject::new();
    let spec_path = project.write_spec(&shop_spec());
    let mut pipeline = pipeline(&project, StubGenerator::new().failing_on("/users/{id}"));

    let report = pipeline.run(&spec_path).await.unwrap();

    assert_eq!(
        report.skipped,
        vec![
            OperationId::new("GET", "/users/{id}"),
            OperationId::new("DELETE", "/users/{id}"),
        ]
    );
    assert_eq!(report.documented + report.skipped.len(), SHOP_OPERATIONS);

    let tree = read_tree(&report.current_dir);
    assert!(!tree.contains_key("api-reference/users/get-single-users.md"));
    assert!(!tree.contains_key("api-reference/users/delete-users.md"));
    assert!(!tree["SUMMARY.md"].contains("Get user"));
    assert_eq!(report.pages_written, tree.len());
}

#[tokio::test]
async fn test_category_without_pages_is_omitted() {
    let project = TestProject::new();
    let spec_path = project.write_spec(&shop_spec());
    let generator = Arc::new(StubGenerator::new().failing_on("/orders"));
    let mut pipeline = Pipeline::new(Config::default(), project.paths(), generator.clone());

    let report = pipeline.run(&spec_path).await.unwrap();

    assert_eq!(report.categories, vec!["Users", "Uncategorized"]);
    let tree = read_tree(&report.current_dir);
    assert!(!tree.keys().any(|k| k.starts_with("api-reference/orders/")));
    assert!(!tree["SUMMARY.md"].contains("Orders"));

    // category + title + page per operation, overviews for the two kept
    // categories only, one introduction
    assert_eq!(generator.calls(), SHOP_OPERATIONS * 3 + 2 + 1);
}

#[tokio::test]
async fn test_write_failure_keeps_output_and_reclaims_version() {
    let project = TestProject::new();
    let spec_path = project.write_spec(&shop_spec());
    let paths = project.paths();

    let first = pipeline(&project, StubGenerator::new())
        .run(&spec_path)
        .await
        .unwrap();
    let first_tree = read_tree(&first.current_dir);

    // A plain file where the per-version trees live blocks the next write
    std::fs::remove_dir_all(paths.versioned_docs()).unwrap();
    std::fs::write(paths.versioned_docs(), "blocked").unwrap();

    let mut blocked = pipeline(&project, StubGenerator::new());
    let result = blocked.run(&spec_path).await;

    assert!(matches!(result, Err(AppError::Io { .. })));
    assert_eq!(blocked.state(), PipelineState::Failed);
    assert_eq!(read_tree(&paths.current_docs()), first_tree);
    assert!(!blocked.store().snapshot_path(2).exists());
    assert_eq!(blocked.store().history().unwrap().len(), 1);

    std::fs::remove_file(paths.versioned_docs()).unwrap();
    let report = pipeline(&project, StubGenerator::new())
        .run(&spec_path)
        .await
        .unwrap();

    assert_eq!(report.version, 2);
    assert!(report.changed.is_empty());
    assert_eq!(read_tree(&report.current_dir), first_tree);
    assert!(paths.versioned_docs_for(2).is_dir());
}

#[tokio::test]
async fn test_invalid_spec_writes_nothing() {
    let project = TestProject::new();
    let spec_path = project.root().join("openapi.json");
    std::fs::write(&spec_path, "{ not json").unwrap();
    let mut pipeline = pipeline(&project, StubGenerator::new());

    let result = pipeline.run(&spec_path).await;

    assert!(matches!(result, Err(AppError::InvalidSpec(_))));
    assert_eq!(pipeline.state(), PipelineState::Failed);
    assert!(!project.paths().current_docs().exists());
    assert!(!pipeline.store().snapshot_path(1).exists());
}

#[tokio::test]
async fn test_run_through_openai_client() {
    let server = MockOpenAIServer::start().await;
    server.mock_completion("Users").await;

    let project = TestProject::new();
    let spec_path = project.write_spec(&shop_spec());
    let config = test_config(&server.uri(), "http://unused");
    let client = OpenAIClient::new(reqwest::Client::new(), &config).unwrap();
    let mut pipeline = Pipeline::new(config, project.paths(), Arc::new(client));

    let report = pipeline.run(&spec_path).await.unwrap();

    assert_eq!(report.categories, vec!["Users"]);
    assert_eq!(report.documented, SHOP_OPERATIONS);

    // category + title + page per operation, one overview, one introduction
    let requests = server.received_requests().await;
    assert_eq!(requests.len(), SHOP_OPERATIONS * 3 + 2);
    assert_eq!(
        requests[0].headers.get("authorization").unwrap().to_str().unwrap(),
        "Bearer test-openai-api-key"
    );
}

#[tokio::test]
async fn test_empty_completions_use_fallbacks() {
    let server = MockOpenAIServer::start().await;
    server.mock_null_content().await;

    let project = TestProject::new();
    let spec_path = project.write_spec(&shop_spec());
    let config = test_config(&server.uri(), "http://unused");
    let client = OpenAIClient::new(reqwest::Client::new(), &config).unwrap();
    let mut pipeline = Pipeline::new(config, project.paths(), Arc::new(client));

    let report = pipeline.run(&spec_path).await.unwrap();

    assert_eq!(report.categories, vec!["Uncategorized"]);
    let tree = read_tree(&report.current_dir);
    assert_eq!(tree["introduction.md"], format!("{}\n", FALLBACK_INTRODUCTION));
    assert_eq!(
        tree["api-reference/uncategorized/get-all-users.md"],
        "# GET /users\n\n"
    );
    assert_eq!(
        tree["api-reference/uncategorized/README.md"],
        "# Uncategorized API\n\nOverview of Uncategorized API endpoints.\n"
    );
    assert!(tree["SUMMARY.md"].contains("    * [POST /users](api-reference/uncategorized/create-users.md)\n"));
}

#[tokio::test]
async fn test_rejected_key_aborts_before_any_write() {
    let server = MockOpenAIServer::start().await;
    server.mock_unauthorized().await;

    let project = TestProject::new();
    let spec_path = project.write_spec(&shop_spec());
    let config = test_config(&server.uri(), "http://unused");
    let client = OpenAIClient::new(reqwest::Client::new(), &config).unwrap();
    let mut pipeline = Pipeline::new(config, project.paths(), Arc::new(client));

    let result = pipeline.run(&spec_path).await;

    assert!(matches!(
        result,
        Err(AppError::Generation(GenerationError::InvalidCredential))
    ));
    assert_eq!(pipeline.state(), PipelineState::Failed);
    assert_eq!(server.received_requests().await.len(), 1);
    assert!(!project.paths().current_docs().exists());
    assert!(!project.paths().versions_dir().exists());
}
