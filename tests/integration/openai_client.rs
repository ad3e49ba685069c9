//! OpenAI client integration tests
//!
//! Tests for `POST /chat/completions`:
//! - Request shape and authentication
//! - Mapping of rejected keys, server errors and malformed bodies

use serde_json::Value;

use lumen_docs::llm::CompletionRequest;
use lumen_docs::{GenerationError, OpenAIClient, TextGenerator};

use crate::common::{constants, test_config};
use crate::mocks::MockOpenAIServer;

fn client(server: &MockOpenAIServer) -> OpenAIClient {
    let config = test_config(&server.uri(), "http://unused");
    OpenAIClient::new(reqwest::Client::new(), &config).unwrap()
}

#[tokio::test]
async fn test_completion_success() {
    let server = MockOpenAIServer::start().await;
    server.mock_completion("Food Items").await;

    let request = CompletionRequest::user("Resource Name:", 10)
        .with_system("Identify the resource")
        .with_temperature(0.5);
    let text = client(&server).complete(&request).await.unwrap();

    assert_eq!(text.as_deref(), Some("Food Items"));

    let requests = server.received_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].headers.get("authorization").unwrap().to_str().unwrap(),
        format!("Bearer {}", constants::TEST_OPENAI_API_KEY)
    );

    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["model"], "gpt-4");
    assert_eq!(body["max_tokens"], 10);
    assert_eq!(body["n"], 1);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "Resource Name:");
    assert!((body["temperature"].as_f64().unwrap() - 0.5).abs() < 1e-6);
}

#[tokio::test]
async fn test_null_content_is_none() {
    let server = MockOpenAIServer::start().await;
    server.mock_null_content().await;

    let text = client(&server)
        .complete(&CompletionRequest::user("hello", 5))
        .await
        .unwrap();
    assert_eq!(text, None);
}

#[tokio::test]
async fn test_unauthorized_is_invalid_credential() {
    let server = MockOpenAIServer::start().await;
    server.mock_unauthorized().await;

    let err = client(&server)
        .complete(&CompletionRequest::user("hello", 5))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::InvalidCredential));
    assert!(err.is_fatal());
    assert_eq!(err.to_string(), "Incorrect API key provided");
}

#[tokio::test]
async fn test_server_error_is_upstream() {
    let server = MockOpenAIServer::start().await;
    server.mock_server_error().await;

    let err = client(&server)
        .complete(&CompletionRequest::user("hello", 5))
        .await
        .unwrap_err();

    match err {
        GenerationError::Upstream { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let server = MockOpenAIServer::start().await;
    server.mock_malformed().await;

    let err = client(&server)
        .complete(&CompletionRequest::user("hello", 5))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::Malformed(_)));
    assert!(!err.is_fatal());
}
