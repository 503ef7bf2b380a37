mod common;

use std::sync::Arc;

use async_trait::async_trait;
use chatcbi::clients::{ChatCbiClient, TokenSource};
use chatcbi::core::config::CbiConfig;
use chatcbi::core::models::ChatResult;
use chatcbi::errors::{AuthError, ChatRequestError};
use common::{authorize_ok, authorize_status, chat_json, harness};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct FixedToken;

#[async_trait]
impl TokenSource for FixedToken {
    async fn get_token(&self) -> Result<String, AuthError> {
        Ok("fixed".to_string())
    }

    async fn invalidate(&self) {}
}

#[tokio::test]
async fn test_success_merges_payload_with_status_tag() {
    let server = MockServer::start().await;
    authorize_ok("abc").expect(1).mount(&server).await;
    Mock::given(method("POST"))
        .and(path("/v2/chatcbi"))
        .and(header("Authorization", "Bearer abc"))
        .and(body_json(json!({"message": "What is the answer?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "42"})))
        .expect(1)
        .mount(&server)
        .await;
    let h = harness(&server);

    let result = h.client.ask("What is the answer?").await;
    assert!(result.is_success());
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"status": "success", "answer": "42"})
    );
}

#[tokio::test]
async fn test_non_2xx_chat_response_becomes_error_result() {
    let server = MockServer::start().await;
    authorize_ok("abc").mount(&server).await;
    Mock::given(method("POST"))
        .and(path("/v2/chatcbi"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;
    let h = harness(&server);

    let result = h.client.ask("anything").await;
    match &result {
        ChatResult::Error { code, msg } => {
            assert_eq!(*code, 503);
            assert!(msg.contains("upstream unavailable"));
        }
        ChatResult::Success(_) => panic!("expected an error result"),
    }

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["status"], "error");
    assert_eq!(value["code"], 503);
}

#[tokio::test]
async fn test_error_message_is_never_empty() {
    let server = MockServer::start().await;
    authorize_ok("abc").mount(&server).await;
    Mock::given(method("POST"))
        .and(path("/v2/chatcbi"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let h = harness(&server);

    let ChatResult::Error { code, msg } = h.client.ask("q").await else {
        panic!("expected an error result");
    };
    assert_eq!(code, 404);
    assert!(!msg.is_empty());
}

#[tokio::test]
async fn test_back_to_back_questions_authorize_once() {
    let server = MockServer::start().await;
    authorize_ok("abc").expect(1).mount(&server).await;
    chat_json(200, json!({"message": "hi"}))
        .expect(2)
        .mount(&server)
        .await;
    let h = harness(&server);

    assert!(h.client.ask("first").await.is_success());
    assert!(h.client.ask("second").await.is_success());
}

#[tokio::test]
async fn test_auth_failure_is_captured_as_error_result() {
    let server = MockServer::start().await;
    authorize_status(401, "invalid client").mount(&server).await;
    chat_json(200, json!({})).expect(0).mount(&server).await;
    let h = harness(&server);

    let result = h.client.ask("q").await;
    let ChatResult::Error { code, msg } = result else {
        panic!("expected an error result");
    };
    assert_eq!(code, 401);
    assert!(msg.contains("invalid client"));
}

#[tokio::test]
async fn test_unauthorized_chat_response_invalidates_cached_token() {
    let server = MockServer::start().await;
    authorize_ok("revoked").expect(1).mount(&server).await;
    chat_json(401, json!({"error": "token revoked"}))
        .mount(&server)
        .await;
    let h = harness(&server);

    let result = h.client.ask("q").await;
    assert_eq!(result.status_code(), 401);
    assert!(h.tokens.cached().await.is_empty());
}

#[tokio::test]
async fn test_empty_question_is_rejected_without_network() {
    let server = MockServer::start().await;
    let h = harness(&server);

    let result = h.client.ask("   ").await;
    assert_eq!(
        result,
        ChatResult::Error {
            code: 400,
            msg: "Message is required".to_string()
        }
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_object_body_is_a_validation_error() {
    let server = MockServer::start().await;
    authorize_ok("abc").mount(&server).await;
    chat_json(200, json!(["not", "an", "object"]))
        .mount(&server)
        .await;
    let h = harness(&server);

    let err = h.client.try_ask("q").await.unwrap_err();
    assert!(matches!(err, ChatRequestError::Parse { status: 200, .. }));
    assert_eq!(h.client.ask("q").await.status_code(), 200);
}

#[tokio::test]
async fn test_invalid_json_body_is_a_validation_error() {
    let server = MockServer::start().await;
    authorize_ok("abc").mount(&server).await;
    Mock::given(method("POST"))
        .and(path("/v2/chatcbi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let h = harness(&server);

    let result = h.client.ask("q").await;
    assert!(!result.is_success());
    assert_eq!(result.status_code(), 200);
}

#[tokio::test]
async fn test_transport_failure_reports_500() {
    // Nothing listens on the discard port.
    let config = CbiConfig::new("id", "secret")
        .unwrap()
        .with_base_url("http://127.0.0.1:9/v2")
        .unwrap();
    let client = ChatCbiClient::with_token_source(
        reqwest::Client::new(),
        Arc::new(config),
        Arc::new(FixedToken),
    );

    let result = client.ask("q").await;
    assert_eq!(result.status_code(), 500);
}

#[tokio::test]
async fn test_answer_view_reads_chatcbi_fields() {
    let server = MockServer::start().await;
    authorize_ok("abc").mount(&server).await;
    chat_json(
        200,
        json!({
            "message": "Fintech is embracing AI agents.",
            "sources": [{"title": "Report", "url": "https://example.com/r"}],
            "suggestions": ["Which startups lead?"]
        }),
    )
    .mount(&server)
    .await;
    let h = harness(&server);

    let answer = h.client.ask("fintech?").await.answer().unwrap();
    assert_eq!(answer.answer, "Fintech is embracing AI agents.");
    assert_eq!(answer.citations[0].title, "Report");
    assert_eq!(answer.suggestions, vec!["Which startups lead?".to_string()]);
}
