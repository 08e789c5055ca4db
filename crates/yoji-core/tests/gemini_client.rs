//! Integration tests for GeminiClient and the judging pipeline over HTTP.
//!
//! Uses wiremock for the generative API: model discovery, generation, status
//! mapping, and the verdicts the referee turns those into.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yoji_core::{
    Credential, GeminiClient, LlmClient, LlmError, Player, Referee, ScoreVector, Session, Slot,
    Verdict, Winner, VOCABULARY,
};

const REPLY: &str = "[DATA]\nA: 10, 20, 30, 40, 50\nB: 90, 80, 70, 60, 50\n[END_DATA]\n[講評]\n### Bの圧勝\n---\n対比が鮮やかです。";

fn client(server: &MockServer, model: Option<&str>) -> GeminiClient {
    GeminiClient::new(
        server.uri(),
        Credential::Static("test-key".to_string()),
        model.map(str::to_string),
        Duration::from_secs(5),
    )
    .expect("failed to create client")
}

fn generation_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

async fn mount_models(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                { "name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"] },
                { "name": "models/gemini-first", "supportedGenerationMethods": ["countTokens", "generateContent"] },
                { "name": "models/gemini-second", "supportedGenerationMethods": ["generateContent"] }
            ]
        })))
        .mount(server)
        .await;
}

fn distinct_session() -> Session {
    let mut s = Session::seeded(VOCABULARY, 12, 21).unwrap();
    s.select(Player::B, Slot::Front, 5).unwrap();
    s.select(Player::B, Slot::Back, 6).unwrap();
    s
}

#[tokio::test]
async fn test_discovery_picks_first_generate_capable_model() {
    let server = MockServer::start().await;
    mount_models(&server).await;

    let model = client(&server, None).discover_model().await.unwrap();
    assert_eq!(model, "models/gemini-first");
}

#[tokio::test]
async fn test_complete_uses_discovered_model() {
    let server = MockServer::start().await;
    mount_models(&server).await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-first:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generation_body("hello")))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client(&server, None).complete("prompt").await.unwrap();
    assert_eq!(resp.text, "hello");
    assert_eq!(resp.model, "models/gemini-first");
    assert_eq!(resp.provider, "gemini");
}

#[tokio::test]
async fn test_pinned_model_skips_discovery() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-pinned:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generation_body("ok")))
        .mount(&server)
        .await;

    let resp = client(&server, Some("gemini-pinned"))
        .complete("prompt")
        .await
        .unwrap();
    assert_eq!(resp.model, "models/gemini-pinned");
}

#[tokio::test]
async fn test_no_capable_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{ "name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"] }]
        })))
        .mount(&server)
        .await;

    let err = client(&server, None).complete("prompt").await.unwrap_err();
    assert!(matches!(err, LlmError::NoCapableModel));
}

#[tokio::test]
async fn test_generation_server_error_keeps_model_name() {
    let server = MockServer::start().await;
    mount_models(&server).await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-first:generateContent"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = client(&server, None).complete("prompt").await.unwrap_err();
    assert_eq!(err.model(), Some("models/gemini-first"));
    match err {
        LlmError::Generation { source, .. } => {
            assert!(matches!(*source, LlmError::Service { status: 503, .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = client(&server, None).complete("prompt").await.unwrap_err();
    assert!(matches!(err, LlmError::Service { status: 403, .. }));
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    // Port 9 (discard) is closed on test hosts; the connection is refused.
    let uri = "http://127.0.0.1:9".to_string();
    let client = GeminiClient::new(
        uri,
        Credential::Static("test-key".to_string()),
        None,
        Duration::from_secs(2),
    )
    .unwrap();
    let err = client.complete("prompt").await.unwrap_err();
    assert!(matches!(err, LlmError::Network { .. }));
}

#[tokio::test]
async fn test_referee_end_to_end() {
    let server = MockServer::start().await;
    mount_models(&server).await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-first:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generation_body(REPLY)))
        .mount(&server)
        .await;

    let referee = Referee::new(Arc::new(client(&server, None)));
    let Verdict::Scored(j) = referee.judge(&distinct_session()).await else {
        panic!("expected scored verdict");
    };

    assert_eq!(j.scores[0], ScoreVector([10, 20, 30, 40, 50]));
    assert_eq!(j.scores[1], ScoreVector([90, 80, 70, 60, 50]));
    assert_eq!(j.winner, Winner::B);
    assert_eq!(j.model, "models/gemini-first");
    assert_eq!(j.commentary, "Bの圧勝\n\n対比が鮮やかです。");
}

#[tokio::test]
async fn test_referee_duplicate_never_hits_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let referee = Referee::new(Arc::new(client(&server, None)));
    let session = Session::seeded(VOCABULARY, 12, 21).unwrap();
    assert!(matches!(
        referee.judge(&session).await,
        Verdict::Duplicate { .. }
    ));
}

#[tokio::test]
async fn test_referee_reports_service_failure() {
    let server = MockServer::start().await;
    mount_models(&server).await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-first:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let referee = Referee::new(Arc::new(client(&server, None)));
    let Verdict::Failed { message } = referee.judge(&distinct_session()).await else {
        panic!("expected failure verdict");
    };
    assert!(message.starts_with("エラー詳細:"));
    assert!(message.contains("(モデル: models/gemini-first)"));
}

#[tokio::test]
#[serial_test::serial]
async fn test_missing_credential_makes_no_request() {
    for name in yoji_core::providers::credential::CREDENTIAL_ENV_VARS {
        std::env::remove_var(name);
    }
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = GeminiClient::new(server.uri(), Credential::Env, None, Duration::from_secs(5))
        .unwrap();
    let err = client.complete("prompt").await.unwrap_err();
    assert!(matches!(err, LlmError::MissingCredential));

    let referee = Referee::new(Arc::new(client));
    let Verdict::Failed { message } = referee.judge(&distinct_session()).await else {
        panic!("expected failure verdict");
    };
    assert!(message.contains("APIキーが設定されていません"));
}
