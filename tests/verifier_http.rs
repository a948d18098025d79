//! HTTP tests for API key verification against a mock server.

use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use claude_auto::auth::{AnthropicVerifier, KeyVerifier, VerifyError, ANTHROPIC_VERSION};

const KEY: &str = "sk-ant-test-key";

async fn verifier_for(server: &MockServer) -> AnthropicVerifier {
    AnthropicVerifier::with_api_base(server.uri()).unwrap()
}

async fn respond_with(template: ResponseTemplate) -> Result<(), VerifyError> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(template)
        .mount(&server)
        .await;
    verifier_for(&server).await.verify(KEY).await
}

#[tokio::test]
async fn sends_expected_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(query_param("limit", "1"))
        .and(header("x-api-key", KEY))
        .and(header("anthropic-version", ANTHROPIC_VERSION))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "id": "claude-sonnet-4-5", "type": "model" }],
            "has_more": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    verifier_for(&server).await.verify(KEY).await.unwrap();
}

#[tokio::test]
async fn rate_limited_key_is_valid() {
    assert!(respond_with(ResponseTemplate::new(429)).await.is_ok());
}

#[tokio::test]
async fn unauthorized_is_invalid_key() {
    let err = respond_with(ResponseTemplate::new(401)).await.unwrap_err();
    assert!(matches!(err, VerifyError::InvalidKey));
}

#[tokio::test]
async fn forbidden() {
    let err = respond_with(ResponseTemplate::new(403)).await.unwrap_err();
    assert!(matches!(err, VerifyError::Forbidden));
}

#[tokio::test]
async fn server_error_carries_api_message() {
    let body = serde_json::json!({
        "type": "error",
        "error": { "type": "api_error", "message": "Internal server error" }
    });
    let err = respond_with(ResponseTemplate::new(500).set_body_json(body))
        .await
        .unwrap_err();

    match err {
        VerifyError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal server error");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn unparseable_body_uses_status_reason() {
    let err = respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::Api { status: 502, .. }));
    assert!(err.to_string().contains("Bad Gateway"));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let err = AnthropicVerifier::with_api_base(uri)
        .unwrap()
        .verify(KEY)
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::Network(_)));
    assert!(!err.to_string().contains(KEY));
}

mod cli {
    use super::*;
    use assert_cmd::Command;
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn setup_cmd(home: &TempDir, server: &MockServer) -> Command {
        let mut cmd = Command::cargo_bin("claude-auto").unwrap();
        cmd.env("CLAUDE_AUTO_HOME", home.path().join("app"))
            .env("XDG_CONFIG_HOME", home.path().join("xdg"))
            .env("CLAUDE_AUTO_API_BASE", server.uri())
            .env_remove("CLAUDE_AUTO_CONFIG")
            .env_remove("ANTHROPIC_API_KEY")
            .args(["--setup", "--api-key", KEY]);
        cmd
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn setup_stores_accepted_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let home = TempDir::new().unwrap();
        setup_cmd(&home, &server)
            .assert()
            .success()
            .stdout(predicate::str::contains("API key saved"));
        assert!(home.path().join("app").join("secrets.toml").exists());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn setup_rejects_invalid_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let home = TempDir::new().unwrap();
        setup_cmd(&home, &server)
            .assert()
            .failure()
            .stderr(predicate::str::contains("API key test failed"))
            .stderr(predicate::str::contains(KEY).not());
        assert!(!home.path().join("app").join("secrets.toml").exists());
    }
}
