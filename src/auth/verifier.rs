//! auth::verifier
//!
//! Live verification of an Anthropic API key.
//!
//! # Design
//!
//! Verification lists models (`GET /v1/models?limit=1`), which proves the
//! key is accepted without spending tokens. A rate-limited response also
//! proves the key is valid.
//!
//! The key is sent only in the `x-api-key` header and never appears in
//! errors or logs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";

/// Env var overriding [`DEFAULT_API_BASE`].
pub const API_BASE_ENV: &str = "CLAUDE_AUTO_API_BASE";

/// API version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("claude-auto/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors from key verification.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("API key was rejected (401 Unauthorized)")]
    InvalidKey,

    #[error("API key is not permitted to use the API (403 Forbidden)")]
    Forbidden,

    #[error("unexpected API response {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),
}

/// Prefix carried by Anthropic API keys.
pub const KEY_PREFIX: &str = "sk-ant-";

/// Offline shape check of an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    Valid,
    Empty,
    /// Non-empty but without the usual prefix. Accepted with a warning.
    UnexpectedPrefix,
}

/// Classify the shape of a key without contacting the service.
pub fn check_key_format(key: &str) -> KeyFormat {
    let key = key.trim();
    if key.is_empty() {
        KeyFormat::Empty
    } else if key.starts_with(KEY_PREFIX) {
        KeyFormat::Valid
    } else {
        KeyFormat::UnexpectedPrefix
    }
}

/// Checks whether an API key is accepted by the service.
#[async_trait]
pub trait KeyVerifier: Send + Sync {
    async fn verify(&self, api_key: &str) -> Result<(), VerifyError>;
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Verifier against the Anthropic HTTP API.
pub struct AnthropicVerifier {
    client: Client,
    api_base: String,
}

impl std::fmt::Debug for AnthropicVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicVerifier")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl AnthropicVerifier {
    pub fn new() -> Result<Self, VerifyError> {
        Self::with_api_base(DEFAULT_API_BASE)
    }

    /// Verifier against `$CLAUDE_AUTO_API_BASE`, or the default base URL.
    pub fn from_env() -> Result<Self, VerifyError> {
        match std::env::var(API_BASE_ENV) {
            Ok(base) if !base.trim().is_empty() => Self::with_api_base(base.trim()),
            _ => Self::new(),
        }
    }

    /// Verifier against a custom base URL (tests, proxies).
    pub fn with_api_base(api_base: impl Into<String>) -> Result<Self, VerifyError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| VerifyError::Network(e.to_string()))?;
        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn headers(api_key: &str) -> Result<HeaderMap, VerifyError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|_| VerifyError::Api {
                status: 0,
                message: "API key contains characters not allowed in a header".into(),
            })?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }
}

#[async_trait]
impl KeyVerifier for AnthropicVerifier {
    async fn verify(&self, api_key: &str) -> Result<(), VerifyError> {
        let url = format!("{}/v1/models", self.api_base);
        debug!(url = %url, "verifying API key");

        let response = self
            .client
            .get(&url)
            .query(&[("limit", "1")])
            .headers(Self::headers(api_key)?)
            .send()
            .await
            .map_err(|e| VerifyError::Network(e.without_url().to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), "verification response");
        if status.is_success() || status == StatusCode::TOO_MANY_REQUESTS {
            return Ok(());
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(VerifyError::InvalidKey),
            StatusCode::FORBIDDEN => Err(VerifyError::Forbidden),
            _ => {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or_else(|_| status.canonical_reason().unwrap_or("error").to_string());
                Err(VerifyError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_format() {
        assert_eq!(check_key_format("sk-ant-api03-xyz"), KeyFormat::Valid);
        assert_eq!(check_key_format("  sk-ant-x \n"), KeyFormat::Valid);
        assert_eq!(check_key_format(""), KeyFormat::Empty);
        assert_eq!(check_key_format("   "), KeyFormat::Empty);
        assert_eq!(check_key_format("abc123"), KeyFormat::UnexpectedPrefix);
    }

    #[test]
    fn trims_trailing_slash() {
        let v = AnthropicVerifier::with_api_base("http://localhost:1234/").unwrap();
        assert_eq!(v.api_base(), "http://localhost:1234");
    }

    #[test]
    fn debug_has_no_client_internals() {
        let v = AnthropicVerifier::new().unwrap();
        let debug = format!("{:?}", v);
        assert!(debug.contains("api.anthropic.com"));
    }

    #[test]
    fn headers_mark_key_sensitive() {
        let headers = AnthropicVerifier::headers("sk-ant-abc").unwrap();
        assert!(headers["x-api-key"].is_sensitive());
        assert_eq!(headers["anthropic-version"], "2023-06-01");
    }

    #[test]
    fn header_rejects_newlines_without_echoing_key() {
        let err = AnthropicVerifier::headers("sk-ant\nabc").unwrap_err();
        assert!(!err.to_string().contains("sk-ant"));
    }

    #[test]
    fn bad_key_fails_before_any_request() {
        // Nothing listens on this address; reaching the network would be a
        // Network error.
        let v = AnthropicVerifier::with_api_base("http://127.0.0.1:9").unwrap();
        let err = tokio_test::block_on(v.verify("sk-ant\nabc")).unwrap_err();
        assert!(matches!(err, VerifyError::Api { status: 0, .. }));
    }
}
