//! auth - API key verification
//!
//! Checks an Anthropic API key before it is stored during setup.
//!
//! # Components
//!
//! - [`check_key_format`] - Offline shape check (`sk-ant-` prefix)
//! - [`KeyVerifier`] - Trait for live verification against the service
//! - [`AnthropicVerifier`] - HTTP implementation of [`KeyVerifier`]
//!
//! # Security
//!
//! API keys never appear in:
//! - logs (including --debug)
//! - error messages
//! - debug output
//!
//! # Example
//!
//! ```ignore
//! use claude_auto::auth::{AnthropicVerifier, KeyVerifier};
//!
//! let verifier = AnthropicVerifier::new()?;
//! verifier.verify("sk-ant-...").await?;
//! ```

mod verifier;

pub use verifier::{
    check_key_format, AnthropicVerifier, KeyFormat, KeyVerifier, VerifyError, ANTHROPIC_VERSION,
    API_BASE_ENV, DEFAULT_API_BASE, KEY_PREFIX,
};
