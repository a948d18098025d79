//! secrets::traits
//!
//! Secret storage trait definition.
//!
//! # Design
//!
//! A small key-value interface. Keys are namespaced (e.g.
//! `anthropic.api_key`) so one store can hold unrelated secrets.
//!
//! # Security
//!
//! Implementations MUST:
//! - Never log, print, or include secrets in error messages
//! - Be thread-safe (Send + Sync)

use thiserror::Error;

/// Errors from secret storage operations.
///
/// Messages never include secret values.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("failed to read secret: {0}")]
    ReadError(String),

    #[error("failed to write secret: {0}")]
    WriteError(String),

    #[error("failed to delete secret: {0}")]
    DeleteError(String),

    /// Provider not available or not configured.
    #[error("secret provider not available: {0}")]
    ProviderNotAvailable(String),
}

/// Trait for secret storage providers.
///
/// # Example
///
/// ```
/// use claude_auto::secrets::{SecretError, SecretStore};
///
/// fn has_api_key(store: &dyn SecretStore) -> Result<bool, SecretError> {
///     store.exists("anthropic.api_key")
/// }
/// ```
pub trait SecretStore: Send + Sync {
    /// Get a secret by key, `Ok(None)` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, SecretError>;

    /// Set a secret, overwriting any existing value.
    fn set(&self, key: &str, value: &str) -> Result<(), SecretError>;

    /// Delete a secret. Deleting an absent key succeeds.
    fn delete(&self, key: &str) -> Result<(), SecretError>;

    /// Check if a secret exists.
    fn exists(&self, key: &str) -> Result<bool, SecretError> {
        Ok(self.get(key)?.is_some())
    }
}
