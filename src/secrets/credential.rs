//! secrets::credential
//!
//! Resolution of the API key used for remote execution.
//!
//! # Lookup order
//!
//! 1. `ANTHROPIC_API_KEY` in the environment (non-empty)
//! 2. `anthropic.api_key` in the configured [`SecretStore`]
//!
//! The resolved value is handed to the dispatcher only for remote runs
//! and is never logged.

use std::fmt;

use super::traits::{SecretError, SecretStore};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Secret-store key holding the API key.
pub const API_KEY_SECRET: &str = "anthropic.api_key";

/// Where a credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    Store,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Environment => write!(f, "environment ({})", API_KEY_ENV),
            CredentialSource::Store => write!(f, "secret store"),
        }
    }
}

/// A resolved API key. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    value: String,
    source: CredentialSource,
}

impl Credential {
    pub fn new(value: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }

    /// The raw key. Do not log it.
    pub fn expose(&self) -> &str {
        &self.value
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("value", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Capability for obtaining the remote API key.
pub trait CredentialProvider: Send + Sync {
    /// Resolve the credential, `Ok(None)` if none is configured.
    fn credential(&self) -> Result<Option<Credential>, SecretError>;

    /// Whether a credential resolves. Storage errors count as absent.
    fn has_credential(&self) -> bool {
        matches!(self.credential(), Ok(Some(_)))
    }
}

/// Environment first, then the secret store.
pub struct EnvOrStoreCredential {
    env_value: Option<String>,
    store: Box<dyn SecretStore>,
}

impl EnvOrStoreCredential {
    /// Capture `ANTHROPIC_API_KEY` from the process environment.
    pub fn new(store: Box<dyn SecretStore>) -> Self {
        Self::with_env_value(store, std::env::var(API_KEY_ENV).ok())
    }

    /// Use an explicit environment value instead of the process's.
    pub fn with_env_value(store: Box<dyn SecretStore>, env_value: Option<String>) -> Self {
        Self {
            env_value: env_value.filter(|v| !v.trim().is_empty()),
            store,
        }
    }

    /// Whether the environment variable supplied a key.
    pub fn env_present(&self) -> bool {
        self.env_value.is_some()
    }

    /// Whether the secret store holds a key.
    pub fn stored_present(&self) -> Result<bool, SecretError> {
        self.store.exists(API_KEY_SECRET)
    }
}

impl CredentialProvider for EnvOrStoreCredential {
    fn credential(&self) -> Result<Option<Credential>, SecretError> {
        if let Some(value) = &self.env_value {
            return Ok(Some(Credential::new(
                value.clone(),
                CredentialSource::Environment,
            )));
        }
        Ok(self
            .store
            .get(API_KEY_SECRET)?
            .filter(|v| !v.trim().is_empty())
            .map(|v| Credential::new(v, CredentialSource::Store)))
    }
}

/// A fixed credential, or none.
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(pub Option<String>);

impl CredentialProvider for StaticCredential {
    fn credential(&self) -> Result<Option<Credential>, SecretError> {
        Ok(self
            .0
            .clone()
            .map(|v| Credential::new(v, CredentialSource::Environment)))
    }
}
