//! secrets::keychain_store
//!
//! OS keychain secret storage via the `keyring` crate (macOS Keychain,
//! Windows Credential Manager, Linux Secret Service).
//!
//! Only functional with the `keychain` feature:
//!
//! ```toml
//! claude-auto = { version = "0.3", features = ["keychain"] }
//! ```

#[cfg(feature = "keychain")]
use keyring::Entry;

use super::traits::{SecretError, SecretStore};

/// Service name under which entries are filed.
pub const KEYCHAIN_SERVICE: &str = "claude-auto";

/// Keychain-based secret storage.
#[cfg(feature = "keychain")]
#[derive(Debug)]
pub struct KeychainSecretStore {
    service: String,
}

#[cfg(feature = "keychain")]
impl KeychainSecretStore {
    pub fn new() -> Result<Self, SecretError> {
        Ok(Self::with_service(KEYCHAIN_SERVICE))
    }

    /// Store under a custom service name, mainly for tests.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry(&self, key: &str) -> Result<Entry, SecretError> {
        Entry::new(&self.service, key)
            .map_err(|e| SecretError::ReadError(format!("cannot create keyring entry: {}", e)))
    }
}

#[cfg(feature = "keychain")]
impl SecretStore for KeychainSecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        match self.entry(key)?.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(keyring::Error::Ambiguous(_)) => Err(SecretError::ReadError(
                "ambiguous keychain entry".to_string(),
            )),
            Err(e) => Err(SecretError::ReadError(format!(
                "cannot read from keychain: {}",
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SecretError> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| SecretError::WriteError(format!("cannot write to keychain: {}", e)))
    }

    fn delete(&self, key: &str) -> Result<(), SecretError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SecretError::DeleteError(format!(
                "cannot delete from keychain: {}",
                e
            ))),
        }
    }
}

#[cfg(not(feature = "keychain"))]
#[derive(Debug)]
pub struct KeychainSecretStore {
    _private: (),
}

#[cfg(not(feature = "keychain"))]
impl KeychainSecretStore {
    /// Always fails when compiled without the `keychain` feature.
    pub fn new() -> Result<Self, SecretError> {
        Err(SecretError::ProviderNotAvailable(
            "keychain support not enabled (compile with --features keychain)".into(),
        ))
    }
}

#[cfg(not(feature = "keychain"))]
impl SecretStore for KeychainSecretStore {
    fn get(&self, _key: &str) -> Result<Option<String>, SecretError> {
        Err(SecretError::ReadError("keychain not available".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), SecretError> {
        Err(SecretError::WriteError("keychain not available".into()))
    }

    fn delete(&self, _key: &str) -> Result<(), SecretError> {
        Err(SecretError::DeleteError("keychain not available".into()))
    }
}
