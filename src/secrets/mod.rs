//! secrets
//!
//! Secret storage abstraction and API key resolution.
//!
//! # Architecture
//!
//! Secrets are stored through the [`SecretStore`] trait:
//!
//! - [`FileSecretStore`]: `<app dir>/secrets.toml` (default)
//! - [`KeychainSecretStore`]: OS keychain (optional, feature-gated)
//!
//! The remote path reads its key through a [`CredentialProvider`], which
//! checks the environment before the store.
//!
//! # Security
//!
//! - Secrets are **never** logged or included in error messages
//! - File store uses 0600 permissions on Unix
//! - All writes are atomic (temp file + rename)

mod credential;
mod file_store;
mod keychain_store;
mod traits;

pub use credential::{
    Credential, CredentialProvider, CredentialSource, EnvOrStoreCredential, StaticCredential,
    API_KEY_ENV, API_KEY_SECRET,
};
pub use file_store::FileSecretStore;
pub use keychain_store::{KeychainSecretStore, KEYCHAIN_SERVICE};
pub use traits::{SecretError, SecretStore};

use crate::core::paths::AppPaths;

/// The default secret store provider name.
pub const DEFAULT_PROVIDER: &str = "file";

/// Create a secret store based on the provider name.
///
/// # Providers
///
/// - `"file"` (default): [`FileSecretStore`] under the app directory
/// - `"keychain"`: [`KeychainSecretStore`] (requires the `keychain` feature)
///
/// # Example
///
/// ```
/// use claude_auto::core::paths::AppPaths;
/// use claude_auto::secrets::create_store;
///
/// let temp = tempfile::TempDir::new().unwrap();
/// let store = create_store("file", &AppPaths::new(temp.path().to_path_buf())).unwrap();
/// assert!(store.get("anthropic.api_key").unwrap().is_none());
/// ```
pub fn create_store(provider: &str, paths: &AppPaths) -> Result<Box<dyn SecretStore>, SecretError> {
    match provider {
        "file" => Ok(Box::new(FileSecretStore::new(paths))),
        #[cfg(feature = "keychain")]
        "keychain" => Ok(Box::new(KeychainSecretStore::new()?)),
        #[cfg(not(feature = "keychain"))]
        "keychain" => Err(SecretError::ProviderNotAvailable(
            "keychain support not enabled (compile with --features keychain)".into(),
        )),
        other => Err(SecretError::ProviderNotAvailable(format!(
            "unknown secret provider: '{}' (valid: file, keychain)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(temp: &TempDir) -> AppPaths {
        AppPaths::new(temp.path().to_path_buf())
    }

    #[test]
    fn create_file_store() {
        let temp = TempDir::new().unwrap();
        let store = create_store("file", &paths(&temp)).expect("create file store");
        store.set(API_KEY_SECRET, "sk-ant-x").unwrap();
        assert!(temp.path().join("secrets.toml").exists());
    }

    #[test]
    fn create_unknown_provider() {
        let temp = TempDir::new().unwrap();
        match create_store("vault", &paths(&temp)) {
            Err(SecretError::ProviderNotAvailable(msg)) => assert!(msg.contains("vault")),
            Err(e) => panic!("unexpected error type: {:?}", e),
            Ok(_) => panic!("expected error"),
        }
    }

    #[cfg(not(feature = "keychain"))]
    #[test]
    fn create_keychain_without_feature() {
        let temp = TempDir::new().unwrap();
        let err = create_store("keychain", &paths(&temp))
            .err()
            .expect("keychain should be unavailable");
        assert!(err.to_string().contains("not enabled"));
    }

    #[test]
    fn default_provider_constant() {
        assert_eq!(DEFAULT_PROVIDER, "file");
    }
}
