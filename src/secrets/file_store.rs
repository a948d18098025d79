//! secrets::file_store
//!
//! File-based secret storage.
//!
//! # Security
//!
//! - Secrets are stored in `<app dir>/secrets.toml`
//! - File permissions are 0600 on Unix, applied before content is written
//! - Writes are atomic (temp file, then rename)
//! - Values never appear in errors or logs

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::traits::{SecretError, SecretStore};
use crate::core::atomic::write_atomic;
use crate::core::paths::AppPaths;

/// TOML-file secret storage. The default provider.
///
/// # Example
///
/// ```
/// use claude_auto::secrets::{FileSecretStore, SecretStore};
///
/// let temp = tempfile::TempDir::new().unwrap();
/// let store = FileSecretStore::with_path(temp.path().join("secrets.toml"));
///
/// store.set("anthropic.api_key", "sk-ant-test").unwrap();
/// assert!(store.exists("anthropic.api_key").unwrap());
///
/// store.delete("anthropic.api_key").unwrap();
/// assert!(store.get("anthropic.api_key").unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    /// Store at the app directory's `secrets.toml`.
    pub fn new(paths: &AppPaths) -> Self {
        Self {
            path: paths.secrets_path(),
        }
    }

    /// Store at a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_secrets(&self) -> Result<BTreeMap<String, String>, SecretError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(SecretError::ReadError(format!(
                    "cannot read secrets file: {}",
                    e
                )))
            }
        };

        // The toml error can quote the offending line, which may hold a value.
        toml::from_str(&content)
            .map_err(|_| SecretError::ReadError("cannot parse secrets file".into()))
    }

    fn write_secrets(&self, secrets: &BTreeMap<String, String>) -> Result<(), SecretError> {
        let content = toml::to_string_pretty(secrets)
            .map_err(|e| SecretError::WriteError(format!("cannot serialize secrets: {}", e)))?;

        write_atomic(&self.path, content.as_bytes(), Some(0o600))
            .map_err(|e| SecretError::WriteError(format!("cannot write secrets file: {}", e)))
    }

    /// True if the file is absent or owner-only (always true off Unix).
    pub fn verify_permissions(&self) -> Result<bool, SecretError> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            match fs::metadata(&self.path) {
                Ok(metadata) => Ok(metadata.permissions().mode() & 0o777 == 0o600),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
                Err(e) => Err(SecretError::ReadError(format!(
                    "cannot read file metadata: {}",
                    e
                ))),
            }
        }
        #[cfg(not(unix))]
        {
            Ok(true)
        }
    }
}

impl SecretStore for FileSecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        Ok(self.read_secrets()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SecretError> {
        let mut secrets = self.read_secrets()?;
        secrets.insert(key.to_string(), value.to_string());
        self.write_secrets(&secrets)
    }

    fn delete(&self, key: &str) -> Result<(), SecretError> {
        let mut secrets = self.read_secrets()?;
        if secrets.remove(key).is_none() {
            return Ok(());
        }
        self.write_secrets(&secrets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, FileSecretStore) {
        let temp = TempDir::new().expect("create temp dir");
        let store = FileSecretStore::with_path(temp.path().join("secrets.toml"));
        (temp, store)
    }

    #[test]
    fn get_nonexistent_returns_none() {
        let (_temp, store) = create_test_store();
        assert!(store.get("anthropic.api_key").expect("get").is_none());
    }

    #[test]
    fn set_and_get() {
        let (_temp, store) = create_test_store();
        store.set("anthropic.api_key", "sk-ant-abc").expect("set");
        assert_eq!(
            store.get("anthropic.api_key").expect("get"),
            Some("sk-ant-abc".to_string())
        );
    }

    #[test]
    fn set_overwrites() {
        let (_temp, store) = create_test_store();
        store.set("key", "value1").expect("first set");
        store.set("key", "value2").expect("second set");
        assert_eq!(store.get("key").expect("get"), Some("value2".to_string()));
    }

    #[test]
    fn delete_keeps_other_keys() {
        let (_temp, store) = create_test_store();
        store.set("anthropic.api_key", "a").expect("set");
        store.set("other.token", "b").expect("set");

        store.delete("anthropic.api_key").expect("delete");

        assert!(store.get("anthropic.api_key").expect("get").is_none());
        assert_eq!(store.get("other.token").expect("get"), Some("b".into()));
    }

    #[test]
    fn delete_nonexistent_does_not_create_file() {
        let (_temp, store) = create_test_store();
        store.delete("nonexistent").expect("delete nonexistent");
        assert!(!store.path().exists());
    }

    #[test]
    fn app_dir_location() {
        let temp = TempDir::new().expect("create temp dir");
        let paths = AppPaths::new(temp.path().join("app"));
        let store = FileSecretStore::new(&paths);

        store.set("key", "value").expect("set");
        assert_eq!(store.path(), paths.secrets_path());
        assert!(paths.secrets_path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn permissions_0600_on_unix() {
        let (_temp, store) = create_test_store();
        assert!(store.verify_permissions().expect("verify before write"));

        store.set("key", "value").expect("set");
        assert!(store.verify_permissions().expect("verify after write"));
    }

    #[test]
    fn parse_error_hides_contents() {
        let (_temp, store) = create_test_store();
        fs::write(store.path(), "key = \"sk-ant-secret").expect("write bad toml");

        let err = store.get("key").unwrap_err().to_string();
        assert!(err.contains("cannot parse"));
        assert!(!err.contains("sk-ant-secret"));
    }

    #[test]
    fn special_characters_in_values() {
        let (_temp, store) = create_test_store();
        let special = "value with \"quotes\" and \n newlines and = equals";
        store.set("key", special).expect("set");
        assert_eq!(store.get("key").expect("get"), Some(special.to_string()));
    }
}
