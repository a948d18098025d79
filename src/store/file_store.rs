//! store::file_store
//!
//! JSON files under the app directory.
//!
//! # Layout
//!
//! - `<app dir>/settings.json`
//! - `<app dir>/usage.json`
//!
//! Files are pretty-printed with camelCase keys, matching what earlier
//! releases wrote, and replaced atomically on save.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::traits::{SettingsStore, StoreError, UsageStore};
use crate::core::atomic::write_atomic;
use crate::core::paths::AppPaths;
use crate::core::settings::Settings;
use crate::core::usage::UsageLedger;

/// File-backed settings and usage storage.
///
/// # Example
///
/// ```no_run
/// use claude_auto::core::paths::AppPaths;
/// use claude_auto::store::{JsonFileStore, SettingsStore};
///
/// let store = JsonFileStore::new(AppPaths::from_env().expect("home"));
/// let settings = store.load_settings().unwrap();
/// println!("API enabled: {}", settings.api_enabled);
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    paths: AppPaths,
}

impl JsonFileStore {
    pub fn new(paths: AppPaths) -> Self {
        Self { paths }
    }

    /// Store rooted at the environment's app directory.
    pub fn from_env() -> Result<Self, StoreError> {
        AppPaths::from_env()
            .map(Self::new)
            .ok_or(StoreError::NoHomeDir)
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    fn read<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no stored state, using defaults");
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    fn write<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        self.paths.ensure_root().map_err(write_err)?;
        let contents = serde_json::to_string_pretty(value).map_err(|e| StoreError::Write {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        write_atomic(path, contents.as_bytes(), None).map_err(write_err)?;
        debug!(path = %path.display(), "saved");
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn load_settings(&self) -> Result<Settings, StoreError> {
        let path = self.paths.settings_path();
        let settings: Settings = Self::read(&path)?.unwrap_or_default();
        settings.normalized().map_err(|e| StoreError::Corrupt {
            path,
            message: format!("warningThreshold: {}", e),
        })
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.write(&self.paths.settings_path(), settings)
    }
}

impl UsageStore for JsonFileStore {
    fn load_usage(&self) -> Result<UsageLedger, StoreError> {
        Ok(Self::read(&self.paths.usage_path())?.unwrap_or_default())
    }

    fn save_usage(&self, ledger: &UsageLedger) -> Result<(), StoreError> {
        self.write(&self.paths.usage_path(), ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::SettingsCommand;
    use crate::core::types::{Route, UtcTimestamp};
    use crate::core::usage::COST_PER_CALL;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, JsonFileStore) {
        let temp = TempDir::new().expect("create temp dir");
        let store = JsonFileStore::new(AppPaths::new(temp.path().join("app")));
        (temp, store)
    }

    mod settings {
        use super::*;

        #[test]
        fn absent_file_gives_defaults() {
            let (_temp, store) = create_test_store();
            assert_eq!(store.load_settings().unwrap(), Settings::default());
            assert!(!store.paths().settings_path().exists());
        }

        #[test]
        fn save_and_reload() {
            let (_temp, store) = create_test_store();
            let mut settings = Settings::default();
            settings.apply(SettingsCommand::SetCostLimit(12.5)).unwrap();
            settings.apply(SettingsCommand::ToggleConfirmation).unwrap();

            store.save_settings(&settings).unwrap();
            assert_eq!(store.load_settings().unwrap(), settings);
        }

        #[test]
        fn corrupt_file_is_an_error_and_untouched() {
            let (_temp, store) = create_test_store();
            store.paths().ensure_root().unwrap();
            let path = store.paths().settings_path();
            fs::write(&path, "{ not json").unwrap();

            let err = store.load_settings().unwrap_err();
            assert!(matches!(err, StoreError::Corrupt { .. }));
            assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
        }

        #[test]
        fn file_uses_camel_case() {
            let (_temp, store) = create_test_store();
            store.save_settings(&Settings::default()).unwrap();
            let raw = fs::read_to_string(store.paths().settings_path()).unwrap();
            assert!(raw.contains("\"apiEnabled\": true"));
            assert!(raw.contains("\"requireConfirmation\": false"));
        }
    }

    mod usage {
        use super::*;

        #[test]
        fn absent_file_gives_fresh_ledger() {
            let (_temp, store) = create_test_store();
            let ledger = store.load_usage().unwrap();
            assert_eq!(ledger.total_calls, 0);
            assert!(ledger.daily_usage.is_empty());
        }

        #[test]
        fn save_and_reload() {
            let (_temp, store) = create_test_store();
            let now = UtcTimestamp::now();
            let mut ledger = UsageLedger::new(now);
            ledger.record(Route::Remote, COST_PER_CALL, now);
            ledger.record(Route::Local, COST_PER_CALL, now);

            store.save_usage(&ledger).unwrap();
            assert_eq!(store.load_usage().unwrap(), ledger);
        }

        #[test]
        fn wrong_shape_is_corrupt() {
            let (_temp, store) = create_test_store();
            store.paths().ensure_root().unwrap();
            fs::write(store.paths().usage_path(), r#"{"totalCalls": "many"}"#).unwrap();

            assert!(matches!(
                store.load_usage(),
                Err(StoreError::Corrupt { .. })
            ));
        }
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_path_is_read_error() {
        let (_temp, store) = create_test_store();
        // A directory where the file should be cannot be read as a string.
        fs::create_dir_all(store.paths().usage_path()).unwrap();
        assert!(matches!(store.load_usage(), Err(StoreError::Read { .. })));
    }
}
