//! store::memory
//!
//! In-memory store for deterministic testing.
//!
//! # Example
//!
//! ```
//! use claude_auto::core::settings::Settings;
//! use claude_auto::store::{MemoryStore, SettingsStore};
//!
//! let store = MemoryStore::new();
//! let mut settings = store.load_settings().unwrap();
//! settings.force_local = true;
//! store.save_settings(&settings).unwrap();
//!
//! assert!(store.settings().force_local);
//! assert_eq!(store.settings_saves(), 1);
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::traits::{SettingsStore, StoreError, UsageStore};
use crate::core::settings::Settings;
use crate::core::usage::UsageLedger;

/// Memory-backed settings and usage storage.
///
/// Thread-safe via internal `Arc<Mutex<...>>`; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    settings: Settings,
    usage: UsageLedger,
    settings_saves: usize,
    usage_saves: usize,
    corrupt: bool,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the given settings.
    pub fn with_settings(self, settings: Settings) -> Self {
        self.inner.lock().unwrap().settings = settings;
        self
    }

    /// Start from the given ledger.
    pub fn with_usage(self, usage: UsageLedger) -> Self {
        self.inner.lock().unwrap().usage = usage;
        self
    }

    /// Make every load fail as if the backing data were malformed.
    pub fn corrupt(self) -> Self {
        self.inner.lock().unwrap().corrupt = true;
        self
    }

    /// Make every save fail.
    pub fn failing_saves(self) -> Self {
        self.inner.lock().unwrap().fail_saves = true;
        self
    }

    /// Current settings snapshot.
    pub fn settings(&self) -> Settings {
        self.inner.lock().unwrap().settings.clone()
    }

    /// Current ledger snapshot.
    pub fn usage(&self) -> UsageLedger {
        self.inner.lock().unwrap().usage.clone()
    }

    pub fn settings_saves(&self) -> usize {
        self.inner.lock().unwrap().settings_saves
    }

    pub fn usage_saves(&self) -> usize {
        self.inner.lock().unwrap().usage_saves
    }
}

fn memory_path(name: &str) -> PathBuf {
    PathBuf::from(format!("<memory>/{}", name))
}

impl SettingsStore for MemoryStore {
    fn load_settings(&self) -> Result<Settings, StoreError> {
        let inner = self.inner.lock().unwrap();
        if inner.corrupt {
            return Err(StoreError::Corrupt {
                path: memory_path("settings.json"),
                message: "simulated corruption".into(),
            });
        }
        Ok(inner.settings.clone())
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_saves {
            return Err(StoreError::Write {
                path: memory_path("settings.json"),
                source: std::io::Error::other("simulated write failure"),
            });
        }
        inner.settings = settings.clone();
        inner.settings_saves += 1;
        Ok(())
    }
}

impl UsageStore for MemoryStore {
    fn load_usage(&self) -> Result<UsageLedger, StoreError> {
        let inner = self.inner.lock().unwrap();
        if inner.corrupt {
            return Err(StoreError::Corrupt {
                path: memory_path("usage.json"),
                message: "simulated corruption".into(),
            });
        }
        Ok(inner.usage.clone())
    }

    fn save_usage(&self, ledger: &UsageLedger) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_saves {
            return Err(StoreError::Write {
                path: memory_path("usage.json"),
                source: std::io::Error::other("simulated write failure"),
            });
        }
        inner.usage = ledger.clone();
        inner.usage_saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Route, UtcTimestamp};

    #[test]
    fn clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();

        let now = UtcTimestamp::now();
        let mut ledger = UsageLedger::new(now);
        ledger.record(Route::Local, 0.015, now);
        other.save_usage(&ledger).unwrap();

        assert_eq!(store.usage().local_calls, 1);
        assert_eq!(store.usage_saves(), 1);
    }

    #[test]
    fn corrupt_fails_loads() {
        let store = MemoryStore::new().corrupt();
        assert!(matches!(
            store.load_settings(),
            Err(StoreError::Corrupt { .. })
        ));
        assert!(store.load_usage().is_err());
    }

    #[test]
    fn failing_saves_leave_state() {
        let store = MemoryStore::new().failing_saves();
        let settings = Settings {
            force_local: true,
            ..Default::default()
        };
        assert!(store.save_settings(&settings).is_err());
        assert!(!store.settings().force_local);
        assert_eq!(store.settings_saves(), 0);
    }
}
