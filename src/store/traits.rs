//! store::traits
//!
//! Persistence traits for settings and the usage ledger.
//!
//! # Semantics
//!
//! - `load` on absent state returns the record's defaults
//! - `load` on unreadable or malformed state returns an error; callers
//!   must not paper over it with defaults, since a later `save` would
//!   overwrite the user's data
//! - `save` replaces the whole record atomically
//!
//! There is no locking. Two concurrent invocations are last-writer-wins.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::settings::Settings;
use crate::core::usage::UsageLedger;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exists but does not hold a valid record.
    #[error("'{path}' is corrupt: {message} (fix or remove the file)")]
    Corrupt { path: PathBuf, message: String },

    #[error("cannot determine home directory (set CLAUDE_AUTO_HOME)")]
    NoHomeDir,
}

/// Persistence for [`Settings`].
pub trait SettingsStore: Send + Sync {
    /// Load settings, or defaults if none were ever saved.
    fn load_settings(&self) -> Result<Settings, StoreError>;

    /// Replace the stored settings.
    fn save_settings(&self, settings: &Settings) -> Result<(), StoreError>;
}

/// Persistence for the [`UsageLedger`].
pub trait UsageStore: Send + Sync {
    /// Load the ledger, or a fresh one if none was ever saved.
    fn load_usage(&self) -> Result<UsageLedger, StoreError>;

    /// Replace the stored ledger.
    fn save_usage(&self, ledger: &UsageLedger) -> Result<(), StoreError>;
}
