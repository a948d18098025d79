//! store
//!
//! Persistence for cost-control settings and the usage ledger.
//!
//! # Architecture
//!
//! The engine never touches the filesystem directly. It receives a
//! [`SettingsStore`] and a [`UsageStore`], so routing can be tested
//! against [`MemoryStore`] and run for real against [`JsonFileStore`].
//!
//! - [`JsonFileStore`]: `settings.json` and `usage.json` under the app dir
//! - [`MemoryStore`]: shared in-memory state with failure injection

mod file_store;
mod memory;
mod traits;

pub use file_store::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{SettingsStore, StoreError, UsageStore};
