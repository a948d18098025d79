//! engine
//!
//! Orchestrates one routing invocation: Load -> Classify -> Gate ->
//! Confirm -> Dispatch -> Record.
//!
//! # Architecture
//!
//! - [`gate`] - Pure cost gating of a tentative route, plus advisories
//! - [`confirm`] - The confirmation capability and decision resolution
//! - [`runner`] - The lifecycle, wired to injected stores and dispatcher
//!
//! # Invariants
//!
//! - Gating only ever downgrades remote to local
//! - Nothing runs if stored state is corrupt
//! - Exactly one usage delta per completed dispatch, for the executed route
//!
//! # Example
//!
//! ```
//! use claude_auto::dispatch::mock::RecordingDispatcher;
//! use claude_auto::engine::{AssumeNo, Router};
//! use claude_auto::secrets::StaticCredential;
//! use claude_auto::store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let dispatcher = RecordingDispatcher::new();
//! let credentials = StaticCredential(Some("sk-ant-example".into()));
//!
//! let report = Router::new(&store, &store, &dispatcher, &credentials, &AssumeNo)
//!     .route(&["fix this bug".to_string()])
//!     .unwrap();
//!
//! assert_eq!(report.exit_code(), 0);
//! assert_eq!(store.usage().local_calls, 1);
//! ```

pub mod confirm;
pub mod gate;
pub mod runner;

pub use confirm::{resolve, AssumeNo, AssumeYes, Confirm, FinalRoute};
pub use gate::{advisories, decide, Advisory, DowngradeReason, GateDecision};
pub use runner::{RouteReport, Router};

use crate::dispatch::DispatchError;
use crate::store::StoreError;

/// Execution context for commands.
///
/// Global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone)]
pub struct Context {
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive prompts allowed.
    pub interactive: bool,
    /// Answer yes to the API confirmation prompt.
    pub assume_yes: bool,
    /// Verify API keys against the service during setup.
    pub verify: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            debug: false,
            quiet: false,
            interactive: true,
            assume_yes: false,
            verify: true,
        }
    }
}

impl Context {
    pub fn verbosity(&self) -> crate::ui::output::Verbosity {
        crate::ui::output::Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Errors from a routing invocation.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
