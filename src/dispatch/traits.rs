//! dispatch::traits
//!
//! Dispatcher trait and request/outcome types.
//!
//! # Design
//!
//! A dispatcher runs one task on one route and reports the route that
//! actually executed. That route, not the requested one, is what the
//! usage ledger records: a remote request that fell back to a local run
//! is billed as local.

use thiserror::Error;

use crate::core::types::Route;
use crate::secrets::Credential;

/// Errors from dispatching a task.
///
/// Either variant means nothing ran to completion, so nothing is recorded.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("'{command}' not found; install the Claude CLI first (https://claude.ai/cli)")]
    NotFound { command: String },

    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
}

/// One execution request.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    /// Route chosen after gating.
    pub route: Route,
    /// Task arguments, passed through verbatim.
    pub args: Vec<String>,
    /// API key for remote runs.
    pub credential: Option<Credential>,
}

impl DispatchRequest {
    pub fn local(args: Vec<String>) -> Self {
        Self {
            route: Route::Local,
            args,
            credential: None,
        }
    }

    pub fn remote(args: Vec<String>, credential: Credential) -> Self {
        Self {
            route: Route::Remote,
            args,
            credential: Some(credential),
        }
    }
}

/// Result of a completed dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The route that actually ran.
    pub executed: Route,
    /// Child exit code; `None` if it was killed by a signal.
    pub exit_code: Option<i32>,
    /// True when a failed remote run was retried locally.
    pub fell_back: bool,
}

impl DispatchOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a task on a route.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchOutcome, DispatchError>;
}
