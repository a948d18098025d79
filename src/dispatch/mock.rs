//! dispatch::mock
//!
//! Recording dispatcher for deterministic testing.
//!
//! # Example
//!
//! ```
//! use claude_auto::core::types::Route;
//! use claude_auto::dispatch::mock::RecordingDispatcher;
//! use claude_auto::dispatch::{DispatchRequest, Dispatcher};
//!
//! let dispatcher = RecordingDispatcher::new();
//! let outcome = dispatcher
//!     .dispatch(&DispatchRequest::local(vec!["fix this".into()]))
//!     .unwrap();
//!
//! assert_eq!(outcome.executed, Route::Local);
//! assert_eq!(dispatcher.calls().len(), 1);
//! ```

use std::sync::{Arc, Mutex};

use super::traits::{DispatchError, DispatchOutcome, DispatchRequest, Dispatcher};
use crate::core::types::Route;

/// Configured behavior for remote requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteBehavior {
    /// Remote runs succeed.
    Succeed,
    /// Remote runs fail and are retried locally.
    FallBack,
    /// Every dispatch fails to spawn.
    SpawnError,
}

/// One recorded dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub route: Route,
    pub args: Vec<String>,
    pub had_credential: bool,
}

/// Dispatcher that records requests and never spawns anything.
///
/// Thread-safe via internal `Arc<Mutex<...>>`; clones share state.
#[derive(Debug, Clone)]
pub struct RecordingDispatcher {
    inner: Arc<Mutex<RecordingInner>>,
}

#[derive(Debug)]
struct RecordingInner {
    behavior: RemoteBehavior,
    calls: Vec<RecordedCall>,
}

impl Default for RecordingDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::with_behavior(RemoteBehavior::Succeed)
    }

    pub fn with_behavior(behavior: RemoteBehavior) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RecordingInner {
                behavior,
                calls: Vec::new(),
            })),
        }
    }

    /// All recorded requests, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().unwrap().calls.clone()
    }
}

impl Dispatcher for RecordingDispatcher {
    fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchOutcome, DispatchError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(RecordedCall {
            route: request.route,
            args: request.args.clone(),
            had_credential: request.credential.is_some(),
        });

        match (inner.behavior, request.route) {
            (RemoteBehavior::SpawnError, _) => Err(DispatchError::Spawn {
                command: "recording".into(),
                source: std::io::Error::other("simulated spawn failure"),
            }),
            (RemoteBehavior::FallBack, Route::Remote) => Ok(DispatchOutcome {
                executed: Route::Local,
                exit_code: Some(0),
                fell_back: true,
            }),
            (_, route) => Ok(DispatchOutcome {
                executed: route,
                exit_code: Some(0),
                fell_back: false,
            }),
        }
    }
}
