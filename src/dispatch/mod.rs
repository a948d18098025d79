//! dispatch
//!
//! Execution of a routed task.
//!
//! - [`ProcessDispatcher`]: spawns the assistant CLI
//! - [`mock::RecordingDispatcher`]: records requests for tests

pub mod mock;
mod process;
mod traits;

pub use process::ProcessDispatcher;
pub use traits::{DispatchError, DispatchOutcome, DispatchRequest, Dispatcher};
