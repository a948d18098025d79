//! claude-auto - Route assistant tasks between the Claude API and local Claude
//!
//! claude-auto looks at a task, decides whether it needs the high-context
//! API or can run on the local assistant CLI, checks the decision against
//! the user's cost controls, runs the assistant, and records usage.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`engine`] - Orchestrates Load → Classify → Gate → Confirm → Dispatch → Record
//! - [`core`] - Classifier, settings, usage ledger, config and paths
//! - [`store`] - Persistence of settings and usage
//! - [`dispatch`] - Running the assistant CLI
//! - [`secrets`] - Secret storage and API key resolution
//! - [`auth`] - API key verification
//! - [`ui`] - Output, prompts and report rendering
//!
//! # Correctness Invariants
//!
//! 1. Cost controls only ever move a task from the API to local
//! 2. Forced-local mode never reaches the API or the confirmation prompt
//! 3. Every completed run is recorded exactly once, on the route that ran
//! 4. Corrupt stored state is reported, never silently overwritten

pub mod auth;
pub mod cli;
pub mod core;
pub mod dispatch;
pub mod engine;
pub mod secrets;
pub mod store;
pub mod ui;
