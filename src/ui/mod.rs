//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Interactive prompts and confirmations
//! - [`output`] - Output formatting and display
//! - [`report`] - Status, usage report and menu rendering
//!
//! # Design
//!
//! All output and prompts go through this module so that quiet and
//! non-interactive modes are honored in one place.

pub mod output;
pub mod prompts;
pub mod report;
