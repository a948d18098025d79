//! core
//!
//! Core domain types, pure decision logic and on-disk layout.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Route, UtcTimestamp, DayKey
//! - [`classify`] - Ordered heuristic rules mapping task text to a route
//! - [`settings`] - Cost-control settings and their explicit transitions
//! - [`usage`] - Usage ledger, recording and reporting
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for app storage
//! - [`atomic`] - Crash-safe file replacement
//!
//! # Design Principles
//!
//! - Classification and recording are pure and never fail
//! - State is passed as values; nothing here is global
//! - Schemas stay compatible with files written by earlier releases

pub mod atomic;
pub mod classify;
pub mod config;
pub mod paths;
pub mod settings;
pub mod types;
pub mod usage;
