//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each handler:
//! 1. Builds the stores and collaborators it needs from the [`Workspace`]
//! 2. Calls into the engine or the domain types
//! 3. Formats and displays output
//!
//! Handlers return the process exit code. Only routing propagates a child
//! exit code; everything else returns 0 or an error.

mod completion;
mod cost_control;
mod explain;
mod policy;
mod route;
mod setup;
mod status;

pub use completion::completion;
pub use cost_control::cost_control;
pub use explain::explain;
pub use policy::{apply_policy, reset_usage};
pub use route::{dry_run, route};
pub use setup::{logout, setup};
pub use status::{report, status};

use anyhow::{Context as _, Result};

use crate::cli::args::{Action, Cli};
use crate::core::config::Config;
use crate::core::paths::AppPaths;
use crate::engine::Context;
use crate::secrets::{self, EnvOrStoreCredential, SecretStore};
use crate::store::{JsonFileStore, StoreError};

/// App directory and loaded configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub paths: AppPaths,
    pub config: Config,
}

impl Workspace {
    /// Resolve the app directory and load the config.
    pub fn load() -> Result<Self> {
        let paths = AppPaths::from_env().ok_or(StoreError::NoHomeDir)?;
        let config = Config::load(&paths).context("Failed to load config")?;
        Ok(Self::new(paths, config))
    }

    pub fn new(paths: AppPaths, config: Config) -> Self {
        Self { paths, config }
    }

    /// Settings and usage persistence.
    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(self.paths.clone())
    }

    /// The configured secret store.
    pub fn secret_store(&self) -> Result<Box<dyn SecretStore>> {
        secrets::create_store(self.config.secrets_provider(), &self.paths)
            .context("Failed to initialize secret store")
    }

    /// `ANTHROPIC_API_KEY`, then the secret store.
    pub fn credentials(&self) -> Result<EnvOrStoreCredential> {
        Ok(EnvOrStoreCredential::new(self.secret_store()?))
    }
}

/// Dispatch an action to its handler.
pub fn dispatch(cli: &Cli, action: Action, workspace: &Workspace, ctx: &Context) -> Result<i32> {
    match action {
        Action::Route => route::route(ctx, workspace, &cli.task),
        Action::DryRun => route::dry_run(ctx, workspace, &cli.task),
        Action::Explain => explain::explain(ctx, &cli.task),
        Action::Setup => setup::setup(ctx, workspace, cli.api_key.as_deref()),
        Action::Logout => setup::logout(ctx, workspace),
        Action::CostControl => cost_control::cost_control(ctx, workspace),
        Action::Status => status::status(ctx, workspace),
        Action::Report => status::report(ctx, workspace),
        Action::ResetUsage => policy::reset_usage(ctx, workspace),
        Action::Policy(command) => policy::apply_policy(ctx, workspace, command),
        Action::Completion(shell) => {
            completion::completion(shell)?;
            Ok(0)
        }
    }
}
