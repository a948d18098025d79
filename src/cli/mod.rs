//! cli
//!
//! Command-line interface layer for claude-auto.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the log subscriber
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, loads the app
//! directory and config once, and hands them to a handler. Routing itself
//! happens in [`crate::engine`].

pub mod args;
pub mod commands;

pub use args::{Action, Cli, Shell};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::engine::Context;

/// Env var holding a log filter in `EnvFilter` syntax.
pub const LOG_ENV: &str = "CLAUDE_AUTO_LOG";

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Returns the
/// process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let action = cli.action();
    if let Action::Completion(shell) = action {
        commands::completion(shell)?;
        return Ok(0);
    }

    let workspace = commands::Workspace::load()?;
    let ctx = Context {
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(workspace.config.interactive()),
        assume_yes: cli.yes,
        verify: !cli.no_verify,
    };

    commands::dispatch(&cli, action, &workspace, &ctx)
}

/// Install a stderr fmt subscriber.
///
/// `CLAUDE_AUTO_LOG` wins when set; otherwise `debug` under `--debug` and
/// `warn` without it.
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
