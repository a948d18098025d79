//! status and report commands

use anyhow::Result;

use super::Workspace;
use crate::core::types::UtcTimestamp;
use crate::engine::{advisories, Context};
use crate::secrets::{FileSecretStore, API_KEY_ENV, API_KEY_SECRET, DEFAULT_PROVIDER};
use crate::store::{SettingsStore, UsageStore};
use crate::ui::output;
use crate::ui::report::{render_report, render_status, KeyAvailability};

/// Where an API key could come from right now.
///
/// Never reads the key value into output.
pub(super) fn key_availability(workspace: &Workspace) -> KeyAvailability {
    let env = std::env::var(API_KEY_ENV)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false);
    let stored = workspace
        .secret_store()
        .ok()
        .and_then(|store| store.exists(API_KEY_SECRET).ok());
    KeyAvailability { env, stored }
}

/// Print settings, usage and key availability.
///
/// Printed in quiet mode too.
pub fn status(ctx: &Context, workspace: &Workspace) -> Result<i32> {
    let store = workspace.store();
    let settings = store.load_settings()?;
    let usage = store.load_usage()?;

    println!(
        "{}",
        render_status(&settings, &usage, key_availability(workspace))
    );
    for advisory in advisories(&settings, &usage) {
        output::warn(advisory, ctx.verbosity());
    }
    if workspace.config.secrets_provider() == DEFAULT_PROVIDER {
        let secrets = FileSecretStore::new(&workspace.paths);
        if let Ok(false) = secrets.verify_permissions() {
            output::warn(
                format!(
                    "{} is readable by other users; run: chmod 600 {}",
                    secrets.path().display(),
                    secrets.path().display()
                ),
                ctx.verbosity(),
            );
        }
    }
    if let Some(path) = workspace.config.loaded_from() {
        output::debug(format!("config: {}", path.display()), ctx.verbosity());
    }
    output::debug(
        format!("app dir: {}", workspace.paths.root().display()),
        ctx.verbosity(),
    );
    Ok(0)
}

/// Print the detailed usage report.
pub fn report(_ctx: &Context, workspace: &Workspace) -> Result<i32> {
    let usage = workspace.store().load_usage()?;
    println!("{}", render_report(&usage.report(UtcTimestamp::now())));
    Ok(0)
}
