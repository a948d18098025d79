//! policy commands - Non-interactive settings transitions and usage reset

use anyhow::{Context as _, Result};

use super::Workspace;
use crate::core::settings::SettingsCommand;
use crate::core::types::UtcTimestamp;
use crate::engine::Context;
use crate::store::{SettingsStore, UsageStore};
use crate::ui::output;

/// Apply one settings command and save the result.
///
/// An invalid amount leaves the stored settings untouched.
pub fn apply_policy(ctx: &Context, workspace: &Workspace, command: SettingsCommand) -> Result<i32> {
    let message = apply_to(&workspace.store(), command)?;
    output::success(message, ctx.verbosity());
    Ok(0)
}

/// Load, apply, save. Returns the confirmation line.
pub(super) fn apply_to(store: &dyn SettingsStore, command: SettingsCommand) -> Result<String> {
    let mut settings = store.load_settings()?;
    settings.apply(command)?;
    store
        .save_settings(&settings)
        .context("Failed to save settings")?;
    Ok(command.describe(&settings))
}

/// Zero the usage ledger and start a new tracking period.
pub fn reset_usage(ctx: &Context, workspace: &Workspace) -> Result<i32> {
    reset_in(&workspace.store())?;
    output::success("Usage statistics reset", ctx.verbosity());
    Ok(0)
}

pub(super) fn reset_in(store: &dyn UsageStore) -> Result<()> {
    let mut usage = store.load_usage()?;
    usage.reset(UtcTimestamp::now());
    store.save_usage(&usage).context("Failed to save usage")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::Settings;
    use crate::core::types::Route;
    use crate::core::usage::UsageLedger;
    use crate::store::MemoryStore;

    #[test]
    fn applies_and_saves() {
        let store = MemoryStore::new();
        let message = apply_to(&store, SettingsCommand::SetCostLimit(5.0)).unwrap();
        assert_eq!(store.settings().cost_limit, Some(5.0));
        assert_eq!(store.settings_saves(), 1);
        assert!(message.contains("$5"));
    }

    #[test]
    fn invalid_amount_saves_nothing() {
        let store = MemoryStore::new().with_settings(Settings {
            cost_limit: Some(2.0),
            ..Default::default()
        });
        let err = apply_to(&store, SettingsCommand::SetCostLimit(-1.0)).unwrap_err();
        assert!(err.to_string().contains("invalid amount"));
        assert_eq!(store.settings_saves(), 0);
        assert_eq!(store.settings().cost_limit, Some(2.0));
    }

    #[test]
    fn corrupt_settings_are_not_overwritten() {
        let store = MemoryStore::new().corrupt();
        assert!(apply_to(&store, SettingsCommand::EnableApi).is_err());
        assert_eq!(store.settings_saves(), 0);
    }

    #[test]
    fn reset_zeroes_counters() {
        let now = UtcTimestamp::now();
        let mut usage = UsageLedger::new(now);
        usage.record(Route::Remote, 0.015, now);
        let store = MemoryStore::new().with_usage(usage.clone());

        reset_in(&store).unwrap();

        let after = store.usage();
        assert_eq!(after.total_calls, 0);
        assert_eq!(after.estimated_cost, 0.0);
        assert!(after.daily_usage.is_empty());
        assert!(after.last_reset > usage.last_reset);
    }
}
