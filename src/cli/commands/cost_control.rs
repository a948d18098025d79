//! cost-control command - Interactive settings menu
//!
//! Shows the current settings and usage, then a numbered menu. Loops until
//! the user exits (9), triggers an emergency shutdown (8) or input ends.
//! Every menu choice is also available as a non-interactive flag.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};

use super::policy::reset_in;
use super::Workspace;
use crate::core::settings::SettingsCommand;
use crate::core::types::UtcTimestamp;
use crate::engine::Context;
use crate::store::{SettingsStore, UsageStore};
use crate::ui::prompts::{confirm_with, input_with, PromptError};
use crate::ui::report::{render_header, render_menu, render_report, render_summary};

/// Run the cost-control center on the terminal.
pub fn cost_control(ctx: &Context, workspace: &Workspace) -> Result<i32> {
    if !ctx.interactive {
        bail!(
            "--cost-control needs an interactive terminal; use --enable, --disable, \
             --set-limit, --set-warning, --toggle-confirm, --reset-usage or --emergency-stop"
        );
    }

    let store = workspace.store();
    let stdin = io::stdin();
    run_menu(&mut stdin.lock(), &mut io::stdout(), &store, &store)?;
    Ok(0)
}

/// Drive the menu over the given streams until exit.
pub fn run_menu<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    settings_store: &dyn SettingsStore,
    usage_store: &dyn UsageStore,
) -> Result<()> {
    loop {
        let settings = settings_store.load_settings()?;
        let usage = usage_store.load_usage()?;

        writeln!(writer, "\n{}\n", render_header())?;
        writeln!(writer, "{}", render_summary(&settings, &usage))?;
        writeln!(writer, "{}\n", render_menu())?;

        let choice = match input_with(reader, writer, "Select option (1-9)", None) {
            Ok(choice) => choice,
            Err(PromptError::Cancelled) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        match choice.as_str() {
            "1" => apply(writer, settings_store, SettingsCommand::EnableApi)?,
            "2" => {
                apply(writer, settings_store, SettingsCommand::DisableApi)?;
                writeln!(writer, "This prevents ALL API costs")?;
            }
            "3" => {
                let prompt = "Enter cost limit in USD (0 for no limit)";
                if let Some(amount) = read_amount(reader, writer, prompt)? {
                    apply(writer, settings_store, SettingsCommand::SetCostLimit(amount))?;
                }
            }
            "4" => {
                let prompt = "Enter warning threshold in USD";
                if let Some(amount) = read_amount(reader, writer, prompt)? {
                    apply(
                        writer,
                        settings_store,
                        SettingsCommand::SetWarningThreshold(amount),
                    )?;
                }
            }
            "5" => apply(writer, settings_store, SettingsCommand::ToggleConfirmation)?,
            "6" => {
                let question = "Reset all usage statistics?";
                match confirm_with(reader, writer, question, false) {
                    Ok(true) => {
                        reset_in(usage_store)?;
                        writeln!(writer, "\nUsage statistics reset")?;
                    }
                    Ok(false) | Err(PromptError::Cancelled) => {
                        writeln!(writer, "\nReset cancelled")?;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            "7" => {
                let report = usage_store.load_usage()?.report(UtcTimestamp::now());
                writeln!(writer, "\n{}", render_report(&report))?;
                match input_with(reader, writer, "Press Enter to continue", None) {
                    Ok(_) => {}
                    Err(PromptError::Cancelled) => return Ok(()),
                    Err(e) => return Err(e.into()),
                }
            }
            "8" => {
                apply(writer, settings_store, SettingsCommand::EmergencyShutdown)?;
                writeln!(writer, "All API calls blocked; no costs will be incurred")?;
                writeln!(
                    writer,
                    "Run 'claude-auto --cost-control' to re-enable features"
                )?;
                return Ok(());
            }
            "9" => {
                writeln!(writer, "\nGoodbye!")?;
                return Ok(());
            }
            _ => writeln!(writer, "\nInvalid option")?,
        }
    }
}

/// Apply one settings command and report it.
///
/// A rejected amount is reported and nothing is saved.
fn apply<W: Write>(
    writer: &mut W,
    store: &dyn SettingsStore,
    command: SettingsCommand,
) -> Result<()> {
    let mut settings = store.load_settings()?;
    if let Err(e) = settings.apply(command) {
        writeln!(writer, "\n{}", e)?;
        return Ok(());
    }
    store.save_settings(&settings)?;
    writeln!(writer, "\n{}", command.describe(&settings))?;
    Ok(())
}

/// Read a dollar amount; `None` (after a message) when it does not parse.
fn read_amount<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    prompt: &str,
) -> Result<Option<f64>> {
    let answer = match input_with(reader, writer, prompt, None) {
        Ok(answer) => answer,
        Err(PromptError::Cancelled) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    match answer.trim_start_matches('$').parse::<f64>() {
        Ok(amount) => Ok(Some(amount)),
        Err(_) => {
            writeln!(writer, "Invalid amount")?;
            Ok(None)
        }
    }
}
