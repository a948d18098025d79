//! core::settings
//!
//! Cost-control settings and the explicit commands that change them.
//!
//! # Storage
//!
//! Settings are persisted as `settings.json` with camelCase keys:
//!
//! ```json
//! {
//!   "apiEnabled": true,
//!   "forceLocal": false,
//!   "costLimit": null,
//!   "warningThreshold": 10.0,
//!   "requireConfirmation": false
//! }
//! ```
//!
//! Unknown keys are ignored so files written by older tools still load.
//!
//! # Invariants
//!
//! - `force_local == true` means remote execution is never selected
//! - `cost_limit`, when set, is finite and positive
//! - `warning_threshold` is finite and non-negative
//!
//! Every mutation goes through [`SettingsCommand`]; each command is an
//! independent user action, never sequenced with another.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default soft ceiling, in cost units (USD).
pub const DEFAULT_WARNING_THRESHOLD: f64 = 10.0;

/// Errors from settings validation.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("invalid amount {0}: must be a finite number >= 0")]
    InvalidAmount(f64),
}

/// Persisted cost-control settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Master allow switch for the remote path.
    pub api_enabled: bool,
    /// Hard override: never go remote.
    pub force_local: bool,
    /// Hard ceiling on estimated cost. `None` is unlimited.
    pub cost_limit: Option<f64>,
    /// Soft ceiling that triggers a warning.
    pub warning_threshold: f64,
    /// Ask before every remote execution.
    pub require_confirmation: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_enabled: true,
            force_local: false,
            cost_limit: None,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            require_confirmation: false,
        }
    }
}

impl Settings {
    /// True when policy permits the remote path at all.
    pub fn remote_allowed(&self) -> bool {
        self.api_enabled && !self.force_local
    }

    /// Bring settings read from disk in line with the invariants above.
    ///
    /// A `cost_limit` of zero or less means unlimited, the same as
    /// `SetCostLimit(0)`. A negative or non-finite `warning_threshold` is an
    /// error rather than a silent default.
    pub fn normalized(mut self) -> Result<Self, SettingsError> {
        self.cost_limit = self.cost_limit.filter(|limit| limit.is_finite() && *limit > 0.0);
        self.warning_threshold = validate_amount(self.warning_threshold)?;
        Ok(self)
    }

    /// Apply a user command in place.
    ///
    /// Validation happens before any field changes, so a rejected command
    /// leaves `self` untouched.
    pub fn apply(&mut self, command: SettingsCommand) -> Result<(), SettingsError> {
        match command {
            SettingsCommand::EnableApi => {
                self.api_enabled = true;
                self.force_local = false;
            }
            SettingsCommand::DisableApi => {
                self.api_enabled = false;
                self.force_local = true;
            }
            SettingsCommand::SetCostLimit(amount) => {
                let amount = validate_amount(amount)?;
                self.cost_limit = (amount > 0.0).then_some(amount);
            }
            SettingsCommand::SetWarningThreshold(amount) => {
                self.warning_threshold = validate_amount(amount)?;
            }
            SettingsCommand::ToggleConfirmation => {
                self.require_confirmation = !self.require_confirmation;
            }
            SettingsCommand::EmergencyShutdown => {
                self.api_enabled = false;
                self.force_local = true;
                self.require_confirmation = true;
            }
        }
        Ok(())
    }
}

fn validate_amount(amount: f64) -> Result<f64, SettingsError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(SettingsError::InvalidAmount(amount))
    }
}

/// An explicit user action on the settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsCommand {
    /// Allow remote calls again (`apiEnabled = true`, `forceLocal = false`).
    EnableApi,
    /// Block remote calls (`apiEnabled = false`, `forceLocal = true`).
    DisableApi,
    /// Set the hard ceiling; `0` removes it.
    SetCostLimit(f64),
    /// Set the soft warning ceiling.
    SetWarningThreshold(f64),
    /// Flip whether remote calls need confirmation.
    ToggleConfirmation,
    /// Disable, force local and require confirmation in one step.
    EmergencyShutdown,
}

impl SettingsCommand {
    /// One-line confirmation shown after the command is saved.
    pub fn describe(&self, after: &Settings) -> String {
        match self {
            SettingsCommand::EnableApi => {
                "API mode ENABLED - API will be used when needed".to_string()
            }
            SettingsCommand::DisableApi => {
                "API mode DISABLED - only local Claude will be used".to_string()
            }
            SettingsCommand::SetCostLimit(_) => match after.cost_limit {
                Some(limit) => format!(
                    "Cost limit set to ${} - API calls are blocked once it is reached",
                    limit
                ),
                None => "Cost limit removed".to_string(),
            },
            SettingsCommand::SetWarningThreshold(_) => {
                format!("Warning threshold set to ${}", after.warning_threshold)
            }
            SettingsCommand::ToggleConfirmation => {
                if after.require_confirmation {
                    "Confirmation REQUIRED for API calls".to_string()
                } else {
                    "Confirmation NOT REQUIRED for API calls".to_string()
                }
            }
            SettingsCommand::EmergencyShutdown => {
                "Emergency shutdown: API disabled, local forced, confirmation required".to_string()
            }
        }
    }
}
