//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order of precedence:
//! 1. `$CLAUDE_AUTO_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/claude-auto/config.toml`
//! 3. `<app dir>/config.toml`
//!
//! # Validation
//!
//! Values are validated after parsing: the assistant command must be
//! non-empty and the per-call cost must be a finite, non-negative number.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Tool configuration.
///
/// Every field is optional; accessors on [`super::Config`] supply defaults.
///
/// # Example
///
/// ```toml
/// assistant_command = "claude"
/// remote_args = ["--api", "--max-context=1000000"]
/// cost_per_call = 0.015
/// fallback_to_local = true
/// interactive = true
///
/// [secrets]
/// provider = "file"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Executable of the assistant CLI.
    pub assistant_command: Option<String>,

    /// Arguments prepended to the task for remote (API) invocations.
    pub remote_args: Option<Vec<String>>,

    /// Estimated cost of one remote call.
    pub cost_per_call: Option<f64>,

    /// Retry locally when the remote invocation fails.
    pub fallback_to_local: Option<bool>,

    /// Allow interactive prompts.
    pub interactive: Option<bool>,

    /// Secret storage settings
    pub secrets: Option<SecretsConfig>,
}

impl AppConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(command) = &self.assistant_command {
            if command.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "assistant_command cannot be empty".to_string(),
                ));
            }
        }

        if let Some(cost) = self.cost_per_call {
            if !cost.is_finite() || cost < 0.0 {
                return Err(ConfigError::InvalidValue(format!(
                    "cost_per_call must be a finite number >= 0, got {}",
                    cost
                )));
            }
        }

        if let Some(secrets) = &self.secrets {
            secrets.validate()?;
        }

        Ok(())
    }
}

/// Secrets configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SecretsConfig {
    /// Provider to use ("file" or "keychain")
    pub provider: Option<String>,
}

impl SecretsConfig {
    /// Valid secret providers.
    pub const VALID_PROVIDERS: &'static [&'static str] = &["file", "keychain"];

    /// Validate the secrets configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(provider) = &self.provider {
            if !Self::VALID_PROVIDERS.contains(&provider.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid secrets provider '{}', must be one of: {}",
                    provider,
                    Self::VALID_PROVIDERS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod app_config {
        use super::*;

        #[test]
        fn defaults() {
            let config = AppConfig::default();
            assert!(config.assistant_command.is_none());
            assert!(config.cost_per_call.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn empty_command_rejected() {
            let config = AppConfig {
                assistant_command: Some("  ".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn negative_cost_rejected() {
            let config = AppConfig {
                cost_per_call: Some(-0.5),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn zero_cost_allowed() {
            let config = AppConfig {
                cost_per_call: Some(0.0),
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }

        #[test]
        fn roundtrip() {
            let config = AppConfig {
                assistant_command: Some("claude".to_string()),
                remote_args: Some(vec!["--api".to_string()]),
                cost_per_call: Some(0.02),
                fallback_to_local: Some(false),
                interactive: Some(true),
                secrets: Some(SecretsConfig {
                    provider: Some("file".to_string()),
                }),
            };

            let toml = toml::to_string_pretty(&config).unwrap();
            let parsed: AppConfig = toml::from_str(&toml).unwrap();
            assert_eq!(config, parsed);
        }

        #[test]
        fn reject_unknown_fields() {
            let toml = r#"
                assistant_command = "claude"
                default_model = "opus"
            "#;

            let result: Result<AppConfig, _> = toml::from_str(toml);
            assert!(result.is_err());
        }
    }

    mod secrets_config {
        use super::*;

        #[test]
        fn valid_providers() {
            for provider in SecretsConfig::VALID_PROVIDERS {
                let config = SecretsConfig {
                    provider: Some(provider.to_string()),
                };
                assert!(config.validate().is_ok());
            }
        }

        #[test]
        fn invalid_provider() {
            let config = SecretsConfig {
                provider: Some("vault".to_string()),
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("vault"));
        }
    }
}
