//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Tool configuration lives in a single optional TOML file. It is separate
//! from the cost-control settings in `settings.json`: configuration says
//! *how* to run the assistant, settings say *whether* the remote path may
//! be used.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Locations
//!
//! Searched in order, first existing file wins:
//! 1. `$CLAUDE_AUTO_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/claude-auto/config.toml`
//! 3. `<app dir>/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use claude_auto::core::config::Config;
//! use claude_auto::core::paths::AppPaths;
//!
//! let paths = AppPaths::from_env().expect("home directory");
//! let config = Config::load(&paths).unwrap();
//!
//! println!("Assistant: {}", config.assistant_command());
//! println!("Cost per call: {}", config.cost_per_call());
//! ```

pub mod schema;

pub use schema::{AppConfig, SecretsConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::AppPaths;
use crate::core::usage::COST_PER_CALL;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CLAUDE_AUTO_CONFIG";

/// Default assistant executable.
pub const DEFAULT_ASSISTANT_COMMAND: &str = "claude";

/// Default arguments for a remote (API) invocation.
pub const DEFAULT_REMOTE_ARGS: &[&str] = &["--api", "--max-context=1000000"];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with defaults applied through accessors.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Raw file contents
    pub file: AppConfig,
    /// Path the file was loaded from, if any
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated. A missing file is not an error (defaults are used).
    pub fn load(paths: &AppPaths) -> Result<Self, ConfigError> {
        Self::load_from(&Self::search_paths(paths))
    }

    /// Load the first existing file among `candidates`.
    pub fn load_from(candidates: &[PathBuf]) -> Result<Self, ConfigError> {
        for path in candidates {
            if path.exists() {
                let file = Self::read_config(path)?;
                file.validate()?;
                return Ok(Self {
                    file,
                    loaded_from: Some(path.clone()),
                });
            }
        }
        Ok(Self::default())
    }

    /// Candidate config locations in precedence order.
    pub fn search_paths(paths: &AppPaths) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Some(explicit) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            candidates.push(PathBuf::from(explicit));
        }

        if let Some(xdg_home) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            candidates.push(PathBuf::from(xdg_home).join("claude-auto/config.toml"));
        }

        candidates.push(paths.config_path());
        candidates
    }

    fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Assistant executable. Defaults to `claude`.
    pub fn assistant_command(&self) -> &str {
        self.file
            .assistant_command
            .as_deref()
            .unwrap_or(DEFAULT_ASSISTANT_COMMAND)
    }

    /// Arguments prepended for remote invocations.
    pub fn remote_args(&self) -> Vec<String> {
        match &self.file.remote_args {
            Some(args) => args.clone(),
            None => DEFAULT_REMOTE_ARGS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Estimated cost per remote call. Defaults to [`COST_PER_CALL`].
    pub fn cost_per_call(&self) -> f64 {
        self.file.cost_per_call.unwrap_or(COST_PER_CALL)
    }

    /// Whether a failed remote invocation is retried locally.
    ///
    /// Defaults to `true`.
    pub fn fallback_to_local(&self) -> bool {
        self.file.fallback_to_local.unwrap_or(true)
    }

    /// Whether interactive prompts are allowed by default.
    ///
    /// Defaults to `true`.
    pub fn interactive(&self) -> bool {
        self.file.interactive.unwrap_or(true)
    }

    /// Secrets provider. Defaults to "file".
    pub fn secrets_provider(&self) -> &str {
        self.file
            .secrets
            .as_ref()
            .and_then(|s| s.provider.as_deref())
            .unwrap_or(crate::secrets::DEFAULT_PROVIDER)
    }

    /// Path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_nothing_exists() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&[temp.path().join("missing.toml")]).unwrap();

        assert_eq!(config.assistant_command(), "claude");
        assert_eq!(config.remote_args(), vec!["--api", "--max-context=1000000"]);
        assert_eq!(config.cost_per_call(), 0.015);
        assert!(config.fallback_to_local());
        assert!(config.interactive());
        assert_eq!(config.secrets_provider(), "file");
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn first_existing_candidate_wins() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first.toml");
        let second = temp.path().join("second.toml");
        fs::write(&second, "assistant_command = \"second\"").unwrap();

        let config = Config::load_from(&[first.clone(), second.clone()]).unwrap();
        assert_eq!(config.assistant_command(), "second");
        assert_eq!(config.loaded_from(), Some(second.as_path()));

        fs::write(&first, "assistant_command = \"first\"").unwrap();
        let config = Config::load_from(&[first, second]).unwrap();
        assert_eq!(config.assistant_command(), "first");
    }

    #[test]
    fn overrides_apply() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            assistant_command = "/opt/bin/claude"
            remote_args = ["--api"]
            cost_per_call = 0.05
            fallback_to_local = false
            interactive = false
            "#,
        )
        .unwrap();

        let config = Config::load_from(&[path]).unwrap();
        assert_eq!(config.assistant_command(), "/opt/bin/claude");
        assert_eq!(config.remote_args(), vec!["--api"]);
        assert_eq!(config.cost_per_call(), 0.05);
        assert!(!config.fallback_to_local());
        assert!(!config.interactive());
    }

    #[test]
    fn parse_error_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "assistant_command = ").unwrap();

        let err = Config::load_from(&[path]).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn invalid_value_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "cost_per_call = -1.0").unwrap();

        let err = Config::load_from(&[path]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn app_dir_config_is_last_candidate() {
        let paths = AppPaths::new(PathBuf::from("/app"));
        let candidates = Config::search_paths(&paths);
        assert_eq!(candidates.last(), Some(&PathBuf::from("/app/config.toml")));
    }
}
