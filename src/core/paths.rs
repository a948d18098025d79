//! core::paths
//!
//! Centralized path routing for claude-auto storage locations.
//!
//! # Storage Layout
//!
//! All data lives under a single app directory:
//! - `settings.json` - Cost-control settings
//! - `usage.json` - Usage ledger
//! - `secrets.toml` - File-backed secret store (0600)
//! - `config.toml` - Tool configuration (lowest-precedence location)
//!
//! The app directory is `$CLAUDE_AUTO_HOME` when set, otherwise
//! `~/.claude-config`, the directory the tool has always used.
//!
//! **Hard rule:** no code outside this module joins file names onto the
//! app directory.
//!
//! # Example
//!
//! ```
//! use claude_auto::core::paths::AppPaths;
//! use std::path::PathBuf;
//!
//! let paths = AppPaths::new(PathBuf::from("/home/me/.claude-config"));
//! assert_eq!(
//!     paths.usage_path(),
//!     PathBuf::from("/home/me/.claude-config/usage.json")
//! );
//! ```

use std::path::{Path, PathBuf};

/// Environment variable overriding the app directory.
pub const HOME_ENV: &str = "CLAUDE_AUTO_HOME";

/// Directory name under the user's home.
pub const DEFAULT_DIR_NAME: &str = ".claude-config";

/// Path routing for one app directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    /// Route paths under an explicit root.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve the app directory from the environment.
    ///
    /// Returns `None` when neither `$CLAUDE_AUTO_HOME` nor a home
    /// directory is available.
    pub fn from_env() -> Option<Self> {
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Some(Self::new(PathBuf::from(dir)));
        }
        dirs::home_dir().map(|home| Self::new(home.join(DEFAULT_DIR_NAME)))
    }

    /// The app directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    pub fn usage_path(&self) -> PathBuf {
        self.root.join("usage.json")
    }

    pub fn secrets_path(&self) -> PathBuf {
        self.root.join("secrets.toml")
    }

    /// Canonical config location inside the app directory.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Create the app directory (owner-only on unix) if needed.
    pub fn ensure_root(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.root, std::fs::Permissions::from_mode(0o700))?;
        }
        Ok(())
    }
}
