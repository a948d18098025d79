//! cli::commands::setup
//!
//! API key setup and removal.
//!
//! # Design
//!
//! The setup command:
//! - Stores the key through the configured SecretStore
//! - NEVER prints the key to stdout/stderr
//! - Supports both interactive (masked prompt) and non-interactive
//!   (`--api-key`) modes
//! - Verifies the key against the service unless `--no-verify` is given
//!
//! # Example
//!
//! ```bash
//! # Interactive (prompts for the key)
//! claude-auto --setup
//!
//! # Non-interactive
//! claude-auto --setup --api-key sk-ant-xxxx
//!
//! # Remove the stored key
//! claude-auto --logout
//! ```

use anyhow::{bail, Context as _, Result};

use super::status::key_availability;
use super::Workspace;
use crate::auth::{check_key_format, AnthropicVerifier, KeyFormat, KeyVerifier, KEY_PREFIX};
use crate::engine::Context;
use crate::secrets::{SecretStore, API_KEY_ENV, API_KEY_SECRET};
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::{self, PromptError};
use crate::ui::report::render_keys;

/// What happened to the key offered during setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    Stored,
    /// Empty input.
    Skipped,
}

/// Run setup.
///
/// # Security
///
/// This function NEVER prints the key value. It only confirms success or
/// failure.
pub fn setup(ctx: &Context, workspace: &Workspace, api_key: Option<&str>) -> Result<i32> {
    let verbosity = ctx.verbosity();
    let store = workspace.secret_store()?;

    output::print("Claude Auto setup", verbosity);
    output::print(
        "Get an API key at https://console.anthropic.com/",
        verbosity,
    );
    output::print(render_keys(key_availability(workspace)), verbosity);

    let key = match read_key(ctx, api_key) {
        Ok(key) => key,
        Err(PromptError::Cancelled) => {
            output::print("Setup cancelled.", verbosity);
            return Ok(0);
        }
        Err(PromptError::NotInteractive) => {
            bail!("API key required. Use --api-key <KEY> or run interactively.")
        }
        Err(e) => return Err(e).context("Failed to read API key"),
    };

    let verifier = if ctx.verify {
        Some(AnthropicVerifier::from_env().context("Failed to create HTTP client")?)
    } else {
        None
    };
    let verifier = verifier.as_ref().map(|v| v as &dyn KeyVerifier);

    match store_key(store.as_ref(), verifier, &key, verbosity)? {
        SetupOutcome::Stored => {
            output::success("API key saved.", verbosity);
            print_examples(verbosity);
        }
        SetupOutcome::Skipped => {
            output::print("Skipping API key setup.", verbosity);
            output::print(
                format!(
                    "Run 'claude-auto --setup' again later, or set {}.",
                    API_KEY_ENV
                ),
                verbosity,
            );
        }
    }
    Ok(0)
}

/// Remove the stored key.
pub fn logout(ctx: &Context, workspace: &Workspace) -> Result<i32> {
    let store = workspace.secret_store()?;
    store
        .delete(API_KEY_SECRET)
        .context("Failed to remove stored API key")?;

    output::success("Stored API key removed.", ctx.verbosity());
    if key_availability(workspace).env {
        output::warn(
            format!("{} is still set in the environment", API_KEY_ENV),
            ctx.verbosity(),
        );
    }
    Ok(0)
}

fn read_key(ctx: &Context, api_key: Option<&str>) -> Result<String, PromptError> {
    if let Some(key) = api_key {
        return Ok(key.trim().to_string());
    }
    prompts::password(
        "Enter your Anthropic API key (or press Enter to skip)",
        ctx.interactive,
    )
}

/// Check, optionally verify, and store a key.
///
/// Nothing is stored when verification fails.
pub fn store_key(
    store: &dyn SecretStore,
    verifier: Option<&dyn KeyVerifier>,
    key: &str,
    verbosity: Verbosity,
) -> Result<SetupOutcome> {
    let key = key.trim();
    match check_key_format(key) {
        KeyFormat::Empty => return Ok(SetupOutcome::Skipped),
        KeyFormat::UnexpectedPrefix => output::warn(
            format!(
                "API key should start with \"{}\"; continuing anyway",
                KEY_PREFIX
            ),
            verbosity,
        ),
        KeyFormat::Valid => {}
    }

    if let Some(verifier) = verifier {
        output::notice("Testing API key...", verbosity);
        verify_blocking(verifier, key).context(
            "API key test failed; check the key and run 'claude-auto --setup' again \
             (or pass --no-verify)",
        )?;
        output::notice("API key accepted.", verbosity);
    }

    store
        .set(API_KEY_SECRET, key)
        .context("Failed to store API key")?;
    Ok(SetupOutcome::Stored)
}

/// Drive the async verifier on a current-thread runtime.
fn verify_blocking(verifier: &dyn KeyVerifier, key: &str) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(verifier.verify(key))?;
    Ok(())
}

fn print_examples(verbosity: Verbosity) {
    output::print(
        "\
Usage examples:
  # High context, uses the API:
  claude-auto analyze the entire codebase
  # Uses local Claude:
  claude-auto fix this function",
        verbosity,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::VerifyError;
    use crate::secrets::FileSecretStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct FakeVerifier {
        accept: bool,
        calls: AtomicUsize,
    }

    impl FakeVerifier {
        fn new(accept: bool) -> Self {
            Self {
                accept,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl KeyVerifier for FakeVerifier {
        async fn verify(&self, _api_key: &str) -> Result<(), VerifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.accept {
                Ok(())
            } else {
                Err(VerifyError::InvalidKey)
            }
        }
    }

    fn secret_store() -> (TempDir, FileSecretStore) {
        let dir = TempDir::new().unwrap();
        let store = FileSecretStore::with_path(dir.path().join("secrets.toml"));
        (dir, store)
    }

    #[test]
    fn stores_verified_key() {
        let (_dir, store) = secret_store();
        let verifier = FakeVerifier::new(true);
        let outcome = store_key(&store, Some(&verifier), " sk-ant-abc \n", Verbosity::Quiet).unwrap();
        assert_eq!(outcome, SetupOutcome::Stored);
        assert_eq!(store.get(API_KEY_SECRET).unwrap().as_deref(), Some("sk-ant-abc"));
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rejected_key_is_not_stored() {
        let (_dir, store) = secret_store();
        let verifier = FakeVerifier::new(false);
        let err = store_key(&store, Some(&verifier), "sk-ant-bad", Verbosity::Quiet).unwrap_err();
        assert!(!format!("{:#}", err).contains("sk-ant-bad"));
        assert_eq!(store.get(API_KEY_SECRET).unwrap(), None);
    }

    #[test]
    fn empty_key_skips() {
        let (_dir, store) = secret_store();
        let verifier = FakeVerifier::new(true);
        let outcome = store_key(&store, Some(&verifier), "   ", Verbosity::Quiet).unwrap();
        assert_eq!(outcome, SetupOutcome::Skipped);
        assert_eq!(verifier.calls.load(Ordering::SeqCst), 0);
        assert!(!store.exists(API_KEY_SECRET).unwrap());
    }

    #[test]
    fn unusual_prefix_still_stored_without_verification() {
        let (_dir, store) = secret_store();
        let outcome = store_key(&store, None, "custom-key", Verbosity::Quiet).unwrap();
        assert_eq!(outcome, SetupOutcome::Stored);
        assert!(store.exists(API_KEY_SECRET).unwrap());
    }
}
