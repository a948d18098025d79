//! dispatch::process
//!
//! Dispatch by spawning the assistant CLI with inherited stdio.
//!
//! # Invocations
//!
//! - local: `<command> <args…>`
//! - remote: `<command> <remote_args…> <args…>` with `ANTHROPIC_API_KEY`
//!   set in the child's environment
//!
//! # Fallback
//!
//! With fallback enabled, a remote run that exits non-zero or fails to
//! spawn for a reason other than a missing executable is retried locally.
//! A missing executable is reported directly since the local run would
//! fail the same way.

use std::io::ErrorKind;
use std::process::{Command, ExitStatus};

use tracing::{debug, warn};

use super::traits::{DispatchError, DispatchOutcome, DispatchRequest, Dispatcher};
use crate::core::config::Config;
use crate::core::types::Route;
use crate::secrets::API_KEY_ENV;
use crate::ui::output::{self, Verbosity};

/// Spawns the assistant CLI as a child process.
#[derive(Debug, Clone)]
pub struct ProcessDispatcher {
    command: String,
    remote_args: Vec<String>,
    fallback_to_local: bool,
    verbosity: Verbosity,
}

impl ProcessDispatcher {
    pub fn new(command: impl Into<String>, remote_args: Vec<String>, fallback_to_local: bool) -> Self {
        Self {
            command: command.into(),
            remote_args,
            fallback_to_local,
            verbosity: Verbosity::Normal,
        }
    }

    /// Verbosity for fallback notices.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.assistant_command(),
            config.remote_args(),
            config.fallback_to_local(),
        )
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// The full argument vector for a route, without the executable.
    pub fn argv(&self, route: Route, args: &[String]) -> Vec<String> {
        match route {
            Route::Remote => self.remote_args.iter().chain(args).cloned().collect(),
            Route::Local => args.to_vec(),
        }
    }

    fn spawn(&self, request: &DispatchRequest) -> std::io::Result<ExitStatus> {
        let argv = self.argv(request.route, &request.args);
        debug!(command = %self.command, route = %request.route, argc = argv.len(), "spawning");

        let mut command = Command::new(&self.command);
        command.args(&argv);
        if let (Route::Remote, Some(credential)) = (request.route, &request.credential) {
            command.env(API_KEY_ENV, credential.expose());
        }
        command.status()
    }

    fn spawn_error(&self, e: std::io::Error) -> DispatchError {
        if e.kind() == ErrorKind::NotFound {
            DispatchError::NotFound {
                command: self.command.clone(),
            }
        } else {
            DispatchError::Spawn {
                command: self.command.clone(),
                source: e,
            }
        }
    }

    fn run_local(&self, args: &[String], fell_back: bool) -> Result<DispatchOutcome, DispatchError> {
        let request = DispatchRequest::local(args.to_vec());
        let status = self.spawn(&request).map_err(|e| self.spawn_error(e))?;
        Ok(DispatchOutcome {
            executed: Route::Local,
            exit_code: status.code(),
            fell_back,
        })
    }
}

impl Dispatcher for ProcessDispatcher {
    fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchOutcome, DispatchError> {
        if request.route == Route::Local {
            return self.run_local(&request.args, false);
        }

        match self.spawn(request) {
            Ok(status) if status.success() || !self.fallback_to_local => Ok(DispatchOutcome {
                executed: Route::Remote,
                exit_code: status.code(),
                fell_back: false,
            }),
            Ok(status) => {
                warn!(exit_code = ?status.code(), "remote run failed, falling back to local");
                output::warn(
                    format!(
                        "API mode failed with exit code {}; falling back to local Claude",
                        status
                            .code()
                            .map_or_else(|| "unknown".to_string(), |c| c.to_string())
                    ),
                    self.verbosity,
                );
                self.run_local(&request.args, true)
            }
            Err(e) if e.kind() != ErrorKind::NotFound && self.fallback_to_local => {
                warn!(error = %e, "remote spawn failed, falling back to local");
                output::warn(
                    format!("Error running API mode ({}); falling back to local Claude", e),
                    self.verbosity,
                );
                self.run_local(&request.args, true)
            }
            Err(e) => Err(self.spawn_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::{Credential, CredentialSource};

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    mod argv {
        use super::*;

        #[test]
        fn local_passes_args_verbatim() {
            let d = ProcessDispatcher::new("claude", args(&["--api"]), true);
            assert_eq!(
                d.argv(Route::Local, &args(&["fix", "this bug"])),
                args(&["fix", "this bug"])
            );
        }

        #[test]
        fn remote_prepends_remote_args() {
            let d = ProcessDispatcher::new("claude", args(&["--api", "--max-context=1000000"]), true);
            assert_eq!(
                d.argv(Route::Remote, &args(&["review", "everything"])),
                args(&["--api", "--max-context=1000000", "review", "everything"])
            );
        }

        #[test]
        fn from_default_config() {
            let d = ProcessDispatcher::from_config(&Config::default());
            assert_eq!(d.command(), "claude");
            assert_eq!(
                d.argv(Route::Remote, &[]),
                args(&["--api", "--max-context=1000000"])
            );
        }
    }

    #[test]
    fn missing_executable_is_not_found() {
        let d = ProcessDispatcher::new("claude-auto-definitely-missing-binary", vec![], true);
        let err = d
            .dispatch(&DispatchRequest::remote(
                args(&["x"]),
                Credential::new("k", CredentialSource::Store),
            ))
            .unwrap_err();
        assert!(matches!(err, DispatchError::NotFound { .. }));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;

        #[test]
        fn local_success() {
            let d = ProcessDispatcher::new("true", vec![], true);
            let outcome = d.dispatch(&DispatchRequest::local(args(&["ignored"]))).unwrap();
            assert_eq!(outcome.executed, Route::Local);
            assert!(outcome.success());
            assert!(!outcome.fell_back);
        }

        #[test]
        fn local_failure_reports_code() {
            let d = ProcessDispatcher::new("false", vec![], true);
            let outcome = d.dispatch(&DispatchRequest::local(vec![])).unwrap();
            assert_eq!(outcome.exit_code, Some(1));
            assert!(!outcome.fell_back);
        }

        #[test]
        fn remote_failure_falls_back_to_local() {
            let d = ProcessDispatcher::new("false", vec![], true);
            let outcome = d
                .dispatch(&DispatchRequest::remote(
                    vec![],
                    Credential::new("k", CredentialSource::Store),
                ))
                .unwrap();
            assert_eq!(outcome.executed, Route::Local);
            assert!(outcome.fell_back);
        }

        #[test]
        fn remote_failure_without_fallback_stays_remote() {
            let d = ProcessDispatcher::new("false", vec![], false);
            let outcome = d
                .dispatch(&DispatchRequest::remote(
                    vec![],
                    Credential::new("k", CredentialSource::Store),
                ))
                .unwrap();
            assert_eq!(outcome.executed, Route::Remote);
            assert_eq!(outcome.exit_code, Some(1));
        }

        #[test]
        fn remote_sets_api_key_env() {
            let d = ProcessDispatcher::new(
                "sh",
                args(&["-c", "test \"$ANTHROPIC_API_KEY\" = sk-ant-check"]),
                false,
            );
            let outcome = d
                .dispatch(&DispatchRequest::remote(
                    vec![],
                    Credential::new("sk-ant-check", CredentialSource::Store),
                ))
                .unwrap();
            assert!(outcome.success());
        }
    }
}
