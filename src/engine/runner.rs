//! engine::runner
//!
//! The per-invocation routing lifecycle.
//!
//! # Lifecycle
//!
//! ```text
//! Load -> Classify -> Gate -> Confirm -> Credential -> Dispatch -> Record
//! ```
//!
//! Every collaborator is injected: stores, dispatcher, credential provider
//! and confirmation capability. The router holds no state of its own
//! between invocations.
//!
//! # Invariants
//!
//! - Exactly one usage delta is recorded per completed dispatch
//! - The recorded route is the one that actually executed
//! - Nothing is recorded when dispatch fails or in a dry run
//! - Corrupt stored state aborts before anything runs

use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use super::confirm::{resolve, AssumeNo, Confirm, FinalRoute};
use super::gate::{advisories, decide, Advisory, DowngradeReason, GateDecision};
use super::RouteError;
use crate::core::classify::{evaluate, Classification};
use crate::core::types::{Route, UtcTimestamp};
use crate::core::usage::COST_PER_CALL;
use crate::dispatch::{DispatchOutcome, DispatchRequest, Dispatcher};
use crate::secrets::{Credential, CredentialProvider};
use crate::store::{SettingsStore, UsageStore};
use crate::ui::output::{self, Verbosity};

/// What happened during one routing invocation.
#[derive(Debug, Clone)]
pub struct RouteReport {
    /// Correlates log lines for this invocation.
    pub invocation_id: Uuid,
    pub classification: Classification,
    pub decision: GateDecision,
    /// `None` only in a dry run that would have asked for confirmation.
    pub final_route: Option<FinalRoute>,
    pub advisories: Vec<Advisory>,
    /// `None` in a dry run.
    pub outcome: Option<DispatchOutcome>,
}

impl RouteReport {
    /// Exit code to propagate to the caller's shell.
    pub fn exit_code(&self) -> i32 {
        match self.outcome {
            Some(outcome) => outcome.exit_code.unwrap_or(1),
            None => 0,
        }
    }
}

/// Routes a task through classification, gating and dispatch.
pub struct Router<'a> {
    settings: &'a dyn SettingsStore,
    usage: &'a dyn UsageStore,
    dispatcher: &'a dyn Dispatcher,
    credentials: &'a dyn CredentialProvider,
    confirm: &'a dyn Confirm,
    cost_per_call: f64,
    verbosity: Verbosity,
}

impl<'a> Router<'a> {
    pub fn new(
        settings: &'a dyn SettingsStore,
        usage: &'a dyn UsageStore,
        dispatcher: &'a dyn Dispatcher,
        credentials: &'a dyn CredentialProvider,
        confirm: &'a dyn Confirm,
    ) -> Self {
        Self {
            settings,
            usage,
            dispatcher,
            credentials,
            confirm,
            cost_per_call: COST_PER_CALL,
            verbosity: Verbosity::Normal,
        }
    }

    pub fn with_cost_per_call(mut self, cost_per_call: f64) -> Self {
        self.cost_per_call = cost_per_call;
        self
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Route and run a task given as CLI arguments.
    pub fn route(&self, args: &[String]) -> Result<RouteReport, RouteError> {
        self.run(args, false)
    }

    /// Decide where a task would run without running or recording it.
    ///
    /// Never prompts; a decision that needs confirmation is left open.
    pub fn dry_run(&self, args: &[String]) -> Result<RouteReport, RouteError> {
        self.run(args, true)
    }

    fn run(&self, args: &[String], dry_run: bool) -> Result<RouteReport, RouteError> {
        let invocation_id = Uuid::new_v4();
        let span = info_span!("route", id = %invocation_id, dry_run);
        let _guard = span.enter();

        let settings = self.settings.load_settings()?;
        let usage = self.usage.load_usage()?;

        let task = args.join(" ");
        let classification = evaluate(&task);
        debug!(
            rule = %classification.rule,
            route = %classification.route,
            "classified task"
        );

        let notices = advisories(&settings, &usage);
        for advisory in &notices {
            output::warn(advisory, self.verbosity);
        }

        let decision = decide(&settings, &usage, classification.route);
        debug!(decision = decision.as_str(), "gated");

        let resolved = if !dry_run {
            Some(resolve(decision, self.confirm))
        } else {
            decision
                .settled_route()
                .map(|_| resolve(decision, &AssumeNo))
        };

        let (final_route, credential) = match resolved {
            Some(FinalRoute::Remote) => match self.resolve_credential() {
                Some(credential) => (Some(FinalRoute::Remote), Some(credential)),
                None => (
                    Some(FinalRoute::Downgraded(DowngradeReason::MissingCredential)),
                    None,
                ),
            },
            other => (other, None),
        };

        let mut report = RouteReport {
            invocation_id,
            classification,
            decision,
            final_route,
            advisories: notices,
            outcome: None,
        };

        let Some(final_route) = final_route else {
            return Ok(report);
        };
        if dry_run {
            return Ok(report);
        }

        self.announce(final_route);
        let request = match credential {
            Some(credential) => DispatchRequest::remote(args.to_vec(), credential),
            None => DispatchRequest::local(args.to_vec()),
        };
        let outcome = self.dispatcher.dispatch(&request)?;
        info!(
            executed = %outcome.executed,
            exit_code = ?outcome.exit_code,
            fell_back = outcome.fell_back,
            "dispatch complete"
        );

        self.record(outcome.executed)?;
        report.outcome = Some(outcome);
        Ok(report)
    }

    fn resolve_credential(&self) -> Option<Credential> {
        match self.credentials.credential() {
            Ok(credential) => credential,
            Err(e) => {
                warn!(error = %e, "credential lookup failed");
                output::warn(format!("cannot read stored API key: {}", e), self.verbosity);
                None
            }
        }
    }

    fn announce(&self, final_route: FinalRoute) {
        match final_route {
            FinalRoute::Remote => {
                output::notice("Using Claude API (high context mode)", self.verbosity)
            }
            FinalRoute::Local => output::notice("Using local Claude", self.verbosity),
            FinalRoute::Downgraded(reason) => {
                output::warn(
                    format!("{}; using local Claude instead of the API", reason),
                    self.verbosity,
                );
            }
        }
    }

    /// Record the executed route against freshly loaded usage.
    ///
    /// The ledger is reloaded because the child may have run for a long
    /// time while another invocation recorded its own call.
    fn record(&self, executed: Route) -> Result<(), RouteError> {
        let mut usage = self.usage.load_usage()?;
        usage.record(executed, self.cost_per_call, UtcTimestamp::now());
        self.usage.save_usage(&usage)?;
        debug!(
            total = usage.total_calls,
            estimated_cost = usage.estimated_cost,
            "usage recorded"
        );
        Ok(())
    }
}
