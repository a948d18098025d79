//! engine::gate
//!
//! Cost gating for remote execution.
//!
//! # Architecture
//!
//! The classifier proposes a route; the gate decides whether that route
//! may run given the user's cost-control settings and the usage so far.
//! Gating only ever moves a task from remote to local, never the other
//! way.
//!
//! # Decision order
//!
//! 1. tentative local → [`GateDecision::ExecuteLocal`]
//! 2. API disabled or local forced → downgrade
//! 3. cost limit set and spend `>=` limit → downgrade
//! 4. confirmation required → [`GateDecision::RequireConfirmation`]
//! 5. otherwise → [`GateDecision::ExecuteRemote`]
//!
//! # Invariants
//!
//! - `force_local` always yields a local decision
//! - The cost limit is inclusive: reaching it exactly blocks
//! - Gating is pure and deterministic over its inputs
//!
//! Advisories are computed separately and never change the decision.
//!
//! # Example
//!
//! ```
//! use claude_auto::core::settings::Settings;
//! use claude_auto::core::types::Route;
//! use claude_auto::core::usage::UsageLedger;
//! use claude_auto::engine::gate::{decide, DowngradeReason, GateDecision};
//!
//! let settings = Settings { force_local: true, ..Default::default() };
//! let usage = UsageLedger::default();
//!
//! assert_eq!(
//!     decide(&settings, &usage, Route::Remote),
//!     GateDecision::ExecuteLocalAfterDowngrade(DowngradeReason::ForceLocal)
//! );
//! ```

use std::fmt;

use crate::core::settings::Settings;
use crate::core::types::Route;
use crate::core::usage::UsageLedger;

/// Why a remote classification ended up running locally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DowngradeReason {
    ApiDisabled,
    ForceLocal,
    CostLimitReached { limit: f64, spent: f64 },
    ConfirmationDeclined,
    MissingCredential,
}

impl fmt::Display for DowngradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DowngradeReason::ApiDisabled => write!(f, "API mode is disabled"),
            DowngradeReason::ForceLocal => write!(f, "local mode is forced"),
            DowngradeReason::CostLimitReached { limit, spent } => {
                write!(f, "cost limit reached (${:.4} of ${})", spent, limit)
            }
            DowngradeReason::ConfirmationDeclined => write!(f, "API call not confirmed"),
            DowngradeReason::MissingCredential => {
                write!(f, "no API key found (run: claude-auto --setup)")
            }
        }
    }
}

/// Outcome of gating a tentative route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDecision {
    ExecuteRemote,
    ExecuteLocal,
    ExecuteLocalAfterDowngrade(DowngradeReason),
    /// Remote is allowed pending an explicit yes from the user.
    RequireConfirmation,
}

impl GateDecision {
    /// The route this decision runs on, if already settled.
    ///
    /// `None` for [`GateDecision::RequireConfirmation`].
    pub fn settled_route(&self) -> Option<Route> {
        match self {
            GateDecision::ExecuteRemote => Some(Route::Remote),
            GateDecision::ExecuteLocal | GateDecision::ExecuteLocalAfterDowngrade(_) => {
                Some(Route::Local)
            }
            GateDecision::RequireConfirmation => None,
        }
    }

    /// Short machine-friendly name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            GateDecision::ExecuteRemote => "execute-remote",
            GateDecision::ExecuteLocal => "execute-local",
            GateDecision::ExecuteLocalAfterDowngrade(_) => "downgrade",
            GateDecision::RequireConfirmation => "require-confirmation",
        }
    }
}

/// Gate a tentative route against settings and usage.
pub fn decide(settings: &Settings, usage: &UsageLedger, tentative: Route) -> GateDecision {
    if tentative == Route::Local {
        return GateDecision::ExecuteLocal;
    }

    if !settings.remote_allowed() {
        let reason = if settings.api_enabled {
            DowngradeReason::ForceLocal
        } else {
            DowngradeReason::ApiDisabled
        };
        return GateDecision::ExecuteLocalAfterDowngrade(reason);
    }

    if let Some(limit) = settings.cost_limit {
        if usage.estimated_cost >= limit {
            return GateDecision::ExecuteLocalAfterDowngrade(DowngradeReason::CostLimitReached {
                limit,
                spent: usage.estimated_cost,
            });
        }
    }

    if settings.require_confirmation {
        return GateDecision::RequireConfirmation;
    }

    GateDecision::ExecuteRemote
}

/// A non-blocking notice about spend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Advisory {
    WarningThresholdReached { threshold: f64, spent: f64 },
    CostLimitReached { limit: f64, spent: f64 },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::WarningThresholdReached { threshold, spent } => write!(
                f,
                "estimated cost ${:.2} has reached the warning threshold of ${}",
                spent, threshold
            ),
            Advisory::CostLimitReached { limit, spent } => write!(
                f,
                "COST LIMIT REACHED: ${:.2} of ${}; API calls are blocked",
                spent, limit
            ),
        }
    }
}

/// Spend advisories for the current state, independent of routing.
pub fn advisories(settings: &Settings, usage: &UsageLedger) -> Vec<Advisory> {
    let spent = usage.estimated_cost;
    let mut notices = Vec::new();

    if spent >= settings.warning_threshold {
        notices.push(Advisory::WarningThresholdReached {
            threshold: settings.warning_threshold,
            spent,
        });
    }
    if let Some(limit) = settings.cost_limit {
        if spent >= limit {
            notices.push(Advisory::CostLimitReached { limit, spent });
        }
    }
    notices
}
