//! engine::confirm
//!
//! Resolution of gate decisions that need a human answer.
//!
//! The confirmation capability is passed in, never looked up, so the
//! engine can run headless (always decline), scripted (`--yes`) or
//! against the terminal.

use super::gate::{DowngradeReason, GateDecision};
use crate::core::types::Route;

/// Capability that asks the user a yes/no question.
///
/// Implemented for closures:
///
/// ```
/// use claude_auto::engine::Confirm;
///
/// let always_yes = |_: &str| true;
/// assert!(always_yes.confirm("Use the API?"));
/// ```
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Confirms everything (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Declines everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeNo;

impl Confirm for AssumeNo {
    fn confirm(&self, _message: &str) -> bool {
        false
    }
}

/// The question asked before a confirmed remote call.
pub const CONFIRM_PROMPT: &str = "This task needs the Claude API (high context, billed). Proceed?";

/// A fully settled route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FinalRoute {
    Remote,
    Local,
    Downgraded(DowngradeReason),
}

impl FinalRoute {
    pub fn route(&self) -> Route {
        match self {
            FinalRoute::Remote => Route::Remote,
            FinalRoute::Local | FinalRoute::Downgraded(_) => Route::Local,
        }
    }
}

/// Settle a gate decision, asking `confirm` only when required.
pub fn resolve(decision: GateDecision, confirm: &dyn Confirm) -> FinalRoute {
    match decision {
        GateDecision::ExecuteRemote => FinalRoute::Remote,
        GateDecision::ExecuteLocal => FinalRoute::Local,
        GateDecision::ExecuteLocalAfterDowngrade(reason) => FinalRoute::Downgraded(reason),
        GateDecision::RequireConfirmation => {
            if confirm.confirm(CONFIRM_PROMPT) {
                FinalRoute::Remote
            } else {
                FinalRoute::Downgraded(DowngradeReason::ConfirmationDeclined)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn confirmation_yes_goes_remote() {
        assert_eq!(
            resolve(GateDecision::RequireConfirmation, &AssumeYes),
            FinalRoute::Remote
        );
    }

    #[test]
    fn confirmation_no_downgrades() {
        let resolved = resolve(GateDecision::RequireConfirmation, &AssumeNo);
        assert_eq!(
            resolved,
            FinalRoute::Downgraded(DowngradeReason::ConfirmationDeclined)
        );
        assert_eq!(resolved.route(), Route::Local);
    }

    #[test]
    fn settled_decisions_never_ask() {
        let asked = Cell::new(0);
        let counter = |_: &str| {
            asked.set(asked.get() + 1);
            true
        };

        assert_eq!(resolve(GateDecision::ExecuteRemote, &counter), FinalRoute::Remote);
        assert_eq!(resolve(GateDecision::ExecuteLocal, &counter), FinalRoute::Local);
        assert_eq!(
            resolve(
                GateDecision::ExecuteLocalAfterDowngrade(DowngradeReason::ForceLocal),
                &counter
            ),
            FinalRoute::Downgraded(DowngradeReason::ForceLocal)
        );
        assert_eq!(asked.get(), 0);

        resolve(GateDecision::RequireConfirmation, &counter);
        assert_eq!(asked.get(), 1);
    }

    #[test]
    fn closure_sees_prompt() {
        let check = |message: &str| message.contains("Claude API");
        assert_eq!(
            resolve(GateDecision::RequireConfirmation, &check),
            FinalRoute::Remote
        );
    }
}
