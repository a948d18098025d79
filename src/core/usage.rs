//! core::usage
//!
//! Usage ledger: call counters, estimated spend and per-day buckets.
//!
//! # Storage
//!
//! Persisted as `usage.json` with camelCase keys:
//!
//! ```json
//! {
//!   "totalCalls": 3,
//!   "apiCalls": 1,
//!   "localCalls": 2,
//!   "estimatedCost": 0.015,
//!   "lastReset": "2024-05-01T09:30:00Z",
//!   "dailyUsage": { "2024-05-02": { "calls": 1, "cost": 0.015 } }
//! }
//! ```
//!
//! # Invariants
//!
//! - `total_calls == api_calls + local_calls` after every [`UsageLedger::record`]
//! - `estimated_cost` only grows when a remote call is recorded
//! - one `record` per completed dispatch; callers never record speculatively
//!
//! # Example
//!
//! ```
//! use claude_auto::core::types::{Route, UtcTimestamp};
//! use claude_auto::core::usage::{UsageLedger, COST_PER_CALL};
//!
//! let now = UtcTimestamp::now();
//! let mut ledger = UsageLedger::new(now);
//! ledger.record(Route::Remote, COST_PER_CALL, now);
//! ledger.record(Route::Local, COST_PER_CALL, now);
//!
//! assert_eq!(ledger.total_calls, 2);
//! assert_eq!(ledger.api_calls, 1);
//! assert!(ledger.is_consistent());
//! ```

use std::collections::BTreeMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::core::types::{DayKey, Route, UtcTimestamp};

/// Estimated cost of one remote call, in cost units (USD).
pub const COST_PER_CALL: f64 = 0.015;

/// How many days the detailed report lists.
pub const REPORT_DAYS: usize = 7;

/// One day's remote usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyUsage {
    pub calls: u64,
    pub cost: f64,
}

/// Persisted usage counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageLedger {
    #[serde(default)]
    pub total_calls: u64,
    #[serde(default)]
    pub api_calls: u64,
    #[serde(default)]
    pub local_calls: u64,
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(default = "UtcTimestamp::now")]
    pub last_reset: UtcTimestamp,
    #[serde(default)]
    pub daily_usage: BTreeMap<DayKey, DailyUsage>,
}

impl Default for UsageLedger {
    fn default() -> Self {
        Self::new(UtcTimestamp::now())
    }
}

impl UsageLedger {
    /// An empty ledger whose tracking period starts at `now`.
    pub fn new(now: UtcTimestamp) -> Self {
        Self {
            total_calls: 0,
            api_calls: 0,
            local_calls: 0,
            estimated_cost: 0.0,
            last_reset: now,
            daily_usage: BTreeMap::new(),
        }
    }

    /// Record one completed dispatch.
    ///
    /// Remote calls add `cost_per_call` to the running estimate and to the
    /// bucket for `now`'s day, creating the bucket if needed. Local calls
    /// only bump the counters.
    pub fn record(&mut self, route: Route, cost_per_call: f64, now: UtcTimestamp) {
        self.total_calls += 1;
        match route {
            Route::Remote => {
                self.api_calls += 1;
                self.estimated_cost += cost_per_call;
                let day = self.daily_usage.entry(now.day_key()).or_default();
                day.calls += 1;
                day.cost += cost_per_call;
            }
            Route::Local => {
                self.local_calls += 1;
            }
        }
    }

    /// Zero every counter and start a new tracking period.
    ///
    /// The new `last_reset` is strictly later than the previous one, even
    /// when the clock has not advanced.
    pub fn reset(&mut self, now: UtcTimestamp) {
        let stamp = if now > self.last_reset {
            now
        } else {
            UtcTimestamp::from_datetime(*self.last_reset.as_datetime() + Duration::milliseconds(1))
        };
        *self = Self::new(stamp);
    }

    /// Whether the call counters agree.
    pub fn is_consistent(&self) -> bool {
        self.total_calls == self.api_calls + self.local_calls
    }

    /// Build the detailed usage report as of `now`.
    pub fn report(&self, now: UtcTimestamp) -> UsageReport {
        let elapsed = *now.as_datetime() - *self.last_reset.as_datetime();
        let days_active = elapsed.num_days().max(1);
        let daily_average = self.estimated_cost / days_active as f64;

        let skip = self.daily_usage.len().saturating_sub(REPORT_DAYS);
        let recent_days = self
            .daily_usage
            .iter()
            .skip(skip)
            .map(|(day, usage)| (*day, *usage))
            .collect();

        UsageReport {
            total_calls: self.total_calls,
            api_calls: self.api_calls,
            local_calls: self.local_calls,
            estimated_cost: self.estimated_cost,
            api_ratio_percent: if self.total_calls == 0 {
                0.0
            } else {
                self.api_calls as f64 / self.total_calls as f64 * 100.0
            },
            average_cost_per_api_call: if self.api_calls == 0 {
                0.0
            } else {
                self.estimated_cost / self.api_calls as f64
            },
            recent_days,
            days_active,
            daily_average,
            weekly_projection: daily_average * 7.0,
            monthly_projection: daily_average * 30.0,
        }
    }
}

/// Derived usage figures for the detailed report.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageReport {
    pub total_calls: u64,
    pub api_calls: u64,
    pub local_calls: u64,
    pub estimated_cost: f64,
    /// Share of calls that went remote, 0-100.
    pub api_ratio_percent: f64,
    pub average_cost_per_api_call: f64,
    /// Up to [`REPORT_DAYS`] most recent day buckets, oldest first.
    pub recent_days: Vec<(DayKey, DailyUsage)>,
    /// Whole days since the last reset, at least 1.
    pub days_active: i64,
    pub daily_average: f64,
    pub weekly_projection: f64,
    pub monthly_projection: f64,
}
