//! core::types
//!
//! Core domain types shared across classification, gating and recording.
//!
//! # Types
//!
//! - [`Route`] - Where a task executes (remote API or local CLI)
//! - [`UtcTimestamp`] - RFC3339 timestamp
//! - [`DayKey`] - Calendar-day bucket for daily usage reporting
//!
//! # Examples
//!
//! ```
//! use claude_auto::core::types::{DayKey, Route};
//!
//! assert!(Route::Remote.is_remote());
//! assert_eq!(Route::Local.to_string(), "local");
//!
//! let day = DayKey::new("2024-03-09").unwrap();
//! assert_eq!(day.as_str(), "2024-03-09");
//! assert!(DayKey::new("yesterday").is_err());
//! ```

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid day key '{0}': expected YYYY-MM-DD")]
    InvalidDayKey(String),
}

/// The execution path for a task.
///
/// `Remote` is the metered high-context API path; `Local` is a plain
/// invocation of the locally installed assistant CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Remote,
    Local,
}

impl Route {
    /// True for the metered API path.
    pub fn is_remote(self) -> bool {
        matches!(self, Route::Remote)
    }

    /// Human-facing label used in status lines.
    pub fn label(self) -> &'static str {
        match self {
            Route::Remote => "Claude API (high context)",
            Route::Local => "local Claude",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Remote => write!(f, "remote"),
            Route::Local => write!(f, "local"),
        }
    }
}

/// A UTC timestamp, serialized as RFC3339.
///
/// ```
/// use claude_auto::core::types::UtcTimestamp;
///
/// let now = UtcTimestamp::now();
/// println!("Current time: {}", now);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtcTimestamp(DateTime<Utc>);

impl UtcTimestamp {
    /// Create a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a chrono DateTime.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the underlying datetime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// The calendar day (UTC) this timestamp falls on.
    pub fn day_key(&self) -> DayKey {
        DayKey(self.0.date_naive())
    }
}

impl fmt::Display for UtcTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

/// A calendar day used to bucket usage, rendered as `YYYY-MM-DD`.
///
/// Days are computed in UTC so that the same instant always lands in the
/// same bucket regardless of the machine's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    const FORMAT: &'static str = "%Y-%m-%d";

    /// Parse a day key from its `YYYY-MM-DD` form.
    pub fn new(s: &str) -> Result<Self, TypeError> {
        NaiveDate::parse_from_str(s, Self::FORMAT)
            .map(Self)
            .map_err(|_| TypeError::InvalidDayKey(s.to_string()))
    }

    /// Render as `YYYY-MM-DD`.
    pub fn as_str(&self) -> String {
        self.0.format(Self::FORMAT).to_string()
    }

    /// The underlying date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for DayKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str())
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        DayKey::new(&s).map_err(serde::de::Error::custom)
    }
}
