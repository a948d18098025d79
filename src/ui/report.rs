//! ui::report
//!
//! Rendering of the status summary, the detailed usage report and the
//! cost-control menu.
//!
//! Everything here returns a `String` so callers decide where it goes and
//! tests can check the text directly.

use std::fmt::Write as _;

use super::output::format_usd;
use crate::core::settings::Settings;
use crate::core::usage::{UsageLedger, UsageReport, REPORT_DAYS};

const RULE: &str = "==========================================";

/// Where an API key is available from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyAvailability {
    pub env: bool,
    /// `None` when the secret store could not be read.
    pub stored: Option<bool>,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn settings_block(out: &mut String, settings: &Settings) {
    let limit = settings
        .cost_limit
        .map(|l| format_usd(l, 2))
        .unwrap_or_else(|| "none".to_string());

    let _ = writeln!(out, "Settings");
    let _ = writeln!(
        out,
        "  API mode:        {}",
        if settings.api_enabled { "enabled" } else { "disabled" }
    );
    let _ = writeln!(out, "  Force local:     {}", yes_no(settings.force_local));
    let _ = writeln!(out, "  Cost limit:      {}", limit);
    let _ = writeln!(
        out,
        "  Warning at:      {}",
        format_usd(settings.warning_threshold, 2)
    );
    let _ = writeln!(
        out,
        "  Confirmation:    {}",
        if settings.require_confirmation {
            "required"
        } else {
            "not required"
        }
    );
}

fn usage_block(out: &mut String, usage: &UsageLedger) {
    let _ = writeln!(out, "Usage");
    let _ = writeln!(out, "  Total calls:     {}", usage.total_calls);
    let _ = writeln!(out, "  API calls:       {}", usage.api_calls);
    let _ = writeln!(out, "  Local calls:     {}", usage.local_calls);
    let _ = writeln!(out, "  Estimated cost:  {}", format_usd(usage.estimated_cost, 4));
    let _ = writeln!(
        out,
        "  Last reset:      {}",
        usage.last_reset.as_datetime().format("%Y-%m-%d")
    );
}

fn key_block(out: &mut String, keys: KeyAvailability) {
    let stored = match keys.stored {
        Some(true) => "present",
        Some(false) => "absent",
        None => "unreadable",
    };
    let _ = writeln!(out, "API key");
    let _ = writeln!(
        out,
        "  Environment:     {}",
        if keys.env { "set" } else { "not set" }
    );
    let _ = writeln!(out, "  Stored key:      {}", stored);
}

/// Settings and usage, as shown at the top of the cost-control center.
pub fn render_summary(settings: &Settings, usage: &UsageLedger) -> String {
    let mut out = String::new();
    settings_block(&mut out, settings);
    out.push('\n');
    usage_block(&mut out, usage);
    out
}

/// Where an API key is available from, as a block.
pub fn render_keys(keys: KeyAvailability) -> String {
    let mut out = String::new();
    key_block(&mut out, keys);
    out
}

/// The `--status` summary.
pub fn render_status(settings: &Settings, usage: &UsageLedger, keys: KeyAvailability) -> String {
    let mut out = render_summary(settings, usage);
    out.push('\n');
    key_block(&mut out, keys);
    out
}

/// The detailed usage report.
pub fn render_report(report: &UsageReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Detailed usage report");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Overall");
    let _ = writeln!(out, "  API calls:       {}", report.api_calls);
    let _ = writeln!(out, "  Local calls:     {}", report.local_calls);
    let _ = writeln!(out, "  API ratio:       {:.1}% API", report.api_ratio_percent);
    let _ = writeln!(out, "  Total cost:      {}", format_usd(report.estimated_cost, 4));
    let _ = writeln!(
        out,
        "  Avg per call:    {}",
        format_usd(report.average_cost_per_api_call, 4)
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Daily usage (last {} days)", REPORT_DAYS);
    if report.recent_days.is_empty() {
        let _ = writeln!(out, "  No usage data yet");
    }
    for (day, usage) in &report.recent_days {
        let _ = writeln!(
            out,
            "  {}: {} calls, {}",
            day,
            usage.calls,
            format_usd(usage.cost, 4)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Projections ({} days active)", report.days_active);
    let _ = writeln!(out, "  Daily average:   {}", format_usd(report.daily_average, 2));
    let _ = writeln!(out, "  Weekly:          {}", format_usd(report.weekly_projection, 2));
    let _ = writeln!(out, "  Monthly:         {}", format_usd(report.monthly_projection, 2));
    out
}

/// Numbered options of the cost-control center.
pub fn render_menu() -> String {
    [
        "Options",
        "  1. Enable API mode (allow API calls)",
        "  2. Disable API mode (local only)",
        "  3. Set cost limit",
        "  4. Set warning threshold",
        "  5. Toggle confirmation requirement",
        "  6. Reset usage statistics",
        "  7. View detailed usage report",
        "  8. Emergency shutdown (disable everything)",
        "  9. Exit",
    ]
    .join("\n")
}

/// Header of the cost-control center.
pub fn render_header() -> String {
    format!("Claude Auto - Cost Control Center\n{}", RULE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Route, UtcTimestamp};
    use chrono::{TimeZone, Utc};

    fn at(d: u32, h: u32) -> UtcTimestamp {
        UtcTimestamp::from_datetime(Utc.with_ymd_and_hms(2026, 3, d, h, 0, 0).unwrap())
    }

    fn sample_usage() -> UsageLedger {
        let mut usage = UsageLedger::new(at(1, 0));
        usage.record(Route::Remote, 0.015, at(1, 9));
        usage.record(Route::Local, 0.015, at(1, 10));
        usage.record(Route::Local, 0.015, at(2, 10));
        usage
    }

    mod status {
        use super::*;

        #[test]
        fn defaults() {
            let text = render_status(
                &Settings::default(),
                &sample_usage(),
                KeyAvailability {
                    env: false,
                    stored: Some(true),
                },
            );
            insta::assert_snapshot!(text, @r"
            Settings
              API mode:        enabled
              Force local:     no
              Cost limit:      none
              Warning at:      $10.00
              Confirmation:    not required

            Usage
              Total calls:     3
              API calls:       1
              Local calls:     2
              Estimated cost:  $0.0150
              Last reset:      2026-03-01

            API key
              Environment:     not set
              Stored key:      present
            ");
        }

        #[test]
        fn limit_and_flags() {
            let settings = Settings {
                api_enabled: false,
                force_local: true,
                cost_limit: Some(5.0),
                require_confirmation: true,
                ..Default::default()
            };
            let keys = KeyAvailability {
                env: false,
                stored: Some(false),
            };
            let text = render_status(&settings, &UsageLedger::new(at(1, 0)), keys);
            assert!(text.contains("API mode:        disabled"));
            assert!(text.contains("Force local:     yes"));
            assert!(text.contains("Cost limit:      $5.00"));
            assert!(text.contains("Confirmation:    required"));
            assert!(text.contains("Stored key:      absent"));
        }

        #[test]
        fn unreadable_store() {
            let keys = KeyAvailability {
                env: true,
                stored: None,
            };
            let text = render_status(&Settings::default(), &UsageLedger::new(at(1, 0)), keys);
            assert!(text.contains("Environment:     set"));
            assert!(text.contains("Stored key:      unreadable"));
        }
    }

    mod report {
        use super::*;

        #[test]
        fn full_report() {
            let text = render_report(&sample_usage().report(at(3, 12)));
            assert!(text.contains("API ratio:       33.3% API"));
            assert!(text.contains("Avg per call:    $0.0150"));
            assert!(text.contains("2026-03-01: 1 calls, $0.0150"));
            assert!(!text.contains("2026-03-02"));
            assert!(text.contains("Projections (2 days active)"));
            assert!(text.contains("Monthly:         $0.2"));
        }

        #[test]
        fn empty_ledger() {
            let text = render_report(&UsageLedger::new(at(1, 0)).report(at(1, 1)));
            assert!(text.contains("No usage data yet"));
            assert!(text.contains("API ratio:       0.0% API"));
            assert!(text.contains("Projections (1 days active)"));
        }
    }

    #[test]
    fn menu_has_nine_options() {
        let menu = render_menu();
        for n in 1..=9 {
            assert!(menu.contains(&format!("  {}. ", n)));
        }
        assert!(render_header().contains("Cost Control Center"));
    }
}
