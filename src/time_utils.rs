// SPDX-License-Identifier: MIT
// Copyright 2026 Macro-Tracker Developers

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Day key ("YYYY-MM-DD") for a UTC timestamp. Meal log entries and weight
/// entries are grouped by this key.
pub fn day_key(date: DateTime<Utc>) -> String {
    date.date_naive().format("%Y-%m-%d").to_string()
}

/// Parse a "YYYY-MM-DD" day key.
pub fn parse_day_key(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
