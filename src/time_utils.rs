// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting (Spanish UI strings).

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};

/// Parse an ISO 8601 / RFC 3339 timestamp from the API.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).ok()
}

/// `DD/MM/YYYY HH:MM`
pub fn format_date_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%d/%m/%Y %H:%M").to_string()
}

/// `DD/MM HH:MM`
pub fn format_short_date_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%d/%m %H:%M").to_string()
}

/// `DD/MM/YYYY`
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%d/%m/%Y").to_string()
}

/// Relative description of `date` as seen at `now` ("Hace 2 horas").
///
/// Anything a week or older falls back to [`format_date`].
pub fn format_relative_time<Tz: TimeZone>(date: &DateTime<Tz>, now: DateTime<Utc>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let elapsed = now.signed_duration_since(date.with_timezone(&Utc));
    let seconds = elapsed.num_seconds();
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if seconds < 60 {
        "Hace un momento".to_string()
    } else if minutes < 60 {
        plural(minutes, "minuto", "minutos")
    } else if hours < 24 {
        plural(hours, "hora", "horas")
    } else if days < 7 {
        plural(days, "día", "días")
    } else {
        format_date(date)
    }
}

fn plural(n: i64, one: &str, many: &str) -> String {
    format!("Hace {} {}", n, if n == 1 { one } else { many })
}

/// Format an API timestamp in local time as `DD/MM/YYYY HH:MM`.
///
/// Unparseable input is returned unchanged.
pub fn format_timestamp(value: &str) -> String {
    parse_timestamp(value)
        .map(|date| format_date_time(&date.with_timezone(&Local)))
        .unwrap_or_else(|| value.to_string())
}

/// Relative time of an API timestamp against the current clock.
///
/// Unparseable input is returned unchanged.
pub fn format_timestamp_relative(value: &str) -> String {
    parse_timestamp(value)
        .map(|date| format_relative_time(&date.with_timezone(&Local), Utc::now()))
        .unwrap_or_else(|| value.to_string())
}
