//! Display formatting helpers
//!
//! Pure functions that turn raw metric values into the strings the dashboard
//! renders: grouped counts, percentages, dollar amounts, relative ages and
//! short dates. No state, no side effects.

use chrono::{DateTime, NaiveDate, Utc};

/// Formats a count with thousands separators (8210 -> "8,210")
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a 0.0-1.0 ratio as a percentage with one decimal (0.09 -> "9.0%")
pub fn format_pct(v: f64) -> String {
    format!("{:.1}%", v * 100.0)
}

/// Formats a non-negative dollar amount with cents (2.45 -> "$2.45")
pub fn format_money(v: f64) -> String {
    let cents = (v * 100.0).round() as u64;
    format!("${}.{:02}", format_count(cents / 100), cents % 100)
}

/// Formats an instant as a coarse relative age against `now`
///
/// Minutes under an hour, hours under two days, whole days beyond that.
/// The reference clock is a parameter so display stays deterministic in tests.
pub fn format_relative(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let mins = (now - instant).num_minutes().max(0);
    if mins < 60 {
        return format!("{}m ago", mins);
    }
    let hrs = mins / 60;
    if hrs < 48 {
        return format!("{}h ago", hrs);
    }
    format!("{}d ago", hrs / 24)
}

/// Formats a calendar date as "Mon D, YYYY" (e.g., "Jan 3, 2026")
pub fn format_date(date: NaiveDate) -> String {
    format!("{}", date.format("%b %-d, %Y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(980), "980");
        assert_eq!(format_count(8210), "8,210");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn pct_has_one_decimal() {
        assert_eq!(format_pct(0.09), "9.0%");
        assert_eq!(format_pct(0.139), "13.9%");
        assert_eq!(format_pct(0.0), "0.0%");
    }

    #[test]
    fn money_rounds_to_cents() {
        assert_eq!(format_money(2.45), "$2.45");
        assert_eq!(format_money(0.95), "$0.95");
        assert_eq!(format_money(1234.5), "$1,234.50");
    }

    #[test]
    fn relative_age_buckets() {
        let now = Utc::now();
        assert_eq!(format_relative(now - Duration::minutes(18), now), "18m ago");
        assert_eq!(format_relative(now - Duration::hours(12), now), "12h ago");
        // 47h is still reported in hours, 48h tips over into days
        assert_eq!(format_relative(now - Duration::hours(47), now), "47h ago");
        assert_eq!(format_relative(now - Duration::hours(80), now), "3d ago");
    }

    #[test]
    fn relative_age_clamps_future_instants() {
        let now = Utc::now();
        assert_eq!(format_relative(now + Duration::minutes(5), now), "0m ago");
    }

    #[test]
    fn date_is_short_month_form() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
        assert_eq!(format_date(d), "Jan 3, 2026");
    }
}
