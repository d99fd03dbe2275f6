//! Date parsing and display helpers.
//!
//! Stored dates are plain strings. Forms write ISO dates (`2024-05-14`), older
//! records carry Brazilian `dd/mm/yyyy`, and timestamps are RFC 3339. Anything
//! else is treated as absent.

use chrono::{DateTime, NaiveDate};

/// Parse a stored date string.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if value.contains('/') {
        return NaiveDate::parse_from_str(value, "%d/%m/%Y").ok();
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// `dd/mm/yyyy`, or `-` for an unparseable value.
pub fn format_br(value: &str) -> String {
    parse_date(value)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// `dd/mm` chart label.
pub fn day_month_label(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}
