//! Display formatting for amounts and backend timestamps

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const NBSP: char = '\u{a0}';

/// Format an amount as Colombian pesos with no decimals
///
/// Thousands are separated with `.`, the symbol is followed by a
/// non-breaking space and the amount is rounded half away from zero.
///
/// ```
/// use gestor::core::format::format_currency;
///
/// assert_eq!(format_currency(1234567.0), "$\u{a0}1.234.567");
/// assert_eq!(format_currency(-2500.5), "-$\u{a0}2.501");
/// ```
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${NBSP}0");
    }

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    // `as` saturates past u64::MAX
    let digits = (rounded.abs() as u64).to_string();

    format!("{sign}${NBSP}{}", group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Parse a timestamp as the backend sends it
///
/// The backend stores naive UTC timestamps (`2024-03-01T14:05:09.123456`).
/// A trailing `Z`, an explicit offset, or a bare date are accepted too.
pub fn parse_backend_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = raw.strip_suffix('Z').unwrap_or(raw);
    if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(naive, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// `dd/mm/yyyy HH:MM`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%d/%m/%Y %H:%M").to_string()
}
