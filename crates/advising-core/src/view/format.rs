//! Field formatting for viewmodel rows.

use chrono::{DateTime, NaiveDateTime};

/// Placeholder for missing data.
pub const FALLBACK: &str = "N/A";

/// Text for a cell. `None`, empty and whitespace-only all render the fallback.
pub fn text_or_fallback(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => FALLBACK.to_string(),
    }
}

/// Exactly two decimals when present.
pub fn decimal_or_fallback(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => FALLBACK.to_string(),
    }
}

pub fn integer_or_fallback(value: Option<i64>) -> String {
    value.map_or_else(|| FALLBACK.to_string(), |v| v.to_string())
}

/// `Mon DD, YYYY hh:mm AM` for an ISO-8601 timestamp.
///
/// Timestamps without an offset are shown as written. Anything unparsable
/// renders `Invalid Date`.
pub fn note_timestamp(value: Option<&str>) -> String {
    const LAYOUT: &str = "%b %d, %Y %I:%M %p";
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return "Invalid Date".to_string();
    };

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return with_offset.format(LAYOUT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format(LAYOUT).to_string();
        }
    }
    "Invalid Date".to_string()
}
