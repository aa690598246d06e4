//! Formatting helpers for presenting files and reports.

use time::{macros::format_description, OffsetDateTime};

/// `2025-03-14 07:26 UTC`
pub fn format_timestamp(at: OffsetDateTime) -> String {
    at.to_offset(time::UtcOffset::UTC)
        .format(&format_description!("[year]-[month]-[day] [hour]:[minute] UTC"))
        .unwrap_or_else(|_| "—".to_string())
}

/// File size in kilobytes with one decimal, e.g. `12.3 KB`.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
