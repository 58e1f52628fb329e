//! Shared formatting utilities for result cards.

use chrono::{DateTime, Local, NaiveDate};

/// Format a backend timestamp as a local calendar date, e.g. "Mar 15, 2024".
///
/// RFC 3339 timestamps are converted to the local timezone; bare
/// `YYYY-MM-DD` dates are shown as-is. Anything else is returned unchanged.
pub fn format_date_local(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Local).format("%b %-d, %Y").to_string();
    }
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Cut `text` to at most `max_chars` characters, appending an ellipsis when
/// anything was dropped.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", text[..cut].trim_end()),
        None => text.to_string(),
    }
}
