//! Date helper functions
//!
//! Post dates arrive as opaque strings. These helpers are only used for
//! display and ordering; the post itself keeps the raw value.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Parse a date string in the formats Notion exports commonly use
pub fn parse_date_string(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().fixed_offset());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(dt.and_utc().fixed_offset());
        }
    }

    None
}

/// Render a raw post date as `YYYY-MM-DD`, or echo it when unparseable
pub fn display_date(raw: Option<&str>) -> String {
    match raw {
        Some(s) => parse_date_string(s)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| s.trim().to_string()),
        None => String::new(),
    }
}
