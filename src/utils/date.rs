//! UTC datetime helpers for record timestamps and RSS dates.
//!
//! Records carry `processed_at` as `YYYY-MM-DD HH:MM:SS` without a zone; it is
//! taken as UTC. Feed items carry RFC 822 dates in GMT.
//!
//! # Examples
//!
//! ```ignore
//! let dt = parse_processed_at("2024-06-15 14:30:45")?;
//! assert_eq!(to_rfc822(dt), "Sat, 15 Jun 2024 14:30:45 GMT");
//! ```

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

/// `strftime` pattern of `processed_at`.
pub const PROCESSED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `strftime` pattern of `<pubDate>`.
const RFC822_GMT_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Parse a `processed_at` value, treating it as UTC.
pub fn parse_processed_at(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, PROCESSED_AT_FORMAT).map(|naive| naive.and_utc())
}

/// Format an instant the way records store `processed_at`.
pub fn format_processed_at(dt: DateTime<Utc>) -> String {
    dt.format(PROCESSED_AT_FORMAT).to_string()
}

/// Format as RFC 822 with a literal `GMT` zone, second precision.
pub fn to_rfc822(dt: DateTime<Utc>) -> String {
    dt.format(RFC822_GMT_FORMAT).to_string()
}

/// Parse a `<pubDate>` value. Returns `None` for anything not RFC 822.
pub fn parse_pub_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// `now - days`, saturating at the earliest representable instant.
pub fn days_before(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now.checked_sub_signed(TimeDelta::days(i64::from(days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
