// src/ingest/timestamp.rs
//! Timestamp extraction for raw feed entries.
//!
//! Feeds disagree on date formats: RSS uses RFC 2822 (`pubDate`), Atom and
//! Dublin Core use RFC 3339, and some generators emit naive ISO strings.
//! Everything is converted to UTC so entries from different sources compare.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use time::{
    format_description::well_known::{Rfc2822, Rfc3339},
    OffsetDateTime,
};

use crate::ingest::types::RawEntry;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Resolve the instant an entry was published.
///
/// `published` wins when it parses; otherwise `updated` is tried. `None` means
/// the entry carries no usable timestamp and must be dropped by the caller.
pub fn normalize_timestamp(entry: &RawEntry) -> Option<DateTime<Utc>> {
    entry
        .published
        .as_deref()
        .and_then(parse_timestamp)
        .or_else(|| entry.updated.as_deref().and_then(parse_timestamp))
}

/// Parse a single feed date string into UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc2822) {
        return from_offset(dt);
    }
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return from_offset(dt);
    }

    // chrono is more lenient with obsolete zone names and lowercase `t`/`z`.
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn from_offset(dt: OffsetDateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(dt.unix_timestamp(), dt.nanosecond())
}

/// Serde adapter writing `published` as RFC 3339 with an explicit `+00:00`
/// offset. Reading accepts anything [`parse_timestamp`] understands.
pub mod rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, false))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| D::Error::custom(format!("unrecognized timestamp: {raw}")))
    }
}
