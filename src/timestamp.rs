//! Timestamp input normalization
//!
//! Every public operation accepts a [`Timestamp`]: an ISO-8601 string (zoned or
//! zone-naive), epoch milliseconds, or a chrono `DateTime`. Before any computation the
//! input is parsed into a [`ParsedTimestamp`], which still remembers whether the source
//! carried an offset so callers can decide how to read zone-naive civil time.

use crate::constants::{DATE_ONLY_FORMAT, NAIVE_PARSE_FORMATS, SECONDS_PER_MINUTE, ZONED_PARSE_FORMATS};
use crate::error::{Result, SundialError};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// A point in time in any of the accepted input representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// ISO-8601 text, with or without an offset
    Iso(String),
    /// Milliseconds since the Unix epoch, always UTC
    EpochMillis(i64),
    /// An already-parsed date object
    DateTime(DateTime<FixedOffset>),
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Timestamp::Iso(value.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(value: String) -> Self {
        Timestamp::Iso(value)
    }
}

impl From<&String> for Timestamp {
    fn from(value: &String) -> Self {
        Timestamp::Iso(value.clone())
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Timestamp::EpochMillis(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(value: DateTime<Tz>) -> Self {
        Timestamp::DateTime(value.fixed_offset())
    }
}

/// A timestamp after parsing, before any timezone has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTimestamp {
    /// The input named its offset (or was an epoch/date object), so the instant is fixed
    Zoned(DateTime<FixedOffset>),
    /// Civil fields with no offset; UTC unless a zone says otherwise
    Naive(NaiveDateTime),
}

impl ParsedTimestamp {
    /// The UTC instant, reading zone-naive input as UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            ParsedTimestamp::Zoned(dt) => dt.with_timezone(&Utc),
            ParsedTimestamp::Naive(naive) => naive.and_utc(),
        }
    }

    /// Embedded offset in minutes east of UTC; zero for zone-naive input.
    pub fn offset_minutes(&self) -> i32 {
        match self {
            ParsedTimestamp::Zoned(dt) => dt.offset().local_minus_utc() / SECONDS_PER_MINUTE,
            ParsedTimestamp::Naive(_) => 0,
        }
    }

    pub fn is_zoned(&self) -> bool {
        matches!(self, ParsedTimestamp::Zoned(_))
    }
}

impl Timestamp {
    /// Parse the input, failing with [`SundialError::InvalidTimestamp`].
    pub fn parse(&self) -> Result<ParsedTimestamp> {
        match self {
            Timestamp::Iso(text) => parse_iso(text).ok_or_else(|| {
                log::debug!("Rejected timestamp '{}'", text);
                SundialError::InvalidTimestamp(text.clone())
            }),
            Timestamp::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms)
                .map(|dt| ParsedTimestamp::Zoned(dt.fixed_offset()))
                .ok_or_else(|| SundialError::InvalidTimestamp(ms.to_string())),
            Timestamp::DateTime(dt) => Ok(ParsedTimestamp::Zoned(*dt)),
        }
    }

    /// Shorthand for `parse()?.to_utc()`.
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        Ok(self.parse()?.to_utc())
    }
}

/// Parse ISO-8601 text in any of the accepted shapes.
///
/// Zoned shapes are tried first, so `Some(ParsedTimestamp::Naive(_))` means the text
/// genuinely carried no offset.
pub fn parse_iso(text: &str) -> Option<ParsedTimestamp> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(ParsedTimestamp::Zoned(dt));
    }

    let normalized = normalize_offset(text);
    for format in ZONED_PARSE_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&normalized, format) {
            return Some(ParsedTimestamp::Zoned(dt));
        }
    }

    for format in NAIVE_PARSE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(ParsedTimestamp::Naive(naive));
        }
    }

    NaiveDate::parse_from_str(text, DATE_ONLY_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(ParsedTimestamp::Naive)
}

/// Rewrite the offset forms chrono's `%z` does not read: the Zulu designator and
/// hour-only offsets such as `+05`.
fn normalize_offset(text: &str) -> String {
    if let Some(stripped) = text.strip_suffix(['Z', 'z']) {
        return format!("{}+00:00", stripped);
    }

    let split = text.len().saturating_sub(3);
    match (text.get(..split), text.get(split..)) {
        (Some(head), Some(tail)) if head.contains('T') || head.contains(' ') => {
            let mut chars = tail.chars();
            let sign = chars.next();
            let hours_only = matches!(sign, Some('+') | Some('-'))
                && chars.all(|c| c.is_ascii_digit())
                && head.ends_with(|c: char| c.is_ascii_digit());
            if hours_only {
                format!("{}{}:00", head, tail)
            } else {
                text.to_string()
            }
        }
        _ => text.to_string(),
    }
}

/// Parse any text that denotes a date, ISO-8601 or RFC 2822.
pub fn parse_any(text: &str) -> Option<ParsedTimestamp> {
    parse_iso(text).or_else(|| {
        DateTime::parse_from_rfc2822(text.trim())
            .ok()
            .map(ParsedTimestamp::Zoned)
    })
}
