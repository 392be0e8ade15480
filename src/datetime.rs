//! Timestamp parsing, timezone application and formatting
//!
//! Every function here is a stateless transformation: the input is normalized to a
//! [`ParsedTimestamp`], the requested zone or offset is applied, and a new value is
//! returned. The only host state read is the clock and its local offset
//! ([`utc_date_string`], [`get_offset`], [`get_device_timezone`]).
//!
//! Zone-naive input is UTC for the offset-based functions. Functions that take a zone
//! name read zone-naive input as civil time in that zone, so
//! `apply_timezone("2014-01-01T00:00:00", Some("US/Eastern"))` is 05:00 UTC.

use crate::constants::{DEVICE_TIME_FORMAT, FROM_OFFSET_MASK, MS_PER_DAY, MS_PER_MINUTE, SECONDS_PER_MINUTE, STORAGE_FORMAT, ZONED_ISO_FORMAT};
use crate::error::{Result, SundialError};
use crate::timestamp::{parse_any, parse_iso, ParsedTimestamp, Timestamp};
use crate::timezones::check_timezone_name;
use crate::utils::mask;
use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

pub use crate::timezones::{get_device_timezone, get_offset, get_timezones};

/// Hours to step back when looking for the offset in force before a DST gap.
const MAX_GAP_HOURS: i64 = 24;

/// Re-express `timestamp` in `timezone` (UTC when `None`).
///
/// The returned value keeps the instant of zoned input; zone-naive input is read as
/// civil time in the zone with the DST rules of that calendar date.
pub fn apply_timezone(timestamp: impl Into<Timestamp>, timezone: Option<&str>) -> Result<DateTime<Tz>> {
    let tz = resolve_zone(timezone)?;
    let parsed = timestamp.into().parse()?;
    Ok(in_zone(parsed, tz))
}

/// Parse `value` with a token-style mask, then apply `timezone` like [`apply_timezone`].
pub fn parse_and_apply_timezone(value: &str, format_mask: &str, timezone: Option<&str>) -> Result<DateTime<Tz>> {
    let tz = resolve_zone(timezone)?;
    let parsed = mask::parse_with_mask(value, format_mask)?;
    Ok(in_zone(parsed, tz))
}

/// `YYYY-MM-DDTHH:mm:ss` of the UTC instant, whatever offset the input carried.
pub fn format_device_time(timestamp: impl Into<Timestamp>) -> Result<String> {
    let utc = timestamp.into().to_utc()?;
    Ok(utc.format(DEVICE_TIME_FORMAT).to_string())
}

/// Render the instant shifted by `offset_minutes` as `May 8 at 8:00 pm`.
pub fn format_from_offset(timestamp: impl Into<Timestamp>, offset_minutes: i32) -> Result<String> {
    format_with_mask(timestamp, offset_minutes, FROM_OFFSET_MASK)
}

/// Render the instant shifted by `offset_minutes` with any token-style mask.
pub fn format_with_mask(timestamp: impl Into<Timestamp>, offset_minutes: i32, format_mask: &str) -> Result<String> {
    let offset = fixed_offset(offset_minutes)?;
    let local = timestamp.into().to_utc()?.with_timezone(&offset);
    mask::format_with_mask(&local, format_mask)
}

/// Zoned ISO-8601 at `offset_minutes`, with milliseconds and never a `Z`.
///
/// Parsing the result gives back both the instant and `offset_minutes`.
pub fn format_for_storage(timestamp: impl Into<Timestamp>, offset_minutes: i32) -> Result<String> {
    let offset = fixed_offset(offset_minutes)?;
    let local = timestamp.into().to_utc()?.with_timezone(&offset);
    Ok(local.format(STORAGE_FORMAT).to_string())
}

/// [`apply_timezone`] followed by rendering in the zone, ISO-8601 unless a mask is given.
pub fn format_in_timezone(timestamp: impl Into<Timestamp>, timezone: &str, format_mask: Option<&str>) -> Result<String> {
    let zoned = apply_timezone(timestamp, Some(timezone))?;
    match format_mask {
        Some(format_mask) => mask::format_with_mask(&zoned, format_mask),
        None => Ok(zoned.format(ZONED_ISO_FORMAT).to_string()),
    }
}

/// Milliseconds since midnight at `offset_minutes` (UTC midnight when `None`).
pub fn get_ms_from_midnight(timestamp: impl Into<Timestamp>, offset_minutes: Option<i32>) -> Result<i64> {
    let ms = timestamp.into().to_utc()?.timestamp_millis();
    let shift = i64::from(offset_minutes.unwrap_or(0)) * MS_PER_MINUTE;
    Ok((ms + shift).rem_euclid(MS_PER_DAY))
}

/// Offset embedded in the timestamp, minutes east of UTC; zero for zone-naive text.
pub fn get_offset_from_time(timestamp: impl Into<Timestamp>) -> Result<i32> {
    Ok(timestamp.into().parse()?.offset_minutes())
}

/// Offset of `timezone` at the given instant, minutes east of UTC.
pub fn get_offset_from_zone(timestamp: impl Into<Timestamp>, timezone: &str) -> Result<i32> {
    let zoned = apply_timezone(timestamp, Some(timezone))?;
    Ok(zoned.offset().fix().local_minus_utc() / SECONDS_PER_MINUTE)
}

/// The UTC instant moved by `offset_minutes`, i.e. the device clock reading.
pub fn apply_offset(timestamp: impl Into<Timestamp>, offset_minutes: i32) -> Result<DateTime<Utc>> {
    let timestamp = timestamp.into();
    timestamp
        .to_utc()?
        .checked_add_signed(Duration::minutes(i64::from(offset_minutes)))
        .ok_or_else(|| SundialError::InvalidTimestamp(format!("{:?} shifted by {} minutes", timestamp, offset_minutes)))
}

/// True for ISO-8601 text that names its offset (`Z` or `±HH:MM`).
pub fn is_iso_date(value: Option<&str>) -> bool {
    value
        .and_then(parse_iso)
        .map(|parsed| parsed.is_zoned())
        .unwrap_or(false)
}

/// True for any text that denotes a valid date, zoned or not.
pub fn is_valid_date(value: Option<&str>) -> bool {
    value.and_then(parse_any).is_some()
}

/// True when `value` parses under `format_mask`.
pub fn is_valid_date_for_mask(value: Option<&str>, format_mask: &str) -> bool {
    value
        .map(|value| mask::parse_with_mask(value, format_mask).is_ok())
        .unwrap_or(false)
}

/// Now, as ISO-8601 at the host offset. Zero offsets render as `+00:00`.
pub fn utc_date_string() -> String {
    chrono::Local::now().format(ZONED_ISO_FORMAT).to_string()
}

pub(crate) fn resolve_zone(timezone: Option<&str>) -> Result<Tz> {
    match timezone {
        Some(name) => check_timezone_name(name),
        None => Ok(Tz::UTC),
    }
}

pub(crate) fn in_zone(parsed: ParsedTimestamp, tz: Tz) -> DateTime<Tz> {
    match parsed {
        ParsedTimestamp::Zoned(dt) => dt.with_timezone(&tz),
        ParsedTimestamp::Naive(naive) => resolve_civil(&tz, naive),
    }
}

/// Place civil time in `tz`. Ambiguous times take the earlier instant; times inside a
/// DST gap are read with the offset in force before the gap.
pub(crate) fn resolve_civil(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before = (1..=MAX_GAP_HOURS).find_map(|hours| tz.from_local_datetime(&(naive - Duration::hours(hours))).earliest());
            let offset_seconds = before.map(|dt| dt.offset().fix().local_minus_utc()).unwrap_or(0);
            tz.from_utc_datetime(&(naive - Duration::seconds(i64::from(offset_seconds))))
        }
    }
}

pub(crate) fn fixed_offset(offset_minutes: i32) -> Result<FixedOffset> {
    offset_minutes
        .checked_mul(SECONDS_PER_MINUTE)
        .and_then(FixedOffset::east_opt)
        .ok_or(SundialError::InvalidOffset(offset_minutes))
}
