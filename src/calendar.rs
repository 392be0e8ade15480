//! Calendar arithmetic: rounding to unit boundaries, differences, and assembling
//! timestamps from separate fields.

use crate::datetime::{apply_timezone, resolve_civil};
use crate::error::{Result, SundialError};
use crate::timestamp::Timestamp;
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Calendar unit for rounding and differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    /// ISO week, starting Monday
    Week,
    Month,
    Year,
}

/// Separate date and time fields, all in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl DateParts {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_time(mut self, hour: u32, minute: u32, second: u32) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    #[must_use]
    pub fn with_millisecond(mut self, millisecond: u32) -> Self {
        self.millisecond = millisecond;
        self
    }
}

/// Assemble a UTC instant, or `None` when any field is out of range.
pub fn build_timestamp(parts: &DateParts) -> Option<DateTime<Utc>> {
    if parts.millisecond >= 1000 {
        return None;
    }
    NaiveDate::from_ymd_opt(parts.year, parts.month, parts.day)?
        .and_hms_milli_opt(parts.hour, parts.minute, parts.second, parts.millisecond)
        .map(|naive| naive.and_utc())
}

/// Start of the unit containing `timestamp`, in the civil calendar of `timezone`.
pub fn floor(timestamp: impl Into<Timestamp>, unit: TimeUnit, timezone: Option<&str>) -> Result<DateTime<Tz>> {
    let zoned = apply_timezone(timestamp, timezone)?;
    let start = truncate(zoned.naive_local(), unit).ok_or_else(|| out_of_range(&zoned, unit))?;
    Ok(resolve_civil(&zoned.timezone(), start))
}

/// Start of the next unit, unless `timestamp` already sits on a boundary.
pub fn ceil(timestamp: impl Into<Timestamp>, unit: TimeUnit, timezone: Option<&str>) -> Result<DateTime<Tz>> {
    let zoned = apply_timezone(timestamp, timezone)?;
    let start = truncate(zoned.naive_local(), unit).ok_or_else(|| out_of_range(&zoned, unit))?;
    if start == zoned.naive_local() {
        return Ok(zoned);
    }
    let next = advance(start, unit).ok_or_else(|| out_of_range(&zoned, unit))?;
    Ok(resolve_civil(&zoned.timezone(), next))
}

/// Whole units in `later - earlier`, truncated toward zero.
///
/// Months and years count calendar months; a month-end anchor is clamped, so Jan 31 to
/// Feb 28 is one month and Jan 31 to Feb 27 is none.
pub fn date_difference(later: impl Into<Timestamp>, earlier: impl Into<Timestamp>, unit: TimeUnit) -> Result<i64> {
    let later = later.into().to_utc()?;
    let earlier = earlier.into().to_utc()?;
    let delta = later - earlier;

    let units = match unit {
        TimeUnit::Second => delta.num_seconds(),
        TimeUnit::Minute => delta.num_minutes(),
        TimeUnit::Hour => delta.num_hours(),
        TimeUnit::Day => delta.num_days(),
        TimeUnit::Week => delta.num_weeks(),
        TimeUnit::Month => months_between(later, earlier)?,
        TimeUnit::Year => months_between(later, earlier)? / 12,
    };
    Ok(units)
}

fn truncate(local: NaiveDateTime, unit: TimeUnit) -> Option<NaiveDateTime> {
    let date = local.date();
    match unit {
        TimeUnit::Second => local.with_nanosecond(0),
        TimeUnit::Minute => date.and_hms_opt(local.hour(), local.minute(), 0),
        TimeUnit::Hour => date.and_hms_opt(local.hour(), 0, 0),
        TimeUnit::Day => date.and_hms_opt(0, 0, 0),
        TimeUnit::Week => {
            let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
            monday.and_hms_opt(0, 0, 0)
        }
        TimeUnit::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?.and_hms_opt(0, 0, 0),
        TimeUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_hms_opt(0, 0, 0),
    }
}

fn advance(start: NaiveDateTime, unit: TimeUnit) -> Option<NaiveDateTime> {
    match unit {
        TimeUnit::Second => start.checked_add_signed(Duration::seconds(1)),
        TimeUnit::Minute => start.checked_add_signed(Duration::minutes(1)),
        TimeUnit::Hour => start.checked_add_signed(Duration::hours(1)),
        TimeUnit::Day => start.checked_add_signed(Duration::days(1)),
        TimeUnit::Week => start.checked_add_signed(Duration::weeks(1)),
        TimeUnit::Month => start.checked_add_months(Months::new(1)),
        TimeUnit::Year => start.checked_add_months(Months::new(12)),
    }
}

fn months_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> Result<i64> {
    let mut months = i64::from(later.year() - earlier.year()) * 12 + i64::from(later.month()) - i64::from(earlier.month());

    let anchor = shift_months(earlier, months).ok_or_else(|| SundialError::InvalidTimestamp(earlier.to_rfc3339()))?;
    if months > 0 && anchor > later {
        months -= 1;
    } else if months < 0 && anchor < later {
        months += 1;
    }
    Ok(months)
}

fn shift_months(dt: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        dt.checked_add_months(magnitude)
    } else {
        dt.checked_sub_months(magnitude)
    }
}

fn out_of_range(zoned: &DateTime<Tz>, unit: TimeUnit) -> SundialError {
    SundialError::InvalidTimestamp(format!("{} cannot be rounded to {:?}", zoned.to_rfc3339(), unit))
}
