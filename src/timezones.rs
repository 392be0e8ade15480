//! Bundled timezone list and timezone lookup
//!
//! The picker list returned by [`get_timezones`] is a fixed set of 131 common zones.
//! Name validation goes through the full IANA database shipped with `chrono-tz`, so
//! legacy aliases such as `US/Eastern` are accepted even though they are not listed.

use crate::constants::{SECONDS_PER_MINUTE, UTC_ZONE_LABEL, UTC_ZONE_NAME};
use crate::error::{Result, SundialError};
use chrono::{Offset, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A timezone identifier with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimezoneRecord {
    pub name: String,
    pub label: String,
}

impl TimezoneRecord {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

const BUNDLED_ZONES: [(&str, &str); 131] = [
    ("Pacific/Midway", "Midway Island"),
    ("Pacific/Pago_Pago", "American Samoa"),
    ("Pacific/Honolulu", "Hawaii"),
    ("America/Juneau", "Alaska"),
    ("America/Los_Angeles", "Pacific Time (US & Canada)"),
    ("America/Tijuana", "Tijuana"),
    ("America/Denver", "Mountain Time (US & Canada)"),
    ("America/Phoenix", "Arizona"),
    ("America/Chihuahua", "Chihuahua"),
    ("America/Mazatlan", "Mazatlan"),
    ("America/Chicago", "Central Time (US & Canada)"),
    ("America/Regina", "Saskatchewan"),
    ("America/Mexico_City", "Mexico City"),
    ("America/Monterrey", "Monterrey"),
    ("America/Guatemala", "Central America"),
    ("America/New_York", "Eastern Time (US & Canada)"),
    ("America/Indiana/Indianapolis", "Indiana (East)"),
    ("America/Bogota", "Bogota"),
    ("America/Lima", "Lima"),
    ("America/Halifax", "Atlantic Time (Canada)"),
    ("America/Caracas", "Caracas"),
    ("America/La_Paz", "La Paz"),
    ("America/Santiago", "Santiago"),
    ("America/St_Johns", "Newfoundland"),
    ("America/Sao_Paulo", "Brasilia"),
    ("America/Argentina/Buenos_Aires", "Buenos Aires"),
    ("America/Montevideo", "Montevideo"),
    ("America/Guyana", "Georgetown"),
    ("America/Nuuk", "Greenland"),
    ("Atlantic/South_Georgia", "Mid-Atlantic"),
    ("Atlantic/Azores", "Azores"),
    ("Atlantic/Cape_Verde", "Cape Verde Is."),
    ("Africa/Casablanca", "Casablanca"),
    ("Europe/Dublin", "Dublin"),
    ("Europe/London", "London"),
    ("Europe/Lisbon", "Lisbon"),
    ("Africa/Monrovia", "Monrovia"),
    (UTC_ZONE_NAME, UTC_ZONE_LABEL),
    ("Europe/Amsterdam", "Amsterdam"),
    ("Europe/Belgrade", "Belgrade"),
    ("Europe/Berlin", "Berlin"),
    ("Europe/Zurich", "Bern"),
    ("Europe/Bratislava", "Bratislava"),
    ("Europe/Brussels", "Brussels"),
    ("Europe/Budapest", "Budapest"),
    ("Europe/Copenhagen", "Copenhagen"),
    ("Europe/Ljubljana", "Ljubljana"),
    ("Europe/Madrid", "Madrid"),
    ("Europe/Paris", "Paris"),
    ("Europe/Prague", "Prague"),
    ("Europe/Rome", "Rome"),
    ("Europe/Sarajevo", "Sarajevo"),
    ("Europe/Skopje", "Skopje"),
    ("Europe/Stockholm", "Stockholm"),
    ("Europe/Vienna", "Vienna"),
    ("Europe/Warsaw", "Warsaw"),
    ("Africa/Algiers", "West Central Africa"),
    ("Europe/Zagreb", "Zagreb"),
    ("Europe/Athens", "Athens"),
    ("Europe/Bucharest", "Bucharest"),
    ("Africa/Cairo", "Cairo"),
    ("Africa/Harare", "Harare"),
    ("Europe/Helsinki", "Helsinki"),
    ("Asia/Jerusalem", "Jerusalem"),
    ("Europe/Kaliningrad", "Kaliningrad"),
    ("Europe/Kyiv", "Kyiv"),
    ("Africa/Johannesburg", "Pretoria"),
    ("Europe/Riga", "Riga"),
    ("Europe/Sofia", "Sofia"),
    ("Europe/Tallinn", "Tallinn"),
    ("Europe/Vilnius", "Vilnius"),
    ("Asia/Baghdad", "Baghdad"),
    ("Europe/Istanbul", "Istanbul"),
    ("Asia/Kuwait", "Kuwait"),
    ("Europe/Minsk", "Minsk"),
    ("Europe/Moscow", "Moscow"),
    ("Africa/Nairobi", "Nairobi"),
    ("Asia/Riyadh", "Riyadh"),
    ("Europe/Volgograd", "Volgograd"),
    ("Asia/Tehran", "Tehran"),
    ("Asia/Muscat", "Muscat"),
    ("Asia/Baku", "Baku"),
    ("Europe/Samara", "Samara"),
    ("Asia/Tbilisi", "Tbilisi"),
    ("Asia/Yerevan", "Yerevan"),
    ("Asia/Kabul", "Kabul"),
    ("Asia/Yekaterinburg", "Ekaterinburg"),
    ("Asia/Karachi", "Karachi"),
    ("Asia/Tashkent", "Tashkent"),
    ("Asia/Kolkata", "Kolkata"),
    ("Asia/Colombo", "Sri Jayawardenepura"),
    ("Asia/Kathmandu", "Kathmandu"),
    ("Asia/Almaty", "Almaty"),
    ("Asia/Dhaka", "Dhaka"),
    ("Asia/Urumqi", "Urumqi"),
    ("Asia/Yangon", "Rangoon"),
    ("Asia/Bangkok", "Bangkok"),
    ("Asia/Jakarta", "Jakarta"),
    ("Asia/Krasnoyarsk", "Krasnoyarsk"),
    ("Asia/Novosibirsk", "Novosibirsk"),
    ("Asia/Shanghai", "Beijing"),
    ("Asia/Chongqing", "Chongqing"),
    ("Asia/Hong_Kong", "Hong Kong"),
    ("Asia/Irkutsk", "Irkutsk"),
    ("Asia/Kuala_Lumpur", "Kuala Lumpur"),
    ("Australia/Perth", "Perth"),
    ("Asia/Singapore", "Singapore"),
    ("Asia/Taipei", "Taipei"),
    ("Asia/Ulaanbaatar", "Ulaanbaatar"),
    ("Asia/Tokyo", "Tokyo"),
    ("Asia/Seoul", "Seoul"),
    ("Asia/Yakutsk", "Yakutsk"),
    ("Australia/Adelaide", "Adelaide"),
    ("Australia/Darwin", "Darwin"),
    ("Australia/Brisbane", "Brisbane"),
    ("Australia/Melbourne", "Melbourne"),
    ("Pacific/Guam", "Guam"),
    ("Australia/Hobart", "Hobart"),
    ("Pacific/Port_Moresby", "Port Moresby"),
    ("Australia/Sydney", "Sydney"),
    ("Asia/Vladivostok", "Vladivostok"),
    ("Asia/Magadan", "Magadan"),
    ("Pacific/Noumea", "New Caledonia"),
    ("Pacific/Guadalcanal", "Solomon Is."),
    ("Pacific/Auckland", "Auckland"),
    ("Pacific/Fiji", "Fiji"),
    ("Asia/Kamchatka", "Kamchatka"),
    ("Pacific/Majuro", "Marshall Is."),
    ("Pacific/Chatham", "Chatham Is."),
    ("Pacific/Tongatapu", "Nuku'alofa"),
    ("Pacific/Apia", "Samoa"),
];

static TIMEZONES: Lazy<Vec<TimezoneRecord>> = Lazy::new(|| {
    BUNDLED_ZONES
        .iter()
        .map(|(name, label)| TimezoneRecord::new(*name, *label))
        .collect()
});

/// The bundled picker list, in stable order.
pub fn get_timezones() -> &'static [TimezoneRecord] {
    &TIMEZONES
}

/// Look up a bundled record by IANA name.
pub fn find_timezone(name: &str) -> Option<&'static TimezoneRecord> {
    get_timezones().iter().find(|record| record.name == name)
}

/// Resolve a zone name against the full IANA database.
pub fn check_timezone_name(name: &str) -> Result<Tz> {
    name.trim().parse::<Tz>().map_err(|_| {
        log::debug!("Rejected timezone name '{}'", name);
        SundialError::InvalidTimezone(name.to_string())
    })
}

/// Host offset in minutes east of UTC.
///
/// chrono reports `local_minus_utc`, which is already positive east; the "minutes
/// behind UTC" convention of some date objects is the negation of this.
pub fn get_offset() -> i32 {
    chrono::Local::now().offset().local_minus_utc() / SECONDS_PER_MINUTE
}

/// The host's timezone as a bundled-style record.
///
/// Detection order: the `TZ` variable, the `/etc/localtime` link target, the first
/// bundled zone whose current offset matches the host, then UTC.
pub fn get_device_timezone() -> TimezoneRecord {
    if let Some(name) = detect_zone_name() {
        return record_for(&name);
    }

    let offset_seconds = get_offset() * SECONDS_PER_MINUTE;
    let now = Utc::now();
    let by_offset = get_timezones().iter().find(|record| {
        record
            .name
            .parse::<Tz>()
            .map(|tz| tz.offset_from_utc_datetime(&now.naive_utc()).fix().local_minus_utc() == offset_seconds)
            .unwrap_or(false)
    });

    match by_offset {
        Some(record) => {
            log::warn!("Could not detect host timezone name, matched {} by offset", record.name);
            record.clone()
        }
        None => {
            log::warn!("Could not detect host timezone, falling back to {}", UTC_ZONE_NAME);
            TimezoneRecord::new(UTC_ZONE_NAME, UTC_ZONE_LABEL)
        }
    }
}

fn record_for(name: &str) -> TimezoneRecord {
    find_timezone(name)
        .cloned()
        .unwrap_or_else(|| TimezoneRecord::new(name, name))
}

fn detect_zone_name() -> Option<String> {
    if let Ok(value) = std::env::var("TZ") {
        let name = value.trim().trim_start_matches(':');
        if check_timezone_name(name).is_ok() {
            return Some(name.to_string());
        }
    }

    let target = std::fs::read_link("/etc/localtime").ok()?;
    zone_from_zoneinfo_path(&target)
}

/// Extract `Area/City` from a path such as `/usr/share/zoneinfo/Area/City`.
fn zone_from_zoneinfo_path(path: &Path) -> Option<String> {
    let text = path.to_str()?;
    let (_, name) = text.split_once("zoneinfo/")?;
    check_timezone_name(name).ok().map(|_| name.to_string())
}
