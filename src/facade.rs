//! Configured front-end over the free functions in [`crate::datetime`].
//!
//! A [`Sundial`] carries the defaults from a [`Config`]: the zone used when a call
//! names none and the masks used for display and input.

use crate::calendar::{self, TimeUnit};
use crate::config::Config;
use crate::datetime;
use crate::error::Result;
use crate::timestamp::Timestamp;
use crate::timezones::{check_timezone_name, find_timezone, TimezoneRecord};
use chrono::DateTime;
use chrono_tz::Tz;

#[derive(Debug, Clone)]
pub struct Sundial {
    timezone: String,
    from_offset_mask: String,
    input_mask: String,
}

impl Sundial {
    /// Build from a validated configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            timezone: config.timezone.default.clone(),
            from_offset_mask: config.display.from_offset_mask.clone(),
            input_mask: config.display.input_mask.clone(),
        })
    }

    /// Load the configuration file (or defaults) and build from it.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_config(&Config::load()?)
    }

    /// Same settings with a different default zone.
    pub fn with_timezone(mut self, timezone: &str) -> Result<Self> {
        check_timezone_name(timezone)?;
        self.timezone = timezone.to_string();
        Ok(self)
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// The default zone as a record, with its bundled label when listed.
    pub fn timezone_record(&self) -> TimezoneRecord {
        find_timezone(&self.timezone)
            .cloned()
            .unwrap_or_else(|| TimezoneRecord::new(self.timezone.as_str(), self.timezone.as_str()))
    }

    pub fn apply_timezone(&self, timestamp: impl Into<Timestamp>) -> Result<DateTime<Tz>> {
        datetime::apply_timezone(timestamp, Some(&self.timezone))
    }

    /// Parse user input laid out as the configured input mask.
    pub fn parse_input(&self, value: &str) -> Result<DateTime<Tz>> {
        datetime::parse_and_apply_timezone(value, &self.input_mask, Some(&self.timezone))
    }

    pub fn format_from_offset(&self, timestamp: impl Into<Timestamp>, offset_minutes: i32) -> Result<String> {
        datetime::format_with_mask(timestamp, offset_minutes, &self.from_offset_mask)
    }

    pub fn format_local(&self, timestamp: impl Into<Timestamp>) -> Result<String> {
        datetime::format_in_timezone(timestamp, &self.timezone, None)
    }

    pub fn offset_at(&self, timestamp: impl Into<Timestamp>) -> Result<i32> {
        datetime::get_offset_from_zone(timestamp, &self.timezone)
    }

    pub fn floor(&self, timestamp: impl Into<Timestamp>, unit: TimeUnit) -> Result<DateTime<Tz>> {
        calendar::floor(timestamp, unit, Some(&self.timezone))
    }

    pub fn ceil(&self, timestamp: impl Into<Timestamp>, unit: TimeUnit) -> Result<DateTime<Tz>> {
        calendar::ceil(timestamp, unit, Some(&self.timezone))
    }
}

impl Default for Sundial {
    fn default() -> Self {
        let config = Config::default();
        Self {
            timezone: config.timezone.default,
            from_offset_mask: config.display.from_offset_mask,
            input_mask: config.display.input_mask,
        }
    }
}
