//! Sundial - timestamp normalization for data-logging applications
//!
//! This library parses device-local, UTC, and ISO-8601 timestamps, applies
//! timezones and fixed offsets to them, and renders them in the handful of formats
//! a logging pipeline needs: device time, display strings, and offset-preserving
//! storage strings. Every operation is a stateless function over its arguments.
//!
//! # Modules
//!
//! * [`datetime`] - Parsing, timezone application and formatting
//! * [`calendar`] - Rounding to unit boundaries and calendar differences
//! * [`timezones`] - Bundled timezone list and host timezone detection
//! * [`timestamp`] - Input normalization for strings, epoch millis and date objects
//! * [`config`] - Configuration file handling
//! * [`utils`] - Format mask translation

/// Calendar arithmetic over timestamps
pub mod calendar;

/// Configuration module for managing library defaults
pub mod config;

/// Format strings and other constant values
pub mod constants;

/// Timestamp parsing, timezone application and formatting
pub mod datetime;

/// Error types
pub mod error;

/// Logging setup
pub mod logger;

/// Configured front-end holding default zone and masks
pub mod facade;

/// Input representations and ISO-8601 parsing
pub mod timestamp;

/// Bundled timezone list and timezone lookup
pub mod timezones;

/// Utility functions for format masks
pub mod utils;

pub use calendar::{build_timestamp, ceil, date_difference, floor, DateParts, TimeUnit};
pub use datetime::{
    apply_offset, apply_timezone, format_device_time, format_for_storage, format_from_offset, format_in_timezone,
    format_with_mask, get_device_timezone, get_ms_from_midnight, get_offset, get_offset_from_time, get_offset_from_zone,
    get_timezones, is_iso_date, is_valid_date, is_valid_date_for_mask, parse_and_apply_timezone, utc_date_string,
};
pub use error::{Result, SundialError};
pub use facade::Sundial;
pub use timestamp::Timestamp;
pub use timezones::{check_timezone_name, TimezoneRecord};
