//! Constants used throughout the crate
//!
//! This module centralizes format strings, default masks, and other constant values
//! to keep the rendered wire formats consistent.

// Render formats (chrono strftime)
pub const DEVICE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";
pub const ZONED_ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

// Zoned ISO-8601 shapes accepted besides RFC 3339, extended and basic
pub const ZONED_PARSE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y%m%dT%H%M%S%.f%z",
    "%Y%m%dT%H%M%z",
];

// Zone-naive ISO-8601 shapes
pub const NAIVE_PARSE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S%.f",
    "%Y%m%dT%H%M",
];
pub const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

// Default token-style masks
pub const FROM_OFFSET_MASK: &str = "MMMM D [at] h:mm a";
pub const DEFAULT_INPUT_MASK: &str = "DD-MM-YYYY hh:mm a";

// Time arithmetic
pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_DAY: i64 = 86_400_000;
pub const SECONDS_PER_MINUTE: i32 = 60;

// Timezone names
pub const UTC_ZONE_NAME: &str = "Etc/UTC";
pub const UTC_ZONE_LABEL: &str = "UTC";

// Config
pub const CONFIG_GENERATED: &str = "Generated default configuration";
pub const CONFIG_FILE_NAME: &str = "sundial.toml";
pub const CONFIG_DIR_NAME: &str = "sundial";
