use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};
use sundial::*;

const EURO_MASK: &str = "DD-MM-YYYY hh:mm a";

fn utc_iso<Tz: TimeZone>(dt: DateTime<Tz>) -> String {
    dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true)
}

// apply_timezone

#[test]
fn test_apply_timezone_standard_time() {
    let res = apply_timezone("2014-01-01T00:00:00", Some("US/Eastern")).unwrap();
    assert_eq!(utc_iso(res), "2014-01-01T05:00:00.000Z");
}

#[test]
fn test_apply_timezone_daylight_time() {
    let res = apply_timezone("2014-06-01T00:00:00", Some("US/Eastern")).unwrap();
    assert_eq!(utc_iso(res), "2014-06-01T04:00:00.000Z");
}

#[test]
fn test_apply_timezone_defaults_to_utc() {
    let res = apply_timezone("2014-01-01T00:00:00", None).unwrap();
    assert_eq!(utc_iso(res), "2014-01-01T00:00:00.000Z");
}

#[test]
fn test_apply_timezone_keeps_instant_of_zoned_input() {
    let res = apply_timezone("2014-01-01T00:00:00Z", Some("US/Eastern")).unwrap();
    assert_eq!(res.to_rfc3339(), "2013-12-31T19:00:00-05:00");
    assert_eq!(utc_iso(res), "2014-01-01T00:00:00.000Z");
}

#[test]
fn test_apply_timezone_accepts_epoch_millis_and_dates() {
    let from_ms = apply_timezone(1_388_534_400_000_i64, Some("Europe/Paris")).unwrap();
    let from_date = apply_timezone(Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap(), Some("Europe/Paris")).unwrap();
    assert_eq!(from_ms, from_date);
    assert_eq!(from_ms.to_rfc3339(), "2014-01-01T01:00:00+01:00");
}

#[test]
fn test_apply_timezone_errors() {
    assert_eq!(
        apply_timezone("2014-01-01T00:00:00", Some("Mars/Base")),
        Err(SundialError::InvalidTimezone("Mars/Base".to_string()))
    );
    assert_eq!(
        apply_timezone("Junk", Some("US/Eastern")),
        Err(SundialError::InvalidTimestamp("Junk".to_string()))
    );
}

#[test]
fn test_apply_timezone_basic_format_and_hour_only_offset() {
    let basic = apply_timezone("20140101T000000Z", Some("US/Eastern")).unwrap();
    assert_eq!(utc_iso(basic), "2014-01-01T00:00:00.000Z");

    let hour_only = apply_timezone("2014-01-01T00:00:00+05", Some("US/Eastern")).unwrap();
    assert_eq!(utc_iso(hour_only), "2013-12-31T19:00:00.000Z");
}

// format_device_time

#[test]
fn test_format_device_time_drops_millis_and_offset() {
    assert_eq!(format_device_time("2014-01-01T00:00:00.000Z").unwrap(), "2014-01-01T00:00:00");
}

#[test]
fn test_format_device_time_always_speaks_utc() {
    assert_eq!(format_device_time("2013-12-31T16:00:00-08:00").unwrap(), "2014-01-01T00:00:00");
}

#[test]
fn test_format_device_time_reads_naive_as_utc() {
    assert_eq!(format_device_time("2014-01-01T00:00:00").unwrap(), "2014-01-01T00:00:00");
}

#[test]
fn test_format_device_time_epoch_millis() {
    assert_eq!(format_device_time(1_388_534_400_000_i64).unwrap(), "2014-01-01T00:00:00");
}

#[test]
fn test_format_device_time_date_object() {
    let date = Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(format_device_time(date).unwrap(), "2014-01-01T00:00:00");
}

// format_from_offset / format_with_mask

#[test]
fn test_format_from_offset() {
    assert_eq!(format_from_offset("2013-05-09T00:00:00-00:00", -240).unwrap(), "May 8 at 8:00 pm");
}

#[test]
fn test_format_from_offset_rejects_out_of_range_offset() {
    assert_eq!(
        format_from_offset("2013-05-09T00:00:00Z", 1440),
        Err(SundialError::InvalidOffset(1440))
    );
}

#[test]
fn test_format_with_mask() {
    assert_eq!(
        format_with_mask("2014-01-01T00:00:00Z", 60, "YYYY-MM-DD HH:mm ZZ").unwrap(),
        "2014-01-01 01:00 +0100"
    );
}

// format_for_storage

#[test]
fn test_format_for_storage_keeps_offset() {
    let stored = format_for_storage("2014-10-03T13:23", -780).unwrap();
    assert_eq!(stored, "2014-10-03T00:23:00.000-13:00");
    assert!(is_valid_date(Some(stored.as_str())));
    assert_eq!(get_offset_from_time(&stored).unwrap(), -780);
}

#[test]
fn test_format_for_storage_round_trip() {
    let original = "2014-06-01T12:34:56.789Z";
    let instant = Timestamp::from(original).to_utc().unwrap();

    for offset in [-720, -300, 0, 330, 345, 840] {
        let stored = format_for_storage(original, offset).unwrap();
        assert!(!stored.contains('Z') && !stored.contains('z'), "{}", stored);
        assert_eq!(get_offset_from_time(&stored).unwrap(), offset);
        assert_eq!(Timestamp::from(&stored).to_utc().unwrap(), instant);
    }
}

#[test]
fn test_format_for_storage_zero_offset_is_not_zulu() {
    assert_eq!(
        format_for_storage("2014-01-01T00:00:00Z", 0).unwrap(),
        "2014-01-01T00:00:00.000+00:00"
    );
}

// format_in_timezone

#[test]
fn test_format_in_timezone_iso() {
    assert_eq!(
        format_in_timezone("2014-06-01T12:00:00Z", "US/Eastern", None).unwrap(),
        "2014-06-01T08:00:00-04:00"
    );
}

#[test]
fn test_format_in_timezone_with_mask() {
    assert_eq!(
        format_in_timezone("2014-06-01T12:00:00Z", "US/Eastern", Some("MMMM D [at] h:mm a")).unwrap(),
        "June 1 at 8:00 am"
    );
}

// get_device_timezone / get_offset

#[test]
fn test_get_device_timezone_is_valid() {
    let timezone = get_device_timezone();
    assert!(!timezone.name.is_empty());
    assert!(!timezone.label.is_empty());
}

#[test]
fn test_get_offset_matches_host() {
    let expected = Local::now().offset().local_minus_utc() / 60;
    assert_eq!(get_offset(), expected);
}

// get_ms_from_midnight

#[test]
fn test_ms_from_utc_midnight() {
    assert_eq!(get_ms_from_midnight("2014-01-01T00:00:00.001Z", None).unwrap(), 1);
}

#[test]
fn test_ms_from_eastern_midnight() {
    assert_eq!(get_ms_from_midnight("2014-01-01T05:00:00.025Z", Some(-300)).unwrap(), 25);
    assert_eq!(get_ms_from_midnight("2014-01-01T00:00:00.025-05:00", Some(-300)).unwrap(), 25);
}

#[test]
fn test_ms_from_auckland_midnight() {
    assert_eq!(get_ms_from_midnight("2013-12-31T11:05:00.000Z", Some(780)).unwrap(), 300_000);
}

#[test]
fn test_ms_from_midnight_wraps_to_previous_day() {
    assert_eq!(get_ms_from_midnight("2014-01-01T00:00:00.025Z", Some(-300)).unwrap(), 68_400_025);
}

// get_offset_from_time / get_offset_from_zone / apply_offset

#[test]
fn test_get_offset_from_time() {
    assert_eq!(get_offset_from_time("2013-01-01T00:00:00-13:00").unwrap(), -780);
    assert_eq!(get_offset_from_time("2013-01-01T00:00:00+05:30").unwrap(), 330);
    assert_eq!(get_offset_from_time("2013-01-01T00:00:00").unwrap(), 0);
    assert!(get_offset_from_time("Junk").is_err());
}

#[test]
fn test_get_offset_from_zone_follows_dst() {
    assert_eq!(get_offset_from_zone("2014-01-01T12:00:00Z", "US/Eastern").unwrap(), -300);
    assert_eq!(get_offset_from_zone("2014-06-01T12:00:00Z", "US/Eastern").unwrap(), -240);
    assert_eq!(get_offset_from_zone("2014-06-01T12:00:00Z", "Asia/Kolkata").unwrap(), 330);
}

#[test]
fn test_apply_offset() {
    let shifted = apply_offset("2014-01-01T00:00:00Z", -300).unwrap();
    assert_eq!(utc_iso(shifted), "2013-12-31T19:00:00.000Z");
}

// get_timezones

#[test]
fn test_get_timezones_count() {
    assert_eq!(get_timezones().len(), 131);
}

#[test]
fn test_get_timezones_non_empty_fields() {
    for timezone in get_timezones() {
        assert!(!timezone.name.is_empty());
        assert!(!timezone.label.is_empty());
    }
}

// is_iso_date

#[test]
fn test_is_iso_date_rejects_missing_and_junk() {
    assert!(!is_iso_date(None));
    assert!(!is_iso_date(Some("")));
    assert!(!is_iso_date(Some("Junk")));
}

#[test]
fn test_is_iso_date_rejects_zone_naive() {
    let naive = Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    assert!(!is_iso_date(Some(naive.as_str())));
}

#[test]
fn test_is_iso_date_accepts_non_zulu() {
    let zoned = Local::now().format("%Y-%m-%dT%H:%M:%S%:z").to_string();
    assert!(is_iso_date(Some(zoned.as_str())));
}

#[test]
fn test_is_iso_date_accepts_zulu() {
    let zulu = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    assert!(is_iso_date(Some(zulu.as_str())));
}

#[test]
fn test_is_iso_date_accepts_basic_format_and_hour_only_offset() {
    assert!(is_iso_date(Some("20140101T000000Z")));
    assert!(is_iso_date(Some("20140101T000000.500+0100")));
    assert!(is_iso_date(Some("2014-01-01T00:00:00+05")));
    assert!(is_iso_date(Some("2014-01-01T00:00:00.000-03")));
    assert!(!is_iso_date(Some("20140101T000000")));
}

// is_valid_date / is_valid_date_for_mask

#[test]
fn test_is_valid_date() {
    let now = Utc::now().to_rfc3339();
    assert!(!is_valid_date(None));
    assert!(!is_valid_date(Some("")));
    assert!(!is_valid_date(Some("Junk")));
    assert!(is_valid_date(Some(now.as_str())));
    assert!(is_valid_date(Some("2014-01-01T00:00:00")));
    assert!(is_valid_date(Some("Wed, 01 Jan 2014 00:00:00 +0000")));
}

#[test]
fn test_is_valid_date_for_mask() {
    assert!(is_valid_date_for_mask(Some("31-12-2013 06:32 p.m."), EURO_MASK));
    assert!(!is_valid_date_for_mask(Some("2013-12-31"), EURO_MASK));
    assert!(!is_valid_date_for_mask(Some("32-12-2013 06:32 pm"), EURO_MASK));
    assert!(!is_valid_date_for_mask(None, EURO_MASK));
}

// parse_and_apply_timezone

#[test]
fn test_parse_and_apply_timezone_standard_time() {
    let res = parse_and_apply_timezone("31-12-2013 06:32 p.m.", EURO_MASK, Some("US/Eastern")).unwrap();
    assert_eq!(utc_iso(res), "2013-12-31T23:32:00.000Z");
}

#[test]
fn test_parse_and_apply_timezone_daylight_time() {
    let res = parse_and_apply_timezone("30-06-2014 07:32 p.m.", EURO_MASK, Some("US/Eastern")).unwrap();
    assert_eq!(utc_iso(res), "2014-06-30T23:32:00.000Z");
}

#[test]
fn test_parse_and_apply_timezone_defaults_to_utc() {
    let res = parse_and_apply_timezone("30-06-2014 07:32 p.m.", EURO_MASK, None).unwrap();
    assert_eq!(utc_iso(res), "2014-06-30T19:32:00.000Z");
}

#[test]
fn test_parse_and_apply_timezone_date_only_mask() {
    let res = parse_and_apply_timezone("30/06/2014", "DD/MM/YYYY", Some("Europe/London")).unwrap();
    assert_eq!(utc_iso(res), "2014-06-29T23:00:00.000Z");
}

#[test]
fn test_parse_and_apply_timezone_clock_hour_without_meridiem() {
    let res = parse_and_apply_timezone("31-12-2013 06:32", "DD-MM-YYYY hh:mm", None).unwrap();
    assert_eq!(utc_iso(res), "2013-12-31T06:32:00.000Z");
    assert!(is_valid_date_for_mask(Some("31-12-2013 06:32"), "DD-MM-YYYY hh:mm"));
}

#[test]
fn test_parse_and_apply_timezone_errors() {
    assert!(matches!(
        parse_and_apply_timezone("not a date", EURO_MASK, None),
        Err(SundialError::InvalidTimestamp(_))
    ));
    assert!(matches!(
        parse_and_apply_timezone("31-12-2013 06:32 pm", EURO_MASK, Some("Nowhere")),
        Err(SundialError::InvalidTimezone(_))
    ));
    assert!(matches!(
        parse_and_apply_timezone("31st", "Do", None),
        Err(SundialError::InvalidFormat(_))
    ));
}

// utc_date_string

#[test]
fn test_utc_date_string_is_valid_iso() {
    let utc_string = utc_date_string();
    assert!(is_valid_date(Some(utc_string.as_str())));
    assert!(is_iso_date(Some(utc_string.as_str())));
}

#[test]
fn test_utc_date_string_has_no_zulu_designator() {
    let utc_string = utc_date_string();
    assert!(!utc_string.contains('Z'));
    assert!(!utc_string.contains('z'));
}
