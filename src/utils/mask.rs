//! Token-style format masks
//!
//! Masks such as `DD-MM-YYYY hh:mm a` are translated into chrono strftime strings so
//! the same layout can drive both parsing and rendering.

use crate::error::{Result, SundialError};
use crate::timestamp::ParsedTimestamp;
use chrono::format::{parse, Fixed, Item, Numeric, Parsed, StrftimeItems};
use chrono::{DateTime, NaiveTime, TimeZone};
use std::fmt::Display;

/// Translate a token-style mask into a chrono strftime string.
///
/// Supported tokens: `YYYY YY MMMM MMM MM M DD D dddd ddd HH H hh h mm m ss s SSS A a Z ZZ`.
/// Text inside `[...]` and any other character is copied literally. The ordinal `Do`
/// has no chrono equivalent and is rejected.
pub fn translate_mask(mask: &str) -> Result<String> {
    let chars: Vec<char> = mask.chars().collect();
    let mut out = String::with_capacity(mask.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '[' {
            let close = chars[i + 1..]
                .iter()
                .position(|&ch| ch == ']')
                .ok_or_else(|| SundialError::InvalidFormat(format!("unclosed '[' in '{}'", mask)))?;
            for &ch in &chars[i + 1..i + 1 + close] {
                push_literal(&mut out, ch);
            }
            i += close + 2;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&ch| ch == c).count();
        if c == 'D' && chars.get(i + run) == Some(&'o') {
            return Err(SundialError::InvalidFormat(format!("ordinal 'Do' is not supported in '{}'", mask)));
        }

        match token(c, run) {
            Some(item) => out.push_str(item),
            None => {
                for _ in 0..run {
                    push_literal(&mut out, c);
                }
            }
        }
        i += run;
    }

    Ok(out)
}

fn token(c: char, run: usize) -> Option<&'static str> {
    let item = match (c, run) {
        ('Y', 4) => "%Y",
        ('Y', 2) => "%y",
        ('M', 4) => "%B",
        ('M', 3) => "%b",
        ('M', 2) => "%m",
        ('M', 1) => "%-m",
        ('D', 2) => "%d",
        ('D', 1) => "%-d",
        ('d', 4) => "%A",
        ('d', 3) => "%a",
        ('H', 2) => "%H",
        ('H', 1) => "%-H",
        ('h', 2) => "%I",
        ('h', 1) => "%-I",
        ('m', 2) => "%M",
        ('m', 1) => "%-M",
        ('s', 2) => "%S",
        ('s', 1) => "%-S",
        ('S', 3) => "%3f",
        ('A', 1) => "%p",
        ('a', 1) => "%P",
        ('Z', 1) => "%:z",
        ('Z', 2) => "%z",
        _ => return None,
    };
    Some(item)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

fn has_item(format: &str, wanted: impl Fn(&Item<'_>) -> bool) -> bool {
    StrftimeItems::new(format).any(|item| wanted(&item))
}

fn has_hour(format: &str) -> bool {
    has_item(format, |item| matches!(item, Item::Numeric(Numeric::Hour | Numeric::Hour12, _)))
}

fn has_clock_hour(format: &str) -> bool {
    has_item(format, |item| matches!(item, Item::Numeric(Numeric::Hour12, _)))
}

fn has_meridiem(format: &str) -> bool {
    has_item(format, |item| matches!(item, Item::Fixed(Fixed::UpperAmPm | Fixed::LowerAmPm)))
}

/// Rewrite dotted meridiem markers (`p.m.`) into the `pm` form chrono reads.
pub fn normalize_meridiem(value: &str) -> String {
    value
        .replace("a.m.", "am")
        .replace("p.m.", "pm")
        .replace("A.M.", "AM")
        .replace("P.M.", "PM")
}

/// Parse `value` laid out as `mask`.
///
/// The result is zone-naive unless the mask carries a `Z`/`ZZ` offset token. A mask
/// without hour tokens yields midnight, and a 12-hour clock without `a`/`A` is read
/// as morning.
pub fn parse_with_mask(value: &str, mask: &str) -> Result<ParsedTimestamp> {
    let format = translate_mask(mask)?;
    let value = normalize_meridiem(value.trim());
    let invalid = |reason: String| SundialError::InvalidTimestamp(format!("'{}' for mask '{}': {}", value, mask, reason));

    let mut parsed = Parsed::new();
    parse(&mut parsed, &value, StrftimeItems::new(&format)).map_err(|e| invalid(e.to_string()))?;

    if has_clock_hour(&format) && !has_meridiem(&format) {
        parsed.set_ampm(false).map_err(|e| invalid(e.to_string()))?;
    }

    let date = parsed.to_naive_date().map_err(|e| invalid(e.to_string()))?;
    let time = if has_hour(&format) {
        parsed.to_naive_time().map_err(|e| invalid(e.to_string()))?
    } else {
        NaiveTime::MIN
    };
    let naive = date.and_time(time);

    match parsed.to_fixed_offset() {
        Ok(offset) => offset
            .from_local_datetime(&naive)
            .single()
            .map(ParsedTimestamp::Zoned)
            .ok_or_else(|| invalid("offset out of range".to_string())),
        Err(_) => Ok(ParsedTimestamp::Naive(naive)),
    }
}

/// Render `dt` using a token-style mask.
pub fn format_with_mask<Tz>(dt: &DateTime<Tz>, mask: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let format = translate_mask(mask)?;
    Ok(dt.format(&format).to_string())
}
