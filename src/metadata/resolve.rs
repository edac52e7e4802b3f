//! YAML 1.1 implicit typing of plain (unquoted, untagged) scalars.

use std::sync::OnceLock;

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};

use super::{MetaValue, Timestamp};
use crate::error::FrontmatterError;

fn int_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"^(?:[-+]?0b[0-1_]+",
            r"|[-+]?0[0-7_]+",
            r"|[-+]?(?:0|[1-9][0-9_]*)",
            r"|[-+]?0x[0-9a-fA-F_]+",
            r"|[-+]?[1-9][0-9_]*(?::[0-5]?[0-9])+)$",
        ))
        .unwrap()
    })
}

fn float_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"^(?:[-+]?(?:[0-9][0-9_]*)\.[0-9_]*(?:[eE][-+][0-9]+)?",
            r"|\.[0-9_]+(?:[eE][-+][0-9]+)?",
            r"|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*",
            r"|[-+]?\.(?:inf|Inf|INF)",
            r"|\.(?:nan|NaN|NAN))$",
        ))
        .unwrap()
    })
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap())
}

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<year>[0-9]{4})-(?P<month>[0-9]{1,2})-(?P<day>[0-9]{1,2})",
            r"(?:[Tt]|[ \t]+)(?P<hour>[0-9]{1,2}):(?P<minute>[0-9]{2}):(?P<second>[0-9]{2})",
            r"(?:\.(?P<fraction>[0-9]*))?",
            r"(?:[ \t]*(?P<tz>Z|(?P<tz_sign>[-+])(?P<tz_hour>[0-9]{1,2})(?::(?P<tz_minute>[0-9]{2}))?))?$",
        ))
        .unwrap()
    })
}

pub(super) fn resolve_plain(s: &str) -> Result<MetaValue, FrontmatterError> {
    match s {
        "" | "~" | "null" | "Null" | "NULL" => return Ok(MetaValue::Null),
        "yes" | "Yes" | "YES" | "true" | "True" | "TRUE" | "on" | "On" | "ON" => {
            return Ok(MetaValue::Bool(true))
        }
        "no" | "No" | "NO" | "false" | "False" | "FALSE" | "off" | "Off" | "OFF" => {
            return Ok(MetaValue::Bool(false))
        }
        _ => {}
    }

    if int_pattern().is_match(s) {
        return Ok(parse_int(s).unwrap_or_else(|| MetaValue::String(s.to_string())));
    }
    if float_pattern().is_match(s) {
        return Ok(parse_float(s).unwrap_or_else(|| MetaValue::String(s.to_string())));
    }
    if date_pattern().is_match(s) {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(MetaValue::Date)
            .map_err(|_| FrontmatterError::InvalidTimestamp(s.to_string()));
    }
    if let Some(caps) = timestamp_pattern().captures(s) {
        return parse_timestamp(&caps)
            .map(MetaValue::DateTime)
            .ok_or_else(|| FrontmatterError::InvalidTimestamp(s.to_string()));
    }
    Ok(MetaValue::String(s.to_string()))
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    }
}

/// `None` when the value does not fit a u64/i64; it is then kept as text.
fn parse_int(s: &str) -> Option<MetaValue> {
    let cleaned = s.replace('_', "");
    let (negative, digits) = split_sign(&cleaned);

    let magnitude: u128 = if digits == "0" {
        0
    } else if let Some(bin) = digits.strip_prefix("0b") {
        u128::from_str_radix(bin, 2).ok()?
    } else if let Some(hex) = digits.strip_prefix("0x") {
        u128::from_str_radix(hex, 16).ok()?
    } else if digits.contains(':') {
        // sexagesimal, e.g. 1:30 is 90
        digits.split(':').try_fold(0u128, |acc, part| {
            acc.checked_mul(60)?.checked_add(part.parse::<u128>().ok()?)
        })?
    } else if digits.starts_with('0') {
        u128::from_str_radix(digits, 8).ok()?
    } else {
        digits.parse().ok()?
    };

    let signed = i128::try_from(magnitude).ok()?;
    let signed = if negative { -signed } else { signed };
    if let Ok(i) = i64::try_from(signed) {
        Some(MetaValue::Integer(i))
    } else {
        u64::try_from(signed).ok().map(MetaValue::Unsigned)
    }
}

fn parse_float(s: &str) -> Option<MetaValue> {
    let cleaned = s.replace('_', "").to_lowercase();
    let (negative, digits) = split_sign(&cleaned);

    let magnitude = match digits {
        ".inf" => f64::INFINITY,
        ".nan" => f64::NAN,
        _ if digits.contains(':') => digits.split(':').try_fold(0f64, |acc, part| {
            part.parse::<f64>().ok().map(|v| acc * 60.0 + v)
        })?,
        _ => digits.parse().ok()?,
    };
    Some(MetaValue::Float(if negative { -magnitude } else { magnitude }))
}

fn parse_timestamp(caps: &Captures) -> Option<Timestamp> {
    let num = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());

    let date = NaiveDate::from_ymd_opt(caps["year"].parse().ok()?, num("month")?, num("day")?)?;
    // fraction is cut (or padded) to microseconds
    let micros = caps.name("fraction").map_or(0, |m| {
        let digits: String = m.as_str().chars().take(6).collect();
        format!("{digits:0<6}").parse::<u32>().unwrap_or(0)
    });
    let time = NaiveTime::from_hms_micro_opt(num("hour")?, num("minute")?, num("second")?, micros)?;
    let naive = NaiveDateTime::new(date, time);

    let Some(tz) = caps.name("tz") else {
        return Some(Timestamp::Naive(naive));
    };
    let offset_secs = if tz.as_str() == "Z" {
        0
    } else {
        let secs = i32::try_from(num("tz_hour")? * 3600 + num("tz_minute").unwrap_or(0) * 60).ok()?;
        if &caps["tz_sign"] == "-" {
            -secs
        } else {
            secs
        }
    };
    let offset = FixedOffset::east_opt(offset_secs)?;
    naive.and_local_timezone(offset).single().map(Timestamp::Offset)
}
