//! Timestamp coercion for frontmatter values
//!
//! Promotes ISO-8601-shaped strings to structured date/time values so
//! serialized frontmatter carries them unquoted (`2026-01-25 21:44:54`). Anything
//! that does not parse completely is passed through untouched.

use crate::frontmatter::FrontmatterValue;
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static ISO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})(?:[Tt ](\d{2}):(\d{2})(?::(\d{2})(?:[.,]\d+)?)? ?(Z|z|[+-]\d{2}(?::?\d{2})?)?)?$",
    )
    .expect("iso timestamp regex")
});

/// A date-time value with optional UTC offset, second precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    datetime: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl Timestamp {
    /// Local (offset-less) timestamp, truncated to whole seconds
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self {
            datetime: truncate_to_seconds(datetime),
            offset: None,
        }
    }

    /// Timestamp carrying an explicit UTC offset
    pub fn with_offset(datetime: NaiveDateTime, offset: FixedOffset) -> Self {
        Self {
            datetime: truncate_to_seconds(datetime),
            offset: Some(offset),
        }
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.datetime
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime.format("%Y-%m-%d %H:%M:%S"))?;
        if let Some(offset) = self.offset {
            let secs = offset.local_minus_utc();
            let sign = if secs < 0 { '-' } else { '+' };
            let secs = secs.abs();
            write!(f, "{sign}{:02}:{:02}", secs / 3600, (secs % 3600) / 60)?;
        }
        Ok(())
    }
}

fn truncate_to_seconds(datetime: NaiveDateTime) -> NaiveDateTime {
    datetime.with_nanosecond(0).unwrap_or(datetime)
}

/// Result of a successful ISO-8601 parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTimestamp {
    Date(NaiveDate),
    DateTime(Timestamp),
}

/// Parse a complete ISO-8601 date or date-time
///
/// Returns `None` for partial matches, out-of-range fields, or surrounding
/// text. Sub-second precision is accepted and dropped.
pub fn parse_iso8601(input: &str) -> Option<ParsedTimestamp> {
    let caps = ISO_REGEX.captures(input)?;
    let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, num(2)?, num(3)?)?;

    let Some(hour) = num(4) else {
        return Some(ParsedTimestamp::Date(date));
    };
    let time = NaiveTime::from_hms_opt(hour, num(5)?, num(6).unwrap_or(0))?;
    let datetime = date.and_time(time);

    let timestamp = match caps.get(7).map(|m| m.as_str()) {
        None => Timestamp::new(datetime),
        Some(offset) => Timestamp::with_offset(datetime, parse_offset(offset)?),
    };
    Some(ParsedTimestamp::DateTime(timestamp))
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    if raw.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }
    let sign = if raw.starts_with('-') { -1 } else { 1 };
    let digits: String = raw[1..].chars().filter(char::is_ascii_digit).collect();
    let hours: i32 = digits.get(..2)?.parse().ok()?;
    let minutes: i32 = match digits.get(2..) {
        Some(m) if !m.is_empty() => m.parse().ok()?,
        _ => 0,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Promote ISO-8601 strings to structured date/time values
///
/// Lists and maps are coerced element-wise. Every other value, and every
/// string that is not a complete ISO-8601 date or date-time, is returned
/// unchanged. `coerce(coerce(x)) == coerce(x)` for all `x`.
pub fn coerce(value: FrontmatterValue) -> FrontmatterValue {
    match value {
        FrontmatterValue::String(s) => match parse_iso8601(&s) {
            Some(ParsedTimestamp::Date(date)) => FrontmatterValue::Date(date),
            Some(ParsedTimestamp::DateTime(ts)) => FrontmatterValue::DateTime(ts),
            None => FrontmatterValue::String(s),
        },
        FrontmatterValue::List(items) => {
            FrontmatterValue::List(items.into_iter().map(coerce).collect())
        }
        FrontmatterValue::Map(map) => FrontmatterValue::Map(
            map.into_iter()
                .map(|(key, value)| (key, coerce(value)))
                .collect(),
        ),
        other => other,
    }
}
