//! Local and offset date-time nodes.
//!
//! TOML has four temporal forms: offset date-time, local date-time, local
//! date and local time. The three local forms share [`TomlDateTimeLocal`]
//! and are told apart by [`DateTimeStyle`]. Both types remember how many
//! fractional-second digits they were written with, so `07:32:00.50`
//! re-serializes as `07:32:00.50` rather than `07:32:00.5`.

use crate::syntax::MAX_SECONDS_PRECISION;
use crate::value::NodeMeta;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::borrow::Cow;
use std::fmt::Write;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Which parts of a local date-time are meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DateTimeStyle {
    Date,
    Time,
    #[default]
    DateTime,
}

/// A date, time or date-time without an offset.
///
/// # Examples
///
/// ```rust
/// use toml_tree::{DateTimeStyle, TomlDateTimeLocal};
///
/// let value = TomlDateTimeLocal::parse("1979-05-27 07:32:00.999").unwrap();
/// assert_eq!(value.style, DateTimeStyle::DateTime);
/// assert_eq!(value.precision, 3);
/// assert_eq!(value.to_inline_toml(), "1979-05-27T07:32:00.999");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TomlDateTimeLocal {
    pub meta: NodeMeta,
    pub value: NaiveDateTime,
    pub style: DateTimeStyle,
    pub precision: u8,
}

impl TomlDateTimeLocal {
    #[must_use]
    pub fn date_time(value: NaiveDateTime) -> Self {
        TomlDateTimeLocal {
            value,
            ..Default::default()
        }
    }

    /// A date-only value; the time part is midnight.
    #[must_use]
    pub fn date(date: NaiveDate) -> Self {
        TomlDateTimeLocal {
            value: date.and_time(NaiveTime::default()),
            style: DateTimeStyle::Date,
            ..Default::default()
        }
    }

    /// A time-only value; the date part is the Unix epoch.
    #[must_use]
    pub fn time(time: NaiveTime) -> Self {
        TomlDateTimeLocal {
            value: NaiveDate::default().and_time(time),
            style: DateTimeStyle::Time,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision.min(MAX_SECONDS_PRECISION);
        self
    }

    /// Parses a local date-time, local date or local time.
    ///
    /// A space or lowercase `t` may separate date and time.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let precision = seconds_precision(text)?;
        let text = normalize_separator(text);

        if let Ok(value) = NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Self::date_time(value).with_precision(precision));
        }
        if let Ok(date) = NaiveDate::parse_from_str(&text, DATE_FORMAT) {
            return Some(Self::date(date));
        }
        NaiveTime::parse_from_str(&text, "%H:%M:%S%.f")
            .ok()
            .map(|time| Self::time(time).with_precision(precision))
    }

    #[must_use]
    pub fn naive_date(&self) -> NaiveDate {
        self.value.date()
    }

    #[must_use]
    pub fn naive_time(&self) -> NaiveTime {
        self.value.time()
    }

    #[must_use]
    pub fn to_inline_toml(&self) -> String {
        let mut out = match self.style {
            DateTimeStyle::Date => return self.value.format(DATE_FORMAT).to_string(),
            DateTimeStyle::Time => self.value.format(TIME_FORMAT).to_string(),
            DateTimeStyle::DateTime => self.value.format(DATE_TIME_FORMAT).to_string(),
        };
        push_fraction(&mut out, self.value.nanosecond(), self.precision);
        out
    }
}

impl PartialEq for TomlDateTimeLocal {
    fn eq(&self, other: &Self) -> bool {
        self.style == other.style && self.value == other.value
    }
}

/// A date-time with a UTC offset.
///
/// # Examples
///
/// ```rust
/// use toml_tree::TomlDateTimeOffset;
///
/// let utc = TomlDateTimeOffset::parse("1979-05-27T07:32:00+00:00").unwrap();
/// assert_eq!(utc.to_inline_toml(), "1979-05-27T07:32:00Z");
///
/// let west = TomlDateTimeOffset::parse("1979-05-27T00:32:00.5-07:00").unwrap();
/// assert_eq!(west.to_inline_toml(), "1979-05-27T00:32:00.5-07:00");
/// ```
#[derive(Clone, Debug)]
pub struct TomlDateTimeOffset {
    pub meta: NodeMeta,
    pub value: DateTime<FixedOffset>,
    pub precision: u8,
}

impl TomlDateTimeOffset {
    #[must_use]
    pub fn new(value: DateTime<FixedOffset>) -> Self {
        TomlDateTimeOffset {
            meta: NodeMeta::default(),
            value,
            precision: 0,
        }
    }

    #[must_use]
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision.min(MAX_SECONDS_PRECISION);
        self
    }

    /// Parses an RFC 3339 date-time with a `Z` or `±HH:MM` offset.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let precision = seconds_precision(text)?;
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|value| Self::new(value).with_precision(precision))
    }

    #[must_use]
    pub fn to_inline_toml(&self) -> String {
        let mut out = self.value.format(DATE_TIME_FORMAT).to_string();
        push_fraction(&mut out, self.value.nanosecond(), self.precision);
        if self.value.offset().local_minus_utc() == 0 {
            out.push('Z');
        } else {
            out.push_str(&self.value.format("%:z").to_string());
        }
        out
    }
}

impl PartialEq for TomlDateTimeOffset {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Counts fractional-second digits; `None` when there are more than we keep.
fn seconds_precision(text: &str) -> Option<u8> {
    let Some(dot) = text.find('.') else {
        return Some(0);
    };
    let digits = text[dot + 1..]
        .chars()
        .take_while(char::is_ascii_digit)
        .count();
    u8::try_from(digits)
        .ok()
        .filter(|&digits| digits <= MAX_SECONDS_PRECISION)
}

fn normalize_separator(text: &str) -> Cow<'_, str> {
    match text.as_bytes().get(10) {
        Some(b' ' | b't') => Cow::Owned(format!("{}T{}", &text[..10], &text[11..])),
        _ => Cow::Borrowed(text),
    }
}

fn push_fraction(out: &mut String, nanos: u32, precision: u8) {
    if precision == 0 {
        return;
    }
    let precision = u32::from(precision.min(9));
    let scaled = (nanos % 1_000_000_000) / 10u32.pow(9 - precision);
    let width = precision as usize;
    // Writing into a String cannot fail
    let _ = write!(out, ".{scaled:0width$}");
}
