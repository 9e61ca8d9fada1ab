//! Temporal values
//!
//! DATE and DATETIME carry an explicit zero value ("0000-00-00") that sorts
//! before every calendar value and is rejected by arithmetic. TIMESTAMP is
//! stored as epoch seconds, with epoch 0 standing for its zero value. TIME is
//! a plain time of day.

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Timelike, Utc,
};
use plcsql_diagnostics::RuntimeError;
use std::fmt;

const SECONDS_PER_DAY: i64 = 86_400;

const DATE_FORMAT: &str = "%m/%d/%Y";
const TIME_FORMAT: &str = "%I:%M:%S %p";
const DATETIME_FORMAT: &str = "%I:%M:%S%.3f %p %m/%d/%Y";
const TIMESTAMP_FORMAT: &str = "%I:%M:%S %p %m/%d/%Y";

const DATE_PARSE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const TIME_PARSE_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];
const DATETIME_PARSE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%I:%M:%S%.f %p %m/%d/%Y",
];

fn zero_error(type_name: &str) -> RuntimeError {
    RuntimeError::value_error(format!("attempt to use the zero {type_name}"))
}

fn range_error(type_name: &str) -> RuntimeError {
    RuntimeError::value_error(format!("not in the valid range of {type_name} type"))
}

fn invalid_string(type_name: &str, s: &str) -> RuntimeError {
    RuntimeError::value_error(format!("invalid {type_name} string: '{s}'"))
}

/// Whether `s` spells a zero date, optionally followed or preceded by midnight
fn is_zero_literal(s: &str) -> bool {
    let rest = if let Some(rest) = s.strip_prefix("0000-00-00") {
        rest
    } else if let Some(rest) = s.strip_prefix("00/00/0000") {
        rest
    } else if let Some(rest) = s.strip_suffix("00/00/0000") {
        rest
    } else {
        return false;
    };
    let rest = rest.trim();
    if rest.is_empty() {
        return true;
    }
    let (clock, meridiem) = match rest.rsplit_once(' ') {
        Some((clock, m)) if m.eq_ignore_ascii_case("AM") || m.eq_ignore_ascii_case("PM") => {
            (clock, Some(m))
        }
        _ => (rest, None),
    };
    let clock = match clock.split_once('.') {
        Some((whole, frac)) if frac.chars().all(|c| c == '0') => whole,
        Some(_) => return false,
        None => clock,
    };
    let clock = match meridiem {
        Some(m) => format!("{clock} {m}"),
        None => clock.to_string(),
    };
    Time::parse(&clock).is_ok_and(|t| t == Time::MIDNIGHT)
}

/// Calendar date, or the zero date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Date {
    Zero,
    Calendar(NaiveDate),
}

impl Date {
    pub const ZERO: Self = Self::Zero;

    pub fn min() -> NaiveDate {
        NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn max() -> NaiveDate {
        NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Zero)
    }

    /// Build a calendar date inside the valid range
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::checked)
    }

    /// Wrap a calendar date when it lies inside the valid range
    pub fn checked(date: NaiveDate) -> Option<Self> {
        (Self::min()..=Self::max()).contains(&date).then_some(Self::Calendar(date))
    }

    pub fn naive(&self) -> Option<NaiveDate> {
        match self {
            Self::Zero => None,
            Self::Calendar(d) => Some(*d),
        }
    }

    fn naive_or_err(&self) -> Result<NaiveDate, RuntimeError> {
        self.naive().ok_or_else(|| zero_error("DATE"))
    }

    pub fn add_days(&self, days: i64) -> Result<Self, RuntimeError> {
        let date = self.naive_or_err()?;
        Duration::try_days(days)
            .and_then(|d| date.checked_add_signed(d))
            .and_then(Self::checked)
            .ok_or_else(|| range_error("DATE"))
    }

    /// Days from `other` to `self`
    pub fn days_since(&self, other: &Self) -> Result<i64, RuntimeError> {
        let (l, r) = (self.naive_or_err()?, other.naive_or_err()?);
        Ok((l - r).num_days())
    }

    pub fn to_datetime(&self) -> Datetime {
        match self {
            Self::Zero => Datetime::Zero,
            Self::Calendar(d) => Datetime::Calendar(d.and_time(NaiveTime::MIN)),
        }
    }

    pub fn parse(s: &str) -> Result<Self, RuntimeError> {
        let s = s.trim();
        if is_zero_literal(s) {
            return Ok(Self::Zero);
        }
        DATE_PARSE_FORMATS
            .iter()
            .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
            .and_then(Self::checked)
            .ok_or_else(|| invalid_string("DATE", s))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("00/00/0000"),
            Self::Calendar(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

/// Time of day with second resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(NaiveTime);

impl Time {
    pub const MIDNIGHT: Self = Self(NaiveTime::MIN);

    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// Time of day `seconds` after midnight, wrapping around whole days
    pub fn from_seconds(seconds: i64) -> Self {
        let secs = seconds.rem_euclid(SECONDS_PER_DAY) as u32;
        Self(NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap_or(NaiveTime::MIN))
    }

    pub fn from_naive(time: NaiveTime) -> Self {
        Self(time.with_nanosecond(0).unwrap_or(time))
    }

    pub fn naive(&self) -> NaiveTime {
        self.0
    }

    pub fn seconds_from_midnight(&self) -> i64 {
        i64::from(self.0.num_seconds_from_midnight())
    }

    pub fn add_seconds(&self, seconds: i64) -> Self {
        Self::from_seconds(self.seconds_from_midnight() + seconds.rem_euclid(SECONDS_PER_DAY))
    }

    /// Seconds from `other` to `self`
    pub fn seconds_since(&self, other: &Self) -> i64 {
        self.seconds_from_midnight() - other.seconds_from_midnight()
    }

    pub fn parse(s: &str) -> Result<Self, RuntimeError> {
        let s = s.trim();
        TIME_PARSE_FORMATS
            .iter()
            .find_map(|f| NaiveTime::parse_from_str(s, f).ok())
            .map(Self)
            .ok_or_else(|| invalid_string("TIME", s))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

/// Date and time with millisecond resolution, or the zero datetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Datetime {
    Zero,
    Calendar(NaiveDateTime),
}

fn truncate_to_millis(dt: NaiveDateTime) -> NaiveDateTime {
    let nanos = dt.nanosecond() / 1_000_000 * 1_000_000;
    dt.with_nanosecond(nanos).unwrap_or(dt)
}

fn parse_naive_datetime(s: &str) -> Option<NaiveDateTime> {
    DATETIME_PARSE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            DATE_PARSE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

impl Datetime {
    pub const ZERO: Self = Self::Zero;

    pub fn min() -> NaiveDateTime {
        Date::min().and_time(NaiveTime::MIN)
    }

    pub fn max() -> NaiveDateTime {
        Date::max()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap_or(NaiveDateTime::MAX)
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Zero)
    }

    /// Wrap a date-time, truncated to milliseconds, when it lies inside the valid range
    pub fn checked(dt: NaiveDateTime) -> Option<Self> {
        let dt = truncate_to_millis(dt);
        (Self::min()..=Self::max()).contains(&dt).then_some(Self::Calendar(dt))
    }

    pub fn from_ymd_hms_milli(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        milli: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_milli_opt(hour, minute, second, milli))
            .and_then(Self::checked)
    }

    pub fn naive(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Zero => None,
            Self::Calendar(dt) => Some(*dt),
        }
    }

    fn naive_or_err(&self) -> Result<NaiveDateTime, RuntimeError> {
        self.naive().ok_or_else(|| zero_error("DATETIME"))
    }

    pub fn add_millis(&self, millis: i64) -> Result<Self, RuntimeError> {
        let dt = self.naive_or_err()?;
        Duration::try_milliseconds(millis)
            .and_then(|d| dt.checked_add_signed(d))
            .and_then(Self::checked)
            .ok_or_else(|| range_error("DATETIME"))
    }

    /// Milliseconds from `other` to `self`
    pub fn millis_since(&self, other: &Self) -> Result<i64, RuntimeError> {
        let (l, r) = (self.naive_or_err()?, other.naive_or_err()?);
        Ok((l - r).num_milliseconds())
    }

    pub fn to_date(&self) -> Date {
        match self {
            Self::Zero => Date::Zero,
            Self::Calendar(dt) => Date::Calendar(dt.date()),
        }
    }

    /// Time of day; the zero datetime yields midnight
    pub fn to_time(&self) -> Time {
        match self {
            Self::Zero => Time::MIDNIGHT,
            Self::Calendar(dt) => Time::from_naive(dt.time()),
        }
    }

    /// Interpret as local time in `tz`, range-checked as a TIMESTAMP
    pub fn to_timestamp(&self, tz: &FixedOffset) -> Result<Timestamp, RuntimeError> {
        match self {
            Self::Zero => Ok(Timestamp::ZERO),
            Self::Calendar(dt) => Timestamp::from_local(dt, tz),
        }
    }

    pub fn parse(s: &str) -> Result<Self, RuntimeError> {
        let s = s.trim();
        if is_zero_literal(s) {
            return Ok(Self::Zero);
        }
        parse_naive_datetime(s).and_then(Self::checked).ok_or_else(|| invalid_string("DATETIME", s))
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => f.write_str("12:00:00.000 AM 00/00/0000"),
            Self::Calendar(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
        }
    }
}

/// Point in time as seconds since the Unix epoch; epoch 0 is the zero timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const ZERO: Self = Self(0);
    pub const MIN_EPOCH_SECONDS: i64 = 1;
    pub const MAX_EPOCH_SECONDS: i64 = i32::MAX as i64;

    /// Wrap epoch seconds; zero is the zero timestamp
    pub fn from_epoch_seconds(seconds: i64) -> Result<Self, RuntimeError> {
        if seconds == 0 || (Self::MIN_EPOCH_SECONDS..=Self::MAX_EPOCH_SECONDS).contains(&seconds) {
            Ok(Self(seconds))
        } else {
            Err(range_error("TIMESTAMP"))
        }
    }

    /// Interpret `dt` as local time in `tz`
    pub fn from_local(dt: &NaiveDateTime, tz: &FixedOffset) -> Result<Self, RuntimeError> {
        let seconds = tz
            .from_local_datetime(dt)
            .single()
            .map(|zoned| zoned.timestamp())
            .ok_or_else(|| range_error("TIMESTAMP"))?;
        if (Self::MIN_EPOCH_SECONDS..=Self::MAX_EPOCH_SECONDS).contains(&seconds) {
            Ok(Self(seconds))
        } else {
            Err(range_error("TIMESTAMP"))
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn epoch_seconds(&self) -> i64 {
        self.0
    }

    fn nonzero(&self) -> Result<i64, RuntimeError> {
        if self.is_zero() { Err(zero_error("TIMESTAMP")) } else { Ok(self.0) }
    }

    pub fn add_seconds(&self, seconds: i64) -> Result<Self, RuntimeError> {
        let sum = self.nonzero()?.checked_add(seconds).ok_or_else(|| range_error("TIMESTAMP"))?;
        if (Self::MIN_EPOCH_SECONDS..=Self::MAX_EPOCH_SECONDS).contains(&sum) {
            Ok(Self(sum))
        } else {
            Err(range_error("TIMESTAMP"))
        }
    }

    /// Seconds from `other` to `self`
    pub fn seconds_since(&self, other: &Self) -> Result<i64, RuntimeError> {
        Ok(self.nonzero()? - other.nonzero()?)
    }

    /// Wall-clock time in `tz`
    pub fn to_local(&self, tz: &FixedOffset) -> Option<NaiveDateTime> {
        if self.is_zero() {
            return None;
        }
        DateTime::<Utc>::from_timestamp(self.0, 0).map(|utc| utc.with_timezone(tz).naive_local())
    }

    pub fn to_datetime(&self, tz: &FixedOffset) -> Datetime {
        self.to_local(tz).map_or(Datetime::Zero, Datetime::Calendar)
    }

    pub fn to_date(&self, tz: &FixedOffset) -> Date {
        self.to_local(tz).map_or(Date::Zero, |dt| Date::Calendar(dt.date()))
    }

    pub fn to_time(&self, tz: &FixedOffset) -> Time {
        self.to_local(tz).map_or(Time::MIDNIGHT, |dt| Time::from_naive(dt.time()))
    }

    /// Render in `tz`
    pub fn format_in(&self, tz: &FixedOffset) -> String {
        match self.to_local(tz) {
            None => "12:00:00 AM 00/00/0000".to_string(),
            Some(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Parse a wall-clock time in `tz`
    pub fn parse_in(s: &str, tz: &FixedOffset) -> Result<Self, RuntimeError> {
        let s = s.trim();
        if is_zero_literal(s) {
            return Ok(Self::ZERO);
        }
        let dt = parse_naive_datetime(s).ok_or_else(|| invalid_string("TIMESTAMP", s))?;
        Self::from_local(&dt, tz)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_in(&Utc.fix()))
    }
}
