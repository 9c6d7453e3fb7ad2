use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

/// Rendering modes for [`format_date`]. Output is en-US.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Wednesday, May 1, 2024`
    Full,
    /// `May 1`
    Short,
    /// `May`
    Month,
    /// `May 2024`
    MonthYear,
    /// `09:05 AM`
    Time,
    /// `2024-05-01T07:05:00.000Z`
    Iso,
    /// `2024-05-01`
    YearMonthDay,
    /// `5/1/2024, 9:05:00 AM`
    Locale,
}

impl DateFormat {
    /// Unrecognized names fall back to [`DateFormat::Locale`].
    pub fn parse(mode: &str) -> Self {
        match mode {
            "full" => Self::Full,
            "short" => Self::Short,
            "month" => Self::Month,
            "monthYear" => Self::MonthYear,
            "time" => Self::Time,
            "iso" => Self::Iso,
            "yearMonthDay" => Self::YearMonthDay,
            _ => Self::Locale,
        }
    }

    fn pattern(&self) -> Option<&'static str> {
        match self {
            Self::Full => Some("%A, %B %-d, %Y"),
            Self::Short => Some("%b %-d"),
            Self::Month => Some("%B"),
            Self::MonthYear => Some("%B %Y"),
            Self::Time => Some("%I:%M %p"),
            Self::YearMonthDay => Some("%Y-%m-%d"),
            Self::Locale => Some("%-m/%-d/%Y, %-I:%M:%S %p"),
            Self::Iso => None,
        }
    }
}

impl From<&str> for DateFormat {
    fn from(mode: &str) -> Self {
        Self::parse(mode)
    }
}

/// Render `date` in the given mode, in the date's own time zone.
/// `Iso` is the exception: it is always rendered in UTC.
pub fn format_date<Tz>(date: &DateTime<Tz>, mode: DateFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match mode.pattern() {
        Some(pattern) => date.format(pattern).to_string(),
        None => date
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Render a bare calendar day. Time-based modes see midnight.
pub fn format_day(day: NaiveDate, mode: DateFormat) -> String {
    format_date(&Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN)), mode)
}
