//! Date and calendar helpers shared by the store and the views.
//!
//! Everything here is pure apart from [`today_start`], which reads the local
//! clock. Calendar math works on [`NaiveDate`] in local time; due dates are
//! stored as UTC instants and converted at the edges.

pub mod format;
pub mod grid;
pub mod month;

pub use format::{format_date, format_day, DateFormat};
pub use grid::{calendar_grid, days_in_month, is_same_day, today_start, week_day_labels};
pub use month::YearMonth;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// Parse a `YYYY-MM-DD` day as typed into the form.
pub fn parse_day(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

/// Local midnight of `day` as a UTC instant.
///
/// Days whose midnight falls in a DST gap resolve to the earliest valid local
/// time; if the zone cannot represent the day at all, midnight UTC is used.
pub fn local_midnight(day: NaiveDate) -> DateTime<Utc> {
    let naive = day.and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}
