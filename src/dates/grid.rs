use chrono::{Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime};

const WEEK_DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const WEEK_DAYS_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Every day of `month` (1-based) in `year`, ascending. Empty for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.month() == month && d.year() == year)
        .collect()
}

/// The days of `month` padded to whole Sunday-first weeks with the tail of
/// the previous month and the head of the next one.
pub fn calendar_grid(year: i32, month: u32) -> Vec<NaiveDate> {
    let days = days_in_month(year, month);
    let (Some(&first), Some(&last)) = (days.first(), days.last()) else {
        return days;
    };

    let lead = u64::from(first.weekday().num_days_from_sunday());
    let trail = 6 - u64::from(last.weekday().num_days_from_sunday());

    let mut grid = Vec::with_capacity(days.len() + 12);
    grid.extend((1..=lead).rev().filter_map(|n| first.checked_sub_days(Days::new(n))));
    grid.extend(days);
    grid.extend((1..=trail).filter_map(|n| last.checked_add_days(Days::new(n))));
    grid
}

/// True when both values fall on the same calendar day. Time of day is ignored.
pub fn is_same_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Sunday-first week day names, three letters when `short`.
pub fn week_day_labels(short: bool) -> [&'static str; 7] {
    if short {
        WEEK_DAYS_SHORT
    } else {
        WEEK_DAYS
    }
}

pub fn today_start() -> NaiveDateTime {
    Local::now().date_naive().and_time(NaiveTime::MIN)
}
