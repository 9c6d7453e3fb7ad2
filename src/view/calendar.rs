use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::dates::{format_day, is_same_day, today_start, week_day_labels, DateFormat, YearMonth};
use crate::db::KeyValueStore;
use crate::models::Task;
use crate::store::TaskStore;

pub const EMPTY_DAY_MESSAGE: &str = "No tasks for this day";

/// Which month is on screen and which day, if any, is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarState {
    #[serde(rename = "calendar_month")]
    pub month: YearMonth,
    #[serde(rename = "selected_day", default)]
    pub selected: Option<NaiveDate>,
}

impl CalendarState {
    pub fn starting_at(today: NaiveDate) -> Self {
        Self {
            month: YearMonth::containing(&today),
            selected: None,
        }
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
    }

    pub fn prev_month(&mut self) {
        self.month = self.month.prev();
    }

    pub fn go_to(&mut self, month: YearMonth) {
        self.month = month;
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.month = YearMonth::containing(&today);
    }

    /// Selecting a day outside the displayed month also moves to that month.
    pub fn select(&mut self, day: NaiveDate) {
        self.selected = Some(day);
        if !self.month.contains(&day) {
            self.month = YearMonth::containing(&day);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

impl Default for CalendarState {
    fn default() -> Self {
        Self::starting_at(today_start().date())
    }
}

#[derive(Debug, Clone)]
pub struct CalendarCell<'a> {
    pub date: NaiveDate,
    /// False for the lead-in/lead-out days of the neighbouring months.
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub tasks: Vec<&'a Task>,
}

#[derive(Debug, Clone)]
pub struct SelectedDay<'a> {
    pub date: NaiveDate,
    pub tasks: Vec<&'a Task>,
}

impl SelectedDay<'_> {
    pub fn title(&self) -> String {
        format_day(self.date, DateFormat::Full)
    }
}

/// One month of the calendar, ready to render as 7-column rows.
#[derive(Debug, Clone)]
pub struct CalendarMonth<'a> {
    pub month: YearMonth,
    pub week_days: [&'static str; 7],
    pub cells: Vec<CalendarCell<'a>>,
    pub selected: Option<SelectedDay<'a>>,
}

impl<'a> CalendarMonth<'a> {
    pub fn build<S: KeyValueStore, C: Clock>(
        store: &'a TaskStore<S, C>,
        state: &CalendarState,
        today: NaiveDate,
    ) -> Self {
        let cells = state
            .month
            .grid()
            .into_iter()
            .map(|date| CalendarCell {
                date,
                in_month: state.month.contains(&date),
                is_today: is_same_day(&date, &today),
                is_selected: state.selected.is_some_and(|s| is_same_day(&date, &s)),
                tasks: store.query_by_date(date),
            })
            .collect();
        let selected = state.selected.map(|date| SelectedDay {
            date,
            tasks: store.query_by_date(date),
        });
        Self {
            month: state.month,
            week_days: week_day_labels(true),
            cells,
            selected,
        }
    }

    /// `May 2024`
    pub fn title(&self) -> String {
        format_day(self.month.first_day(), DateFormat::MonthYear)
    }

    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarCell<'a>> {
        self.cells.chunks(7)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarCell<'a>> {
        self.cells.iter().find(|c| c.date == date)
    }
}
