//! Presentation models behind the list, calendar and form screens.
//!
//! These are plain data built from a [`TaskStore`](crate::store::TaskStore);
//! `crate::output` turns them into text or JSON.

pub mod calendar;
pub mod form;
pub mod list;

pub use calendar::{CalendarCell, CalendarMonth, CalendarState, SelectedDay, EMPTY_DAY_MESSAGE};
pub use form::{TaskForm, DUE_DATE_REQUIRED, TITLE_REQUIRED};
pub use list::{ListView, EMPTY_LIST_MESSAGE};
