use crate::cli::open_store;
use crate::config::Config;
use crate::dates::{parse_day, today_start, YearMonth};
use crate::error::TaskflowError;
use crate::output;
use crate::view::{CalendarMonth, CalendarState};

/// Calendar flags; clap keeps the month-moving ones mutually exclusive.
#[derive(Debug, Default)]
pub struct Navigation {
    pub month: Option<String>,
    pub next: bool,
    pub prev: bool,
    pub today: bool,
    pub select: Option<String>,
    pub clear: bool,
}

impl Navigation {
    fn apply(&self, state: &mut CalendarState) -> Result<(), TaskflowError> {
        let today = today_start().date();
        if let Some(month) = self.month.as_deref() {
            state.go_to(month.parse::<YearMonth>()?);
        } else if self.next {
            state.next_month();
        } else if self.prev {
            state.prev_month();
        } else if self.today {
            state.go_to_today(today);
        }

        if self.clear {
            state.clear_selection();
        } else if let Some(day) = self.select.as_deref() {
            let day = parse_day(day).ok_or_else(|| {
                TaskflowError::validation(format!("Invalid day '{day}', expected YYYY-MM-DD"))
            })?;
            state.select(day);
        } else if self.moves_month() {
            // A selection from another month would drag the view back.
            if let Some(selected) = state.selected {
                if !state.month.contains(&selected) {
                    state.clear_selection();
                }
            }
        }
        Ok(())
    }

    fn moves_month(&self) -> bool {
        self.month.is_some() || self.next || self.prev || self.today
    }
}

pub fn run(config: &Config, nav: Navigation, json_output: bool) -> Result<i32, TaskflowError> {
    let mut state = config.load_view_state();
    nav.apply(&mut state)?;

    let store = open_store(config)?;
    config.save_view_state(&state)?;

    let view = CalendarMonth::build(&store, &state, today_start().date());
    if json_output {
        output::json::print(&output::json::success(output::json::calendar_json(&view)));
    } else {
        output::text::print_calendar(&view);
    }
    Ok(0)
}
