use chrono::{Datelike, Local};

use crate::dates::{format_date, format_day, DateFormat};
use crate::models::{Task, TaskStatus};
use crate::view::{CalendarCell, CalendarMonth, ListView, EMPTY_DAY_MESSAGE, EMPTY_LIST_MESSAGE};

const CELL_WIDTH: usize = 6;

fn check(t: &Task) -> &'static str {
    if t.status.is_completed() {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Due date in local time; `Iso` renders in UTC.
pub fn due_text(t: &Task, mode: DateFormat) -> String {
    format_date(&t.due_date.with_timezone(&Local), mode)
}

pub fn print_task(t: &Task, due_format: DateFormat) {
    println!("Task: {} ({})", t.title, t.id);
    if !t.description.is_empty() {
        println!("  Description: {}", t.description);
    }
    println!("  Status: {}", t.status.label());
    println!("  Priority: {}", t.priority.as_str());
    println!("  Due: {}", due_text(t, due_format));
    if t.has_category() {
        println!("  Category: {}", t.category);
    }
    println!("  Created: {}", t.created_at.to_rfc3339());
    println!("  Updated: {}", t.updated_at.to_rfc3339());
}

pub fn task_line(t: &Task) -> String {
    let mut line = format!(
        "{} {} ({}) {} due {}",
        check(t),
        t.title,
        t.short_id(),
        t.priority.as_str(),
        format_day(t.due_day(), DateFormat::Short)
    );
    if t.status == TaskStatus::InProgress {
        line.push_str(" (in progress)");
    }
    if t.has_category() {
        line.push_str(&format!(" #{}", t.category));
    }
    line
}

pub fn print_task_list(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("{EMPTY_LIST_MESSAGE}");
        return;
    }
    for t in tasks {
        println!("  {}", task_line(t));
    }
}

pub fn print_list_view(view: &ListView<'_>) {
    print_task_list(&view.tasks);
    if !view.is_empty() {
        println!(
            "\n{} task(s), {} completed",
            view.tasks.len(),
            view.completed_count()
        );
    }
}

fn cell_text(cell: &CalendarCell<'_>) -> String {
    let day = cell.date.day();
    let label = match (cell.in_month, cell.is_selected, cell.is_today) {
        (false, _, _) => format!("({day})"),
        (true, true, _) => format!("<{day}>"),
        (true, false, true) => format!("[{day}]"),
        _ => day.to_string(),
    };
    let count = if cell.tasks.is_empty() {
        String::new()
    } else {
        format!("+{}", cell.tasks.len())
    };
    format!("{label:>4}{count:<2}")
}

pub fn print_calendar(view: &CalendarMonth<'_>) {
    println!("{}", view.title());
    let header: Vec<String> = view
        .week_days
        .iter()
        .map(|d| format!("{d:>4}  "))
        .collect();
    println!("{}", header.concat());
    for week in view.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|c| format!("{:<width$}", cell_text(c), width = CELL_WIDTH))
            .collect();
        println!("{}", row.concat().trim_end());
    }

    let busy: Vec<_> = view
        .cells
        .iter()
        .filter(|c| c.in_month && !c.tasks.is_empty())
        .collect();
    if !busy.is_empty() {
        println!();
        for cell in busy {
            println!("{}:", format_day(cell.date, DateFormat::Short));
            for t in &cell.tasks {
                println!("  {}", task_line(t));
            }
        }
    }

    if let Some(day) = &view.selected {
        println!("\n{}", day.title());
        if day.tasks.is_empty() {
            println!("  {EMPTY_DAY_MESSAGE}");
        }
        for t in &day.tasks {
            println!("  {}", task_line(t));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::dates::local_midnight;
    use crate::models::TaskPriority;

    fn due_may_10() -> Task {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        Task {
            id: "tâche-équipe".into(),
            title: "Réunion".into(),
            description: String::new(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::Low,
            due_date: local_midnight(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()),
            category: "Work".into(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn due_text_follows_the_requested_mode() {
        let t = due_may_10();
        assert_eq!(due_text(&t, DateFormat::Full), "Friday, May 10, 2024");
        assert_eq!(due_text(&t, DateFormat::YearMonthDay), "2024-05-10");
        assert_eq!(due_text(&t, DateFormat::parse("someday")), "5/10/2024, 12:00:00 AM");
    }

    #[test]
    fn task_line_with_non_ascii_id() {
        let line = task_line(&due_may_10());
        assert_eq!(line, "[ ] Réunion (tâche-éq) low due May 10 (in progress) #Work");
    }
}
