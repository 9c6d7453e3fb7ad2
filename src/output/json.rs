use serde_json::{json, Value};

use crate::dates::{format_date, format_day, DateFormat};
use crate::error::TaskflowError;
use crate::models::Task;
use crate::view::{CalendarCell, CalendarMonth, ListView, EMPTY_DAY_MESSAGE, EMPTY_LIST_MESSAGE};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TaskflowError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn print(value: &Value) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    println!("{rendered}");
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "status": t.status.as_str(),
        "priority": t.priority.as_str(),
        "dueDate": format_date(&t.due_date, DateFormat::Iso),
        "dueDay": format_day(t.due_day(), DateFormat::YearMonthDay),
        "category": t.category,
        "createdAt": format_date(&t.created_at, DateFormat::Iso),
        "updatedAt": format_date(&t.updated_at, DateFormat::Iso)
    })
}

pub fn task_summary(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "status": t.status.as_str(),
        "priority": t.priority.as_str(),
        "completed": t.status.is_completed()
    })
}

pub fn task_list_json(view: &ListView<'_>) -> Value {
    let tasks: Vec<_> = view.tasks.iter().map(|t| task_json(t)).collect();
    let mut v = json!({
        "tasks": tasks,
        "count": view.tasks.len(),
        "completed": view.completed_count(),
        "categories": view.categories,
        "filter": {
            "status": view.filter.status.map(|s| s.as_str()),
            "priority": view.filter.priority.map(|p| p.as_str()),
            "category": view.filter.category,
            "search": view.filter.search
        }
    });
    if view.is_empty() {
        v["message"] = json!(EMPTY_LIST_MESSAGE);
    }
    v
}

fn cell_json(cell: &CalendarCell<'_>) -> Value {
    json!({
        "date": format_day(cell.date, DateFormat::YearMonthDay),
        "in_month": cell.in_month,
        "is_today": cell.is_today,
        "is_selected": cell.is_selected,
        "tasks": cell.tasks.iter().map(|t| task_summary(t)).collect::<Vec<_>>()
    })
}

pub fn calendar_json(view: &CalendarMonth<'_>) -> Value {
    let weeks: Vec<Value> = view
        .weeks()
        .map(|week| Value::Array(week.iter().map(cell_json).collect()))
        .collect();
    let selected = view.selected.as_ref().map(|day| {
        let mut v = json!({
            "date": format_day(day.date, DateFormat::YearMonthDay),
            "title": day.title(),
            "tasks": day.tasks.iter().map(|t| task_json(t)).collect::<Vec<_>>()
        });
        if day.tasks.is_empty() {
            v["message"] = json!(EMPTY_DAY_MESSAGE);
        }
        v
    });
    json!({
        "month": view.month.to_string(),
        "title": view.title(),
        "week_days": view.week_days,
        "weeks": weeks,
        "selected": selected
    })
}
