use serde_json::json;

use crate::cli::{open_store, parse_priority, parse_status};
use crate::config::Config;
use crate::dates::DateFormat;
use crate::error::TaskflowError;
use crate::output;
use crate::view::TaskForm;

/// Form fields as given on the command line; `None` keeps the form's value.
#[derive(Debug, Default)]
pub struct FormArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub category: Option<String>,
}

impl FormArgs {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due.is_none()
            && self.category.is_none()
    }

    fn fill(self, form: &mut TaskForm) -> Result<(), TaskflowError> {
        if let Some(status) = self.status.as_deref() {
            form.status = parse_status(status)?;
        }
        if let Some(priority) = self.priority.as_deref() {
            form.priority = parse_priority(priority)?;
        }
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(due) = self.due {
            form.due_date = due;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        Ok(())
    }
}

pub fn run_add(config: &Config, args: FormArgs, json_output: bool) -> Result<i32, TaskflowError> {
    let mut form = TaskForm::default();
    args.fill(&mut form)?;
    // Validate before touching storage so bad input never creates the database.
    form.validate()?;

    let mut store = open_store(config)?;
    let task = form.submit(&mut store, None)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_json(&task)
        })));
    } else {
        println!("Added task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

pub fn run_edit(
    config: &Config,
    id: &str,
    args: FormArgs,
    json_output: bool,
) -> Result<i32, TaskflowError> {
    if args.is_empty() {
        return Err(TaskflowError::validation(
            "Nothing to change. Pass at least one of --title, --description, --status, --priority, --due, --category",
        ));
    }
    let mut store = open_store(config)?;
    let current = store.resolve(id)?.clone();

    let mut form = TaskForm::from_task(&current);
    args.fill(&mut form)?;
    let task = form.submit(&mut store, Some(&current.id))?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_json(&task)
        })));
    } else {
        println!("Updated task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

pub fn run_toggle(config: &Config, id: &str, json_output: bool) -> Result<i32, TaskflowError> {
    let mut store = open_store(config)?;
    let id = store.resolve(id)?.id.clone();
    let task = store
        .toggle_completion(&id)
        .cloned()
        .ok_or_else(|| TaskflowError::task_not_found(&id))?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_json(&task)
        })));
    } else {
        println!("Task {} → {}", task.id, task.status.as_str());
    }
    Ok(0)
}

pub fn run_delete(config: &Config, id: &str, json_output: bool) -> Result<i32, TaskflowError> {
    let mut store = open_store(config)?;
    let task = store.resolve(id)?.clone();
    store.delete(&task.id);

    if json_output {
        output::json::print(&output::json::success(json!({
            "deleted": { "id": task.id, "title": task.title }
        })));
    } else {
        println!("Deleted task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

pub fn run_show(
    config: &Config,
    id: &str,
    due_format: DateFormat,
    json_output: bool,
) -> Result<i32, TaskflowError> {
    let store = open_store(config)?;
    let task = store.resolve(id)?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_json(task),
            "due": output::text::due_text(task, due_format)
        })));
    } else {
        output::text::print_task(task, due_format);
    }
    Ok(0)
}
