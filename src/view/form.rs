use chrono::NaiveDate;

use crate::clock::Clock;
use crate::dates::{format_day, local_midnight, parse_day, today_start, DateFormat};
use crate::db::KeyValueStore;
use crate::error::TaskflowError;
use crate::models::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
use crate::store::TaskStore;

pub const TITLE_REQUIRED: &str = "Task title is required";
pub const DUE_DATE_REQUIRED: &str = "Due date is required";

/// The create/edit form. Fields hold what the user typed; nothing is
/// checked until [`validate`](Self::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// `YYYY-MM-DD`, read as local midnight.
    pub due_date: String,
    pub category: String,
}

impl TaskForm {
    /// Defaults for a new task due on `due`.
    pub fn blank(due: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: format_day(due, DateFormat::YearMonthDay),
            category: String::new(),
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            due_date: format_day(task.due_day(), DateFormat::YearMonthDay),
            category: task.category.clone(),
        }
    }

    pub fn validate(&self) -> Result<NewTask, TaskflowError> {
        if self.title.trim().is_empty() {
            return Err(TaskflowError::validation(TITLE_REQUIRED));
        }
        if self.due_date.trim().is_empty() {
            return Err(TaskflowError::validation(DUE_DATE_REQUIRED));
        }
        let day = parse_day(&self.due_date).ok_or_else(|| {
            TaskflowError::validation(format!(
                "Invalid due date '{}', expected YYYY-MM-DD",
                self.due_date
            ))
        })?;
        Ok(NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            due_date: local_midnight(day),
            category: self.category.clone(),
        })
    }

    /// Validate and hand the result to the store: `add` when `editing` is
    /// `None`, otherwise `update` of that id with every form field.
    pub fn submit<S: KeyValueStore, C: Clock>(
        &self,
        store: &mut TaskStore<S, C>,
        editing: Option<&str>,
    ) -> Result<Task, TaskflowError> {
        let task = self.validate()?;
        match editing {
            None => Ok(store.add(task)),
            Some(id) => {
                let patch = TaskPatch {
                    title: Some(task.title),
                    description: Some(task.description),
                    status: Some(task.status),
                    priority: Some(task.priority),
                    due_date: Some(task.due_date),
                    category: Some(task.category),
                };
                store
                    .update(id, &patch)
                    .cloned()
                    .ok_or_else(|| TaskflowError::task_not_found(id))
            }
        }
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::blank(today_start().date())
    }
}
