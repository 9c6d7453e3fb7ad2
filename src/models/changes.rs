use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::{Task, TaskPriority, TaskStatus};

/// A task as submitted by a caller: everything except the store-owned fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: DateTime<Utc>,
    pub category: String,
}

impl NewTask {
    pub(crate) fn into_task(self, id: String, now: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            category: self.category,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub category: Option<String>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge this patch over `task`. `id` and `created_at` are never touched;
    /// `updated_at` becomes `now` unless that would move it backwards.
    pub fn apply(&self, task: &Task, now: DateTime<Utc>) -> Task {
        Task {
            id: task.id.clone(),
            title: self.title.clone().unwrap_or_else(|| task.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| task.description.clone()),
            status: self.status.unwrap_or(task.status),
            priority: self.priority.unwrap_or(task.priority),
            due_date: self.due_date.unwrap_or(task.due_date),
            category: self.category.clone().unwrap_or_else(|| task.category.clone()),
            created_at: task.created_at,
            updated_at: now.max(task.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Task {
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        NewTask {
            title: "Ship report".into(),
            description: "quarterly numbers".into(),
            status: TaskStatus::Todo,
            priority: TaskPriority::High,
            due_date: Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap(),
            category: "Work".into(),
        }
        .into_task("01HX".into(), t0)
    }

    #[test]
    fn empty_patch_only_refreshes_updated_at() {
        let task = sample();
        let later = task.updated_at + chrono::Duration::minutes(5);
        let patched = TaskPatch::default().apply(&task, later);
        assert_eq!(patched.updated_at, later);
        assert_eq!(
            Task { updated_at: task.updated_at, ..patched },
            task
        );
    }

    #[test]
    fn patch_overrides_only_given_fields() {
        let task = sample();
        let patch = TaskPatch {
            title: Some("Ship final report".into()),
            category: Some(String::new()),
            ..TaskPatch::default()
        };
        let patched = patch.apply(&task, task.updated_at);
        assert_eq!(patched.title, "Ship final report");
        assert_eq!(patched.category, "");
        assert_eq!(patched.description, task.description);
        assert_eq!(patched.priority, task.priority);
        assert_eq!(patched.due_date, task.due_date);
        assert_eq!(patched.created_at, task.created_at);
    }

    #[test]
    fn updated_at_never_moves_backwards() {
        let task = sample();
        let earlier = task.updated_at - chrono::Duration::hours(1);
        let patched = TaskPatch::status(TaskStatus::Completed).apply(&task, earlier);
        assert_eq!(patched.updated_at, task.updated_at);
        assert!(patched.created_at <= patched.updated_at);
    }

    #[test]
    fn status_toggle() {
        assert_eq!(TaskStatus::Todo.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::InProgress.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::Todo);
    }

    #[test]
    fn wire_names_match_persisted_layout() {
        let v = serde_json::to_value(sample()).unwrap();
        assert_eq!(v["status"], "todo");
        assert_eq!(v["priority"], "high");
        assert!(v["dueDate"].is_string());
        assert!(v["createdAt"].is_string());
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            "inProgress"
        );
    }
}
