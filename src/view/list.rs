use crate::clock::Clock;
use crate::db::KeyValueStore;
use crate::models::Task;
use crate::store::{TaskFilter, TaskStore};

pub const EMPTY_LIST_MESSAGE: &str = "No tasks found";

/// Filtered task list plus the category options for the filter picker.
#[derive(Debug, Clone)]
pub struct ListView<'a> {
    pub filter: TaskFilter,
    pub tasks: Vec<&'a Task>,
    pub categories: Vec<&'a str>,
}

impl<'a> ListView<'a> {
    pub fn build<S: KeyValueStore, C: Clock>(store: &'a TaskStore<S, C>, filter: TaskFilter) -> Self {
        Self {
            tasks: store.query(&filter),
            categories: store.categories(),
            filter,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.status.is_completed()).count()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::dates::local_midnight;
    use crate::db::{MemoryKv, TaskRepo};
    use crate::models::{NewTask, TaskPriority, TaskStatus};

    fn new_task(title: &str, category: &str) -> NewTask {
        NewTask {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: local_midnight(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()),
            category: category.into(),
        }
    }

    #[test]
    fn completed_tasks_stay_listed() {
        let kv = MemoryKv::new();
        let mut store = TaskStore::open(TaskRepo::new(&kv));
        let t = store.add(new_task("Ship report", ""));
        store.toggle_completion(&t.id);

        let view = ListView::build(&store, TaskFilter::new());
        assert_eq!(view.tasks.len(), 1);
        assert_eq!(view.completed_count(), 1);
    }

    #[test]
    fn unmatched_category_gives_empty_view() {
        let kv = MemoryKv::new();
        let mut store = TaskStore::open(TaskRepo::new(&kv));
        store.add(new_task("a", "Home"));
        let view = ListView::build(&store, TaskFilter::new().category("Work"));
        assert!(view.is_empty());
        assert_eq!(view.categories, vec!["Home"]);
    }
}
