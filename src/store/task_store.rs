use chrono::NaiveDate;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::db::{KeyValueStore, TaskRepo};
use crate::error::TaskflowError;
use crate::models::{NewTask, Task, TaskPatch};

use super::filter::TaskFilter;

/// Emitted to subscribers after a mutation has been applied and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Added(String),
    Updated(String),
    Deleted(String),
}

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// The in-memory task collection.
///
/// Loaded once from the repository; every effective mutation rewrites the
/// whole collection back. Lookups by an unknown id are silent no-ops.
pub struct TaskStore<S, C = SystemClock> {
    tasks: Vec<Task>,
    repo: TaskRepo<S>,
    clock: C,
    listeners: Vec<Listener>,
}

impl<S: KeyValueStore> TaskStore<S, SystemClock> {
    pub fn open(repo: TaskRepo<S>) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> TaskStore<S, C> {
    pub fn with_clock(repo: TaskRepo<S>, clock: C) -> Self {
        let tasks = repo.load();
        Self {
            tasks,
            repo,
            clock,
            listeners: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Exact id first, then a unique id prefix.
    pub fn resolve(&self, reference: &str) -> Result<&Task, TaskflowError> {
        if let Some(task) = self.get(reference) {
            return Ok(task);
        }
        if reference.is_empty() {
            return Err(TaskflowError::task_not_found(reference));
        }
        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.id.starts_with(reference))
            .collect();
        match matches.as_slice() {
            [] => Err(TaskflowError::task_not_found(reference)),
            [task] => Ok(*task),
            _ => {
                let candidates: Vec<String> = matches
                    .iter()
                    .map(|t| format!("{} ({})", t.title, t.id))
                    .collect();
                Err(TaskflowError::ambiguous_ref(reference, &candidates))
            }
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn add(&mut self, new_task: NewTask) -> Task {
        let id = self.fresh_id();
        let task = new_task.into_task(id, self.clock.now());
        debug!(id = %task.id, title = %task.title, "task added");
        self.tasks.push(task.clone());
        self.commit(StoreEvent::Added(task.id.clone()));
        task
    }

    /// Merge `patch` into the task with `id`. Returns the updated record, or
    /// `None` when no such task exists.
    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> Option<&Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let updated = patch.apply(&self.tasks[index], self.clock.now());
        self.tasks[index] = updated;
        debug!(id, "task updated");
        self.commit(StoreEvent::Updated(id.to_string()));
        self.tasks.get(index)
    }

    /// Flip between todo and completed.
    pub fn toggle_completion(&mut self, id: &str) -> Option<&Task> {
        let next = self.get(id)?.status.toggled();
        self.update(id, &TaskPatch::status(next))
    }

    /// Returns whether a task was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        debug!(id, "task deleted");
        self.commit(StoreEvent::Deleted(id.to_string()));
        true
    }

    /// Tasks due on the local calendar day `day`, in collection order.
    /// Convert instants with `with_timezone(&Local)` first.
    pub fn query_by_date(&self, day: NaiveDate) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.due_day() == day).collect()
    }

    pub fn query(&self, filter: &TaskFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    /// Distinct non-empty categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for task in &self.tasks {
            if task.has_category() && !seen.contains(&task.category.as_str()) {
                seen.push(&task.category);
            }
        }
        seen
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = ulid::Ulid::new().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn commit(&mut self, event: StoreEvent) {
        self.repo.save(&self.tasks);
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    use chrono::{DateTime, Duration, Local, TimeZone, Utc};

    use super::*;
    use crate::clock::test_support::SteppingClock;
    use crate::dates::local_midnight;
    use crate::db::MemoryKv;
    use crate::models::{TaskPriority, TaskStatus};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    fn store(kv: &MemoryKv) -> TaskStore<&MemoryKv, SteppingClock> {
        TaskStore::with_clock(TaskRepo::new(kv), SteppingClock::new(t0(), Duration::seconds(1)))
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_task(title: &str, due: NaiveDate) -> NewTask {
        NewTask {
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: local_midnight(due),
            category: String::new(),
        }
    }

    #[test]
    fn add_assigns_unique_id_and_equal_timestamps() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        let mut ids = HashSet::new();
        for i in 0..50 {
            let t = s.add(new_task(&format!("task {i}"), day(2024, 5, 10)));
            assert_eq!(t.created_at, t.updated_at);
            assert!(ids.insert(t.id));
        }
        assert_eq!(s.len(), 50);
    }

    #[test]
    fn add_accepts_what_the_form_would_reject() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        let t = s.add(new_task("", day(2024, 5, 10)));
        assert_eq!(s.get(&t.id).map(|t| t.title.as_str()), Some(""));
    }

    #[test]
    fn every_mutation_is_persisted() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        let a = s.add(new_task("a", day(2024, 5, 10)));
        let b = s.add(new_task("b", day(2024, 5, 11)));
        assert_eq!(TaskRepo::new(&kv).load().len(), 2);

        s.update(&a.id, &TaskPatch::status(TaskStatus::InProgress));
        assert_eq!(TaskRepo::new(&kv).load()[0].status, TaskStatus::InProgress);

        assert!(s.delete(&b.id));
        let reloaded = store(&kv);
        assert_eq!(reloaded.tasks(), s.tasks());
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn update_merges_and_refreshes_updated_at() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        let original = s.add(NewTask {
            description: "details".into(),
            category: "Work".into(),
            priority: TaskPriority::High,
            ..new_task("Ship report", day(2024, 5, 10))
        });
        let patch = TaskPatch {
            title: Some("Ship final report".into()),
            ..TaskPatch::default()
        };
        let updated = s.update(&original.id, &patch).cloned().unwrap();
        assert_eq!(updated.title, "Ship final report");
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.category, original.category);
        assert_eq!(updated.priority, original.priority);
        assert_eq!(updated.status, original.status);
        assert_eq!(updated.due_date, original.due_date);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);
    }

    #[test]
    fn unknown_ids_are_silent() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        s.add(new_task("a", day(2024, 5, 10)));
        let before = s.tasks().to_vec();
        assert!(s.update("missing", &TaskPatch::status(TaskStatus::Completed)).is_none());
        assert!(s.toggle_completion("missing").is_none());
        assert!(!s.delete("missing"));
        assert_eq!(s.tasks(), before.as_slice());
    }

    #[test]
    fn deleted_tasks_never_come_back_from_queries() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        let keep = s.add(new_task("keep", day(2024, 5, 10)));
        let gone = s.add(new_task("gone", day(2024, 5, 10)));
        assert!(s.delete(&gone.id));
        let by_date = s.query_by_date(day(2024, 5, 10));
        assert_eq!(by_date.iter().map(|t| &t.id).collect::<Vec<_>>(), vec![&keep.id]);
        assert!(s.query(&TaskFilter::new()).iter().all(|t| t.id != gone.id));
        assert!(s.get(&gone.id).is_none());
    }

    #[test]
    fn query_by_date_buckets_by_local_day_in_collection_order() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        let first = s.add(new_task("first", day(2024, 5, 10)));
        s.add(new_task("other", day(2024, 5, 11)));
        let mut late = new_task("late", day(2024, 5, 10));
        late.due_date += Duration::hours(23) + Duration::minutes(59);
        let late = s.add(late);

        let bucket = s.query_by_date(day(2024, 5, 10));
        let ids: Vec<_> = bucket.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![first.id.as_str(), late.id.as_str()]);
        assert!(s.query_by_date(day(2024, 5, 12)).is_empty());
        assert!(s.query_by_date(day(2023, 5, 10)).is_empty());
    }

    #[test]
    fn query_by_date_uses_the_local_day_of_an_instant() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        let mut early = new_task("early", day(2024, 5, 10));
        early.due_date += Duration::minutes(30);
        let early = s.add(early);

        let local_day = early.due_date.with_timezone(&Local).date_naive();
        assert_eq!(local_day, day(2024, 5, 10));
        assert_eq!(s.query_by_date(local_day).len(), 1);
        assert!(s.query_by_date(day(2024, 5, 9)).is_empty());
    }

    #[test]
    fn toggle_flips_between_todo_and_completed() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        let t = s.add(new_task("a", day(2024, 5, 10)));
        assert_eq!(s.toggle_completion(&t.id).unwrap().status, TaskStatus::Completed);
        assert_eq!(s.toggle_completion(&t.id).unwrap().status, TaskStatus::Todo);
        s.update(&t.id, &TaskPatch::status(TaskStatus::InProgress));
        assert_eq!(s.toggle_completion(&t.id).unwrap().status, TaskStatus::Completed);
    }

    #[test]
    fn filter_by_missing_category_is_empty() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        s.add(NewTask {
            category: "Home".into(),
            ..new_task("a", day(2024, 5, 10))
        });
        assert!(s.query(&TaskFilter::new().category("Work")).is_empty());
    }

    #[test]
    fn categories_are_distinct_non_empty_in_first_seen_order() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        for category in ["Work", "", "Home", "Work", "Errands"] {
            s.add(NewTask {
                category: category.into(),
                ..new_task("t", day(2024, 5, 10))
            });
        }
        assert_eq!(s.categories(), vec!["Work", "Home", "Errands"]);
    }

    #[test]
    fn resolve_by_exact_or_unique_prefix() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        let t = s.add(new_task("a", day(2024, 5, 10)));
        assert_eq!(s.resolve(&t.id).unwrap().id, t.id);
        assert_eq!(s.resolve(&t.id[..20]).unwrap().id, t.id);
        let err = s.resolve("nope").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::TaskNotFound);
    }

    #[test]
    fn ambiguous_prefix_is_reported() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        let a = s.add(new_task("a", day(2024, 5, 10)));
        s.add(new_task("b", day(2024, 5, 10)));
        // ULIDs minted in the same run share their leading timestamp character.
        let err = s.resolve(&a.id[..1]).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::AmbiguousRef);
    }

    #[test]
    fn subscribers_see_each_effective_mutation() {
        let kv = MemoryKv::new();
        let mut s = store(&kv);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        s.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        let t = s.add(new_task("a", day(2024, 5, 10)));
        s.update(&t.id, &TaskPatch::default());
        s.delete("missing");
        s.delete(&t.id);

        assert_eq!(
            *seen.borrow(),
            vec![
                StoreEvent::Added(t.id.clone()),
                StoreEvent::Updated(t.id.clone()),
                StoreEvent::Deleted(t.id.clone()),
            ]
        );
    }

    #[test]
    fn malformed_persisted_blob_opens_empty() {
        let kv = MemoryKv::new();
        kv.set(crate::db::TASKS_STORAGE_KEY, "][").unwrap();
        let mut s = store(&kv);
        assert!(s.is_empty());
        s.add(new_task("fresh", day(2024, 5, 10)));
        assert_eq!(TaskRepo::new(&kv).load().len(), 1);
    }
}
