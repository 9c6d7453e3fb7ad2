use tracing::{debug, error, warn};

use crate::error::TaskflowError;
use crate::models::Task;

use super::kv_repo::KeyValueStore;

pub const TASKS_STORAGE_KEY: &str = "taskflow_tasks";

/// Whole-collection persistence: the task list is one JSON array under
/// [`TASKS_STORAGE_KEY`].
///
/// [`load`](Self::load) and [`save`](Self::save) never fail. Read problems
/// degrade to an empty collection and write problems are dropped; both are
/// logged. The `try_*` variants expose the underlying errors.
pub struct TaskRepo<S> {
    kv: S,
}

impl<S: KeyValueStore> TaskRepo<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn load(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(tasks) => {
                debug!(count = tasks.len(), "loaded tasks");
                tasks
            }
            Err(e) => {
                warn!(key = TASKS_STORAGE_KEY, error = %e, "failed to load tasks, starting empty");
                Vec::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<Vec<Task>, TaskflowError> {
        match self.kv.get(TASKS_STORAGE_KEY)? {
            Some(blob) if !blob.trim().is_empty() => Ok(serde_json::from_str(&blob)?),
            _ => Ok(Vec::new()),
        }
    }

    pub fn save(&self, tasks: &[Task]) {
        if let Err(e) = self.try_save(tasks) {
            error!(key = TASKS_STORAGE_KEY, count = tasks.len(), error = %e, "failed to save tasks");
        }
    }

    pub fn try_save(&self, tasks: &[Task]) -> Result<(), TaskflowError> {
        let blob = serde_json::to_string(tasks)?;
        self.kv.set(TASKS_STORAGE_KEY, &blob)
    }
}
