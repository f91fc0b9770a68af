use chrono::{DateTime, Local};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::Task;
use crate::storage::Storage;

/// Owns the in-memory task collection and mirrors it to durable storage
/// after every mutation.
///
/// Mutations never fail: a blank name or an unknown id is a no-op, and a
/// storage write failure leaves the in-memory collection intact with the
/// store marked stale so the UI can surface a warning.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Storage,
    stale: bool,
}

impl TaskStore {
    /// Loads the persisted snapshot. A missing or corrupt snapshot yields an
    /// empty store.
    pub fn load(storage: Storage) -> TaskStore {
        let tasks = storage.load_tasks();
        debug!("loaded {} tasks from {}", tasks.len(), storage.tasks_path().display());
        TaskStore { tasks, storage, stale: false }
    }

    /// Immutable view of the current collection for the query functions.
    pub fn snapshot(&self) -> &[Task] {
        &self.tasks
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Whether the persisted copy is behind the in-memory state because a
    /// write failed.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Adds a new incomplete task and persists.
    ///
    /// Returns the new task's id, or `None` when the name is empty after
    /// trimming (nothing to add).
    pub fn add(&mut self, name: &str, is_daily_habit: bool, due_date: DateTime<Local>) -> Option<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let task = Task::new(name.to_string(), is_daily_habit, due_date);
        let id = task.id;
        self.tasks.push(task);
        self.persist();
        Some(id)
    }

    /// Deletes the task with the given id if present and persists.
    ///
    /// Returns whether a task was removed; an unknown id is a no-op.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let len_before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == len_before {
            return false;
        }
        self.persist();
        true
    }

    /// Flips a task's completion flag, stamping or clearing `completed_at`
    /// in the same step, then persists.
    ///
    /// Returns whether a task was found; an unknown id is a no-op.
    pub fn toggle_complete(&mut self, id: Uuid) -> bool {
        let Some(t) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        t.is_completed = !t.is_completed;
        t.completed_at = if t.is_completed { Some(Local::now()) } else { None };
        self.persist();
        true
    }

    /// Writes the full collection to durable storage.
    ///
    /// A failed write keeps the in-memory state untouched; the store is
    /// marked stale until a later write succeeds.
    pub fn persist(&mut self) {
        match self.storage.save_tasks(&self.tasks) {
            Ok(()) => self.stale = false,
            Err(e) => {
                warn!("failed to persist tasks to {}: {e}", self.storage.tasks_path().display());
                self.stale = true;
            }
        }
    }
}
