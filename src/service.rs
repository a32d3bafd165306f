//! Business logic for the task operations.
//!
//! Validation lives here so the endpoint layer and the store never duplicate
//! rules. Absent ids come back as `None`/`false` from the read-style
//! operations and as `TaskError::NotFound` from update.

use crate::models::{CreateTaskRequest, Task, TaskResponse, UpdateTaskRequest};
use crate::store::{StoreError, TaskStore};
use chrono::Utc;

pub struct TaskService {
    store: TaskStore,
}

impl TaskService {
    pub fn new(store: TaskStore) -> Self {
        TaskService { store }
    }

    /// All tasks when the filter is None, else only those whose completion
    /// state matches. Newest-created first.
    pub fn list(&self, completed: Option<bool>) -> Result<Vec<TaskResponse>, TaskError> {
        let tasks = self.store.list(completed)?;
        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }

    pub fn get(&self, id: u64) -> Result<Option<TaskResponse>, TaskError> {
        Ok(self.store.get(id)?.map(TaskResponse::from))
    }

    /// Store a new task: title trimmed, not completed, created now (UTC).
    /// The store assigns the id.
    pub fn create(&self, req: CreateTaskRequest) -> Result<TaskResponse, TaskError> {
        let title = validated_title(&req.title)?.to_string();

        let task = Task {
            id: 0, // assigned by the store
            title,
            description: req.description,
            is_completed: false,
            created_at_utc: Utc::now(),
            due_date_utc: req.due_date_utc,
            priority: req.priority,
        };

        let task = self.store.insert(task)?;
        Ok(TaskResponse::from(task))
    }

    /// Overwrite every mutable field of an existing task. `id` and
    /// `created_at_utc` are never altered.
    pub fn update(&self, id: u64, req: UpdateTaskRequest) -> Result<TaskResponse, TaskError> {
        // Existence is checked before the title — a blank update of a
        // missing id reports NotFound.
        let mut task = self.store.get(id)?.ok_or(TaskError::NotFound)?;

        let title = validated_title(&req.title)?.to_string();

        task.title = title;
        task.description = req.description;
        task.is_completed = req.is_completed;
        task.due_date_utc = req.due_date_utc;
        task.priority = req.priority;

        self.store.update(&task)?;
        Ok(TaskResponse::from(task))
    }

    /// Flip the completion flag. No validation — the stored title is already
    /// known good from the create/update that wrote it.
    pub fn toggle(&self, id: u64) -> Result<Option<TaskResponse>, TaskError> {
        let mut task = match self.store.get(id)? {
            Some(task) => task,
            None => return Ok(None),
        };

        task.is_completed = !task.is_completed;
        self.store.update(&task)?;
        Ok(Some(TaskResponse::from(task)))
    }

    /// Remove the task. False when the id was absent — a no-op, not an error.
    pub fn delete(&self, id: u64) -> Result<bool, TaskError> {
        Ok(self.store.remove(id)?)
    }
}

// ── Validation helpers ─────────────────────────────────────────

/// Trim the title; a blank result is the one validation failure in the
/// system.
fn validated_title(raw: &str) -> Result<&str, TaskError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TaskError::TitleRequired);
    }
    Ok(title)
}

// ── Errors ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Referenced id does not exist.
    NotFound,
    /// Title was empty or whitespace-only.
    TitleRequired,
    /// Underlying store failure, surfaced as-is.
    Store(String),
}

impl From<StoreError> for TaskError {
    fn from(e: StoreError) -> Self {
        TaskError::Store(e.to_string())
    }
}

impl std::fmt::Display for TaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskError::NotFound => write!(f, "Task not found"),
            TaskError::TitleRequired => write!(f, "Title is required."),
            TaskError::Store(e) => write!(f, "{e}"),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
