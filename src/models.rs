use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A todo item — the persisted entity. Rows are postcard-encoded in the
/// store; the JSON wire shape is `TaskResponse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned, never reused, immutable after creation.
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    /// Set once at creation, never modified.
    pub created_at_utc: DateTime<Utc>,
    pub due_date_utc: Option<DateTime<Utc>>,
    /// Free-form small integer. 0 = normal, 1 = high, etc.
    pub priority: i32,
}

// API request/response types. Wire field names are camelCase.

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// A missing title binds to "" and is rejected by service validation.
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub due_date_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: i32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    pub due_date_utc: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: i32,
}

/// Read projection of a persisted task. Every field is always serialized;
/// absent optionals appear as JSON null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at_utc: DateTime<Utc>,
    pub due_date_utc: Option<DateTime<Utc>>,
    pub priority: i32,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        TaskResponse {
            id: task.id,
            title: task.title,
            description: task.description,
            is_completed: task.is_completed,
            created_at_utc: task.created_at_utc,
            due_date_utc: task.due_date_utc,
            priority: task.priority,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
