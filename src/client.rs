//! Typed HTTP client for the task API.
//!
//! Mirrors the six routes against a fixed base URL. Any non-success status
//! collapses into one generic message per operation; the status code itself
//! is not surfaced.

use crate::models::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};
use reqwest::{Client, Response};

pub struct TaskClient {
    base_url: String,
    http: Client,
}

impl TaskClient {
    /// `base_url` without a trailing slash, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        TaskClient {
            base_url: base_url.into(),
            http: Client::new(),
        }
    }

    /// GET /api/tasks, with `?completed=` only when a filter is given.
    pub async fn list_tasks(
        &self,
        completed: Option<bool>,
    ) -> Result<Vec<TaskResponse>, ClientError> {
        let mut req = self.http.get(format!("{}/api/tasks", self.base_url));
        if let Some(filter) = completed {
            req = req.query(&[("completed", filter)]);
        }

        let res = req.send().await?;
        let res = check(res, "Failed to fetch tasks")?;
        Ok(res.json().await?)
    }

    pub async fn get_task(&self, id: u64) -> Result<TaskResponse, ClientError> {
        let res = self
            .http
            .get(format!("{}/api/tasks/{id}", self.base_url))
            .send()
            .await?;
        let res = check(res, "Failed to fetch task")?;
        Ok(res.json().await?)
    }

    pub async fn create_task(
        &self,
        task: &CreateTaskRequest,
    ) -> Result<TaskResponse, ClientError> {
        let res = self
            .http
            .post(format!("{}/api/tasks", self.base_url))
            .json(task)
            .send()
            .await?;
        let res = check(res, "Failed to create task")?;
        Ok(res.json().await?)
    }

    pub async fn update_task(
        &self,
        id: u64,
        task: &UpdateTaskRequest,
    ) -> Result<TaskResponse, ClientError> {
        let res = self
            .http
            .put(format!("{}/api/tasks/{id}", self.base_url))
            .json(task)
            .send()
            .await?;
        let res = check(res, "Failed to update task")?;
        Ok(res.json().await?)
    }

    pub async fn toggle_task(&self, id: u64) -> Result<TaskResponse, ClientError> {
        let res = self
            .http
            .patch(format!("{}/api/tasks/{id}/toggle", self.base_url))
            .send()
            .await?;
        let res = check(res, "Failed to toggle task")?;
        Ok(res.json().await?)
    }

    /// DELETE /api/tasks/{id}. Success is a 204 with no body.
    pub async fn delete_task(&self, id: u64) -> Result<(), ClientError> {
        let res = self
            .http
            .delete(format!("{}/api/tasks/{id}", self.base_url))
            .send()
            .await?;
        check(res, "Failed to delete task")?;
        Ok(())
    }
}

/// Collapse any non-2xx response into the operation's generic failure.
fn check(res: Response, failure: &'static str) -> Result<Response, ClientError> {
    if res.status().is_success() {
        Ok(res)
    } else {
        Err(ClientError::Failed(failure))
    }
}

// ── Errors ─────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ClientError {
    /// The server answered with a non-success status.
    Failed(&'static str),
    /// The request never completed, or the body was not valid JSON.
    Transport(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Failed(msg) => write!(f, "{msg}"),
            ClientError::Transport(e) => write!(f, "transport: {e}"),
        }
    }
}
