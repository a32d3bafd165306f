//! Task ↔ redb persistence.
//!
//! One `tasks` table (id → postcard-encoded row) plus a `meta` table holding
//! the id counter. Every mutation commits its own write transaction. The
//! counter only moves forward, so ids are never reissued — not even after a
//! delete or a restart.

use crate::models::Task;
use redb::{Database, ReadableTable, TableDefinition};
use std::sync::Arc;
use tracing::debug;

const TASKS: TableDefinition<u64, &[u8]> = TableDefinition::new("tasks");
const META: TableDefinition<&str, u64> = TableDefinition::new("meta");

/// Thin handle to the redb file. Cloneable (Arc inside), shared across
/// requests.
#[derive(Clone)]
pub struct TaskStore {
    db: Arc<Database>,
}

impl TaskStore {
    /// Open (or create) the database at the given path.
    /// Creates tables if they don't exist.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let db = Database::create(path)?;

        let txn = db.begin_write()?;
        {
            let _ = txn.open_table(TASKS)?;
            let _ = txn.open_table(META)?;
        }
        txn.commit()?;

        Ok(TaskStore { db: Arc::new(db) })
    }

    /// Insert a task, assigning it the next free id (first id is 1).
    /// Whatever id the caller put on the task is ignored.
    pub fn insert(&self, mut task: Task) -> Result<Task, StoreError> {
        let txn = self.db.begin_write()?;
        {
            let mut tasks = txn.open_table(TASKS)?;
            let mut meta = txn.open_table(META)?;

            let id = meta.get("next_id")?.map(|v| v.value()).unwrap_or(1);
            meta.insert("next_id", id + 1)?;

            task.id = id;
            let bytes = postcard::to_allocvec(&task)
                .map_err(|e| StoreError::Encode(e.to_string()))?;
            tasks.insert(task.id, bytes.as_slice())?;
        }
        txn.commit()?;

        debug!(id = task.id, "inserted task");
        Ok(task)
    }

    pub fn get(&self, id: u64) -> Result<Option<Task>, StoreError> {
        let txn = self.db.begin_read()?;
        let tasks = txn.open_table(TASKS)?;

        match tasks.get(id)? {
            Some(data) => {
                let task: Task = postcard::from_bytes(data.value())
                    .map_err(|e| StoreError::Decode(e.to_string()))?;
                Ok(Some(task))
            }
            None => Ok(None),
        }
    }

    /// Full scan, optionally filtered by completion state.
    pub fn list(&self, completed: Option<bool>) -> Result<Vec<Task>, StoreError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(TASKS)?;

        let mut tasks = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let task: Task = postcard::from_bytes(value.value())
                .map_err(|e| StoreError::Decode(e.to_string()))?;
            if completed.map_or(true, |done| task.is_completed == done) {
                tasks.push(task);
            }
        }

        // Newest first; id breaks timestamp ties so the order is deterministic.
        tasks.sort_by(|a, b| {
            b.created_at_utc
                .cmp(&a.created_at_utc)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(tasks)
    }

    /// Overwrite the row at `task.id` with an already-fetched, mutated task.
    pub fn update(&self, task: &Task) -> Result<(), StoreError> {
        let txn = self.db.begin_write()?;
        {
            let mut tasks = txn.open_table(TASKS)?;
            let bytes = postcard::to_allocvec(task)
                .map_err(|e| StoreError::Encode(e.to_string()))?;
            tasks.insert(task.id, bytes.as_slice())?;
        }
        txn.commit()?;

        debug!(id = task.id, "updated task");
        Ok(())
    }

    /// Delete the row. Returns false when the id was absent.
    pub fn remove(&self, id: u64) -> Result<bool, StoreError> {
        let txn = self.db.begin_write()?;
        let removed;
        {
            let mut tasks = txn.open_table(TASKS)?;
            removed = tasks.remove(id)?.is_some();
        }
        txn.commit()?;

        debug!(id, removed, "removed task");
        Ok(removed)
    }
}

// ── Errors ─────────────────────────────────────────────────────

#[derive(Debug)]
pub enum StoreError {
    Redb(String),
    Decode(String),
    Encode(String),
}

// redb 2.x has many error types. Blanket them all into StoreError::Redb.
macro_rules! from_redb {
    ($($t:ty),*) => {
        $(impl From<$t> for StoreError {
            fn from(e: $t) -> Self { StoreError::Redb(e.to_string()) }
        })*
    };
}

from_redb!(
    redb::Error,
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError
);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Redb(e) => write!(f, "redb: {e}"),
            StoreError::Decode(e) => write!(f, "decode: {e}"),
            StoreError::Encode(e) => write!(f, "encode: {e}"),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::fs;

    /// Create a temp store that auto-cleans.
    fn temp_store(name: &str) -> (TaskStore, String) {
        let path = format!("/tmp/todo_store_{name}_{}.redb", std::process::id());
        let _ = fs::remove_file(&path); // clean up any leftover
        let store = TaskStore::open(&path).unwrap();
        (store, path)
    }

    fn cleanup(path: &str) {
        let _ = fs::remove_file(path);
    }

    /// Task created at a fixed hour on a fixed day — lets tests control the
    /// listing order.
    fn task_at(title: &str, hour: u32, done: bool) -> Task {
        Task {
            id: 0,
            title: title.into(),
            description: None,
            is_completed: done,
            created_at_utc: Utc.with_ymd_and_hms(2026, 2, 11, hour, 0, 0).unwrap(),
            due_date_utc: None,
            priority: 0,
        }
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let (store, path) = temp_store("ids");

        let a = store.insert(task_at("First", 9, false)).unwrap();
        let b = store.insert(task_at("Second", 10, false)).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        assert_eq!(store.get(1).unwrap().unwrap().title, "First");
        assert_eq!(store.get(2).unwrap().unwrap().title, "Second");

        cleanup(&path);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let (store, path) = temp_store("no_reuse");

        let a = store.insert(task_at("Doomed", 9, false)).unwrap();
        assert!(store.remove(a.id).unwrap());

        let b = store.insert(task_at("Survivor", 10, false)).unwrap();
        assert_eq!(b.id, 2);

        cleanup(&path);
    }

    #[test]
    fn get_missing_returns_none() {
        let (store, path) = temp_store("missing");
        assert!(store.get(42).unwrap().is_none());
        cleanup(&path);
    }

    #[test]
    fn list_filters_by_completion() {
        let (store, path) = temp_store("filter");

        store.insert(task_at("Open one", 9, false)).unwrap();
        store.insert(task_at("Done one", 10, true)).unwrap();
        store.insert(task_at("Open two", 11, false)).unwrap();

        let all = store.list(None).unwrap();
        let done = store.list(Some(true)).unwrap();
        let open = store.list(Some(false)).unwrap();

        assert_eq!(all.len(), 3);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].title, "Done one");
        assert_eq!(open.len(), 2);
        assert!(open.iter().all(|t| !t.is_completed));

        cleanup(&path);
    }

    #[test]
    fn list_orders_newest_first() {
        let (store, path) = temp_store("order");

        store.insert(task_at("Oldest", 8, false)).unwrap();
        store.insert(task_at("Newest", 14, false)).unwrap();
        store.insert(task_at("Middle", 11, false)).unwrap();

        let titles: Vec<String> = store
            .list(None)
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["Newest", "Middle", "Oldest"]);

        cleanup(&path);
    }

    #[test]
    fn list_breaks_timestamp_ties_by_id() {
        let (store, path) = temp_store("ties");

        // Same creation instant — the later insert (higher id) wins.
        store.insert(task_at("Earlier insert", 9, false)).unwrap();
        store.insert(task_at("Later insert", 9, false)).unwrap();

        let tasks = store.list(None).unwrap();
        assert_eq!(tasks[0].title, "Later insert");
        assert_eq!(tasks[1].title, "Earlier insert");

        cleanup(&path);
    }

    #[test]
    fn update_overwrites_row_in_place() {
        let (store, path) = temp_store("update");

        let mut task = store.insert(task_at("Draft", 9, false)).unwrap();
        task.title = "Final".into();
        task.is_completed = true;
        store.update(&task).unwrap();

        let fetched = store.get(task.id).unwrap().unwrap();
        assert_eq!(fetched.title, "Final");
        assert!(fetched.is_completed);
        assert_eq!(fetched.created_at_utc, task.created_at_utc);

        cleanup(&path);
    }

    #[test]
    fn remove_reports_presence() {
        let (store, path) = temp_store("remove");

        let task = store.insert(task_at("Here today", 9, false)).unwrap();
        assert!(store.remove(task.id).unwrap());
        assert!(!store.remove(task.id).unwrap());
        assert!(!store.remove(999).unwrap());

        cleanup(&path);
    }

    #[test]
    fn reopen_preserves_rows_and_counter() {
        let (store, path) = temp_store("reopen");

        store.insert(task_at("Persistent", 9, false)).unwrap();
        store.insert(task_at("Also persistent", 10, true)).unwrap();
        drop(store);

        let store = TaskStore::open(&path).unwrap();
        assert_eq!(store.list(None).unwrap().len(), 2);

        // The counter survives the reopen too.
        let next = store.insert(task_at("After reboot", 11, false)).unwrap();
        assert_eq!(next.id, 3);

        cleanup(&path);
    }
}
