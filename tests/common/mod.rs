#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tasknest_lib::remote::{RemotePayload, RemoteTask, TodoSource};
use tasknest_lib::{NetworkError, TaskStore};
use tempfile::TempDir;

pub fn open_store() -> (TempDir, TaskStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = TaskStore::open(dir.path().join("tasks.db")).unwrap();
    (dir, store)
}

pub fn remote(id: i64, todo: Option<&str>, completed: Option<bool>) -> RemoteTask {
    RemoteTask {
        id,
        todo: todo.map(str::to_string),
        completed,
        user_id: None,
    }
}

/// In-memory todo source that counts how often it was asked.
pub struct FakeSource {
    todos: Vec<RemoteTask>,
    fail_with_status: Option<u16>,
    calls: Arc<AtomicUsize>,
}

impl FakeSource {
    pub fn with(todos: Vec<RemoteTask>) -> Self {
        Self {
            todos,
            fail_with_status: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            todos: Vec::new(),
            fail_with_status: Some(status),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared call counter that stays readable after the source is moved.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl TodoSource for FakeSource {
    async fn fetch_todos(&self) -> Result<RemotePayload, NetworkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.fail_with_status {
            return Err(NetworkError::HttpError(status));
        }

        Ok(RemotePayload {
            total: self.todos.len() as i64,
            todos: self.todos.clone(),
            skip: None,
            limit: None,
        })
    }
}
