pub mod client;
pub mod types;

pub use client::{decode_payload, HttpTodoSource, TodoSource, DEFAULT_TODOS_URL};
pub use types::{RemotePayload, RemoteTask};

use crate::format::remote_to_record;
use crate::settings::AppSettings;
use crate::shared::errors::SeedError;
use crate::storage::types::TaskRecord;
use crate::storage::TaskStore;

/// Populates the store from a remote source on first launch.
pub struct Seeder<S> {
    store: TaskStore,
    source: S,
}

impl<S: TodoSource> Seeder<S> {
    pub fn new(store: TaskStore, source: S) -> Self {
        Self { store, source }
    }

    /// Replace the store contents with the remote task list.
    ///
    /// The store is cleared before fetching. An empty remote list leaves it
    /// empty. Returns the seeded remote tasks in remote order.
    pub async fn seed(&self) -> Result<Vec<RemoteTask>, SeedError> {
        let removed = self.store.delete_all().await?;
        tracing::info!(target: "remote", removed, "Cleared store before seeding");

        let payload = self.source.fetch_todos().await?;
        tracing::info!(
            target: "remote",
            received = payload.todos.len(),
            total = payload.total,
            "Fetched remote tasks"
        );

        if payload.todos.is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<TaskRecord> = payload.todos.iter().map(remote_to_record).collect();
        self.store.insert_all(records).await?;

        Ok(payload.todos)
    }

    /// Seed only when `settings` says this is the first launch.
    pub async fn seed_if_first_launch(
        &self,
        settings: &AppSettings,
    ) -> Result<Option<Vec<RemoteTask>>, SeedError> {
        if !settings.is_first_launch() {
            tracing::debug!(target: "remote", "Not first launch, skipping seed");
            return Ok(None);
        }

        self.seed().await.map(Some)
    }
}
