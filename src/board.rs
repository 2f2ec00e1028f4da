//! Operations behind the task list and task editor screens.

use thiserror::Error;

use crate::format::{self, TaskList, TaskView};
use crate::remote::{Seeder, TodoSource};
use crate::settings::AppSettings;
use crate::shared::errors::{SeedError, StoreError};
use crate::storage::types::TaskPatch;
use crate::storage::TaskStore;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to load initial tasks: {0}")]
    Seed(#[from] SeedError),
}

impl BoardError {
    pub fn is_not_found(&self) -> bool {
        match self {
            BoardError::Store(err) => err.is_not_found(),
            BoardError::Seed(SeedError::Store(err)) => err.is_not_found(),
            BoardError::Seed(SeedError::Network(_)) => false,
        }
    }
}

/// Facade over the store and seeder used by the presentation layer.
pub struct TaskBoard<S> {
    store: TaskStore,
    seeder: Seeder<S>,
}

impl<S: TodoSource> TaskBoard<S> {
    pub fn new(store: TaskStore, source: S) -> Self {
        let seeder = Seeder::new(store.clone(), source);
        Self { store, seeder }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Load the task list for app start.
    ///
    /// On first launch the store is seeded from the remote source and the
    /// first-launch flag is set. The flag is left alone if seeding fails, so
    /// the next launch tries again.
    pub async fn launch(&self, settings: &mut AppSettings) -> Result<TaskList, BoardError> {
        match self.seeder.seed_if_first_launch(settings).await? {
            Some(seeded) => {
                settings.mark_first_launch_checked();
                let views = seeded.iter().map(format::remote_to_view).collect();
                Ok(TaskList::new(views))
            }
            None => self.refresh().await,
        }
    }

    pub async fn refresh(&self) -> Result<TaskList, BoardError> {
        let records = self.store.fetch_all().await?;
        Ok(TaskList::new(format::records_to_views(&records)))
    }

    pub async fn search(&self, query: &str) -> Result<TaskList, BoardError> {
        let records = self.store.search_text(query).await?;
        Ok(TaskList::new(format::records_to_views(&records)))
    }

    pub async fn set_completed(&self, id: i64, completed: bool) -> Result<(), BoardError> {
        self.store
            .update_fields(id, TaskPatch::completed(completed))
            .await
            .map_err(StoreError::update_failed)?;
        Ok(())
    }

    pub async fn remove(&self, id: i64) -> Result<(), BoardError> {
        self.store
            .delete_task(id)
            .await
            .map_err(StoreError::delete_failed)?;
        Ok(())
    }

    pub async fn share_text(&self, id: i64) -> Result<String, BoardError> {
        let record = self
            .store
            .fetch_task(id)
            .await?
            .ok_or(StoreError::TaskNotFound(id))?;
        Ok(format::share_text(&record))
    }

    /// Open the editor on an existing task, or on a freshly created one.
    pub async fn open_editor(&self, id: Option<i64>) -> Result<TaskView, BoardError> {
        let id = match id {
            Some(id) => id,
            None => self.store.create_task().await?,
        };

        let record = self
            .store
            .fetch_task(id)
            .await?
            .ok_or(StoreError::TaskNotFound(id))?;
        Ok(format::record_to_view(&record))
    }

    pub async fn edit(&self, id: i64, patch: TaskPatch) -> Result<(), BoardError> {
        self.store
            .update_fields(id, patch)
            .await
            .map_err(StoreError::update_failed)?;
        Ok(())
    }

    /// Close the editor. A task left without title and description is removed.
    pub async fn close_editor(&self, id: i64) -> Result<bool, BoardError> {
        Ok(self.store.prune_if_empty(id).await?)
    }
}
