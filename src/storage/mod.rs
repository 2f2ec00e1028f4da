pub mod migrations;
pub mod search;
pub mod types;
mod writer;

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};

use crate::shared::errors::StoreError;
use crate::shared::paths::ensure_dir;
use types::{TaskPatch, TaskRecord};
use writer::WriteQueue;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_TASKS: &str =
    "SELECT id, titleTask, descriptionTask, completed, dateString FROM tasks";

/// Persistent task store backed by SQLite.
///
/// Writes are funneled through a single writer thread, so they never interleave
/// and are applied in arrival order. Reads share one read-only connection on
/// the same file: they run one at a time but may overlap with writes.
#[derive(Clone)]
pub struct TaskStore {
    writer: Arc<WriteQueue>,
    reader: Arc<Mutex<Connection>>,
}

impl TaskStore {
    /// Open (or create) the store at `path` and run schema migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent).map_err(|e| StoreError::DirectoryError(e.to_string()))?;
        }

        let writer = Connection::open(&path).map_err(StoreError::OpenFailed)?;
        writer
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
            .map_err(StoreError::OpenFailed)?;
        writer
            .busy_timeout(BUSY_TIMEOUT)
            .map_err(StoreError::OpenFailed)?;
        migrations::run_migrations(&writer).map_err(StoreError::OpenFailed)?;

        let reader = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(StoreError::OpenFailed)?;
        reader
            .busy_timeout(BUSY_TIMEOUT)
            .map_err(StoreError::OpenFailed)?;

        let writer = WriteQueue::spawn(writer)
            .map_err(|e| StoreError::Worker(format!("Failed to spawn writer thread: {}", e)))?;

        tracing::info!(target: "storage", "Task store opened at {:?}", path);

        Ok(Self {
            writer: Arc::new(writer),
            reader: Arc::new(Mutex::new(reader)),
        })
    }

    // Reads

    /// Fetch a task by id. Absence is not an error.
    pub async fn fetch_task(&self, id: i64) -> Result<Option<TaskRecord>, StoreError> {
        self.read(move |conn| {
            conn.query_row(&format!("{} WHERE id = ?1", SELECT_TASKS), [id], row_to_record)
                .optional()
                .map_err(StoreError::FetchFailed)
        })
        .await
    }

    /// All tasks, newest id first.
    pub async fn fetch_all(&self) -> Result<Vec<TaskRecord>, StoreError> {
        self.read(|conn| query_all(conn).map_err(StoreError::FetchFailed))
            .await
    }

    /// Tasks whose title or description contains `query`, ignoring case and
    /// diacritics. A query that is empty once folded matches nothing.
    pub async fn search_text(&self, query: &str) -> Result<Vec<TaskRecord>, StoreError> {
        let needle = search::fold(query);
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let tasks = self.fetch_all().await?;
        let found: Vec<TaskRecord> = tasks
            .into_iter()
            .filter(|task| search::matches(task, &needle))
            .collect();

        tracing::debug!(target: "storage", query, hits = found.len(), "Searched tasks");
        Ok(found)
    }

    /// The id the next created task would receive.
    pub async fn next_id(&self) -> Result<i64, StoreError> {
        self.read(|conn| next_id_in(conn).map_err(StoreError::FetchFailed))
            .await
    }

    pub async fn count(&self) -> Result<usize, StoreError> {
        self.read(|conn| {
            conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get::<_, i64>(0))
                .map(|n| n as usize)
                .map_err(StoreError::FetchFailed)
        })
        .await
    }

    // Writes

    /// Insert an empty task dated today and return its id.
    pub async fn create_task(&self) -> Result<i64, StoreError> {
        let date = crate::format::current_date();

        let id = self
            .writer
            .run(move |conn| {
                let tx = conn.transaction().map_err(StoreError::SaveFailed)?;
                let id = next_id_in(&tx).map_err(StoreError::SaveFailed)?;
                tx.execute(
                    "INSERT INTO tasks (id, titleTask, descriptionTask, completed, dateString)
                     VALUES (?1, '', '', 0, ?2)",
                    params![id, date],
                )
                .map_err(StoreError::SaveFailed)?;
                tx.commit().map_err(StoreError::SaveFailed)?;
                Ok(id)
            })
            .await?;

        tracing::info!(target: "storage", id, "Created task");
        Ok(id)
    }

    /// Insert `records` as one batch. Either all are stored or none are.
    pub async fn insert_all(&self, records: Vec<TaskRecord>) -> Result<usize, StoreError> {
        let inserted = self
            .writer
            .run(move |conn| {
                let tx = conn.transaction().map_err(StoreError::SaveFailed)?;
                {
                    let mut stmt = tx
                        .prepare(
                            "INSERT INTO tasks (id, titleTask, descriptionTask, completed, dateString)
                             VALUES (?1, ?2, ?3, ?4, ?5)",
                        )
                        .map_err(StoreError::SaveFailed)?;
                    for record in &records {
                        stmt.execute(params![
                            record.id,
                            record.title,
                            record.description,
                            record.completed,
                            record.date_created,
                        ])
                        .map_err(StoreError::SaveFailed)?;
                    }
                }
                tx.commit().map_err(StoreError::SaveFailed)?;
                Ok(records.len())
            })
            .await?;

        tracing::info!(target: "storage", inserted, "Inserted task batch");
        Ok(inserted)
    }

    /// Apply the supplied fields of `patch` to task `id`.
    pub async fn update_fields(&self, id: i64, patch: TaskPatch) -> Result<(), StoreError> {
        let rows_affected = self
            .writer
            .run(move |conn| {
                conn.execute(
                    "UPDATE tasks SET
                        titleTask = COALESCE(?1, titleTask),
                        descriptionTask = COALESCE(?2, descriptionTask),
                        completed = COALESCE(?3, completed)
                     WHERE id = ?4",
                    params![patch.title, patch.description, patch.completed, id],
                )
                .map_err(StoreError::SaveFailed)
            })
            .await?;

        if rows_affected == 0 {
            return Err(StoreError::TaskNotFound(id));
        }

        tracing::debug!(target: "storage", id, "Updated task");
        Ok(())
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), StoreError> {
        let rows_affected = self
            .writer
            .run(move |conn| {
                conn.execute("DELETE FROM tasks WHERE id = ?1", [id])
                    .map_err(StoreError::SaveFailed)
            })
            .await?;

        if rows_affected == 0 {
            return Err(StoreError::TaskNotFound(id));
        }

        tracing::info!(target: "storage", id, "Deleted task");
        Ok(())
    }

    /// Remove every task. Returns how many were removed.
    pub async fn delete_all(&self) -> Result<usize, StoreError> {
        let removed = self
            .writer
            .run(|conn| {
                conn.execute("DELETE FROM tasks", [])
                    .map_err(StoreError::SaveFailed)
            })
            .await?;

        tracing::info!(target: "storage", removed, "Deleted all tasks");
        Ok(removed)
    }

    /// Delete task `id` if it has neither title nor description.
    ///
    /// Returns true when a task was removed. A missing task is not an error.
    pub async fn prune_if_empty(&self, id: i64) -> Result<bool, StoreError> {
        let pruned = self
            .writer
            .run(move |conn| {
                let tx = conn.transaction().map_err(StoreError::SaveFailed)?;
                let existing = tx
                    .query_row(&format!("{} WHERE id = ?1", SELECT_TASKS), [id], row_to_record)
                    .optional()
                    .map_err(StoreError::SaveFailed)?;

                let pruned = match existing {
                    Some(task) if task.is_empty() => {
                        tx.execute("DELETE FROM tasks WHERE id = ?1", [id])
                            .map_err(StoreError::SaveFailed)?;
                        true
                    }
                    _ => false,
                };

                tx.commit().map_err(StoreError::SaveFailed)?;
                Ok(pruned)
            })
            .await?;

        if pruned {
            tracing::info!(target: "storage", id, "Pruned empty task");
        }
        Ok(pruned)
    }

    async fn read<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let reader = Arc::clone(&self.reader);

        tokio::task::spawn_blocking(move || {
            let conn = reader
                .lock()
                .map_err(|_| StoreError::Worker("reader connection poisoned".to_string()))?;
            op(&*conn)
        })
        .await
        .map_err(|e| StoreError::Worker(e.to_string()))?
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<TaskRecord> {
    Ok(TaskRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        completed: row.get(3)?,
        date_created: row.get(4)?,
    })
}

fn query_all(conn: &Connection) -> rusqlite::Result<Vec<TaskRecord>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id DESC", SELECT_TASKS))?;
    let rows = stmt.query_map([], row_to_record)?;
    rows.collect()
}

fn next_id_in(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COALESCE(MAX(id), 0) + 1 FROM tasks", [], |row| row.get(0))
}
