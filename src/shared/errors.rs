use thiserror::Error;

/// Errors raised by the task store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open task store: {0}")]
    OpenFailed(#[source] rusqlite::Error),

    #[error("Failed to create directory: {0}")]
    DirectoryError(String),

    #[error("Failed to save tasks: {0}")]
    SaveFailed(#[source] rusqlite::Error),

    #[error("Failed to fetch tasks: {0}")]
    FetchFailed(#[source] rusqlite::Error),

    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("Failed to update task: {0}")]
    UpdateFailed(#[source] Box<StoreError>),

    #[error("Failed to delete task: {0}")]
    DeleteFailed(#[source] Box<StoreError>),

    #[error("Task store writer is no longer running")]
    WriterClosed,

    #[error("Task store worker failed: {0}")]
    Worker(String),
}

impl StoreError {
    pub fn update_failed(cause: StoreError) -> Self {
        StoreError::UpdateFailed(Box::new(cause))
    }

    pub fn delete_failed(cause: StoreError) -> Self {
        StoreError::DeleteFailed(Box::new(cause))
    }

    /// Returns true if this error, or the error it wraps, is `TaskNotFound`.
    pub fn is_not_found(&self) -> bool {
        match self {
            StoreError::TaskNotFound(_) => true,
            StoreError::UpdateFailed(inner) | StoreError::DeleteFailed(inner) => inner.is_not_found(),
            _ => false,
        }
    }
}

/// Errors raised while fetching the remote task list.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: status {0}")]
    HttpError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(#[source] reqwest::Error),

    #[error("Response contained no data")]
    NoData,

    #[error("Failed to decode response: {0}")]
    DecodingError(#[source] serde_json::Error),
}

/// Errors from first-launch seeding.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_detected_through_wrappers() {
        assert!(StoreError::TaskNotFound(3).is_not_found());
        assert!(StoreError::update_failed(StoreError::TaskNotFound(3)).is_not_found());
        assert!(StoreError::delete_failed(StoreError::TaskNotFound(3)).is_not_found());
        assert!(!StoreError::WriterClosed.is_not_found());
    }

    #[test]
    fn test_wrapped_messages_include_cause() {
        let err = StoreError::update_failed(StoreError::TaskNotFound(42));
        assert_eq!(err.to_string(), "Failed to update task: Task not found: 42");

        let err = NetworkError::HttpError(503);
        assert_eq!(err.to_string(), "HTTP error: status 503");
    }
}
