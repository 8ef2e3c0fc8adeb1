//! Service-level errors for the entity store.

use crate::task::{
    domain::{CategoryId, ChatId, SubtaskId, TaskDomainError, TaskId},
    ports::RepositoryError,
};
use thiserror::Error;

/// Errors returned by task, category and user services.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input validation failed; nothing was written.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task does not exist or belongs to another user.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The category does not exist or belongs to another user.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// The subtask does not exist on the given task.
    #[error("subtask not found: {0}")]
    SubtaskNotFound(SubtaskId),

    /// No user is registered for the chat identity.
    #[error("no user registered for chat {0}")]
    UserNotFound(ChatId),

    /// The store failed; the unit of work was rolled back.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for TaskServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::TaskNotFound(id) => Self::TaskNotFound(id),
            RepositoryError::CategoryNotFound(id) => Self::CategoryNotFound(id),
            RepositoryError::SubtaskNotFound(id) => Self::SubtaskNotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
