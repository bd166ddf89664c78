use thiserror::Error;

pub type Result<T> = std::result::Result<T, TodoError>;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("List not found: {0}")]
    ListNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("List name is empty after sanitization")]
    EmptyListName,

    #[error("Task title is empty after sanitization")]
    EmptyTaskTitle,

    #[error("A list named '{0}' already exists")]
    DuplicateListName(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TodoError {
    /// Returns true for outcomes where the store refused the request and left
    /// both memory and disk untouched (unknown ids, empty or duplicate input).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::ListNotFound(_)
                | Self::TaskNotFound(_)
                | Self::EmptyListName
                | Self::EmptyTaskTitle
                | Self::DuplicateListName(_)
        )
    }
}
