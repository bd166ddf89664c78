use crate::{
    domain::{task::or_default, TodoList},
    error::Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod file_storage;

pub use file_storage::FileStorage;

/// Top-level shape of the persisted file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoDocument {
    #[serde(default, deserialize_with = "or_default")]
    pub lists: Vec<TodoList>,
}

/// Borrowed form of [`TodoDocument`] used when writing
#[derive(Serialize)]
pub(crate) struct TodoDocumentRef<'a> {
    pub lists: &'a [TodoList],
}

/// Details kept when a persisted file could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    /// Why the file was rejected
    pub reason: String,
    /// Copy of the unreadable file, when the backup succeeded
    pub backup: Option<PathBuf>,
}

/// Result of reading the persisted file
#[derive(Debug)]
pub enum LoadOutcome {
    /// No file yet; start with an empty collection
    Missing,
    Loaded(TodoDocument),
    /// The file exists but could not be used; start with an empty collection
    Unreadable(Recovery),
}

/// Storage trait for persisting the list collection
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Loads the full collection
    async fn load(&self) -> Result<LoadOutcome>;

    /// Replaces the persisted collection with `lists`
    async fn save(&self, lists: &[TodoList]) -> Result<()>;

    /// Checks if a persisted collection exists
    async fn is_initialized(&self) -> bool;
}
