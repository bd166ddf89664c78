//! # Simple Todo Core
//!
//! Domain models and the persistence layer for the Simple Todo list manager.
//!
//! This crate owns every list and task, validates user input, and keeps a
//! single JSON document on disk in sync with memory. Front ends hold a
//! [`Store`], call its operations, and redraw from the returned values.

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::StoreConfig;
pub use domain::{
    sanitize::{sanitize, MAX_LIST_NAME_LENGTH, MAX_TASK_TITLE_LENGTH},
    task::{Task, TaskId},
    todo_list::{ListId, TodoList},
};
pub use error::{Result, TodoError};
pub use storage::{FileStorage, Recovery, Storage};
pub use store::Store;
