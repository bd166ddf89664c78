pub mod naming;
pub mod sanitize;
pub mod task;
pub mod todo_list;

pub use sanitize::{sanitize, MAX_LIST_NAME_LENGTH, MAX_TASK_TITLE_LENGTH};
pub use task::{Task, TaskId};
pub use todo_list::{ListId, TodoList};
