use crate::domain::task::{or_default, Task, TaskId};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Unique identifier for a to-do list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListId(String);

impl ListId {
    /// Generates a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ListId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for ListId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, ordered collection of tasks
///
/// Task order is insertion order and is never changed by toggling; the
/// pending/completed split is a read-time view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    #[serde(default = "ListId::generate", deserialize_with = "or_generated_id")]
    pub id: ListId,
    #[serde(default, deserialize_with = "or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "or_default")]
    pub tasks: Vec<Task>,
}

impl TodoList {
    /// Creates an empty list with a fresh id
    pub fn new(name: String) -> Self {
        Self {
            id: ListId::generate(),
            name,
            tasks: Vec::new(),
        }
    }

    /// Appends a new task and returns a reference to it
    pub fn add_task(&mut self, title: String) -> &Task {
        self.tasks.push(Task::new(title));
        &self.tasks[self.tasks.len() - 1]
    }

    /// Gets a task by id
    pub fn get_task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == task_id)
    }

    /// Gets a mutable task by id
    pub fn get_task_mut(&mut self, task_id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == task_id)
    }

    /// Removes a task by id, returning it if it was present
    pub fn remove_task(&mut self, task_id: &TaskId) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| &t.id == task_id)?;
        Some(self.tasks.remove(pos))
    }

    /// Tasks that are not completed, in list order
    pub fn pending_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.completed).collect()
    }

    /// Tasks that are completed, in list order
    pub fn completed_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.completed).collect()
    }

    /// Returns `(completed, total)` task counts
    pub fn progress(&self) -> (usize, usize) {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        (completed, self.tasks.len())
    }
}

fn or_generated_id<'de, D>(deserializer: D) -> Result<ListId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ListId>::deserialize(deserializer)?.unwrap_or_else(ListId::generate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_list() -> TodoList {
        let mut list = TodoList::new("Groceries".to_string());
        list.add_task("Milk".to_string());
        list.add_task("Eggs".to_string());
        list.add_task("Bread".to_string());
        list
    }

    #[test]
    fn test_list_creation() {
        let list = TodoList::new("Work".to_string());
        assert_eq!(list.name, "Work");
        assert!(list.tasks.is_empty());
        assert!(Uuid::parse_str(list.id.as_str()).is_ok());
    }

    #[test]
    fn test_add_task_preserves_order() {
        let list = sample_list();
        let titles: Vec<&str> = list.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Milk", "Eggs", "Bread"]);
    }

    #[test]
    fn test_get_and_remove_task() {
        let mut list = sample_list();
        let id = list.tasks[1].id.clone();

        assert_eq!(list.get_task(&id).unwrap().title, "Eggs");

        let removed = list.remove_task(&id).unwrap();
        assert_eq!(removed.title, "Eggs");
        assert!(list.get_task(&id).is_none());
        assert!(list.remove_task(&id).is_none());
        assert_eq!(list.tasks.len(), 2);
    }

    #[test]
    fn test_pending_and_completed_views_keep_order() {
        let mut list = sample_list();
        let milk = list.tasks[0].id.clone();
        let bread = list.tasks[2].id.clone();
        list.get_task_mut(&milk).unwrap().toggle();
        list.get_task_mut(&bread).unwrap().toggle();

        let pending: Vec<&str> = list.pending_tasks().into_iter().map(|t| t.title.as_str()).collect();
        let completed: Vec<&str> = list
            .completed_tasks()
            .into_iter()
            .map(|t| t.title.as_str())
            .collect();

        assert_eq!(pending, vec!["Eggs"]);
        assert_eq!(completed, vec!["Milk", "Bread"]);

        // Toggling does not reorder the underlying sequence
        assert_eq!(list.tasks[0].title, "Milk");
        assert_eq!(list.tasks[2].title, "Bread");
    }

    #[test]
    fn test_progress() {
        let mut list = sample_list();
        assert_eq!(list.progress(), (0, 3));

        let id = list.tasks[0].id.clone();
        list.get_task_mut(&id).unwrap().toggle();
        assert_eq!(list.progress(), (1, 3));

        assert_eq!(TodoList::new("Empty".to_string()).progress(), (0, 0));
    }

    #[test]
    fn test_missing_list_fields_are_defaulted() {
        let list: TodoList = serde_json::from_str(r#"{"tasks": [{"title": "a"}]}"#).unwrap();
        assert!(!list.id.as_str().is_empty());
        assert_eq!(list.name, "");
        assert_eq!(list.tasks.len(), 1);
        assert_eq!(list.tasks[0].title, "a");
    }

    #[test]
    fn test_list_roundtrip() {
        let list = sample_list();
        let json = serde_json::to_string_pretty(&list).unwrap();
        let back: TodoList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }
}
