//! The single owner of the list collection.
//!
//! Every mutation goes through [`Store`], which validates input, applies the
//! change in memory and persists the whole collection before returning. When
//! the save fails the in-memory change is rolled back, so memory and disk
//! agree after every call.

use crate::{
    config::StoreConfig,
    domain::{
        naming, sanitize, ListId, Task, TaskId, TodoList, MAX_LIST_NAME_LENGTH,
        MAX_TASK_TITLE_LENGTH,
    },
    error::{Result, TodoError},
    logging::init_logging,
    storage::{FileStorage, LoadOutcome, Recovery, Storage},
};
use log::{debug, info, warn};
use std::path::PathBuf;

/// In-memory collection of lists backed by a [`Storage`]
pub struct Store<S: Storage = FileStorage> {
    storage: S,
    lists: Vec<TodoList>,
    recovery: Option<Recovery>,
}

impl Store<FileStorage> {
    /// Opens the file-backed store described by `config`, starting file
    /// logging first when `config.log_to_file` is set
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let data_dir = config.resolve_data_dir()?;
        if config.log_to_file {
            init_logging(&config.log_level, config.log_dir()?)
                .map_err(|err| TodoError::ConfigError(format!("{err:#}")))?;
        }
        info!(
            "event=store_open module=store status=start data_dir={}",
            data_dir.display()
        );
        Self::with_storage(FileStorage::new(data_dir)).await
    }

    /// Path of the persisted JSON document
    pub fn data_file(&self) -> PathBuf {
        self.storage.data_file()
    }
}

impl<S: Storage> Store<S> {
    /// Initializes `storage` and loads its collection
    pub async fn with_storage(storage: S) -> Result<Self> {
        storage.initialize().await?;
        let mut store = Self {
            storage,
            lists: Vec::new(),
            recovery: None,
        };
        store.load().await?;
        Ok(store)
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// A missing file gives an empty collection. An unreadable file also gives
    /// an empty collection; the details are kept in [`Store::recovery`].
    pub async fn load(&mut self) -> Result<()> {
        match self.storage.load().await? {
            LoadOutcome::Missing => {
                self.lists = Vec::new();
                self.recovery = None;
            }
            LoadOutcome::Loaded(document) => {
                self.lists = document.lists;
                self.recovery = None;
            }
            LoadOutcome::Unreadable(recovery) => {
                warn!(
                    "event=store_reset module=store status=recovered backup={}",
                    recovery.backup.is_some()
                );
                self.lists = Vec::new();
                self.recovery = Some(recovery);
            }
        }
        info!(
            "event=store_load module=store status=ok lists={}",
            self.lists.len()
        );
        Ok(())
    }

    /// Set when the last load discarded an unreadable file
    pub fn recovery(&self) -> Option<&Recovery> {
        self.recovery.as_ref()
    }

    /// Persists the current collection
    pub async fn save(&self) -> Result<()> {
        self.storage.save(&self.lists).await
    }

    /// Saves after a mutation, restoring `previous` if the save fails
    async fn commit(&mut self, previous: Vec<TodoList>) -> Result<()> {
        if let Err(err) = self.save().await {
            warn!("event=store_commit module=store status=rolled_back");
            self.lists = previous;
            return Err(err);
        }
        Ok(())
    }

    fn list_index(&self, list_id: &ListId) -> Result<usize> {
        self.lists
            .iter()
            .position(|l| &l.id == list_id)
            .ok_or_else(|| TodoError::ListNotFound(list_id.to_string()))
    }

    fn task_mut(&mut self, list_id: &ListId, task_id: &TaskId) -> Result<&mut Task> {
        let index = self.list_index(list_id)?;
        self.lists[index]
            .get_task_mut(task_id)
            .ok_or_else(|| TodoError::TaskNotFound(task_id.to_string()))
    }

    // Lists

    /// Returns a copy of every list, in order
    pub fn get_lists(&self) -> Vec<TodoList> {
        self.lists.clone()
    }

    /// Returns a copy of one list
    pub fn get_list(&self, list_id: &ListId) -> Option<TodoList> {
        self.lists.iter().find(|l| &l.id == list_id).cloned()
    }

    /// Creates a list.
    ///
    /// Without a usable name the list is auto-named `"List N"`. A name that
    /// collides with an existing one (ignoring case) gets a `" (k)"` suffix.
    pub async fn create_list(&mut self, name: Option<&str>) -> Result<TodoList> {
        let sanitized = name
            .map(|n| sanitize(n, MAX_LIST_NAME_LENGTH))
            .unwrap_or_default();

        let name = if sanitized.is_empty() {
            naming::next_auto_name(&self.lists)
        } else {
            naming::unique_name(&sanitized, &self.lists)
        };

        let list = TodoList::new(name);
        let previous = self.lists.clone();
        self.lists.push(list.clone());
        self.commit(previous).await?;

        debug!(
            "event=list_create module=store status=ok list_id={}",
            list.id
        );
        Ok(list)
    }

    /// Deletes a list and all of its tasks, returning the removed list
    pub async fn delete_list(&mut self, list_id: &ListId) -> Result<TodoList> {
        let index = self.list_index(list_id)?;
        let previous = self.lists.clone();
        let removed = self.lists.remove(index);
        self.commit(previous).await?;

        debug!(
            "event=list_delete module=store status=ok list_id={} tasks={}",
            removed.id,
            removed.tasks.len()
        );
        Ok(removed)
    }

    /// Renames a list.
    ///
    /// Fails with [`TodoError::EmptyListName`] when nothing survives
    /// sanitization and [`TodoError::DuplicateListName`] when another list
    /// already uses the name (ignoring case).
    pub async fn rename_list(&mut self, list_id: &ListId, new_name: &str) -> Result<TodoList> {
        let index = self.list_index(list_id)?;

        let name = sanitize(new_name, MAX_LIST_NAME_LENGTH);
        if name.is_empty() {
            return Err(TodoError::EmptyListName);
        }
        if naming::is_name_taken(&name, self.lists.iter().filter(|l| &l.id != list_id)) {
            return Err(TodoError::DuplicateListName(name));
        }

        let previous = self.lists.clone();
        self.lists[index].name = name;
        self.commit(previous).await?;

        debug!(
            "event=list_rename module=store status=ok list_id={}",
            list_id
        );
        Ok(self.lists[index].clone())
    }

    // Tasks

    /// Returns a copy of one task
    pub fn get_task(&self, list_id: &ListId, task_id: &TaskId) -> Option<Task> {
        self.lists
            .iter()
            .find(|l| &l.id == list_id)?
            .get_task(task_id)
            .cloned()
    }

    /// Appends a new pending task to a list
    pub async fn add_task(&mut self, list_id: &ListId, title: &str) -> Result<Task> {
        let index = self.list_index(list_id)?;

        let title = sanitize(title, MAX_TASK_TITLE_LENGTH);
        if title.is_empty() {
            return Err(TodoError::EmptyTaskTitle);
        }

        let previous = self.lists.clone();
        let task = self.lists[index].add_task(title).clone();
        self.commit(previous).await?;

        debug!(
            "event=task_add module=store status=ok list_id={} task_id={}",
            list_id, task.id
        );
        Ok(task)
    }

    /// Replaces a task's title
    pub async fn update_task(
        &mut self,
        list_id: &ListId,
        task_id: &TaskId,
        title: &str,
    ) -> Result<Task> {
        self.task_mut(list_id, task_id)?;

        let title = sanitize(title, MAX_TASK_TITLE_LENGTH);
        if title.is_empty() {
            return Err(TodoError::EmptyTaskTitle);
        }

        let previous = self.lists.clone();
        let task = self.task_mut(list_id, task_id)?;
        task.set_title(title);
        let task = task.clone();
        self.commit(previous).await?;

        debug!(
            "event=task_update module=store status=ok list_id={} task_id={}",
            list_id, task_id
        );
        Ok(task)
    }

    /// Removes a task, returning it
    pub async fn delete_task(&mut self, list_id: &ListId, task_id: &TaskId) -> Result<Task> {
        let index = self.list_index(list_id)?;
        let previous = self.lists.clone();
        let removed = self.lists[index]
            .remove_task(task_id)
            .ok_or_else(|| TodoError::TaskNotFound(task_id.to_string()))?;
        self.commit(previous).await?;

        debug!(
            "event=task_delete module=store status=ok list_id={} task_id={}",
            list_id, task_id
        );
        Ok(removed)
    }

    /// Flips a task between pending and completed
    pub async fn toggle_task(&mut self, list_id: &ListId, task_id: &TaskId) -> Result<Task> {
        self.task_mut(list_id, task_id)?;

        let previous = self.lists.clone();
        let task = self.task_mut(list_id, task_id)?;
        task.toggle();
        let task = task.clone();
        self.commit(previous).await?;

        debug!(
            "event=task_toggle module=store status=ok list_id={} task_id={} completed={}",
            list_id, task_id, task.completed
        );
        Ok(task)
    }
}
