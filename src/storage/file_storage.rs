use crate::{
    domain::TodoList,
    error::Result,
    storage::{LoadOutcome, Recovery, Storage, TodoDocument, TodoDocumentRef},
};
use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error, warn};
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

/// File-based storage: one pretty-printed JSON document per data directory
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const DATA_FILE: &'static str = "data.json";

    /// Creates a new FileStorage rooted at the given data directory
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root_path: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the data file
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Path of the persisted JSON document
    pub fn data_file(&self) -> PathBuf {
        self.root_path.join(Self::DATA_FILE)
    }

    fn temp_file(&self) -> PathBuf {
        self.root_path
            .join(format!(".{}.{}.tmp", Self::DATA_FILE, Uuid::new_v4()))
    }

    fn backup_file(&self) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        let tag = Uuid::new_v4().simple().to_string();
        self.root_path
            .join(format!("{}.corrupt-{}-{}", Self::DATA_FILE, stamp, &tag[..8]))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Writes `bytes` to a fresh temp file and renames it over the data file.
    /// The temp file is removed if any step fails.
    async fn write_atomically(&self, bytes: &[u8]) -> Result<()> {
        let temp_path = self.temp_file();

        let written: std::io::Result<()> = async {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&temp_path)
                .await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&temp_path, self.data_file()).await
        }
        .await;

        if let Err(err) = written {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!(
                        "event=temp_cleanup module=storage status=error kind={:?}",
                        cleanup.kind()
                    );
                }
            }
            error!(
                "event=store_write module=storage status=error kind={:?}",
                err.kind()
            );
            return Err(err.into());
        }

        Ok(())
    }

    /// Copies an unreadable data file aside so a later save cannot destroy it.
    /// A backup with identical bytes is reused instead of writing another copy.
    async fn backup_unreadable(&self) -> Option<PathBuf> {
        let contents = match fs::read(self.data_file()).await {
            Ok(contents) => contents,
            Err(err) => {
                warn!(
                    "event=corrupt_backup module=storage status=error kind={:?}",
                    err.kind()
                );
                return None;
            }
        };

        if let Some(existing) = self.find_backup_matching(&contents).await {
            debug!("event=corrupt_backup module=storage status=reused");
            return Some(existing);
        }

        let backup = self.backup_file();
        match fs::write(&backup, &contents).await {
            Ok(()) => Some(backup),
            Err(err) => {
                warn!(
                    "event=corrupt_backup module=storage status=error kind={:?}",
                    err.kind()
                );
                None
            }
        }
    }

    async fn find_backup_matching(&self, contents: &[u8]) -> Option<PathBuf> {
        let prefix = format!("{}.corrupt-", Self::DATA_FILE);
        let mut entries = fs::read_dir(&self.root_path).await.ok()?;

        while let Ok(Some(entry)) = entries.next_entry().await {
            let is_backup = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&prefix));
            if !is_backup {
                continue;
            }
            let path = entry.path();
            if fs::read(&path).await.is_ok_and(|bytes| bytes == contents) {
                return Some(path);
            }
        }
        None
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await
    }

    async fn load(&self) -> Result<LoadOutcome> {
        let data_file = self.data_file();

        if !data_file.exists() {
            debug!("event=store_load module=storage status=missing");
            return Ok(LoadOutcome::Missing);
        }

        let parsed = match fs::read(&data_file).await {
            Ok(bytes) => {
                serde_json::from_slice::<TodoDocument>(&bytes).map_err(|e| e.to_string())
            }
            Err(err) => Err(err.to_string()),
        };

        match parsed {
            Ok(document) => {
                debug!(
                    "event=store_load module=storage status=ok lists={}",
                    document.lists.len()
                );
                Ok(LoadOutcome::Loaded(document))
            }
            Err(reason) => {
                let backup = self.backup_unreadable().await;
                warn!(
                    "event=store_load module=storage status=unreadable backup={}",
                    backup
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "none".to_string())
                );
                Ok(LoadOutcome::Unreadable(Recovery { reason, backup }))
            }
        }
    }

    async fn save(&self, lists: &[TodoList]) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_vec_pretty(&TodoDocumentRef { lists })?;
        self.write_atomically(&json).await?;

        debug!(
            "event=store_save module=storage status=ok lists={} bytes={}",
            lists.len(),
            json.len()
        );
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.data_file().exists()
    }
}
