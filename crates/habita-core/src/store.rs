//! The task store collaborator: a durable record set the engine reads
//! and writes back whole. Implementations must treat both directions as
//! all-or-nothing per request; serialization of concurrent requests is
//! the engine's job, not the store's.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::error::CoreError;
use crate::models::DataSet;

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn load(&self) -> Result<DataSet, CoreError>;
    async fn save(&self, data: &DataSet) -> Result<(), CoreError>;
}

/// JSON file store. A missing or empty file loads as an empty data set;
/// a corrupt file is renamed to a timestamped `.backup_*` sibling and
/// likewise loads empty, so one bad write never wedges the engine.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn quarantine_corrupt_file(&self) {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let backup = self
            .path
            .with_file_name(format!(
                "{}.backup_{stamp}",
                self.path.file_name().and_then(|n| n.to_str()).unwrap_or("data.json")
            ));
        // Best effort: losing the backup is acceptable, blocking the
        // engine on it is not.
        let _ = tokio::fs::rename(&self.path, backup).await;
    }
}

#[async_trait]
impl TaskStore for JsonFileStore {
    async fn load(&self) -> Result<DataSet, CoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(DataSet::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(DataSet::default());
        }

        match serde_json::from_str(&content) {
            Ok(data) => Ok(data),
            Err(_) => {
                self.quarantine_corrupt_file().await;
                Ok(DataSet::default())
            }
        }
    }

    async fn save(&self, data: &DataSet) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(data)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<DataSet>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: DataSet) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn load(&self) -> Result<DataSet, CoreError> {
        Ok(self.data.lock().await.clone())
    }

    async fn save(&self, data: &DataSet) -> Result<(), CoreError> {
        *self.data.lock().await = data.clone();
        Ok(())
    }
}
