use crate::domain::model::State;
use crate::domain::ports::StateStore;
use crate::utils::error::{InventoryError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use tokio::io::AsyncWriteExt;

pub const DEFAULT_STORE_PATH: &str = "contents.json";

/// The inventory as one pretty-printed JSON document on disk.
#[derive(Debug, Clone)]
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

    /// Sibling temp file so the final rename stays on one filesystem.
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string());
        let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S%f");
        let tmp_name = format!(".{}.{}.{}.tmp", file_name, std::process::id(), stamp);

        match self.path.parent() {
            Some(parent) => parent.join(tmp_name),
            None => PathBuf::from(tmp_name),
        }
    }

    fn write_error(&self, source: std::io::Error) -> InventoryError {
        InventoryError::StoreWriteError {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load(&self) -> Result<State> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| InventoryError::StoreReadError {
                path: self.path.clone(),
                source,
            })?;

        serde_json::from_slice(&raw).map_err(|source| InventoryError::StoreParseError {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, state: &State) -> Result<()> {
        tracing::debug!("Writing to file: {}", self.path.display());
        let content = serde_json::to_string_pretty(state)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.write_error(e))?;
            }
        }

        let tmp_path = self.temp_path();
        let write_result = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(content.as_bytes()).await?;
            file.flush().await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp_path, &self.path).await
        }
        .await;

        if let Err(e) = write_result {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            tracing::error!("Error writing file {}: {}", self.path.display(), e);
            return Err(self.write_error(e));
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Process-local store, handy for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<Option<State>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    /// An empty store; `load` fails until something is saved.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: State) -> Self {
        Self {
            state: RwLock::new(Some(state)),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn poisoned() -> InventoryError {
        InventoryError::IoError(std::io::Error::other("memory store lock poisoned"))
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> Result<State> {
        let guard = self.state.read().map_err(|_| Self::poisoned())?;
        guard.clone().ok_or_else(|| InventoryError::StoreReadError {
            path: PathBuf::from("memory"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no state saved yet"),
        })
    }

    async fn save(&self, state: &State) -> Result<()> {
        let mut guard = self.state.write().map_err(|_| Self::poisoned())?;
        *guard = Some(state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
