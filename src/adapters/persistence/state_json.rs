//! Implements SnapshotPort using a JSON file.
//!
//! The whole state (groups, scoped entities, history) lives in one document.

use crate::domain::{AppState, DomainError};
use crate::ports::SnapshotPort;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// JSON file-based snapshot storage.
pub struct StateJson {
    path: PathBuf,
}

impl StateJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl SnapshotPort for StateJson {
    /// Missing file means no snapshot yet. A file that cannot be read or decoded is an error,
    /// so a damaged snapshot is never silently replaced by an empty one.
    async fn load(&self) -> Result<Option<AppState>, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::State(format!(
                    "read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };
        let state = serde_json::from_str(&raw).map_err(|e| {
            DomainError::State(format!("decode {}: {}", self.path.display(), e))
        })?;
        Ok(Some(state))
    }

    /// Atomic save using write-replace:
    /// 1. Write to temp file
    /// 2. sync_all() to flush to disk
    /// 3. Rename over the target path
    async fn save(&self, state: &AppState) -> Result<(), DomainError> {
        let json =
            serde_json::to_string_pretty(state).map_err(|e| DomainError::State(e.to_string()))?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| DomainError::State(format!("create data dir: {}", e)))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::State(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::State(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::State(format!("sync temp file: {}", e)))?;
        drop(f);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::State(format!("atomic rename failed: {}", e)))?;

        info!(
            path = %self.path.display(),
            version = state.version,
            bytes = json.len(),
            "saved snapshot"
        );
        Ok(())
    }
}
