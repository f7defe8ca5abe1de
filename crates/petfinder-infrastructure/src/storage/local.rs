//! Object store writing to a directory on disk

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, error};

use petfinder_core::error::DomainError;
use petfinder_core::storage::ObjectStore;
use petfinder_shared::utils::join_url;

/// Files land under `root/<path>`; the server exposes `root` at `public_base_url`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self { root: root.into(), public_base_url: public_base_url.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, DomainError> {
        let relative = Path::new(path);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || path.is_empty() {
            return Err(DomainError::Storage(format!("invalid object path: {}", path)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, _content_type: &str) -> Result<(), DomainError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                error!("Failed to create {}: {}", parent.display(), e);
                DomainError::Storage(e.to_string())
            })?;
        }

        tokio::fs::write(&target, bytes).await.map_err(|e| {
            error!("Failed to write {}: {}", target.display(), e);
            DomainError::Storage(e.to_string())
        })?;

        debug!("Stored {}", target.display());
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), DomainError> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!("Failed to remove {}: {}", target.display(), e);
                Err(DomainError::Storage(e.to_string()))
            }
        }
    }

    fn public_url(&self, path: &str) -> String {
        join_url(&self.public_base_url, path)
    }
}
