use std::{marker::PhantomData, path::{Path, PathBuf}, sync::Arc};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::{debug, error};

use super::CollectionStore;
use crate::errors::ServiceError;

/// JSON file-backed collection store.
///
/// Persists a `Vec<T>` as a pretty-printed JSON array and re-reads the file on
/// every `load`. There is no lock around load/save: two concurrent writers
/// each rewrite the file from their own snapshot and the last write wins.
pub struct JsonFileStore<T> {
    file_path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// Initialize the store from a path. Creates the file with an empty array if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
        }

        if fs::metadata(&file_path).await.is_err() {
            fs::write(&file_path, b"[]").await.map_err(ServiceError::storage)?;
            debug!(path = %file_path.display(), "created empty collection file");
        }

        Ok(Arc::new(Self { file_path, _records: PhantomData }))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl<T> CollectionStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> Vec<T> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(path = %self.file_path.display(), error = %e, "failed to read collection file");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(e) => {
                error!(path = %self.file_path.display(), error = %e, "failed to decode collection file");
                Vec::new()
            }
        }
    }

    async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items).map_err(ServiceError::storage)?;
        fs::write(&self.file_path, data).await.map_err(|e| {
            error!(path = %self.file_path.display(), error = %e, "failed to write collection file");
            ServiceError::storage(e)
        })
    }
}
