use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CollectionStore;
use crate::errors::ServiceError;

/// In-memory collection store for tests and throwaway runs.
///
/// `set_fail_writes(true)` makes every `save` fail, mimicking a storage
/// outage without touching the filesystem.
pub struct MemoryStore<T> {
    items: RwLock<Vec<T>>,
    fail_writes: AtomicBool,
}

impl<T> MemoryStore<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(items: Vec<T>) -> Arc<Self> {
        Arc::new(Self { items: RwLock::new(items), fail_writes: AtomicBool::new(false) })
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current contents without going through the trait.
    pub async fn snapshot(&self) -> Vec<T> {
        self.items.read().await.clone()
    }
}

#[async_trait]
impl<T> CollectionStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync,
{
    async fn load(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ServiceError::Storage("memory store is read-only".into()));
        }
        *self.items.write().await = items.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_replaces_contents_unless_failing() {
        let store = MemoryStore::new(vec![1u32, 2, 3]);
        assert_eq!(store.load().await, vec![1, 2, 3]);

        store.save(&[9]).await.unwrap();
        assert_eq!(store.snapshot().await, vec![9]);

        store.set_fail_writes(true);
        assert!(matches!(store.save(&[1]).await, Err(ServiceError::Storage(_))));
        assert_eq!(store.snapshot().await, vec![9]);
    }
}
