//! Storage abstractions for service layer
//!
//! Every operation works on the whole collection: `load` reads all records,
//! `save` replaces all records. Backends hold no cache between calls.

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod json_file_store;
pub mod memory_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

/// Whole-collection persistence for an ordered list of records.
#[async_trait]
pub trait CollectionStore<T>: Send + Sync
where
    T: Send + Sync,
{
    /// Read the full collection. Read or decode failures are logged by the
    /// backend and yield an empty collection.
    async fn load(&self) -> Vec<T>;

    /// Replace the full collection.
    async fn save(&self, items: &[T]) -> Result<(), ServiceError>;
}
