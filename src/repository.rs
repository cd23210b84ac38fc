//! The storage capability the entries controller is written against.

use crate::db::DbActorHandle;
use crate::error::FrogError;
use async_trait::async_trait;
use fitnessfrog_schema::{Entry, NewEntry};

/// Get-all, get-by-id, add, update and delete over activity entries.
///
/// Handlers only see `Arc<dyn EntryRepository>`, so tests can swap the
/// SQLite-backed actor for an in-memory fake.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Every entry, newest date first (ties broken by newest id).
    async fn entries(&self) -> Result<Vec<Entry>, FrogError>;

    async fn entry(&self, id: i64) -> Result<Option<Entry>, FrogError>;

    /// Persists a new entry; the repository assigns its id.
    async fn add_entry(&self, entry: NewEntry) -> Result<Entry, FrogError>;

    /// Full replace. Fails with `EntryNotFound` when `entry.id` is unknown.
    async fn update_entry(&self, entry: Entry) -> Result<(), FrogError>;

    /// Hard delete. Unknown ids are a no-op.
    async fn delete_entry(&self, id: i64) -> Result<(), FrogError>;
}

#[async_trait]
impl EntryRepository for DbActorHandle {
    async fn entries(&self) -> Result<Vec<Entry>, FrogError> {
        self.list_entries().await
    }

    async fn entry(&self, id: i64) -> Result<Option<Entry>, FrogError> {
        self.get_entry(id).await
    }

    async fn add_entry(&self, entry: NewEntry) -> Result<Entry, FrogError> {
        DbActorHandle::add_entry(self, entry).await
    }

    async fn update_entry(&self, entry: Entry) -> Result<(), FrogError> {
        DbActorHandle::update_entry(self, entry).await
    }

    async fn delete_entry(&self, id: i64) -> Result<(), FrogError> {
        DbActorHandle::delete_entry(self, id).await
    }
}
