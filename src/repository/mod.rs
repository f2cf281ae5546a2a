mod embedded;
#[cfg(test)]
mod failing;
mod memory;
mod postgres;

#[cfg(test)]
pub use failing::FailingRepository;
pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{error::RepositoryError, models::Note};

/// Durable CRUD access to notes.
///
/// Each call is one transactional scope: it either commits completely or
/// leaves the store untouched. `None`/`false` results mean the id did not
/// resolve to a record. Concurrent writes to the same id are not locked
/// against each other, the last one to commit wins.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create(
        &self,
        title: String,
        content: String,
        added_date: DateTime<Utc>,
    ) -> Result<Note, RepositoryError>;

    async fn get_by_id(&self, id: i64) -> Result<Option<Note>, RepositoryError>;

    async fn update(
        &self,
        id: i64,
        title: String,
        content: String,
        added_date: DateTime<Utc>,
    ) -> Result<Option<Note>, RepositoryError>;

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    /// All notes in ascending id order.
    async fn get_all(&self) -> Result<Vec<Note>, RepositoryError>;

    /// Releases the underlying connection. Called once, after the server
    /// has stopped accepting requests.
    async fn shutdown(&self);
}
