use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::NoteRepository;
use crate::{error::RepositoryError, models::Note};

/// Store whose every operation fails, as a closed connection would.
pub struct FailingRepository;

#[async_trait]
impl NoteRepository for FailingRepository {
    async fn create(
        &self,
        _title: String,
        _content: String,
        _added_date: DateTime<Utc>,
    ) -> Result<Note, RepositoryError> {
        Err(RepositoryError::Closed)
    }

    async fn get_by_id(&self, _id: i64) -> Result<Option<Note>, RepositoryError> {
        Err(RepositoryError::Closed)
    }

    async fn update(
        &self,
        _id: i64,
        _title: String,
        _content: String,
        _added_date: DateTime<Utc>,
    ) -> Result<Option<Note>, RepositoryError> {
        Err(RepositoryError::Closed)
    }

    async fn delete(&self, _id: i64) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Closed)
    }

    async fn get_all(&self) -> Result<Vec<Note>, RepositoryError> {
        Err(RepositoryError::Closed)
    }

    async fn shutdown(&self) {}
}
