use chrono::Utc;

use std::sync::Arc;

use crate::{error::NoteError, models::Note, repository::NoteRepository};

/// Trims and parses an identifier parameter taken from a form or query string.
pub fn parse_note_id(name: &'static str, raw: Option<&str>) -> Result<i64, NoteError> {
    let raw = raw.ok_or(NoteError::ParameterMissing(name))?;
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(NoteError::ParameterMissing(name));
    }

    trimmed.parse::<i64>().map_err(|_| NoteError::ParameterInvalid {
        name,
        value: trimmed.to_string(),
    })
}

/// Unwraps a required text parameter.
pub fn require(name: &'static str, value: Option<String>) -> Result<String, NoteError> {
    value.ok_or(NoteError::ParameterMissing(name))
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_note(&self, title: String, content: String) -> Result<Note, NoteError> {
        let note = self.repo.create(title, content, Utc::now()).await?;
        tracing::info!("Created note {}", note.id);
        Ok(note)
    }

    pub async fn get_note(&self, id: i64) -> Result<Note, NoteError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(NoteError::NotFound(id))
    }

    pub async fn update_note(
        &self,
        id: i64,
        title: String,
        content: String,
    ) -> Result<Note, NoteError> {
        let note = self
            .repo
            .update(id, title, content, Utc::now())
            .await?
            .ok_or(NoteError::NotFound(id))?;
        tracing::info!("Updated note {}", id);
        Ok(note)
    }

    pub async fn delete_note(&self, id: i64) -> Result<(), NoteError> {
        if !self.repo.delete(id).await? {
            return Err(NoteError::NotFound(id));
        }
        tracing::info!("Deleted note {}", id);
        Ok(())
    }

    pub async fn list_notes(&self) -> Result<Vec<Note>, NoteError> {
        Ok(self.repo.get_all().await?)
    }

    pub async fn shutdown(&self) {
        self.repo.shutdown().await;
    }
}
