use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::NoteRepository;
use crate::{error::RepositoryError, models::Note};

#[derive(Debug)]
struct State {
    next_id: i64,
    notes: BTreeMap<i64, Note>,
}

/// Process-local store. Every operation runs under a single lock guard,
/// which makes it atomic with respect to the other operations.
#[derive(Debug)]
pub struct MemoryRepository {
    state: RwLock<State>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                next_id: 1,
                notes: BTreeMap::new(),
            }),
        }
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NoteRepository for MemoryRepository {
    async fn create(
        &self,
        title: String,
        content: String,
        added_date: DateTime<Utc>,
    ) -> Result<Note, RepositoryError> {
        let mut state = self.state.write().await;

        let id = state.next_id;
        state.next_id += 1;

        let note = Note {
            id,
            title,
            content,
            added_date,
        };
        state.notes.insert(id, note.clone());

        Ok(note)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Note>, RepositoryError> {
        Ok(self.state.read().await.notes.get(&id).cloned())
    }

    async fn update(
        &self,
        id: i64,
        title: String,
        content: String,
        added_date: DateTime<Utc>,
    ) -> Result<Option<Note>, RepositoryError> {
        let mut state = self.state.write().await;

        let Some(note) = state.notes.get_mut(&id) else {
            return Ok(None);
        };

        note.title = title;
        note.content = content;
        note.added_date = added_date;

        Ok(Some(note.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.state.write().await.notes.remove(&id).is_some())
    }

    async fn get_all(&self) -> Result<Vec<Note>, RepositoryError> {
        Ok(self.state.read().await.notes.values().cloned().collect())
    }

    async fn shutdown(&self) {
        let count = self.state.read().await.notes.len();
        tracing::info!("In-memory store shut down, discarding {} notes", count);
    }
}
