use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Note;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// Time the note was created or last updated
    pub added_date: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            added_date: note.added_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
}

// Form payloads. Every field is optional so that a missing parameter reaches
// the service as a typed error instead of an extractor rejection.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveNoteForm {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNoteForm {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "noteId")]
    pub note_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteIdQuery {
    pub note_id: Option<String>,
}
