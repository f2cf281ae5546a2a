use chrono::{DateTime, Utc};

/// A persisted note. `added_date` is rewritten on every update, so it
/// reflects the last time the note was saved rather than its creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub added_date: DateTime<Utc>,
}
