use axum::http::StatusCode;

/// Failures of the storage layer itself.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),

    #[error("store has been shut down")]
    Closed,
}

/// Errors surfaced by note operations and mapped to HTTP statuses at the
/// handler boundary.
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("missing required parameter '{0}'")]
    ParameterMissing(&'static str),

    #[error("parameter '{name}' must be an integer, got '{value}'")]
    ParameterInvalid { name: &'static str, value: String },

    #[error("note {0} not found")]
    NotFound(i64),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl NoteError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ParameterMissing(_) | Self::ParameterInvalid { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
