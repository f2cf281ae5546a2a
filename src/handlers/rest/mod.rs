use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    error::NoteError,
    service::NoteService,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        create_note,
        update_note,
        delete_note,
        get_one_note,
        get_all_notes
    ),
    components(schemas(NoteResponse, CreateNoteRequest, UpdateNoteRequest)),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

fn error_response(action: &str, e: &NoteError) -> Response {
    match e {
        NoteError::NotFound(_) => (StatusCode::NOT_FOUND, "Note not found").into_response(),
        NoteError::Storage(_) => {
            tracing::error!("failed to {} note entry: {}", action, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to {action} note"),
            )
                .into_response()
        }
        _ => (e.status_code(), e.to_string()).into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    Json(payload): Json<CreateNoteRequest>,
) -> Response {
    match service.create_note(payload.title, payload.content).await {
        Ok(note) => (StatusCode::CREATED, Json(NoteResponse::from(note))).into_response(),
        Err(e) => error_response("create", &e),
    }
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateNoteRequest>,
) -> Response {
    match service.update_note(id, payload.title, payload.content).await {
        Ok(note) => (StatusCode::OK, Json(NoteResponse::from(note))).into_response(),
        Err(e) => error_response("update", &e),
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted successfully"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(State(service): State<Arc<NoteService>>, Path(id): Path<i64>) -> Response {
    match service.delete_note(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response("delete", &e),
    }
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
) -> Response {
    match service.get_note(id).await {
        Ok(note) => (StatusCode::OK, Json(NoteResponse::from(note))).into_response(),
        Err(e) => error_response("get", &e),
    }
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "List of all notes ordered by id", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.list_notes().await {
        Ok(notes) => (
            StatusCode::OK,
            Json(
                notes
                    .into_iter()
                    .map(NoteResponse::from)
                    .collect::<Vec<_>>(),
            ),
        )
            .into_response(),
        Err(e) => error_response("list", &e),
    }
}
