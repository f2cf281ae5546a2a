pub mod form;
pub mod rest;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::service::NoteService;

pub fn router(service: Arc<NoteService>) -> Router {
    // HTML form router config
    let form_router = Router::new()
        .route("/", get(form::index))
        .route("/save_note", post(form::save_note))
        .route("/edit_note", get(form::edit_note))
        .route("/update_note", post(form::update_note))
        .route("/delete_note", get(form::delete_note))
        .route("/all_notes", get(form::all_notes))
        .with_state(service.clone());

    // REST router config
    let rest_router = Router::new()
        .route("/notes", post(rest::create_note))
        .route("/notes", get(rest::get_all_notes))
        .route("/notes/{id}", get(rest::get_one_note))
        .route("/notes/{id}", put(rest::update_note))
        .route("/notes/{id}", delete(rest::delete_note))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .config(utoipa_swagger_ui::Config::new([
                    "/rest/api-doc/openapi.json",
                ]))
                .url("/api-doc/openapi.json", rest::ApiDoc::openapi()),
        )
        .with_state(service);

    form_router
        .nest("/rest", rest_router)
        .layer(TraceLayer::new_for_http())
}
